//! Schema-aware projection between [`Value`] and a looser `Object` tree.
//!
//! `to_object` never loses information: it returns a tree that still
//! carries the NBT kind of every leaf, so `from_object(to_object(v), v's
//! schema) == v` holds for any `v`. `from_object` is the direction that
//! needs a [`Schema`], since a bare integer literal is ambiguous between
//! `Byte`/`Short`/`Int`/`Long`.
//!
//! This machinery exists for building values like chat components, where
//! callers want to write `{"text": "hi", "bold": true}`-shaped data without
//! hand-assembling a [`Compound`].

use crate::compound::Compound;
use crate::error::{NbtError, Result};
use crate::value::{List, Value};

#[derive(Clone, Debug, PartialEq)]
pub enum Schema {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    ByteArray,
    IntArray,
    LongArray,
    List(Box<Schema>),
    Compound(Vec<(String, Schema)>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    ByteArray(Vec<i8>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    List(Vec<Object>),
    Compound(Vec<(String, Object)>),
}

/// Projects a [`Value`] into a kind-preserving [`Object`] tree.
pub fn to_object(value: &Value) -> Object {
    match value {
        Value::Byte(v) => Object::Byte(*v),
        Value::Short(v) => Object::Short(*v),
        Value::Int(v) => Object::Int(*v),
        Value::Long(v) => Object::Long(*v),
        Value::Float(v) => Object::Float(*v),
        Value::Double(v) => Object::Double(*v),
        Value::ByteArray(v) => Object::ByteArray(v.clone()),
        Value::String(v) => Object::String(v.clone()),
        Value::IntArray(v) => Object::IntArray(v.clone()),
        Value::LongArray(v) => Object::LongArray(v.clone()),
        Value::List(list) => Object::List(list_to_object(list)),
        Value::Compound(c) => {
            Object::Compound(c.iter().map(|(k, v)| (k.clone(), to_object(v))).collect())
        }
    }
}

fn list_to_object(list: &List) -> Vec<Object> {
    match list {
        List::End => Vec::new(),
        List::Byte(v) => v.iter().map(|x| Object::Byte(*x)).collect(),
        List::Short(v) => v.iter().map(|x| Object::Short(*x)).collect(),
        List::Int(v) => v.iter().map(|x| Object::Int(*x)).collect(),
        List::Long(v) => v.iter().map(|x| Object::Long(*x)).collect(),
        List::Float(v) => v.iter().map(|x| Object::Float(*x)).collect(),
        List::Double(v) => v.iter().map(|x| Object::Double(*x)).collect(),
        List::ByteArray(v) => v.iter().map(|x| Object::ByteArray(x.clone())).collect(),
        List::String(v) => v.iter().map(|x| Object::String(x.clone())).collect(),
        List::IntArray(v) => v.iter().map(|x| Object::IntArray(x.clone())).collect(),
        List::LongArray(v) => v.iter().map(|x| Object::LongArray(x.clone())).collect(),
        List::List(v) => v.iter().map(|x| Object::List(list_to_object(x))).collect(),
        List::Compound(v) => v
            .iter()
            .map(|c| Object::Compound(c.iter().map(|(k, x)| (k.clone(), to_object(x))).collect()))
            .collect(),
    }
}

/// Projects an [`Object`] tree into a [`Value`] according to `schema`,
/// disambiguating integer widths and list element kinds. Fails on a
/// duplicate compound key, a heterogeneous list, or a schema/data mismatch.
pub fn from_object(object: &Object, schema: &Schema) -> Result<Value> {
    Ok(match (object, schema) {
        (Object::Byte(v), Schema::Byte) => Value::Byte(*v),
        (Object::Short(v), Schema::Short) => Value::Short(*v),
        (Object::Int(v), Schema::Int) => Value::Int(*v),
        (Object::Long(v), Schema::Long) => Value::Long(*v),
        (Object::Float(v), Schema::Float) => Value::Float(*v),
        (Object::Double(v), Schema::Double) => Value::Double(*v),
        (Object::String(v), Schema::String) => Value::String(v.clone()),
        (Object::ByteArray(v), Schema::ByteArray) => Value::ByteArray(v.clone()),
        (Object::IntArray(v), Schema::IntArray) => Value::IntArray(v.clone()),
        (Object::LongArray(v), Schema::LongArray) => Value::LongArray(v.clone()),

        // Widening coercions: an `Object::Int` literal is allowed to satisfy
        // a wider/narrower numeric schema as long as the value fits, so
        // callers can write plain integer literals without picking a width
        // by hand.
        (Object::Int(v), Schema::Byte) => Value::Byte(
            i8::try_from(*v).map_err(|_| NbtError::OutOfRange)?,
        ),
        (Object::Int(v), Schema::Short) => Value::Short(
            i16::try_from(*v).map_err(|_| NbtError::OutOfRange)?,
        ),
        (Object::Int(v), Schema::Long) => Value::Long(*v as i64),
        (Object::Byte(v), Schema::Int) => Value::Int(*v as i32),
        (Object::Short(v), Schema::Int) => Value::Int(*v as i32),

        (Object::List(items), Schema::List(elem_schema)) => {
            Value::List(build_list(items, elem_schema)?)
        }
        (Object::Compound(fields), Schema::Compound(field_schemas)) => {
            let mut compound = Compound::new();
            for (key, value) in fields {
                if compound.contains_key(key.as_str()) {
                    return Err(NbtError::DuplicateKey(key.clone()));
                }
                let field_schema = field_schemas
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, s)| s)
                    .ok_or_else(|| NbtError::SchemaMismatch(format!("unexpected key \"{key}\"")))?;
                compound.insert(key.clone(), from_object(value, field_schema)?);
            }
            Value::Compound(compound)
        }
        _ => return Err(NbtError::SchemaMismatch("object shape does not match schema".into())),
    })
}

fn build_list(items: &[Object], elem_schema: &Schema) -> Result<List> {
    if items.is_empty() {
        return Ok(List::End);
    }

    let values: Vec<Value> = items
        .iter()
        .map(|item| from_object(item, elem_schema))
        .collect::<Result<_>>()?;

    let tag = values[0].tag();
    if !values.iter().all(|v| v.tag() == tag) {
        return Err(NbtError::HeterogeneousList);
    }

    macro_rules! collect {
        ($variant:ident) => {
            List::$variant(
                values
                    .into_iter()
                    .map(|v| match v {
                        Value::$variant(x) => x,
                        _ => unreachable!(),
                    })
                    .collect(),
            )
        };
    }

    Ok(match tag {
        crate::tag::Tag::Byte => collect!(Byte),
        crate::tag::Tag::Short => collect!(Short),
        crate::tag::Tag::Int => collect!(Int),
        crate::tag::Tag::Long => collect!(Long),
        crate::tag::Tag::Float => collect!(Float),
        crate::tag::Tag::Double => collect!(Double),
        crate::tag::Tag::ByteArray => collect!(ByteArray),
        crate::tag::Tag::String => collect!(String),
        crate::tag::Tag::IntArray => collect!(IntArray),
        crate::tag::Tag::LongArray => collect!(LongArray),
        crate::tag::Tag::Compound => collect!(Compound),
        crate::tag::Tag::List => List::List(
            values
                .into_iter()
                .map(|v| match v {
                    Value::List(x) => x,
                    _ => unreachable!(),
                })
                .collect(),
        ),
        crate::tag::Tag::End => unreachable!(),
    })
}
