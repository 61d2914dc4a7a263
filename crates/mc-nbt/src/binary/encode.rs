use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::compound::Compound;
use crate::error::{NbtError, Result};
use crate::mutf8;
use crate::tag::Tag;
use crate::value::{List, Value};

/// Writes a full named root tag: `tag byte || mutf8 name || payload`. This
/// is the framing vanilla uses for on-disk NBT and for the legacy
/// (pre-network-NBT) chat component encoding, where `root_name` is
/// conventionally the empty string.
pub fn to_binary(compound: &Compound, mut writer: impl Write, root_name: &str) -> Result<()> {
    write_io(writer.write_all(&[Tag::Compound as u8]))?;
    write_string(&mut writer, root_name)?;
    write_compound(&mut writer, compound)
}

/// Writes an unnamed root tag: `tag byte || payload`, with no name field.
/// Used by the network-NBT framing that carries play-phase text components.
pub fn to_binary_unnamed(compound: &Compound, mut writer: impl Write) -> Result<()> {
    write_io(writer.write_all(&[Tag::Compound as u8]))?;
    write_compound(&mut writer, compound)
}

fn write_io(r: std::io::Result<()>) -> Result<()> {
    r.map_err(|_| NbtError::TooLong(-1))
}

fn write_string(w: &mut impl Write, s: &str) -> Result<()> {
    let bytes = mutf8::encode(s);
    if bytes.len() > u16::MAX as usize {
        return Err(NbtError::TooLong(bytes.len() as i64));
    }
    write_io(w.write_u16::<BigEndian>(bytes.len() as u16))?;
    write_io(w.write_all(&bytes))
}

fn write_value(w: &mut impl Write, value: &Value) -> Result<()> {
    match value {
        Value::Byte(v) => write_io(w.write_i8(*v)),
        Value::Short(v) => write_io(w.write_i16::<BigEndian>(*v)),
        Value::Int(v) => write_io(w.write_i32::<BigEndian>(*v)),
        Value::Long(v) => write_io(w.write_i64::<BigEndian>(*v)),
        Value::Float(v) => write_io(w.write_f32::<BigEndian>(*v)),
        Value::Double(v) => write_io(w.write_f64::<BigEndian>(*v)),
        Value::ByteArray(v) => {
            if v.len() > i32::MAX as usize {
                return Err(NbtError::TooLong(v.len() as i64));
            }
            write_io(w.write_i32::<BigEndian>(v.len() as i32))?;
            for b in v {
                write_io(w.write_i8(*b))?;
            }
            Ok(())
        }
        Value::String(s) => write_string(w, s),
        Value::List(list) => write_list(w, list),
        Value::Compound(c) => write_compound(w, c),
        Value::IntArray(v) => {
            if v.len() > i32::MAX as usize {
                return Err(NbtError::TooLong(v.len() as i64));
            }
            write_io(w.write_i32::<BigEndian>(v.len() as i32))?;
            for x in v {
                write_io(w.write_i32::<BigEndian>(*x))?;
            }
            Ok(())
        }
        Value::LongArray(v) => {
            if v.len() > i32::MAX as usize {
                return Err(NbtError::TooLong(v.len() as i64));
            }
            write_io(w.write_i32::<BigEndian>(v.len() as i32))?;
            for x in v {
                write_io(w.write_i64::<BigEndian>(*x))?;
            }
            Ok(())
        }
    }
}

fn write_list(w: &mut impl Write, list: &List) -> Result<()> {
    write_io(w.write_u8(list.element_tag() as u8))?;

    fn write_count(w: &mut impl Write, len: usize) -> Result<()> {
        if len > i32::MAX as usize {
            return Err(NbtError::TooLong(len as i64));
        }
        write_io(w.write_i32::<BigEndian>(len as i32))
    }

    match list {
        List::End => write_io(w.write_i32::<BigEndian>(0))?,
        List::Byte(v) => {
            write_count(w, v.len())?;
            for x in v {
                write_io(w.write_i8(*x))?;
            }
        }
        List::Short(v) => {
            write_count(w, v.len())?;
            for x in v {
                write_io(w.write_i16::<BigEndian>(*x))?;
            }
        }
        List::Int(v) => {
            write_count(w, v.len())?;
            for x in v {
                write_io(w.write_i32::<BigEndian>(*x))?;
            }
        }
        List::Long(v) => {
            write_count(w, v.len())?;
            for x in v {
                write_io(w.write_i64::<BigEndian>(*x))?;
            }
        }
        List::Float(v) => {
            write_count(w, v.len())?;
            for x in v {
                write_io(w.write_f32::<BigEndian>(*x))?;
            }
        }
        List::Double(v) => {
            write_count(w, v.len())?;
            for x in v {
                write_io(w.write_f64::<BigEndian>(*x))?;
            }
        }
        List::ByteArray(v) => {
            write_count(w, v.len())?;
            for x in v {
                write_value(w, &Value::ByteArray(x.clone()))?;
            }
        }
        List::String(v) => {
            write_count(w, v.len())?;
            for x in v {
                write_string(w, x)?;
            }
        }
        List::List(v) => {
            write_count(w, v.len())?;
            for x in v {
                write_list(w, x)?;
            }
        }
        List::Compound(v) => {
            write_count(w, v.len())?;
            for x in v {
                write_compound(w, x)?;
            }
        }
        List::IntArray(v) => {
            write_count(w, v.len())?;
            for x in v {
                write_value(w, &Value::IntArray(x.clone()))?;
            }
        }
        List::LongArray(v) => {
            write_count(w, v.len())?;
            for x in v {
                write_value(w, &Value::LongArray(x.clone()))?;
            }
        }
    }

    Ok(())
}

fn write_compound(w: &mut impl Write, compound: &Compound) -> Result<()> {
    for (key, value) in compound.iter() {
        write_io(w.write_u8(value.tag() as u8))?;
        write_string(w, key)?;
        write_value(w, value)?;
    }
    write_io(w.write_u8(Tag::End as u8))
}
