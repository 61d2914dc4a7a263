//! A recursive binary tag tree ("NBT") with a schema-aware object
//! projection, as used throughout the Minecraft Java Edition protocol for
//! item data, chat components, and entity data.

mod binary;
mod compound;
mod error;
mod mutf8;
mod object;
mod tag;
mod value;

pub use binary::{from_binary, from_binary_unnamed, from_binary_unnamed_prefix, to_binary, to_binary_unnamed};
pub use compound::Compound;
pub use error::{NbtError, Result};
pub use object::{from_object, to_object, Object, Schema};
pub use tag::Tag;
pub use value::{List, Value};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_world_round_trips() {
        let bytes: Vec<u8> = vec![
            0x0A, 0x00, 0x0B, b'h', b'e', b'l', b'l', b'o', b' ', b'w', b'o', b'r', b'l', b'd',
            0x08, 0x00, 0x04, b'n', b'a', b'm', b'e', 0x00, 0x09, b'B', b'a', b'n', b'a', b'n',
            b'r', b'a', b'm', b'a', 0x00,
        ];

        let (name, value) = from_binary(&bytes).unwrap().unwrap();
        assert_eq!(name, "hello world");
        let Value::Compound(inner) = value else {
            panic!("expected compound")
        };
        assert_eq!(
            inner.get("name"),
            Some(&Value::String("Bananrama".to_owned()))
        );

        let mut out = Vec::new();
        to_binary(&inner, &mut out, &name).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn insertion_order_preserved() {
        let mut c = Compound::new();
        c.insert("z", 1i32);
        c.insert("a", 2i32);
        c.insert("m", 3i32);
        let keys: Vec<_> = c.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);

        let mut out = Vec::new();
        to_binary(&c, &mut out, "").unwrap();
        let (_, Value::Compound(round_tripped)) = from_binary(&out).unwrap().unwrap() else {
            panic!("expected compound")
        };
        let keys: Vec<_> = round_tripped.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn list_element_order_preserved() {
        let list = List::Int(vec![5, 4, 3, 2, 1]);
        let mut c = Compound::new();
        c.insert("l", list.clone());

        let mut out = Vec::new();
        to_binary(&c, &mut out, "").unwrap();
        let (_, Value::Compound(round_tripped)) = from_binary(&out).unwrap().unwrap() else {
            panic!()
        };
        assert_eq!(round_tripped.get("l"), Some(&Value::List(list)));
    }

    #[test]
    fn unknown_tag_byte_is_malformed() {
        let bytes = [200u8, 0x00, 0x00];
        assert!(matches!(
            from_binary(&bytes),
            Err(NbtError::UnknownTag(200))
        ));
    }

    #[test]
    fn negative_list_length_rejected() {
        let mut direct = vec![0x09u8]; // TAG_List root (unnamed)
        direct.push(Tag::Int as u8);
        direct.extend_from_slice(&(-1i32).to_be_bytes());
        assert!(from_binary_unnamed(&direct).is_err());
    }

    #[test]
    fn object_projection_round_trips() {
        let schema = Schema::Compound(vec![
            ("text".into(), Schema::String),
            ("bold".into(), Schema::Byte),
        ]);
        let object = Object::Compound(vec![
            ("text".into(), Object::String("hi".into())),
            ("bold".into(), Object::Byte(1)),
        ]);
        let value = from_object(&object, &schema).unwrap();
        let round_tripped = to_object(&value);
        assert_eq!(round_tripped, object);
    }

    #[test]
    fn unnamed_prefix_leaves_trailing_bytes_untouched() {
        let mut c = Compound::new();
        c.insert("a", 1i32);
        let mut out = Vec::new();
        to_binary_unnamed(&c, &mut out).unwrap();
        out.extend_from_slice(b"trailing");

        let mut slice = out.as_slice();
        let value = from_binary_unnamed_prefix(&mut slice).unwrap().unwrap();
        assert_eq!(value, Value::Compound(c));
        assert_eq!(slice, b"trailing");
    }

    #[test]
    fn object_projection_rejects_duplicate_keys() {
        let schema = Schema::Compound(vec![("a".into(), Schema::Int)]);
        let object = Object::Compound(vec![
            ("a".into(), Object::Int(1)),
            ("a".into(), Object::Int(2)),
        ]);
        assert!(from_object(&object, &schema).is_err());
    }
}
