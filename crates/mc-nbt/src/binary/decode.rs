use byteorder::{BigEndian, ReadBytesExt};

use crate::compound::Compound;
use crate::error::{NbtError, Result};
use crate::mutf8;
use crate::tag::Tag;
use crate::value::{List, Value};

const MAX_DEPTH: usize = 512;
/// Caps speculative preallocation for length-prefixed sequences so a
/// malicious count can't trigger a multi-gigabyte allocation before the
/// bytes backing it have even been checked to exist.
const MAX_PREALLOC: usize = 65536;

struct Cursor<'a> {
    bytes: &'a [u8],
    depth: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize, what: &'static str) -> Result<&'a [u8]> {
        if self.bytes.len() < n {
            return Err(NbtError::Truncated(what));
        }
        let (head, tail) = self.bytes.split_at(n);
        self.bytes = tail;
        Ok(head)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1, "u8")?[0])
    }

    fn i8(&mut self) -> Result<i8> {
        Ok(self.u8()? as i8)
    }

    fn i16(&mut self) -> Result<i16> {
        Ok(self.take(2, "i16")?.read_i16::<BigEndian>().unwrap())
    }

    fn u16(&mut self) -> Result<u16> {
        Ok(self.take(2, "u16")?.read_u16::<BigEndian>().unwrap())
    }

    fn i32(&mut self) -> Result<i32> {
        Ok(self.take(4, "i32")?.read_i32::<BigEndian>().unwrap())
    }

    fn i64(&mut self) -> Result<i64> {
        Ok(self.take(8, "i64")?.read_i64::<BigEndian>().unwrap())
    }

    fn f32(&mut self) -> Result<f32> {
        Ok(self.take(4, "f32")?.read_f32::<BigEndian>().unwrap())
    }

    fn f64(&mut self) -> Result<f64> {
        Ok(self.take(8, "f64")?.read_f64::<BigEndian>().unwrap())
    }

    fn tag(&mut self) -> Result<Tag> {
        let b = self.u8()?;
        Tag::from_u8(b).ok_or(NbtError::UnknownTag(b))
    }

    fn mutf8_string(&mut self) -> Result<String> {
        let len = self.u16()? as usize;
        let bytes = self.take(len, "string")?;
        mutf8::decode(bytes)
    }

    fn count(&mut self) -> Result<usize> {
        let n = self.i32()?;
        if n < 0 {
            return Err(NbtError::NegativeLength(n));
        }
        Ok(n as usize)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(NbtError::DepthExceeded);
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }
}

fn cautious_capacity(count: usize, elem_size: usize) -> usize {
    count.min(MAX_PREALLOC / elem_size.max(1))
}

/// Reads a full named root tag and returns `(name, value)`, or `None` if the
/// root tag is `End` (meaning "no data").
pub fn from_binary(bytes: &[u8]) -> Result<Option<(String, Value)>> {
    let mut cur = Cursor { bytes, depth: 0 };
    let tag = cur.tag()?;
    if tag == Tag::End {
        return Ok(None);
    }
    let name = cur.mutf8_string()?;
    let value = read_value(&mut cur, tag)?;
    Ok(Some((name, value)))
}

/// Reads an unnamed root tag (no name field), as used by network NBT.
pub fn from_binary_unnamed(bytes: &[u8]) -> Result<Option<Value>> {
    let mut b = bytes;
    from_binary_unnamed_prefix(&mut b)
}

/// Like [`from_binary_unnamed`], but `bytes` is advanced past the value that
/// was read instead of requiring the whole slice to be consumed. Used when
/// an unnamed root tag is embedded inside a larger framed message (item
/// stack NBT, for instance) rather than filling the whole buffer.
pub fn from_binary_unnamed_prefix<'a>(bytes: &mut &'a [u8]) -> Result<Option<Value>> {
    let mut cur = Cursor {
        bytes: *bytes,
        depth: 0,
    };
    let tag = cur.tag()?;
    if tag == Tag::End {
        *bytes = cur.bytes;
        return Ok(None);
    }
    let value = read_value(&mut cur, tag)?;
    *bytes = cur.bytes;
    Ok(Some(value))
}

fn read_value(cur: &mut Cursor, tag: Tag) -> Result<Value> {
    Ok(match tag {
        Tag::End => unreachable!("cannot read a value for TAG_End"),
        Tag::Byte => Value::Byte(cur.i8()?),
        Tag::Short => Value::Short(cur.i16()?),
        Tag::Int => Value::Int(cur.i32()?),
        Tag::Long => Value::Long(cur.i64()?),
        Tag::Float => Value::Float(cur.f32()?),
        Tag::Double => Value::Double(cur.f64()?),
        Tag::ByteArray => {
            let len = cur.count()?;
            let mut v = Vec::with_capacity(cautious_capacity(len, 1));
            for _ in 0..len {
                v.push(cur.i8()?);
            }
            Value::ByteArray(v)
        }
        Tag::String => Value::String(cur.mutf8_string()?),
        Tag::List => Value::List(read_list(cur)?),
        Tag::Compound => Value::Compound(read_compound(cur)?),
        Tag::IntArray => {
            let len = cur.count()?;
            let mut v = Vec::with_capacity(cautious_capacity(len, 4));
            for _ in 0..len {
                v.push(cur.i32()?);
            }
            Value::IntArray(v)
        }
        Tag::LongArray => {
            let len = cur.count()?;
            let mut v = Vec::with_capacity(cautious_capacity(len, 8));
            for _ in 0..len {
                v.push(cur.i64()?);
            }
            Value::LongArray(v)
        }
    })
}

fn read_list(cur: &mut Cursor) -> Result<List> {
    let elem_tag = cur.tag()?;
    let len = cur.count()?;

    if elem_tag == Tag::End {
        if len != 0 {
            return Err(NbtError::NonEmptyEndList);
        }
        return Ok(List::End);
    }

    cur.enter()?;
    let result = (|| {
        Ok(match elem_tag {
            Tag::End => unreachable!(),
            Tag::Byte => {
                let mut v = Vec::with_capacity(cautious_capacity(len, 1));
                for _ in 0..len {
                    v.push(cur.i8()?);
                }
                List::Byte(v)
            }
            Tag::Short => {
                let mut v = Vec::with_capacity(cautious_capacity(len, 2));
                for _ in 0..len {
                    v.push(cur.i16()?);
                }
                List::Short(v)
            }
            Tag::Int => {
                let mut v = Vec::with_capacity(cautious_capacity(len, 4));
                for _ in 0..len {
                    v.push(cur.i32()?);
                }
                List::Int(v)
            }
            Tag::Long => {
                let mut v = Vec::with_capacity(cautious_capacity(len, 8));
                for _ in 0..len {
                    v.push(cur.i64()?);
                }
                List::Long(v)
            }
            Tag::Float => {
                let mut v = Vec::with_capacity(cautious_capacity(len, 4));
                for _ in 0..len {
                    v.push(cur.f32()?);
                }
                List::Float(v)
            }
            Tag::Double => {
                let mut v = Vec::with_capacity(cautious_capacity(len, 8));
                for _ in 0..len {
                    v.push(cur.f64()?);
                }
                List::Double(v)
            }
            Tag::ByteArray => {
                let mut v = Vec::with_capacity(cautious_capacity(len, 16));
                for _ in 0..len {
                    match read_value(cur, Tag::ByteArray)? {
                        Value::ByteArray(a) => v.push(a),
                        _ => unreachable!(),
                    }
                }
                List::ByteArray(v)
            }
            Tag::String => {
                let mut v = Vec::with_capacity(cautious_capacity(len, 8));
                for _ in 0..len {
                    v.push(cur.mutf8_string()?);
                }
                List::String(v)
            }
            Tag::List => {
                let mut v = Vec::with_capacity(cautious_capacity(len, 16));
                for _ in 0..len {
                    v.push(read_list(cur)?);
                }
                List::List(v)
            }
            Tag::Compound => {
                let mut v = Vec::with_capacity(cautious_capacity(len, 16));
                for _ in 0..len {
                    v.push(read_compound(cur)?);
                }
                List::Compound(v)
            }
            Tag::IntArray => {
                let mut v = Vec::with_capacity(cautious_capacity(len, 16));
                for _ in 0..len {
                    match read_value(cur, Tag::IntArray)? {
                        Value::IntArray(a) => v.push(a),
                        _ => unreachable!(),
                    }
                }
                List::IntArray(v)
            }
            Tag::LongArray => {
                let mut v = Vec::with_capacity(cautious_capacity(len, 16));
                for _ in 0..len {
                    match read_value(cur, Tag::LongArray)? {
                        Value::LongArray(a) => v.push(a),
                        _ => unreachable!(),
                    }
                }
                List::LongArray(v)
            }
        })
    })();
    cur.exit();
    result
}

fn read_compound(cur: &mut Cursor) -> Result<Compound> {
    cur.enter()?;
    let result = (|| {
        let mut compound = Compound::new();
        loop {
            let tag = cur.tag()?;
            if tag == Tag::End {
                break;
            }
            let key = cur.mutf8_string()?;
            let value = read_value(cur, tag)?;
            compound.insert(key, value);
        }
        Ok(compound)
    })();
    cur.exit();
    result
}
