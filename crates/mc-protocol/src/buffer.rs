use crate::error::{ProtocolError, Result};
use crate::var_int::VarInt;
use crate::var_long::VarLong;
use crate::{Decode, Encode};

/// A growable byte container with an independent read cursor: the
/// primitive the rest of the codec is built on. Appends go to the end;
/// reads start at the cursor and advance it. The read position never moves
/// backwards within one parse.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    data: Vec<u8>,
    pos: usize,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Appends raw bytes to the end of the buffer.
    pub fn write(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Reads exactly `n` bytes starting at the cursor, advancing it.
    pub fn read(&mut self, n: usize) -> Result<&[u8]> {
        if self.remaining() < n {
            return Err(ProtocolError::Truncated { context: "read(n)" });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.data[start..self.pos])
    }

    /// Writes any type implementing [`Encode`] (fixed-width primitives,
    /// composites, whatever).
    pub fn write_value<T: Encode>(&mut self, v: &T) -> Result<()> {
        v.encode(&mut self.data).map_err(ProtocolError::Other)
    }

    /// Reads any type implementing [`Decode`], advancing the cursor by
    /// exactly the number of bytes it consumed.
    pub fn read_value<'a, T: Decode<'a>>(&'a mut self) -> Result<T> {
        let mut slice = &self.data[self.pos..];
        let before = slice.len();
        let value = T::decode(&mut slice).map_err(|e| classify(e, before, slice.len()))?;
        self.pos += before - slice.len();
        Ok(value)
    }

    pub fn write_varint(&mut self, v: i32) -> Result<()> {
        self.write_value(&VarInt(v))
    }

    pub fn read_varint(&mut self) -> Result<i32> {
        Ok(self.read_value::<VarInt>()?.0)
    }

    pub fn write_varlong(&mut self, v: i64) -> Result<()> {
        self.write_value(&VarLong(v))
    }

    pub fn read_varlong(&mut self) -> Result<i64> {
        Ok(self.read_value::<VarLong>()?.0)
    }

    /// Writes a varint-length-prefixed UTF-8 string.
    pub fn write_utf(&mut self, s: &str) -> Result<()> {
        self.write_value(&s)
    }

    pub fn read_utf(&mut self) -> Result<String> {
        let mut slice = &self.data[self.pos..];
        let before = slice.len();
        let s = <&str>::decode(&mut slice)
            .map_err(|e| classify(e, before, slice.len()))?
            .to_owned();
        self.pos += before - slice.len();
        Ok(s)
    }

    /// Writes a varint-length-prefixed byte array.
    pub fn write_byte_array(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_varint(bytes.len() as i32)?;
        self.write(bytes);
        Ok(())
    }

    pub fn read_byte_array(&mut self) -> Result<Vec<u8>> {
        let len = self.read_varint()?;
        if len < 0 {
            return Err(ProtocolError::Malformed(format!(
                "negative byte array length {len}"
            )));
        }
        Ok(self.read(len as usize)?.to_vec())
    }

    /// Writes a bool byte, then `f` iff `value` is `Some`.
    pub fn write_optional<T>(
        &mut self,
        value: &Option<T>,
        f: impl FnOnce(&mut Self, &T) -> Result<()>,
    ) -> Result<()> {
        match value {
            Some(v) => {
                self.write(&[1]);
                f(self, v)
            }
            None => {
                self.write(&[0]);
                Ok(())
            }
        }
    }

    pub fn read_optional<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<Option<T>> {
        let present = self.read(1)?[0] != 0;
        if present {
            Ok(Some(f(self)?))
        } else {
            Ok(None)
        }
    }
}

fn classify(e: anyhow::Error, before: usize, after: usize) -> ProtocolError {
    if after == before {
        // No bytes were consumed before failing - almost always an
        // exhausted buffer rather than a content error.
        ProtocolError::Truncated {
            context: "read_value",
        }
    } else {
        ProtocolError::Malformed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_write_round_trip() {
        let mut buf = Buffer::new();
        buf.write_varint(300).unwrap();
        buf.write_utf("hello").unwrap();
        buf.write_byte_array(&[1, 2, 3]).unwrap();
        buf.write_optional(&Some(7u8), |b, v| b.write_value(v)).unwrap();
        buf.write_optional(&(None::<u8>), |b, v| b.write_value(v)).unwrap();

        let mut read_buf = Buffer::from_bytes(buf.into_bytes());
        assert_eq!(read_buf.read_varint().unwrap(), 300);
        assert_eq!(read_buf.read_utf().unwrap(), "hello");
        assert_eq!(read_buf.read_byte_array().unwrap(), vec![1, 2, 3]);
        assert_eq!(read_buf.read_optional(|b| b.read_value::<u8>()).unwrap(), Some(7));
        assert_eq!(read_buf.read_optional(|b| b.read_value::<u8>()).unwrap(), None);
        assert!(read_buf.is_empty());
    }

    #[test]
    fn truncated_read_is_reported() {
        let mut buf = Buffer::from_bytes(vec![0x01]);
        assert!(matches!(
            buf.read(5),
            Err(ProtocolError::Truncated { .. })
        ));
    }
}
