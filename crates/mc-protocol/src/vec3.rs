use std::io::Write;

use glam::{DVec3, Quat, Vec3};

use crate::{Decode, Encode};

impl Encode for Vec3 {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.x.encode(&mut w)?;
        self.y.encode(&mut w)?;
        self.z.encode(&mut w)
    }
}

impl Decode<'_> for Vec3 {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Vec3::new(f32::decode(r)?, f32::decode(r)?, f32::decode(r)?))
    }
}

impl Encode for DVec3 {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.x.encode(&mut w)?;
        self.y.encode(&mut w)?;
        self.z.encode(&mut w)
    }
}

impl Decode<'_> for DVec3 {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(DVec3::new(f64::decode(r)?, f64::decode(r)?, f64::decode(r)?))
    }
}

/// Encoded as four `f32`s in x, y, z, w order (used by Display entity
/// rotation metadata fields).
impl Encode for Quat {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.x.encode(&mut w)?;
        self.y.encode(&mut w)?;
        self.z.encode(&mut w)?;
        self.w.encode(&mut w)
    }
}

impl Decode<'_> for Quat {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Quat::from_xyzw(
            f32::decode(r)?,
            f32::decode(r)?,
            f32::decode(r)?,
            f32::decode(r)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_round_trips() {
        let v = Vec3::new(1.0, -2.5, 3.25);
        let mut buf = Vec::new();
        v.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(Vec3::decode(&mut slice).unwrap(), v);
    }
}
