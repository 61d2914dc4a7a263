use std::io::Write;

use anyhow::bail;

use crate::text::Text;
use crate::{Decode, Encode, VarInt};

/// One marker drawn on an in-game map.
#[derive(Clone, PartialEq, Debug)]
pub struct MapIcon {
    pub kind: MapIconType,
    pub x: i8,
    pub z: i8,
    /// 0 is a vertical icon, incrementing by 22.5 degrees per unit.
    pub direction: u8,
    pub display_name: Option<Text>,
}

impl Encode for MapIcon {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        VarInt(self.kind.id()).encode(&mut w)?;
        self.x.encode(&mut w)?;
        self.z.encode(&mut w)?;
        self.direction.encode(&mut w)?;
        self.display_name.encode(w)
    }
}

impl Decode<'_> for MapIcon {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let kind = MapIconType::from_id(VarInt::decode(r)?.0)?;
        let x = i8::decode(r)?;
        let z = i8::decode(r)?;
        let direction = u8::decode(r)?;
        let display_name = Option::<Text>::decode(r)?;
        Ok(MapIcon {
            kind,
            x,
            z,
            direction,
            display_name,
        })
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MapIconType {
    WhiteArrow,
    GreenArrow,
    RedArrow,
    BlueArrow,
    WhiteCross,
    RedPointer,
    WhiteCircle,
    SmallWhiteCircle,
    Mansion,
    Temple,
    Banner,
    TreasureMarker,
}

impl MapIconType {
    const fn id(self) -> i32 {
        match self {
            MapIconType::WhiteArrow => 0,
            MapIconType::GreenArrow => 1,
            MapIconType::RedArrow => 2,
            MapIconType::BlueArrow => 3,
            MapIconType::WhiteCross => 4,
            MapIconType::RedPointer => 5,
            MapIconType::WhiteCircle => 6,
            MapIconType::SmallWhiteCircle => 7,
            MapIconType::Mansion => 8,
            MapIconType::Temple => 9,
            MapIconType::Banner => 10,
            MapIconType::TreasureMarker => 11,
        }
    }

    fn from_id(id: i32) -> anyhow::Result<Self> {
        Ok(match id {
            0 => MapIconType::WhiteArrow,
            1 => MapIconType::GreenArrow,
            2 => MapIconType::RedArrow,
            3 => MapIconType::BlueArrow,
            4 => MapIconType::WhiteCross,
            5 => MapIconType::RedPointer,
            6 => MapIconType::WhiteCircle,
            7 => MapIconType::SmallWhiteCircle,
            8 => MapIconType::Mansion,
            9 => MapIconType::Temple,
            10 => MapIconType::Banner,
            11 => MapIconType::TreasureMarker,
            other => bail!("invalid map icon type id {other}"),
        })
    }
}

/// A rectangular patch of map pixel data, or none if `columns == 0`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MapData<'a> {
    pub columns: u8,
    pub rows: u8,
    pub position: [i8; 2],
    pub data: &'a [u8],
}

impl Encode for Option<MapData<'_>> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        match self {
            None => 0u8.encode(w),
            Some(d) => {
                d.columns.encode(&mut w)?;
                d.rows.encode(&mut w)?;
                d.position.encode(&mut w)?;
                d.data.encode(w)
            }
        }
    }
}

impl<'a> Decode<'a> for Option<MapData<'a>> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        let columns = u8::decode(r)?;
        if columns == 0 {
            return Ok(None);
        }
        let rows = u8::decode(r)?;
        let position = <[i8; 2]>::decode(r)?;
        let data = <&'a [u8]>::decode(r)?;
        Ok(Some(MapData {
            columns,
            rows,
            position,
            data,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_icon_round_trips() {
        let icon = MapIcon {
            kind: MapIconType::RedPointer,
            x: -12,
            z: 34,
            direction: 8,
            display_name: Some(Text::plain("camp")),
        };
        let mut buf = Vec::new();
        icon.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(MapIcon::decode(&mut slice).unwrap(), icon);
    }

    #[test]
    fn empty_map_data_round_trips() {
        let data: Option<MapData> = None;
        let mut buf = Vec::new();
        data.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(Option::<MapData>::decode(&mut slice).unwrap(), None);
    }
}
