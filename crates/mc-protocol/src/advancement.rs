use std::io::Write;

use mc_ident::Ident;

use crate::text::Text;
use crate::{Decode, Encode, ItemStack, VarInt};

/// One advancement node, keyed elsewhere by its identifier.
#[derive(Clone, PartialEq, Debug)]
pub struct Advancement {
    pub parent_id: Option<Ident>,
    pub display: Option<AdvancementDisplay>,
    /// Each inner list is one set of criteria any of which satisfies that
    /// requirement; the advancement is complete once every outer entry has
    /// at least one satisfied criterion.
    pub requirements: Vec<Vec<String>>,
    pub sends_telemetry_data: bool,
}

impl Encode for Advancement {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.parent_id.encode(&mut w)?;
        self.display.encode(&mut w)?;

        VarInt(self.requirements.len() as i32).encode(&mut w)?;
        for set in &self.requirements {
            VarInt(set.len() as i32).encode(&mut w)?;
            for criterion in set {
                criterion.as_str().encode(&mut w)?;
            }
        }

        self.sends_telemetry_data.encode(w)
    }
}

impl Decode<'_> for Advancement {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let parent_id = Option::<Ident>::decode(r)?;
        let display = Option::<AdvancementDisplay>::decode(r)?;

        let set_count = VarInt::decode(r)?.0;
        let mut requirements = Vec::with_capacity((set_count as usize).min(1024));
        for _ in 0..set_count {
            let criterion_count = VarInt::decode(r)?.0;
            let mut set = Vec::with_capacity((criterion_count as usize).min(1024));
            for _ in 0..criterion_count {
                set.push(<&str>::decode(r)?.to_owned());
            }
            requirements.push(set);
        }

        let sends_telemetry_data = bool::decode(r)?;

        Ok(Advancement {
            parent_id,
            display,
            requirements,
            sends_telemetry_data,
        })
    }
}

/// The advancement tab UI data: title, description, icon, frame, and a
/// flag word selecting which optional fields follow (bit 0: background
/// texture, bit 1: show toast, bit 2: hidden).
#[derive(Clone, PartialEq, Debug)]
pub struct AdvancementDisplay {
    pub title: Text,
    pub description: Text,
    pub icon: Option<ItemStack>,
    pub frame_type: FrameType,
    pub show_toast: bool,
    pub hidden: bool,
    pub background_texture: Option<Ident>,
    pub x: f32,
    pub y: f32,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FrameType {
    Task,
    Challenge,
    Goal,
}

impl FrameType {
    const fn id(self) -> i32 {
        match self {
            FrameType::Task => 0,
            FrameType::Challenge => 1,
            FrameType::Goal => 2,
        }
    }

    fn from_id(id: i32) -> anyhow::Result<Self> {
        Ok(match id {
            0 => FrameType::Task,
            1 => FrameType::Challenge,
            2 => FrameType::Goal,
            other => anyhow::bail!("invalid advancement frame type id {other}"),
        })
    }
}

impl Encode for AdvancementDisplay {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.title.encode(&mut w)?;
        self.description.encode(&mut w)?;
        self.icon.encode(&mut w)?;
        VarInt(self.frame_type.id()).encode(&mut w)?;

        let flags = (self.background_texture.is_some() as i32)
            | (self.show_toast as i32) << 1
            | (self.hidden as i32) << 2;
        flags.encode(&mut w)?;

        if let Some(texture) = &self.background_texture {
            texture.encode(&mut w)?;
        }

        self.x.encode(&mut w)?;
        self.y.encode(w)
    }
}

impl Decode<'_> for AdvancementDisplay {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let title = Text::decode(r)?;
        let description = Text::decode(r)?;
        let icon = Option::<ItemStack>::decode(r)?;
        let frame_type = FrameType::from_id(VarInt::decode(r)?.0)?;
        let flags = i32::decode(r)?;

        let background_texture = if flags & 1 != 0 {
            Some(Ident::decode(r)?)
        } else {
            None
        };

        let x = f32::decode(r)?;
        let y = f32::decode(r)?;

        Ok(AdvancementDisplay {
            title,
            description,
            icon,
            frame_type,
            show_toast: flags & 0b10 != 0,
            hidden: flags & 0b100 != 0,
            background_texture,
            x,
            y,
        })
    }
}

/// One advancement's per-criterion completion timestamps, keyed elsewhere
/// by advancement identifier.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AdvancementProgress {
    pub criteria: Vec<(String, Option<i64>)>,
}

impl Encode for AdvancementProgress {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        VarInt(self.criteria.len() as i32).encode(&mut w)?;
        for (identifier, progress) in &self.criteria {
            identifier.as_str().encode(&mut w)?;
            progress.encode(&mut w)?;
        }
        Ok(())
    }
}

impl Decode<'_> for AdvancementProgress {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let count = VarInt::decode(r)?.0;
        let mut criteria = Vec::with_capacity((count as usize).min(1024));
        for _ in 0..count {
            let identifier = <&str>::decode(r)?.to_owned();
            let progress = Option::<i64>::decode(r)?;
            criteria.push((identifier, progress));
        }
        Ok(AdvancementProgress { criteria })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advancement_display_round_trips() {
        let display = AdvancementDisplay {
            title: Text::plain("Root"),
            description: Text::plain("The beginning"),
            icon: Some(ItemStack::new(1, 1, None)),
            frame_type: FrameType::Goal,
            show_toast: true,
            hidden: false,
            background_texture: Some(Ident::new("minecraft:textures/gui/advancements/backgrounds/stone.png").unwrap()),
            x: 1.5,
            y: -2.0,
        };
        let mut buf = Vec::new();
        display.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(AdvancementDisplay::decode(&mut slice).unwrap(), display);
    }

    #[test]
    fn advancement_round_trips_with_requirements() {
        let adv = Advancement {
            parent_id: Some(Ident::new("minecraft:story/root").unwrap()),
            display: None,
            requirements: vec![vec!["got_wood".to_owned()], vec!["got_stone".to_owned()]],
            sends_telemetry_data: true,
        };
        let mut buf = Vec::new();
        adv.encode(&mut buf).unwrap();
        let mut slice = buf.as_slice();
        assert_eq!(Advancement::decode(&mut slice).unwrap(), adv);
    }
}
