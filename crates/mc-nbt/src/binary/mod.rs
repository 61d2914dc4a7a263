mod decode;
mod encode;

pub use decode::{from_binary, from_binary_unnamed, from_binary_unnamed_prefix};
pub use encode::{to_binary, to_binary_unnamed};
