use thiserror::Error;

#[derive(Debug, Error)]
pub enum NbtError {
    #[error("unexpected end of input while reading {0}")]
    Truncated(&'static str),
    #[error("unknown NBT tag byte {0}")]
    UnknownTag(u8),
    #[error("negative length ({0}) where a count was expected")]
    NegativeLength(i32),
    #[error("invalid modified-UTF-8 string data")]
    InvalidString,
    #[error("TAG_End list with nonzero length")]
    NonEmptyEndList,
    #[error("maximum NBT nesting depth exceeded")]
    DepthExceeded,
    #[error("byte array/string/list length {0} exceeds the protocol limit")]
    TooLong(i64),
    #[error("duplicate key \"{0}\" in object projection")]
    DuplicateKey(String),
    #[error("heterogeneous list encountered during object projection")]
    HeterogeneousList,
    #[error("value out of range for the requested NBT kind")]
    OutOfRange,
    #[error("schema mismatch during object projection: {0}")]
    SchemaMismatch(String),
}

pub type Result<T> = std::result::Result<T, NbtError>;
