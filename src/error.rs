use crate::family::GameFamily;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while classifying or decoding a save image.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("save size {size:#x} does not match any known game family")]
    UnrecognizedSize { size: usize },

    #[error("no {family} version heuristic matched")]
    UnrecognizedVariant { family: GameFamily },

    #[error("neither save block holds a complete set of sections")]
    NoValidSaveBlock,

    #[error("list at {offset:#x} declares {count} entries but only holds {capacity}")]
    OccupancyOverflow {
        offset: usize,
        count: usize,
        capacity: usize,
    },

    #[error("byte {byte:#04x} at {offset:#x} has no glyph")]
    UnmappedGlyph { byte: u8, offset: usize },

    #[error("read of {len} bytes at {offset:#x} exceeds save size {size:#x}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        size: usize,
    },

    #[error("invalid {field}: {value:#x} at {offset:#x}")]
    InvalidField {
        field: &'static str,
        offset: usize,
        value: u32,
    },
}
