//! Decoder for the save images of the Game Boy and Game Boy Advance monster
//! collecting games.
//!
//! An image is classified by its length, matched against per-release
//! heuristics and then decoded into an owned [`SaveRecord`]. Nothing here
//! touches the filesystem; loading bytes is left to the caller.
//!
//! ```no_run
//! let data = std::fs::read("crystal.sav").unwrap();
//! let save = pksav::parse_save(&data).unwrap();
//! for creature in &save.party {
//!     println!("{} ({})", creature.nickname, creature.species_name);
//! }
//! ```

pub mod error;
pub mod family;
pub mod gen3;
pub mod layout;
pub mod list;
pub mod reader;
pub mod save;
pub mod species;
pub mod text;
pub mod variant;

use serde::Serialize;

pub use error::{Error, Result};
pub use family::GameFamily;
pub use save::{
    detect_variant, BoxRecord, CreatureRecord, PlayerGender, SaveImage, SaveRecord, TimePlayed,
    TrainerInfo,
};
pub use variant::GameVariant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TrainerId {
    pub public_id: u16,
    pub secret_id: u16,
}

/// Classifies and decodes a complete save image.
pub fn parse_save(data: &[u8]) -> Result<SaveRecord> {
    SaveRecord::parse(&SaveImage::new(data))
}
