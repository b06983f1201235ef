use byteorder::BigEndian;
use num_derive::FromPrimitive;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::family::{self, GameFamily};
use crate::gen3;
use crate::layout::{BoxStorage, VariantLayout};
use crate::list::decode_list;
use crate::reader::ByteReader;
use crate::species::{gen1_species_name, gen2_species_name};
use crate::text::GEN12_INTERNATIONAL;
use crate::variant::{detect_by_rules, GameVariant, GEN1_RULES, GEN2_RULES};

const CURRENT_BOX_MASK: u8 = 0x7f;
const BANKS_INITIALISED: u8 = 0x80;

/// An immutable save image of unknown provenance.
#[derive(Clone, Copy, Debug)]
pub struct SaveImage<'a> {
    data: &'a [u8],
}

impl<'a> SaveImage<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Limits the image to the first `declared_len` bytes of `data`, for
    /// loaders that know the save is shorter than the buffer holding it.
    pub fn with_declared_len(data: &'a [u8], declared_len: usize) -> Result<Self> {
        let data = ByteReader::new(data).region(0, declared_len)?;
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn reader(&self) -> ByteReader<'a> {
        ByteReader::new(self.data)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreatureRecord {
    pub species_index: u16,
    pub species_name: String,
    pub original_trainer_name: String,
    pub nickname: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoxRecord {
    pub label: String,
    pub creatures: Vec<CreatureRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive, Serialize)]
pub enum PlayerGender {
    Male = 0,
    Female = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TimePlayed {
    pub hours: u16,
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u8,
}

/// The player's identity. Gen 1 and Gen 2 only store a name and public id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrainerInfo {
    pub name: String,
    pub public_id: u16,
    pub secret_id: Option<u16>,
    pub gender: Option<PlayerGender>,
    pub time_played: Option<TimePlayed>,
}

/// Everything decoded from one save image. Owns all of its data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SaveRecord {
    pub variant: GameVariant,
    pub trainer: Option<TrainerInfo>,
    pub party: Vec<CreatureRecord>,
    pub boxes: Vec<BoxRecord>,
}

impl SaveRecord {
    pub fn parse(image: &SaveImage) -> Result<Self> {
        let variant = detect_variant(image)?;
        let reader = image.reader();
        match variant.family() {
            GameFamily::Gen3 => gen3::decode(&reader),
            GameFamily::Gen1 | GameFamily::Gen2 => decode_listed(&reader, variant),
        }
    }

    pub fn family(&self) -> GameFamily {
        self.variant.family()
    }

    /// Count of creatures in the party and every box.
    pub fn creature_count(&self) -> usize {
        self.party.len()
            + self
                .boxes
                .iter()
                .map(|pc_box| pc_box.creatures.len())
                .sum::<usize>()
    }
}

/// Classifies the image by size, then tries each candidate family's version
/// heuristics in turn. When every candidate fails, the last one's error is
/// returned.
///
/// The `0x8000` and `0x802C` sizes are shared by Gen 1 and Gen 2, and the
/// Gen 1 rules run first. The Gen 1 anchors at `0x2F2C` and `0x30C0` fall
/// inside the live box of a Crystal save, so a Crystal box whose bytes happen
/// to look like two compact lists there is classified as Red/Blue/Yellow. Only
/// the first family to match is ever decoded.
pub fn detect_variant(image: &SaveImage) -> Result<GameVariant> {
    let reader = image.reader();
    let mut last_error = Error::UnrecognizedSize { size: image.len() };
    for family in family::classify(image.len())? {
        let detected = match family {
            GameFamily::Gen1 => detect_by_rules(&GEN1_RULES, family, &reader),
            GameFamily::Gen2 => detect_by_rules(&GEN2_RULES, family, &reader),
            GameFamily::Gen3 => gen3::detect(&reader),
        };
        match detected {
            Ok(variant) => return Ok(variant),
            Err(err) => {
                log::debug!("Not a {family} save: {err}");
                last_error = err;
            }
        }
    }

    Err(last_error)
}

/// Decodes a Gen 1 or Gen 2 save. Variants without a known layout are
/// detected only, and come back with no trainer and no creatures.
fn decode_listed(reader: &ByteReader, variant: GameVariant) -> Result<SaveRecord> {
    let Some(layout) = variant.layout() else {
        log::debug!("No layout for {variant}, skipping lists");
        return Ok(SaveRecord {
            variant,
            trainer: None,
            party: Vec::new(),
            boxes: Vec::new(),
        });
    };
    let species_name: fn(u8) -> &'static str = match variant.family() {
        GameFamily::Gen1 => gen1_species_name,
        _ => gen2_species_name,
    };

    let party = decode_list(
        reader,
        layout.party_offset,
        &layout.party,
        species_name,
        &GEN12_INTERNATIONAL,
    )?;
    let boxes = decode_banked_boxes(reader, &layout.boxes, species_name)?;

    Ok(SaveRecord {
        variant,
        trainer: Some(decode_listed_trainer(reader, layout)?),
        party,
        boxes,
    })
}

fn decode_listed_trainer(reader: &ByteReader, layout: &VariantLayout) -> Result<TrainerInfo> {
    let trainer = &layout.trainer;
    Ok(TrainerInfo {
        name: GEN12_INTERNATIONAL.decode_at(reader, trainer.name_offset, trainer.name_width)?,
        public_id: reader.u16_at::<BigEndian>(trainer.id_offset)?,
        secret_id: None,
        gender: None,
        time_played: None,
    })
}

/// Decodes every box in storage order.
///
/// Where the variant keeps a live copy of the selected box, that copy is read
/// in place of its banked copy. Banked boxes that were never written are
/// reported empty.
fn decode_banked_boxes(
    reader: &ByteReader,
    storage: &BoxStorage,
    species_name: fn(u8) -> &'static str,
) -> Result<Vec<BoxRecord>> {
    let (current_box, banks_initialised) = match storage.current {
        Some(current) => {
            let selector = reader.u8_at(current.index_offset)?;
            let index = (selector & CURRENT_BOX_MASK) as usize;
            let current_box = (index < storage.offsets.len()).then_some((index, current.offset));
            let banks_written = !current.tracks_bank_writes || selector & BANKS_INITIALISED != 0;
            (current_box, banks_written)
        }
        None => (None, true),
    };

    storage
        .offsets
        .iter()
        .enumerate()
        .map(|(index, banked_offset)| {
            let offset = match current_box {
                Some((current_index, live_offset)) if current_index == index => Some(live_offset),
                _ if banks_initialised => Some(*banked_offset),
                _ => None,
            };
            let creatures = match offset {
                Some(offset) => decode_list(
                    reader,
                    offset,
                    &storage.list,
                    species_name,
                    &GEN12_INTERNATIONAL,
                )?,
                None => Vec::new(),
            };

            Ok(BoxRecord {
                label: format!("BOX {}", index + 1),
                creatures,
            })
        })
        .collect()
}
