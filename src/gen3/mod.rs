//! Ruby/Sapphire, FireRed/LeafGreen and Emerald saves.

pub mod pk3;
pub mod sections;

use std::ops::Range;

use byteorder::LittleEndian;
use num_traits::FromPrimitive;

use crate::error::{Error, Result};
use crate::reader::ByteReader;
use crate::save::{
    BoxRecord, CreatureRecord, PlayerGender, SaveImage, SaveRecord, TimePlayed, TrainerInfo,
};
use crate::text::{TextTable, GEN3_JAPANESE, GEN3_WESTERN};
use crate::variant::GameVariant;
use pk3::{Pk3, PK3_SIZE_BOX, PK3_SIZE_PARTY};
pub use sections::{SaveBlock, SectionId};
use sections::SECTION_DATA_SIZE;

const PLAYER_NAME_LENGTH: usize = 7;
const PLAYER_GENDER_OFFSET: usize = 0x08;
const TRAINER_ID_OFFSET: usize = 0x0a;
const TIME_PLAYED_OFFSET: usize = 0x0e;
const GAME_CODE_OFFSET: usize = 0xac;
/// Emerald keeps data in this part of the identity section where
/// Ruby/Sapphire leave zeros.
const EMERALD_ONLY_REGION: Range<usize> = 0x890..0xf2c;

const PARTY_CAPACITY: usize = 6;
const BOX_COUNT: usize = 14;
const BOX_CAPACITY: usize = 30;
const BOX_NAME_LENGTH: usize = 8;
/// Storage offsets, counted across the concatenated PC buffer sections.
const BOXES_OFFSET: usize = 4;
const BOX_NAMES_OFFSET: usize = 0x8344;

/// Resolves the authoritative block of a Gen 3 image.
pub fn resolve_blocks(image: &SaveImage) -> Result<SaveBlock> {
    sections::resolve_blocks(&image.reader())
}

/// Identifies the release from the game code in the identity section.
///
/// Emerald reuses the game code field as a random security key, so any value
/// other than 0 or 1 falls back to looking for Emerald-only data.
pub fn detect_version(reader: &ByteReader, block: &SaveBlock) -> Result<GameVariant> {
    let trainer_info = ByteReader::new(block.section_data(reader, SectionId::TrainerInfo)?);
    let game_code = trainer_info.u32_at::<LittleEndian>(GAME_CODE_OFFSET)?;
    let variant = match game_code {
        0 => GameVariant::RubySapphire,
        1 => GameVariant::FireRedLeafGreen,
        _ => {
            let region = trainer_info.region(
                EMERALD_ONLY_REGION.start,
                EMERALD_ONLY_REGION.end - EMERALD_ONLY_REGION.start,
            )?;
            if region.iter().any(|byte| *byte != 0x00) {
                GameVariant::Emerald
            } else {
                GameVariant::RubySapphire
            }
        }
    };
    log::debug!("Game code {game_code:#010x} identifies {variant}");
    Ok(variant)
}

/// Resolves the authoritative block and detects the release.
pub fn detect(reader: &ByteReader) -> Result<GameVariant> {
    let block = sections::resolve_blocks(reader)?;
    detect_version(reader, &block)
}

pub fn decode(reader: &ByteReader) -> Result<SaveRecord> {
    let block = sections::resolve_blocks(reader)?;
    let variant = detect_version(reader, &block)?;

    let text = player_text_table(reader, &block)?;

    Ok(SaveRecord {
        variant,
        trainer: Some(decode_trainer(reader, &block, text)?),
        party: decode_party(reader, &block, variant)?,
        boxes: decode_boxes(reader, &block, text)?,
    })
}

/// Picks the character set of the cartridge from the player's name.
///
/// Kana share byte values with the accented letters of the western set. A
/// name is read as Japanese when the western set cannot decode it, or when it
/// uses that shared range without a single unaccented Latin letter.
pub fn player_text_table(reader: &ByteReader, block: &SaveBlock) -> Result<&'static TextTable> {
    let section_offset = block.section_offset(SectionId::TrainerInfo);
    let field = reader.region(section_offset, PLAYER_NAME_LENGTH)?;
    let name = field
        .split(|byte| *byte == GEN3_WESTERN.terminator)
        .next()
        .unwrap_or_default();

    let shares_kana_range = name.iter().any(|&byte| matches!(byte, 0x01..=0xa0));
    let has_latin_letter = name.iter().any(|&byte| matches!(byte, 0xbb..=0xee));
    let japanese = (shares_kana_range && !has_latin_letter)
        || GEN3_WESTERN.decode(name, PLAYER_NAME_LENGTH).is_err();
    if japanese {
        log::debug!("Player name {name:02x?} reads as Japanese text");
        Ok(&GEN3_JAPANESE)
    } else {
        Ok(&GEN3_WESTERN)
    }
}

pub fn decode_trainer(
    reader: &ByteReader,
    block: &SaveBlock,
    text: &TextTable,
) -> Result<TrainerInfo> {
    let section_offset = block.section_offset(SectionId::TrainerInfo);
    let name = text.decode_at(reader, section_offset, PLAYER_NAME_LENGTH)?;

    let gender_offset = section_offset + PLAYER_GENDER_OFFSET;
    let raw_gender = reader.u8_at(gender_offset)?;
    let gender = PlayerGender::from_u8(raw_gender).ok_or(Error::InvalidField {
        field: "player gender",
        offset: gender_offset,
        value: raw_gender.into(),
    })?;

    let trainer_id = reader.u32_at::<LittleEndian>(section_offset + TRAINER_ID_OFFSET)?;

    let mut cursor = reader.cursor(section_offset + TIME_PLAYED_OFFSET);
    let time_played = TimePlayed {
        hours: cursor.read_u16::<LittleEndian>()?,
        minutes: cursor.read_u8()?,
        seconds: cursor.read_u8()?,
        frames: cursor.read_u8()?,
    };

    Ok(TrainerInfo {
        name,
        public_id: (trainer_id & 0xffff) as u16,
        secret_id: Some((trainer_id >> 16) as u16),
        gender: Some(gender),
        time_played: Some(time_played),
    })
}

pub fn decode_party(
    reader: &ByteReader,
    block: &SaveBlock,
    variant: GameVariant,
) -> Result<Vec<CreatureRecord>> {
    let team_size_offset = match variant {
        GameVariant::FireRedLeafGreen => 0x0034,
        _ => 0x0234,
    };
    let count_offset = block.section_offset(SectionId::TeamAndItems) + team_size_offset;
    let team_size = reader.u32_at::<LittleEndian>(count_offset)? as usize;
    if team_size > PARTY_CAPACITY {
        return Err(Error::OccupancyOverflow {
            offset: count_offset,
            count: team_size,
            capacity: PARTY_CAPACITY,
        });
    }
    log::trace!("Party at {count_offset:#x} holds {team_size}");

    let mut cursor = reader.cursor(count_offset + 4);
    (0..team_size)
        .map(|_| {
            let pk3_data = cursor.read_bytes(PK3_SIZE_PARTY)?;
            Ok(CreatureRecord::from(Pk3::from_pk3(pk3_data)?))
        })
        .collect()
}

/// Decodes the PC boxes, skipping empty slots.
///
/// Box data runs across the nine PC buffer sections without regard for
/// section boundaries, so the sections are stitched back together first.
pub fn decode_boxes(
    reader: &ByteReader,
    block: &SaveBlock,
    text: &TextTable,
) -> Result<Vec<BoxRecord>> {
    let mut storage = Vec::with_capacity(SectionId::PC_BUFFERS.len() * SECTION_DATA_SIZE);
    for id in SectionId::PC_BUFFERS {
        storage.extend_from_slice(block.section_data(reader, id)?);
    }
    let storage = ByteReader::new(&storage);

    (0..BOX_COUNT)
        .map(|box_index| {
            let name_offset = BOX_NAMES_OFFSET + box_index * (BOX_NAME_LENGTH + 1);
            let name = text.decode_at(&storage, name_offset, BOX_NAME_LENGTH)?;
            let name = name.trim_end();
            let label = if name.is_empty() {
                format!("BOX {}", box_index + 1)
            } else {
                name.to_owned()
            };

            let mut creatures: Vec<CreatureRecord> = Vec::new();
            for slot in 0..BOX_CAPACITY {
                let offset = BOXES_OFFSET + (box_index * BOX_CAPACITY + slot) * PK3_SIZE_BOX;
                let pk3_data = storage.region(offset, PK3_SIZE_BOX)?;
                if pk3_data.iter().all(|byte| *byte == 0x00) {
                    continue;
                }
                creatures.push(Pk3::from_pk3(pk3_data)?.into());
            }
            log::trace!("{label} holds {}", creatures.len());

            Ok(BoxRecord { label, creatures })
        })
        .collect()
}
