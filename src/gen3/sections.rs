//! Selection of the authoritative save block.
//!
//! Gen 3 cartridges keep two copies of the game, each a block of 14 sectors.
//! Every save rewrites the older block in full and bumps a save counter, and
//! the sectors of a block are stored rotated, so each sector's logical id has
//! to be read from its trailer.

use byteorder::LittleEndian;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::error::{Error, Result};
use crate::reader::ByteReader;

pub const SECTOR_SIZE: usize = 0x1000;
pub const SECTORS_PER_BLOCK: usize = 14;
pub const BLOCK_SIZE: usize = SECTOR_SIZE * SECTORS_PER_BLOCK;
pub const SECTION_DATA_SIZE: usize = 3968;
const SECTION_ID_OFFSET: usize = 0x0ff4;
const SAVE_COUNTER_OFFSET: usize = 0x0ffc;
const COMPLETE_SECTIONS: u16 = (1 << SECTORS_PER_BLOCK) - 1;
const NUMBER_OF_BLOCKS: usize = 2;

/// Logical role of a sector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum SectionId {
    TrainerInfo = 0,
    TeamAndItems = 1,
    GameState = 2,
    MiscData = 3,
    RivalInfo = 4,
    PcBufferA = 5,
    PcBufferB = 6,
    PcBufferC = 7,
    PcBufferD = 8,
    PcBufferE = 9,
    PcBufferF = 10,
    PcBufferG = 11,
    PcBufferH = 12,
    PcBufferI = 13,
}

impl SectionId {
    pub const PC_BUFFERS: [SectionId; 9] = [
        SectionId::PcBufferA,
        SectionId::PcBufferB,
        SectionId::PcBufferC,
        SectionId::PcBufferD,
        SectionId::PcBufferE,
        SectionId::PcBufferF,
        SectionId::PcBufferG,
        SectionId::PcBufferH,
        SectionId::PcBufferI,
    ];

    /// The section whose trailer carries the block's save counter.
    pub const LAST: SectionId = SectionId::PcBufferI;
}

/// Logical section to physical offset map for one block, built from the
/// sector trailers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionMap {
    offsets: [Option<usize>; SECTORS_PER_BLOCK],
    seen: u16,
}

impl SectionMap {
    pub fn scan(reader: &ByteReader, block_offset: usize) -> Result<Self> {
        let mut map = SectionMap::default();
        for sector in 0..SECTORS_PER_BLOCK {
            let offset = block_offset + sector * SECTOR_SIZE;
            let raw_id = reader.u16_at::<LittleEndian>(offset + SECTION_ID_OFFSET)?;
            match SectionId::from_u16(raw_id) {
                Some(id) => {
                    map.offsets[id as usize] = Some(offset);
                    map.seen |= 1 << id as u16;
                }
                None => log::trace!("Ignoring sector at {offset:#x} with section id {raw_id:#x}"),
            }
        }
        Ok(map)
    }

    pub fn is_complete(&self) -> bool {
        self.seen == COMPLETE_SECTIONS
    }

    pub fn offset_of(&self, id: SectionId) -> Option<usize> {
        self.offsets[id as usize]
    }

    fn into_offsets(self) -> Option<[usize; SECTORS_PER_BLOCK]> {
        if !self.is_complete() {
            return None;
        }
        let mut offsets = [0usize; SECTORS_PER_BLOCK];
        for (slot, offset) in offsets.iter_mut().zip(self.offsets) {
            *slot = offset?;
        }
        Some(offsets)
    }
}

/// A complete block and its save counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveBlock {
    index: usize,
    offsets: [usize; SECTORS_PER_BLOCK],
    save_counter: u32,
}

impl SaveBlock {
    /// 0 for the block at the start of the image, 1 for the one after it.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn save_counter(&self) -> u32 {
        self.save_counter
    }

    pub fn section_offset(&self, id: SectionId) -> usize {
        self.offsets[id as usize]
    }

    /// The payload of a section, without its trailer.
    pub fn section_data<'a>(&self, reader: &ByteReader<'a>, id: SectionId) -> Result<&'a [u8]> {
        reader.region(self.section_offset(id), SECTION_DATA_SIZE)
    }

    fn scan(reader: &ByteReader, index: usize) -> Result<Option<Self>> {
        let map = SectionMap::scan(reader, index * BLOCK_SIZE)?;
        log::debug!("Block {index} section mask: {:#06x}", map.seen);

        let Some(offsets) = map.into_offsets() else {
            return Ok(None);
        };
        let save_counter = reader
            .u32_at::<LittleEndian>(offsets[SectionId::LAST as usize] + SAVE_COUNTER_OFFSET)?;
        log::debug!("Block {index} save counter: {save_counter}");

        Ok(Some(SaveBlock {
            index,
            offsets,
            save_counter,
        }))
    }
}

/// Picks the block holding the newest complete save.
///
/// Only blocks lying entirely within the image are considered. When both are
/// complete the strictly greater counter wins and a tie goes to the second
/// block; a lone complete block wins regardless of its counter.
pub fn resolve_blocks(reader: &ByteReader) -> Result<SaveBlock> {
    let mut blocks = (0..NUMBER_OF_BLOCKS)
        .filter(|index| (index + 1) * BLOCK_SIZE <= reader.len())
        .map(|index| SaveBlock::scan(reader, index))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten();

    let latest = match (blocks.next(), blocks.next()) {
        (Some(first), Some(second)) => {
            if first.save_counter > second.save_counter {
                first
            } else {
                second
            }
        }
        (Some(only), None) => only,
        _ => return Err(Error::NoValidSaveBlock),
    };

    log::debug!(
        "Using block {} with save counter {}",
        latest.index,
        latest.save_counter
    );
    Ok(latest)
}
