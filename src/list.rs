//! Decoder for the fixed-capacity creature lists used by Gen 1 and Gen 2.

use crate::error::{Error, Result};
use crate::layout::ListLayout;
use crate::reader::ByteReader;
use crate::save::CreatureRecord;
use crate::text::TextTable;

/// Decodes the list starting at `offset`.
///
/// Sub-region boundaries come from `layout` alone. The whole span must lie
/// inside the image, and a count above capacity means the image is corrupt.
pub fn decode_list(
    reader: &ByteReader,
    offset: usize,
    layout: &ListLayout,
    species_name: fn(u8) -> &'static str,
    text: &TextTable,
) -> Result<Vec<CreatureRecord>> {
    reader.region(offset, layout.span())?;

    let count = reader.u8_at(offset)? as usize;
    if count > layout.capacity {
        return Err(Error::OccupancyOverflow {
            offset,
            count,
            capacity: layout.capacity,
        });
    }
    log::trace!("List at {offset:#x} holds {count} of {}", layout.capacity);

    let species_offset = offset + layout.species_offset();
    let trainer_names_offset = offset + layout.trainer_names_offset();
    let nicknames_offset = offset + layout.nicknames_offset();
    let field_size = layout.text_field_size();

    (0..count)
        .map(|slot| {
            let species_index = reader.u8_at(species_offset + slot)?;
            let original_trainer_name = text.decode_at(
                reader,
                trainer_names_offset + slot * field_size,
                layout.text_width,
            )?;
            let nickname =
                text.decode_at(reader, nicknames_offset + slot * field_size, layout.text_width)?;

            Ok(CreatureRecord {
                species_index: species_index.into(),
                species_name: species_name(species_index).to_owned(),
                original_trainer_name,
                nickname,
            })
        })
        .collect()
}
