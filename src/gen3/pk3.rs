use byteorder::{ByteOrder, LittleEndian};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::error::Result;
use crate::reader::ByteReader;
use crate::save::CreatureRecord;
use crate::species::gen3_species_name;
use crate::text::{TextTable, GEN3_JAPANESE, GEN3_WESTERN};
use crate::TrainerId;

pub const PK3_SIZE_PARTY: usize = 100;
pub const PK3_SIZE_BOX: usize = 80;
const SUBSTRUCTURE_OFFSET: usize = 32;
const NICKNAME_LENGTH: usize = 10;
const TRAINER_NAME_LENGTH: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
pub enum Language {
    Japanese = 1,
    English = 2,
    French = 3,
    Italian = 4,
    German = 5,
    Spanish = 7,
}

impl Language {
    fn text_table(language: Option<Language>) -> &'static TextTable {
        match language {
            Some(Language::Japanese) => &GEN3_JAPANESE,
            _ => &GEN3_WESTERN,
        }
    }
}

/// Identity fields of one stored creature.
#[derive(Clone, Debug)]
pub struct Pk3 {
    pub personality_value: u32,
    pub original_trainer_id: TrainerId,
    pub nickname: String,
    pub origin_language: Option<Language>,
    pub original_trainer_name: String,
    pub species: u16,
    pub is_egg: bool,
}

impl Pk3 {
    /// Parses the box-sized prefix of a party or box record. Text offsets in
    /// errors are relative to the record.
    pub fn from_pk3(pk3: &[u8]) -> Result<Self> {
        let mut source_data = ByteReader::new(pk3).region(0, PK3_SIZE_BOX)?.to_owned();
        decrypt_pk3(&mut source_data);

        let reader = ByteReader::new(&source_data);
        let mut cursor = reader.cursor(0);
        let personality_value = cursor.read_u32::<LittleEndian>()?;
        let original_trainer_id = cursor.read_u32::<LittleEndian>()?;
        let nickname_offset = cursor.position();
        cursor.skip(NICKNAME_LENGTH);
        let origin_language = Language::from_u8(cursor.read_u8()?);
        let _egg_data = cursor.read_u8()?;
        let original_trainer_name_offset = cursor.position();

        let text = Language::text_table(origin_language);
        let nickname = text.decode_at(&reader, nickname_offset, NICKNAME_LENGTH)?;
        let original_trainer_name =
            text.decode_at(&reader, original_trainer_name_offset, TRAINER_NAME_LENGTH)?;

        cursor.set_position(
            get_offset_for_substructure(personality_value, Component::Growth) + SUBSTRUCTURE_OFFSET,
        );
        let species = cursor.read_u16::<LittleEndian>()?;

        cursor.set_position(
            get_offset_for_substructure(personality_value, Component::Miscellaneous)
                + SUBSTRUCTURE_OFFSET,
        );
        let _pokerus_status = cursor.read_u8()?;
        let _met_location = cursor.read_u8()?;
        let _origin_info = cursor.read_u16::<LittleEndian>()?;
        let ivs_egg_ability_blob = cursor.read_u32::<LittleEndian>()?;
        let is_egg = ((ivs_egg_ability_blob >> 30) & 0b1) != 0;

        Ok(Pk3 {
            personality_value,
            original_trainer_id: TrainerId {
                public_id: (original_trainer_id & 0xffff) as u16,
                secret_id: (original_trainer_id >> 16) as u16,
            },
            nickname,
            origin_language,
            original_trainer_name,
            species,
            is_egg,
        })
    }
}

impl From<Pk3> for CreatureRecord {
    fn from(pk3: Pk3) -> Self {
        CreatureRecord {
            species_index: pk3.species,
            species_name: gen3_species_name(pk3.species).to_owned(),
            original_trainer_name: pk3.original_trainer_name,
            nickname: pk3.nickname,
        }
    }
}

enum Component {
    Growth,
    Miscellaneous,
}

fn get_offset_for_substructure(personality_value: u32, component: Component) -> usize {
    const COMPONENT_SIZE: usize = 12;
    match (component, personality_value % 24) {
        (Component::Growth, 0..=5) => 0,
        (Component::Growth, 6 | 7 | 12 | 13 | 18 | 19) => COMPONENT_SIZE,
        (Component::Growth, 8 | 10 | 14 | 16 | 20 | 22) => COMPONENT_SIZE * 2,
        (Component::Growth, _) => COMPONENT_SIZE * 3,
        (Component::Miscellaneous, 18..=23) => 0,
        (Component::Miscellaneous, 4 | 5 | 10 | 11 | 16 | 17) => COMPONENT_SIZE,
        (Component::Miscellaneous, 1 | 3 | 7 | 9 | 13 | 15) => COMPONENT_SIZE * 2,
        (Component::Miscellaneous, _) => COMPONENT_SIZE * 3,
    }
}

/// XORs the substructure region with `PID ^ OTID`. Applying it twice restores
/// the input.
fn decrypt_pk3(pk3_data: &mut [u8]) {
    let personality_value = LittleEndian::read_u32(&pk3_data[0..4]);
    let original_trainer_id = LittleEndian::read_u32(&pk3_data[4..8]);
    let mut key = [0u8; 4];
    LittleEndian::write_u32(&mut key, personality_value ^ original_trainer_id);

    for idx in (SUBSTRUCTURE_OFFSET..PK3_SIZE_BOX).step_by(4) {
        for byte in 0..4 {
            pk3_data[idx + byte] ^= key[byte];
        }
    }
}
