use pksav::gen3::SectionId;
use pksav::{parse_save, Error, GameFamily, GameVariant, SaveImage, SaveRecord};

const TERMINATOR: u8 = 0x50;

fn gen12_text(text: &str) -> Vec<u8> {
    text.bytes()
        .map(|byte| match byte {
            b'A'..=b'Z' => 0x80 + (byte - b'A'),
            b'a'..=b'z' => 0xa0 + (byte - b'a'),
            _ => panic!("no test encoding for {byte}"),
        })
        .collect()
}

fn write_gen12_text(data: &mut [u8], offset: usize, text: &str) {
    let encoded = gen12_text(text);
    data[offset..offset + encoded.len()].copy_from_slice(&encoded);
    if encoded.len() < 10 {
        data[offset + encoded.len()] = TERMINATOR;
    }
}

/// Crystal (251) with Charmander and Squirtle in the party and every box
/// empty.
fn crystal_251_save() -> Vec<u8> {
    let mut data = vec![0u8; 0x8000];
    write_gen12_text(&mut data, 0x200b, "GOLD");

    let party = 0x286a;
    data[party] = 2;
    data[party + 1..party + 4].copy_from_slice(&[4, 7, 0xff]);
    let trainer_names = party + 8 + 6 * 48;
    let nicknames = trainer_names + 6 * 11;
    for slot in 0..2 {
        write_gen12_text(&mut data, trainer_names + slot * 11, "GOLD");
    }
    write_gen12_text(&mut data, nicknames, "CHARMANDER");
    write_gen12_text(&mut data, nicknames + 11, "Squirt");

    data[0x2d15] = 0;
    data[0x2d16] = 0xff;
    data
}

#[test]
fn crystal_251_end_to_end() {
    let save = parse_save(&crystal_251_save()).unwrap();
    assert_eq!(save.variant, GameVariant::Crystal251);
    assert_eq!(save.family(), GameFamily::Gen2);
    assert_eq!(save.trainer.as_ref().unwrap().name, "GOLD");

    assert_eq!(save.party.len(), 2);
    assert_eq!(save.party[0].species_index, 4);
    assert_eq!(save.party[0].species_name, "Charmander");
    assert_eq!(save.party[0].nickname, "CHARMANDER");
    assert_eq!(save.party[1].species_name, "Squirtle");
    assert_eq!(save.party[1].nickname, "Squirt");
    assert!(save.party.iter().all(|creature| creature.original_trainer_name == "GOLD"));

    assert_eq!(save.boxes.len(), 14);
    assert_eq!(save.boxes[13].label, "BOX 14");
    assert!(save.boxes.iter().all(|pc_box| pc_box.creatures.is_empty()));
}

#[test]
fn crystal_251_with_emulator_footer() {
    let mut data = crystal_251_save();
    data.resize(0x8030, 0);
    let save = parse_save(&data).unwrap();
    assert_eq!(save.variant, GameVariant::Crystal251);
    assert_eq!(save.party.len(), 2);
}

#[test]
fn full_party_and_overflow() {
    let mut data = crystal_251_save();
    let party = 0x286a;
    data[party] = 6;
    data[party + 1..party + 8].copy_from_slice(&[1, 2, 3, 4, 5, 6, 0xff]);
    for slot in 0..6 {
        write_gen12_text(&mut data, party + 8 + 6 * 48 + slot * 11, "GOLD");
        write_gen12_text(&mut data, party + 8 + 6 * 48 + 6 * 11 + slot * 11, "MON");
    }
    let save = parse_save(&data).unwrap();
    assert_eq!(save.party.len(), 6);
    assert_eq!(save.party[5].species_name, "Charizard");

    // A banked box claiming 21 of 20 entries
    let second_box = 0x4450;
    data[second_box] = 21;
    assert_eq!(
        parse_save(&data),
        Err(Error::OccupancyOverflow {
            offset: second_box,
            count: 21,
            capacity: 20
        })
    );
}

#[test]
fn earlier_gen2_rule_wins() {
    let mut data = crystal_251_save();
    // Make the Crystal (U) anchors valid as well.
    data[0x2865] = 0;
    data[0x2866] = 0xff;
    data[0x2d10] = 0;
    data[0x2d11] = 0xff;
    assert_eq!(
        pksav::detect_variant(&SaveImage::new(&data)),
        Ok(GameVariant::CrystalInternational)
    );
}

#[test]
fn red_blue_yellow_party() {
    let mut data = vec![0u8; 0x8000];
    write_gen12_text(&mut data, 0x2598, "RED");
    let party = 0x2f2c;
    data[party] = 1;
    data[party + 1..party + 3].copy_from_slice(&[0x54, 0xff]);
    write_gen12_text(&mut data, party + 8 + 6 * 44, "RED");
    write_gen12_text(&mut data, party + 8 + 6 * 44 + 6 * 11, "Sparky");
    data[0x30c0] = 0;
    data[0x30c1] = 0xff;

    let save = parse_save(&data).unwrap();
    assert_eq!(save.variant, GameVariant::RedBlueYellowInternational);
    assert_eq!(save.party.len(), 1);
    assert_eq!(save.party[0].species_name, "Pikachu");
    assert_eq!(save.party[0].species_index, 0x54);
    assert_eq!(save.party[0].nickname, "Sparky");
    assert_eq!(save.boxes.len(), 12);
}

#[test]
fn unknown_sizes_are_rejected() {
    for size in [0, 0x7fff, 0x8001, 0x20001, 0x80000] {
        assert_eq!(
            parse_save(&vec![0u8; size]),
            Err(Error::UnrecognizedSize { size })
        );
    }
}

const SECTOR_SIZE: usize = 0x1000;
const BLOCK_SIZE: usize = 14 * SECTOR_SIZE;

fn gen3_sector(block: usize, rotation: usize, section: usize) -> usize {
    block * BLOCK_SIZE + ((section + 14 - rotation) % 14) * SECTOR_SIZE
}

fn write_gen3_block(data: &mut [u8], block: usize, rotation: usize, counter: u32, name: &[u8]) {
    for section in 0..14 {
        let offset = gen3_sector(block, rotation, section);
        data[offset + 0xff4..offset + 0xff6].copy_from_slice(&(section as u16).to_le_bytes());
        data[offset + 0xffc..offset + 0x1000].copy_from_slice(&counter.to_le_bytes());
    }
    let trainer = gen3_sector(block, rotation, 0);
    data[trainer..trainer + 7].fill(0xff);
    data[trainer..trainer + name.len()].copy_from_slice(name);
}

// "MAY", "BRENDAN"
const MAY: [u8; 3] = [0xc7, 0xbb, 0xd3];
const BRENDAN: [u8; 7] = [0xbc, 0xcc, 0xbf, 0xc8, 0xbe, 0xbb, 0xc8];

#[test]
fn gen3_newer_block_wins() {
    let mut data = vec![0u8; 0x20000];
    write_gen3_block(&mut data, 0, 0, 5, &MAY);
    write_gen3_block(&mut data, 1, 6, 6, &BRENDAN);

    let save = parse_save(&data).unwrap();
    assert_eq!(save.variant, GameVariant::RubySapphire);
    let trainer = save.trainer.unwrap();
    assert_eq!(trainer.name, "BRENDAN");
    assert!(save.party.is_empty());
    assert_eq!(save.boxes.len(), 14);
    assert_eq!(save.boxes[0].label, "BOX 1");

    let block = pksav::gen3::resolve_blocks(&SaveImage::new(&data)).unwrap();
    assert_eq!(block.index(), 1);
    assert_eq!(block.save_counter(), 6);
}

#[test]
fn gen3_party_member() {
    let mut data = vec![0u8; 0x20000];
    write_gen3_block(&mut data, 0, 0, 1, &MAY);

    // PID and OTID are equal, so the record's key is zero.
    let team = gen3_sector(0, 0, 1) + 0x234;
    data[team] = 1;
    let record = team + 4;
    data[record..record + 4].copy_from_slice(&24u32.to_le_bytes());
    data[record + 4..record + 8].copy_from_slice(&24u32.to_le_bytes());
    data[record + 8..record + 18].fill(0xff);
    data[record + 18] = 2;
    data[record + 20..record + 27].fill(0xff);
    data[record + 20..record + 23].copy_from_slice(&MAY);
    data[record + 32..record + 34].copy_from_slice(&280u16.to_le_bytes());

    let save = parse_save(&data).unwrap();
    assert_eq!(save.party.len(), 1);
    assert_eq!(save.party[0].species_name, "Torchic");
    assert_eq!(save.party[0].original_trainer_name, "MAY");
    assert_eq!(save.party[0].nickname, "");
}

#[test]
fn gen3_half_image_uses_first_block() {
    let mut data = vec![0u8; 0x10000];
    write_gen3_block(&mut data, 0, 9, 3, &MAY);
    let save = SaveRecord::parse(&SaveImage::new(&data)).unwrap();
    assert_eq!(save.family(), GameFamily::Gen3);
    assert_eq!(save.trainer.unwrap().name, "MAY");
}

#[test]
fn gen3_sectors_in_any_order() {
    let mut data = vec![0u8; 0x20000];
    write_gen3_block(&mut data, 0, 0, 4, &MAY);
    // Swap the trainer sector with the one holding section 9, which no
    // rotation of the block can produce.
    let (trainer, other) = (gen3_sector(0, 0, 0), gen3_sector(0, 0, 9));
    let moved = data[trainer..trainer + SECTOR_SIZE].to_vec();
    data.copy_within(other..other + SECTOR_SIZE, trainer);
    data[other..other + SECTOR_SIZE].copy_from_slice(&moved);

    let block = pksav::gen3::resolve_blocks(&SaveImage::new(&data)).unwrap();
    assert_eq!(block.section_offset(SectionId::TrainerInfo), other);
    assert_eq!(block.section_offset(SectionId::PcBufferE), trainer);

    let save = parse_save(&data).unwrap();
    assert_eq!(save.variant, GameVariant::RubySapphire);
    assert_eq!(save.trainer.unwrap().name, "MAY");
}

#[test]
fn gen3_without_complete_block() {
    let mut data = vec![0u8; 0x20000];
    write_gen3_block(&mut data, 1, 0, 3, &MAY);
    // Two sectors claiming section 4 leave section 5 missing.
    let offset = gen3_sector(1, 0, 5);
    data[offset + 0xff4] = 4;
    assert_eq!(parse_save(&data), Err(Error::NoValidSaveBlock));
}
