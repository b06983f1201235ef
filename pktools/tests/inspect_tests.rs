use pktools::{
    detect,
    inspect::{self, Format, Location},
};
use std::{io::Write, path::PathBuf};
use tempfile::NamedTempFile;

/// A Crystal (251) save holding one Cyndaquil named "FLAME".
fn crystal_251_save() -> Vec<u8> {
    let mut save_data = vec![0u8; 0x8000];
    // "KRIS"
    save_data[0x200b..0x2010].copy_from_slice(&[0x8a, 0x91, 0x88, 0x92, 0x50]);
    save_data[0x2009..0x200b].copy_from_slice(&[0x30, 0x39]);

    let party = 0x286a;
    save_data[party..party + 3].copy_from_slice(&[1, 155, 0xff]);
    let trainer_name = party + 8 + 6 * 48;
    save_data[trainer_name..trainer_name + 5].copy_from_slice(&[0x8a, 0x91, 0x88, 0x92, 0x50]);
    let nickname = trainer_name + 6 * 11;
    save_data[nickname..nickname + 6].copy_from_slice(&[0x85, 0x8b, 0x80, 0x8c, 0x84, 0x50]);

    save_data[0x2d15] = 0;
    save_data[0x2d16] = 0xff;
    save_data
}

fn create_temp_save(save_data: &[u8]) -> NamedTempFile {
    let mut temp_save_file = NamedTempFile::new().unwrap();
    temp_save_file.write_all(save_data).unwrap();
    temp_save_file.flush().unwrap();
    temp_save_file
}

#[test]
fn test_inspect_text() {
    let save = pksav::parse_save(&crystal_251_save()).unwrap();
    let text = inspect::render(&save, Format::Text, Location::All).unwrap();
    assert!(text.starts_with("Game: Crystal (251) (Gen 2)\nTrainer: KRIS ID 12345\n"));
    assert!(text.contains("Cyndaquil"));
    assert!(text.contains("FLAME"));

    let text = inspect::render(&save, Format::Text, Location::Box(3)).unwrap();
    assert!(!text.contains("Cyndaquil"));
    assert!(inspect::render(&save, Format::Text, Location::Box(15)).is_err());
}

#[test]
fn test_inspect_json() {
    let save = pksav::parse_save(&crystal_251_save()).unwrap();
    let json = inspect::render(&save, Format::Json, Location::All).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["variant"], "Crystal251");
    assert_eq!(value["trainer"]["name"], "KRIS");
    assert_eq!(value["party"][0]["species_index"], 155);
    assert_eq!(value["party"][0]["nickname"], "FLAME");
    assert_eq!(value["boxes"].as_array().unwrap().len(), 14);

    let json = inspect::render(&save, Format::Json, Location::Party).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["species_name"], "Cyndaquil");
}

#[test]
fn test_location_parsing() {
    assert_eq!("all".parse::<Location>().unwrap(), Location::All);
    assert_eq!("party".parse::<Location>().unwrap(), Location::Party);
    assert_eq!("box12".parse::<Location>().unwrap(), Location::Box(12));
    assert!("box0".parse::<Location>().is_err());
    assert!("boxes".parse::<Location>().is_err());
    assert!("daycare".parse::<Location>().is_err());
}

#[test]
fn test_run_against_files() {
    let input_save = create_temp_save(&crystal_251_save());
    inspect::run(inspect::Opts {
        sav: PathBuf::from(input_save.path()),
        location: Location::Party,
        format: Format::Json,
    })
    .unwrap();
    detect::run(detect::Opts {
        sav: PathBuf::from(input_save.path()),
    })
    .unwrap();

    let truncated = create_temp_save(&crystal_251_save()[..0x7000]);
    let err = detect::run(detect::Opts {
        sav: PathBuf::from(truncated.path()),
    })
    .unwrap_err();
    assert_eq!(
        err.downcast_ref::<pksav::Error>(),
        Some(&pksav::Error::UnrecognizedSize { size: 0x7000 })
    );
}
