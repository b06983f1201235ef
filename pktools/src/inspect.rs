use std::{path::PathBuf, str::FromStr};

use anyhow::{anyhow, bail};
use clap::{Args, ValueEnum};
use pksav::{BoxRecord, CreatureRecord, SaveRecord};
use prettytable::{format, row, Table};

#[derive(Debug, Args)]
pub struct Opts {
    #[arg(short, long)]
    pub sav: PathBuf,
    /// `all`, `party`, or `boxN` with N counted from 1
    #[arg(short, long, default_value = "all")]
    pub location: Location,
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    All,
    Party,
    Box(usize),
}

impl FromStr for Location {
    type Err = anyhow::Error;

    fn from_str(location: &str) -> Result<Self, Self::Err> {
        match location {
            "all" => Ok(Location::All),
            "party" => Ok(Location::Party),
            _ => {
                let box_number = location
                    .strip_prefix("box")
                    .ok_or_else(|| anyhow!("Unknown location: {location}"))?
                    .parse::<usize>()?;
                if box_number == 0 {
                    bail!("Box numbers start at 1");
                }
                Ok(Location::Box(box_number))
            }
        }
    }
}

pub fn run(opts: Opts) -> anyhow::Result<()> {
    let save_data = crate::read_save(&opts.sav)?;
    let save = pksav::parse_save(&save_data)?;
    println!("{}", render(&save, opts.format, opts.location)?);
    Ok(())
}

pub fn render(save: &SaveRecord, output: Format, location: Location) -> anyhow::Result<String> {
    match (output, location) {
        (Format::Json, Location::All) => Ok(serde_json::to_string_pretty(save)?),
        (Format::Json, Location::Party) => Ok(serde_json::to_string_pretty(&save.party)?),
        (Format::Json, Location::Box(box_number)) => {
            Ok(serde_json::to_string_pretty(find_box(save, box_number)?)?)
        }
        (Format::Text, location) => {
            let mut text = summarize(save);
            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
            table.add_row(row!["BOX", "SLOT", "SPECIES", "NICKNAME", "OT"]);

            if matches!(location, Location::All | Location::Party) {
                add_rows(&mut table, "P", &save.party);
            }
            match location {
                Location::All => {
                    for pc_box in &save.boxes {
                        add_rows(&mut table, &pc_box.label, &pc_box.creatures);
                    }
                }
                Location::Box(box_number) => {
                    let pc_box = find_box(save, box_number)?;
                    add_rows(&mut table, &pc_box.label, &pc_box.creatures);
                }
                Location::Party => {}
            }

            text.push_str(&table.to_string());
            Ok(text)
        }
    }
}

fn summarize(save: &SaveRecord) -> String {
    let mut text = format!("Game: {} ({})\n", save.variant, save.family());
    match &save.trainer {
        Some(trainer) => {
            text.push_str(&format!("Trainer: {} ID {:05}", trainer.name, trainer.public_id));
            if let Some(time_played) = trainer.time_played {
                text.push_str(&format!(
                    " Playtime {:02}:{:02}",
                    time_played.hours, time_played.minutes
                ));
            }
            text.push('\n');
        }
        None => text.push_str("No layout is known for this release\n"),
    }
    text
}

fn find_box(save: &SaveRecord, box_number: usize) -> anyhow::Result<&BoxRecord> {
    let pc_box = box_number
        .checked_sub(1)
        .and_then(|index| save.boxes.get(index));
    pc_box.ok_or_else(|| {
        anyhow!(
            "Box {box_number} requested but the save holds {} boxes",
            save.boxes.len()
        )
    })
}

fn add_rows(table: &mut Table, location: &str, creatures: &[CreatureRecord]) {
    for (idx, creature) in creatures.iter().enumerate() {
        table.add_row(row![
            location,
            idx + 1,
            creature.species_name,
            creature.nickname,
            creature.original_trainer_name
        ]);
    }
}
