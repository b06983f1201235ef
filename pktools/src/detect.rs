use clap::Args;
use pksav::{GameVariant, SaveImage};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct Opts {
    #[arg(short, long)]
    pub sav: PathBuf,
}

pub fn run(opts: Opts) -> anyhow::Result<()> {
    let save_data = crate::read_save(&opts.sav)?;
    let variant = pksav::detect_variant(&SaveImage::new(&save_data))?;
    println!("{}", describe(variant));
    Ok(())
}

/// One line naming the family, release and region code.
pub fn describe(variant: GameVariant) -> String {
    match variant.region() {
        Some(region) => format!(
            "{}: {} [{}-{}]",
            variant.family(),
            variant,
            variant.title_code(),
            region
        ),
        None => format!("{}: {} [{}]", variant.family(), variant, variant.title_code()),
    }
}
