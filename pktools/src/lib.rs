pub mod detect;
pub mod inspect;

use anyhow::Context;
use std::path::Path;

/// Reads a whole save file into memory.
pub fn read_save(path: &Path) -> anyhow::Result<Vec<u8>> {
    let data =
        std::fs::read(path).with_context(|| format!("Unable to read {}", path.display()))?;
    log::debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}
