//! `texpack scan` – list texture references of a model file.

use anyhow::{Context, Result};
use std::path::Path;
use texpack_core::scan;

pub fn run_scan(model: &Path) -> Result<()> {
    let refs = scan::scan_path(model).with_context(|| format!("scanning {}", model.display()))?;
    for name in refs.iter() {
        println!("{name}");
    }
    Ok(())
}
