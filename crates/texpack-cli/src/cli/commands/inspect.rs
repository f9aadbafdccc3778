//! `texpack inspect` – header facts and references of an FBX file.

use anyhow::{Context, Result};
use std::path::Path;
use texpack_core::info;

pub fn run_inspect(model: &Path, json: bool) -> Result<()> {
    let fbx = info::read_info(model).with_context(|| format!("inspecting {}", model.display()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&fbx)?);
        return Ok(());
    }

    println!("{:<10} {}", "ENCODING", fbx.encoding.as_str());
    println!("{:<10} {}", "VERSION", fbx.version.as_deref().unwrap_or("-"));
    println!("{:<10} {}", "CREATOR", fbx.creator.as_deref().unwrap_or("-"));
    if fbx.texture_refs.is_empty() {
        println!("No texture references.");
    } else {
        println!("TEXTURES");
        for name in &fbx.texture_refs {
            println!("  {name}");
        }
    }
    Ok(())
}
