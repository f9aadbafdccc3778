//! `texpack extract` – run the pipeline against the local store.

use anyhow::{Context, Result};
use std::path::PathBuf;
use texpack_core::config::TexpackConfig;
use texpack_core::storage::{urls, LocalStore};
use texpack_core::{ExtractOptions, ExtractionResult, Extractor};

/// Flag values; `None` falls back to the config file.
#[derive(Debug, Clone)]
pub struct ExtractArgs {
    pub archive: PathBuf,
    pub store: Option<PathBuf>,
    pub base_url: Option<String>,
    pub jobs: Option<usize>,
    pub work_dir: Option<PathBuf>,
    pub relative: bool,
}

pub fn run_extract(cfg: &TexpackConfig, args: ExtractArgs) -> Result<()> {
    let store_dir = args.store.unwrap_or_else(|| cfg.store_dir.clone());
    let base_url = args.base_url.unwrap_or_else(|| cfg.base_url.clone());

    let mut options = ExtractOptions::from_config(cfg);
    if let Some(jobs) = args.jobs {
        options.concurrency = jobs.max(1);
    }
    if args.work_dir.is_some() {
        options.work_dir = args.work_dir;
    }

    let store = LocalStore::new(&store_dir, cfg.upload_subdir.clone(), base_url.clone());
    let extractor = Extractor::new(store, options);
    let mut result = extractor
        .extract(&args.archive)
        .with_context(|| format!("extracting {}", args.archive.display()))?;

    if args.relative {
        relativize(&mut result, &base_url);
    }
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn relativize(result: &mut ExtractionResult, base_url: &str) {
    result.model_url = urls::strip_domain(base_url, &result.model_url);
    for t in &mut result.textures {
        t.target = urls::strip_domain(base_url, &t.target);
    }
}
