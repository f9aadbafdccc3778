//! Archive extraction: find the model, learn which textures it references,
//! upload the model and those textures, and report where they went.
//!
//! Every file taken out of the archive lives in a private staging directory
//! that is removed when the call returns, on success, error, or unwind.

mod state;
mod upload;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use crate::archive::{classify_entries, ArchiveEntry, ArchiveWalker, ClassifiedEntry};
use crate::config::TexpackConfig;
use crate::error::ExtractError;
use crate::reconcile::reconcile;
use crate::retry::RetryPolicy;
use crate::scan;
use crate::storage::{unique_name, Uploader};

pub use state::Stage;
use state::StageTracker;
use upload::{upload_all, upload_one, UploadJob};

/// Where one texture from the archive was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureMapping {
    /// Basename inside the archive.
    pub source: String,
    /// Identifier returned by the uploader.
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub model_url: String,
    /// In archive order.
    pub textures: Vec<TextureMapping>,
}

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Parent for the per-call staging directory; system temp dir if unset.
    pub work_dir: Option<PathBuf>,
    /// Maximum concurrent texture uploads (at least 1).
    pub concurrency: usize,
    pub retry: RetryPolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            work_dir: None,
            concurrency: 4,
            retry: RetryPolicy::default(),
        }
    }
}

impl ExtractOptions {
    pub fn from_config(cfg: &TexpackConfig) -> Self {
        Self {
            work_dir: cfg.work_dir.clone(),
            concurrency: cfg.upload_concurrency.max(1),
            retry: cfg.retry.as_ref().map(RetryPolicy::from).unwrap_or_default(),
        }
    }
}

/// Runs extractions against one upload backend. Holds no per-call state, so
/// one value can serve concurrent calls.
pub struct Extractor<U: Uploader> {
    uploader: U,
    options: ExtractOptions,
}

impl<U: Uploader> Extractor<U> {
    pub fn new(uploader: U, options: ExtractOptions) -> Self {
        Self { uploader, options }
    }

    pub fn uploader(&self) -> &U {
        &self.uploader
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract `archive` and upload its model and referenced textures.
    pub fn extract(&self, archive: &Path) -> Result<ExtractionResult, ExtractError> {
        let mut stage = StageTracker::new(archive);
        let result = self.run(archive, &mut stage);
        match &result {
            Ok(r) => {
                stage.advance(Stage::Done);
                tracing::info!(
                    archive = %archive.display(),
                    model_url = %r.model_url,
                    textures = r.textures.len(),
                    "extraction complete"
                );
            }
            Err(e) => stage.fail(e),
        }
        result
    }

    fn run(&self, archive: &Path, stage: &mut StageTracker) -> Result<ExtractionResult, ExtractError> {
        let mut walker = ArchiveWalker::open(archive)?;
        let staging = self.staging_dir()?;
        let entries = walker.entries()?;

        let classified = classify_entries(entries.iter().cloned());
        if classified.models.is_empty() {
            return Err(ExtractError::NoModelFound {
                path: archive.to_path_buf(),
            });
        }
        stage.advance(Stage::ModelLocated);

        let refs = discover_references(&mut walker, &entries, staging.path())?;
        stage.advance(Stage::ReferencesDiscovered);

        for dup in &classified.duplicate_textures {
            tracing::warn!(entry = %dup.entry.name, "duplicate texture basename, keeping first");
        }
        let selected = reconcile(&refs, &classified.textures);
        tracing::debug!(
            references = refs.len(),
            textures = classified.textures.len(),
            selected = selected.len(),
            skipped = classified.other,
            "reconciled textures"
        );

        let model_url = self.store_model(&mut walker, &classified.models, staging.path())?;
        let textures = self.store_textures(&mut walker, &selected, staging.path());
        stage.advance(Stage::EntriesWalked);

        Ok(ExtractionResult {
            model_url,
            textures,
        })
    }

    fn staging_dir(&self) -> Result<TempDir, ExtractError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("texpack-");
        let created = match &self.options.work_dir {
            Some(dir) => fs::create_dir_all(dir).and_then(|_| builder.tempdir_in(dir)),
            None => builder.tempdir(),
        };
        created.map_err(|source| ExtractError::Staging {
            dir: self
                .options
                .work_dir
                .clone()
                .unwrap_or_else(std::env::temp_dir),
            source,
        })
    }

    /// Store the first model entry that can be staged and uploaded. Later
    /// entries are tried in archive order; when none stores the archive is
    /// treated as having no model.
    fn store_model(
        &self,
        walker: &mut ArchiveWalker,
        models: &[ClassifiedEntry],
        dir: &Path,
    ) -> Result<String, ExtractError> {
        for model in models {
            let staged = match walker.stage(&model.entry, dir) {
                Ok(staged) => staged,
                Err(e) => {
                    tracing::warn!(entry = %model.entry.name, error = %e, "cannot stage model, trying next");
                    continue;
                }
            };
            let job = job_for(&model.entry, &model.basename, staged);
            match upload_one(&self.uploader, &job, &self.options.retry) {
                Ok(url) => {
                    tracing::info!(entry = %model.entry.name, url = %url, "stored model");
                    return Ok(url);
                }
                Err(e) => {
                    tracing::warn!(entry = %model.entry.name, error = %e, "model upload failed, trying next");
                }
            }
        }
        tracing::warn!(candidates = models.len(), "no model entry could be stored");
        Err(ExtractError::NoModelFound {
            path: walker.path().to_path_buf(),
        })
    }

    /// Stage and upload textures. Entries that fail either step are logged
    /// and left out of the result.
    fn store_textures(
        &self,
        walker: &mut ArchiveWalker,
        selected: &[ClassifiedEntry],
        dir: &Path,
    ) -> Vec<TextureMapping> {
        let mut jobs = Vec::with_capacity(selected.len());
        for t in selected {
            match walker.stage(&t.entry, dir) {
                Ok(staged) => jobs.push(job_for(&t.entry, &t.basename, staged)),
                Err(e) => tracing::warn!(entry = %t.entry.name, error = %e, "cannot stage texture, skipping"),
            }
        }

        upload_all(&self.uploader, jobs, self.options.concurrency, &self.options.retry)
            .into_iter()
            .filter_map(|(job, res)| match res {
                Ok(target) => Some(TextureMapping {
                    source: job.source,
                    target,
                }),
                Err(e) => {
                    tracing::warn!(texture = %job.source, error = %e, "texture upload failed, skipping");
                    None
                }
            })
            .collect()
    }
}

/// Scan the first FBX entry for texture references. A candidate that cannot
/// be read out of the archive or parsed yields an empty list; only failing
/// to create the staging file is fatal.
fn discover_references(
    walker: &mut ArchiveWalker,
    entries: &[ArchiveEntry],
    dir: &Path,
) -> Result<Vec<String>, ExtractError> {
    let mut candidate = match walker.extract_model_candidate(entries, dir) {
        Ok(Some(c)) => c,
        Ok(None) => {
            tracing::debug!("no FBX entry, keeping all textures");
            return Ok(Vec::new());
        }
        Err(e @ ExtractError::ArchiveRead { .. }) => {
            tracing::warn!(error = %e, "cannot read model candidate, keeping all textures");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };
    match scan::scan_model(candidate.file.as_file_mut()) {
        Ok(refs) => {
            tracing::info!(entry = %candidate.entry.name, references = refs.len(), "scanned model");
            Ok(refs.into_vec())
        }
        Err(e) => {
            tracing::warn!(
                entry = %candidate.entry.name,
                error = %e,
                "model scan failed, keeping all textures"
            );
            Ok(Vec::new())
        }
    }
}

fn job_for(entry: &ArchiveEntry, basename: &str, staged: PathBuf) -> UploadJob {
    UploadJob {
        index: entry.index,
        source: basename.to_string(),
        staged,
        storage_name: unique_name(basename),
    }
}
