//! Extraction stages, logged on every transition.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ExtractError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    ModelLocated,
    ReferencesDiscovered,
    EntriesWalked,
    Done,
    Failed,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::ModelLocated => "model_located",
            Stage::ReferencesDiscovered => "references_discovered",
            Stage::EntriesWalked => "entries_walked",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current stage of one extraction call.
#[derive(Debug)]
pub(crate) struct StageTracker {
    archive: PathBuf,
    stage: Stage,
}

impl StageTracker {
    pub(crate) fn new(archive: &Path) -> Self {
        Self {
            archive: archive.to_path_buf(),
            stage: Stage::Start,
        }
    }

    #[cfg(test)]
    pub(crate) fn stage(&self) -> Stage {
        self.stage
    }

    pub(crate) fn advance(&mut self, next: Stage) {
        debug_assert!(!self.stage.is_terminal(), "advance after {}", self.stage);
        tracing::debug!(
            archive = %self.archive.display(),
            from = %self.stage,
            to = %next,
            "extraction stage"
        );
        self.stage = next;
    }

    pub(crate) fn fail(&mut self, err: &ExtractError) {
        tracing::warn!(
            archive = %self.archive.display(),
            from = %self.stage,
            kind = err.kind(),
            error = %err,
            "extraction failed"
        );
        self.stage = Stage::Failed;
    }
}
