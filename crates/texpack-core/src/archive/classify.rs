//! Tag archive entries as model, texture, or neither.

use std::collections::HashSet;

use super::ArchiveEntry;
use crate::formats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryCategory {
    Model,
    Texture,
    Other,
}

/// Category by extension; anything outside the model and texture sets is
/// `Other`.
pub fn classify(name: &str) -> EntryCategory {
    if formats::is_model_file(name) {
        EntryCategory::Model
    } else if formats::is_texture_file(name) {
        EntryCategory::Texture
    } else {
        EntryCategory::Other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEntry {
    pub entry: ArchiveEntry,
    pub category: EntryCategory,
    pub basename: String,
}

impl ClassifiedEntry {
    pub fn new(entry: ArchiveEntry) -> Self {
        let category = classify(&entry.name);
        let basename = entry.basename().to_string();
        Self {
            entry,
            category,
            basename,
        }
    }
}

/// Entries of one archive split by role, each list in archive order.
#[derive(Debug, Default)]
pub struct Classified {
    /// Model-format entries. The first one that stores successfully is
    /// the model; the rest are fallbacks.
    pub models: Vec<ClassifiedEntry>,
    /// Texture entries with unique (ASCII case-insensitive) basenames.
    pub textures: Vec<ClassifiedEntry>,
    /// Textures dropped because an earlier entry had the same basename.
    pub duplicate_textures: Vec<ClassifiedEntry>,
    /// Entries of no interest.
    pub other: usize,
}

pub fn classify_entries(entries: impl IntoIterator<Item = ArchiveEntry>) -> Classified {
    let mut out = Classified::default();
    let mut texture_names = HashSet::new();

    for entry in entries {
        let c = ClassifiedEntry::new(entry);
        match c.category {
            EntryCategory::Model => out.models.push(c),
            EntryCategory::Texture => {
                if texture_names.insert(c.basename.to_ascii_lowercase()) {
                    out.textures.push(c);
                } else {
                    out.duplicate_textures.push(c);
                }
            }
            EntryCategory::Other => out.other += 1,
        }
    }
    out
}
