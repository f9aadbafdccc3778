//! Match discovered texture references against textures present in the
//! archive.

use crate::archive::ClassifiedEntry;
use crate::formats::basename;

/// Textures the model actually uses.
///
/// Empty `refs` means the model named nothing (or could not be scanned), so
/// every texture is kept. Otherwise a texture is kept when its basename
/// equals, ignoring ASCII case, some reference or that reference's basename.
/// Input order is preserved.
pub fn reconcile(refs: &[String], textures: &[ClassifiedEntry]) -> Vec<ClassifiedEntry> {
    if refs.is_empty() {
        return textures.to_vec();
    }
    textures
        .iter()
        .filter(|t| is_referenced(refs, &t.basename))
        .cloned()
        .collect()
}

fn is_referenced(refs: &[String], name: &str) -> bool {
    refs.iter()
        .any(|r| r.eq_ignore_ascii_case(name) || basename(r).eq_ignore_ascii_case(name))
}
