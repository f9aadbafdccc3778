//! Supported file extensions and path helpers shared by the scanners,
//! the archive classifier, and the reconciler.
//!
//! Extensions are stored lowercase with the leading dot, matching what
//! [`extension`] returns.

/// Model formats accepted as the archive's primary asset.
pub const MODEL_EXTENSIONS: &[&str] = &[
    ".fbx", ".glb", ".gltf", ".obj", ".dae", ".3ds", ".ply", ".stl",
];

/// Texture formats kept when classifying archive entries.
pub const TEXTURE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".bmp", ".tga", ".dds", ".exr", ".hdr", ".tif", ".tiff", ".webp",
];

/// Extensions the binary scanner searches for, in scan order. Same as
/// [`TEXTURE_EXTENSIONS`] without `.webp`.
pub const BINARY_SCAN_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".bmp", ".tga", ".dds", ".exr", ".hdr", ".tif", ".tiff",
];

/// The only model format whose texture references can be discovered.
pub const SCANNABLE_MODEL_EXTENSION: &str = ".fbx";

/// Final path component, treating both `/` and `\` as separators.
///
/// Returns an empty string for paths ending in a separator.
pub fn basename(path: &str) -> &str {
    match path.rfind(|c: char| c == '/' || c == '\\') {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

/// Lowercased extension of the basename including the dot (`"a/B.PNG"` → `".png"`).
///
/// Dotfiles such as `.hidden` and names without a dot have no extension.
pub fn extension(path: &str) -> Option<String> {
    let name = basename(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(i) => Some(name[i..].to_ascii_lowercase()),
    }
}

pub fn is_model_file(path: &str) -> bool {
    has_extension_in(path, MODEL_EXTENSIONS)
}

pub fn is_texture_file(path: &str) -> bool {
    has_extension_in(path, TEXTURE_EXTENSIONS)
}

pub fn is_scannable_model(path: &str) -> bool {
    extension(path).as_deref() == Some(SCANNABLE_MODEL_EXTENSION)
}

fn has_extension_in(path: &str, set: &[&str]) -> bool {
    match extension(path) {
        Some(ext) => set.contains(&ext.as_str()),
        None => false,
    }
}
