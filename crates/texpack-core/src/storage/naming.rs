//! Collision-free storage names.

use uuid::Uuid;

/// Random storage name that keeps the original file's extension as written
/// (`"Wood.PNG"` → `"3f2a…9c.PNG"`). The base is a UUIDv4 in simple hex form.
pub fn unique_name(original: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    match raw_extension(crate::formats::basename(original)) {
        Some(ext) => format!("{token}{ext}"),
        None => token,
    }
}

fn raw_extension(name: &str) -> Option<&str> {
    match name.rfind('.') {
        Some(0) | None => None,
        Some(i) => Some(&name[i..]),
    }
}
