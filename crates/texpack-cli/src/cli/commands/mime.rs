//! `texpack mime` – content type for a file name.

use texpack_core::storage;

pub fn run_mime(name: &str) {
    println!("{}", storage::content_type(name));
}
