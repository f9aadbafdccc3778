//! CLI command handlers, one per file.

mod extract;
mod inspect;
mod mime;
mod scan;

pub use extract::{run_extract, ExtractArgs};
pub use inspect::run_inspect;
pub use mime::run_mime;
pub use scan::run_scan;
