//! Retry and backoff for uploads.
//!
//! Upload failures are classified by their I/O error kind and transient
//! ones are retried with exponential backoff. Model and texture uploads
//! share one policy.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_io_kind};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
