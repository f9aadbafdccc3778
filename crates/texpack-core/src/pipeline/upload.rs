//! Bounded worker pool for uploading staged entries.

use std::collections::VecDeque;
use std::fs::File;
use std::path::PathBuf;
use std::sync::{mpsc, Mutex, PoisonError};
use std::thread;

use crate::retry::{run_with_retry, RetryPolicy};
use crate::storage::{UploadError, Uploader};

/// One staged entry waiting for upload.
#[derive(Debug, Clone)]
pub(crate) struct UploadJob {
    /// Archive index; results are ordered by it.
    pub index: usize,
    /// In-archive basename.
    pub source: String,
    /// Staged copy on disk.
    pub staged: PathBuf,
    /// Unique name handed to the uploader.
    pub storage_name: String,
}

/// Upload one staged file, reopening it for every attempt.
pub(crate) fn upload_one<U: Uploader + ?Sized>(
    uploader: &U,
    job: &UploadJob,
    policy: &RetryPolicy,
) -> Result<String, UploadError> {
    run_with_retry(policy, || {
        let mut file = File::open(&job.staged).map_err(|source| UploadError::Source {
            path: job.staged.clone(),
            source,
        })?;
        uploader.upload(&mut file, &job.storage_name)
    })
}

/// Upload `jobs` on at most `workers` threads. Results come back sorted by
/// archive index regardless of completion order.
pub(crate) fn upload_all<U: Uploader + ?Sized>(
    uploader: &U,
    jobs: Vec<UploadJob>,
    workers: usize,
    policy: &RetryPolicy,
) -> Vec<(UploadJob, Result<String, UploadError>)> {
    let num_workers = workers.max(1).min(jobs.len());
    let work = Mutex::new(jobs.into_iter().collect::<VecDeque<_>>());
    let (tx, rx) = mpsc::channel();

    let mut results: Vec<_> = thread::scope(|s| {
        for _ in 0..num_workers {
            let tx = tx.clone();
            let work = &work;
            s.spawn(move || loop {
                let job = match work.lock().unwrap_or_else(PoisonError::into_inner).pop_front() {
                    Some(j) => j,
                    None => break,
                };
                let res = upload_one(uploader, &job, policy);
                if tx.send((job, res)).is_err() {
                    break;
                }
            });
        }
        drop(tx);
        rx.iter().collect()
    });

    results.sort_by_key(|(job, _)| job.index);
    results
}
