//! Tests for `texpack extract` flags.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn cli_parse_extract_defaults() {
    match parse(&["texpack", "extract", "pack.zip"]) {
        CliCommand::Extract {
            archive,
            store,
            base_url,
            jobs,
            work_dir,
            relative,
        } => {
            assert_eq!(archive, PathBuf::from("pack.zip"));
            assert!(store.is_none());
            assert!(base_url.is_none());
            assert!(jobs.is_none());
            assert!(work_dir.is_none());
            assert!(!relative);
        }
        _ => panic!("expected Extract"),
    }
}

#[test]
fn cli_parse_extract_overrides() {
    match parse(&[
        "texpack",
        "extract",
        "/data/pack.zip",
        "--store",
        "/srv/store",
        "--base-url",
        "https://cdn.test",
        "--jobs",
        "8",
        "--work-dir",
        "/tmp/stage",
        "--relative",
    ]) {
        CliCommand::Extract {
            archive,
            store,
            base_url,
            jobs,
            work_dir,
            relative,
        } => {
            assert_eq!(archive, PathBuf::from("/data/pack.zip"));
            assert_eq!(store, Some(PathBuf::from("/srv/store")));
            assert_eq!(base_url.as_deref(), Some("https://cdn.test"));
            assert_eq!(jobs, Some(8));
            assert_eq!(work_dir, Some(PathBuf::from("/tmp/stage")));
            assert!(relative);
        }
        _ => panic!("expected Extract"),
    }
}

#[test]
fn cli_parse_extract_rejects_bad_jobs() {
    assert!(Cli::try_parse_from(["texpack", "extract", "a.zip", "--jobs", "many"]).is_err());
    assert!(Cli::try_parse_from(["texpack", "extract"]).is_err());
}
