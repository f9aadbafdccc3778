//! CLI for the texpack model archive extractor.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use texpack_core::config;

use commands::{run_extract, run_inspect, run_mime, run_scan, ExtractArgs};

/// Top-level CLI for texpack.
#[derive(Debug, Parser)]
#[command(name = "texpack")]
#[command(about = "texpack: store a 3D model archive and the textures its model uses", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Extract a model archive into the local store and print the result as JSON.
    Extract {
        /// Path to the ZIP archive.
        archive: PathBuf,
        /// Store root directory (overrides `store_dir` from config).
        #[arg(long, value_name = "DIR")]
        store: Option<PathBuf>,
        /// URL prefix for stored files (overrides `base_url` from config).
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
        /// Concurrent texture uploads (overrides `upload_concurrency` from config).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
        /// Parent directory for temporary staging (overrides `work_dir` from config).
        #[arg(long, value_name = "DIR")]
        work_dir: Option<PathBuf>,
        /// Print host-relative paths instead of full URLs.
        #[arg(long)]
        relative: bool,
    },

    /// List texture files referenced by an FBX model, one per line.
    Scan {
        /// Path to the model file.
        model: PathBuf,
    },

    /// Show encoding, version, creator, and texture references of an FBX model.
    Inspect {
        /// Path to the model file.
        model: PathBuf,
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the content type stored for a file name.
    Mime {
        /// File name or path.
        name: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Extract {
                archive,
                store,
                base_url,
                jobs,
                work_dir,
                relative,
            } => {
                let args = ExtractArgs {
                    archive,
                    store,
                    base_url,
                    jobs,
                    work_dir,
                    relative,
                };
                run_extract(&cfg, args)?;
            }
            CliCommand::Scan { model } => run_scan(&model)?,
            CliCommand::Inspect { model, json } => run_inspect(&model, json)?,
            CliCommand::Mime { name } => run_mime(&name),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
