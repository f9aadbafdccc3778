use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per upload (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/texpack/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TexpackConfig {
    /// Root directory of the local store.
    pub store_dir: PathBuf,
    /// URL prefix returned for stored files.
    pub base_url: String,
    /// Directory under `store_dir` (and path under `base_url`) for uploads.
    pub upload_subdir: String,
    /// Number of concurrent texture uploads per archive.
    pub upload_concurrency: usize,
    /// Parent directory for per-call staging dirs (None = system temp dir).
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for TexpackConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("uploads"),
            base_url: "http://localhost:8080".to_string(),
            upload_subdir: "models".to_string(),
            upload_concurrency: 4,
            work_dir: None,
            retry: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("texpack")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TexpackConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<TexpackConfig> {
    if !path.exists() {
        let default_cfg = TexpackConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("writing default config {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(path)
}

/// Parse an existing config file.
pub fn load_from(path: &Path) -> Result<TexpackConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: TexpackConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = TexpackConfig::default();
        assert_eq!(cfg.store_dir, PathBuf::from("uploads"));
        assert_eq!(cfg.upload_subdir, "models");
        assert_eq!(cfg.upload_concurrency, 4);
        assert!(cfg.work_dir.is_none());
        assert!(cfg.retry.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = TexpackConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: TexpackConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.store_dir, cfg.store_dir);
        assert_eq!(parsed.base_url, cfg.base_url);
        assert_eq!(parsed.upload_subdir, cfg.upload_subdir);
        assert_eq!(parsed.upload_concurrency, cfg.upload_concurrency);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            store_dir = "/srv/assets"
            base_url = "https://cdn.example.com"
            upload_subdir = "fbx"
            upload_concurrency = 8
            work_dir = "/var/tmp/texpack"

            [retry]
            max_attempts = 3
            base_delay_secs = 0.5
            max_delay_secs = 15
        "#;
        let cfg: TexpackConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.store_dir, PathBuf::from("/srv/assets"));
        assert_eq!(cfg.upload_concurrency, 8);
        assert_eq!(cfg.work_dir, Some(PathBuf::from("/var/tmp/texpack")));
        let retry = cfg.retry.as_ref().unwrap();
        assert_eq!(retry.max_attempts, 3);
        assert!((retry.base_delay_secs - 0.5).abs() < 1e-9);
        assert_eq!(retry.max_delay_secs, 15);
    }

    #[test]
    fn load_or_init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert!(path.is_file());
        assert_eq!(cfg.upload_concurrency, 4);

        fs::write(
            &path,
            "store_dir = \"s\"\nbase_url = \"\"\nupload_subdir = \"\"\nupload_concurrency = 2\n",
        )
        .unwrap();
        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg.upload_concurrency, 2);
    }

    #[test]
    fn load_from_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "upload_concurrency = \"many\"").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config"));
    }
}
