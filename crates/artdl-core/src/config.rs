use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::coordinates::{Coordinates, DEFAULT_EXTENSION};
use crate::error::ResolutionError;
use crate::fetcher::DownloadRequest;

/// Download configuration loaded from `~/.config/artdl/config.toml`.
///
/// Built once and passed by reference; nothing mutates it during a download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloaderConfig {
    /// When false the download is skipped entirely (configuration is left in place).
    pub enabled: bool,
    /// Repository base URL; `http://` is assumed when no scheme is given.
    pub artifact_repository: String,
    pub group_id: String,
    pub artifact_id: String,
    /// Versions containing `SNAPSHOT` are resolved through `maven-metadata.xml`.
    pub version: String,
    pub extension: String,
    pub classifier: Option<String>,
    /// If set, the downloaded file is renamed to this name inside `destination_folder`.
    pub rename_file_to: Option<String>,
    pub destination_folder: PathBuf,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            artifact_repository: "http://80.74.108.9/content/repositories/snapshots".to_string(),
            group_id: "org.jsystemtest".to_string(),
            artifact_id: "jsystemCore".to_string(),
            version: "6.0.00-SNAPSHOT".to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            classifier: None,
            rename_file_to: None,
            destination_folder: PathBuf::from("."),
        }
    }
}

impl DownloaderConfig {
    /// Validated coordinates for this configuration.
    pub fn coordinates(&self) -> Result<Coordinates, ResolutionError> {
        Ok(Coordinates::new(
            &self.artifact_repository,
            &self.group_id,
            &self.artifact_id,
            &self.version,
        )?
        .with_extension(&self.extension)
        .with_classifier(self.classifier.as_deref()))
    }

    pub fn download_request(&self) -> Result<DownloadRequest, ResolutionError> {
        Ok(DownloadRequest {
            coordinates: self.coordinates()?,
            destination_folder: self.destination_folder.clone(),
            rename_to: self
                .rename_file_to
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("artdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DownloaderConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DownloaderConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path. Missing keys take their defaults.
pub fn load_from(path: &Path) -> Result<DownloaderConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: DownloaderConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(cfg)
}
