//! Reader preferences loaded from `config.toml`.
//!
//! Missing keys fall back to defaults; CLI flags override whatever is loaded.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use quran_kit::Reading;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{AudioEnd, FrameGranularity};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub reading: Reading,
    pub audio_end: AudioEnd,
    pub highlight_granularity: FrameGranularity,
    pub notes_path: Option<PathBuf>,
}

impl ReaderConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {:?}", path))?;
        let config: ReaderConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config {:?}", path))?;
        info!(path = %path.display(), "loaded config");
        debug!(?config);
        Ok(config)
    }

    /// Like [`ReaderConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Configured notes file, else `notes.json` in the local data directory.
    pub fn notes_path(&self) -> Result<PathBuf> {
        match &self.notes_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_local_dir().join("notes.json")),
        }
    }
}

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("org", "quran-kit", "quran")
        .ok_or_else(|| anyhow!("unable to resolve platform data directories"))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = ReaderConfig::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ReaderConfig::default());
        assert_eq!(config.audio_end, AudioEnd::Juz);
        assert_eq!(config.highlight_granularity, FrameGranularity::Line);
        assert_eq!(config.reading, Reading::HafsMadani1405);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "audio_end = \"page\"\nnotes_path = \"/tmp/my-notes.json\"\n",
        )
        .unwrap();
        let config = ReaderConfig::load(&path).unwrap();
        assert_eq!(config.audio_end, AudioEnd::Page);
        assert_eq!(config.highlight_granularity, FrameGranularity::Line);
        assert_eq!(
            config.notes_path().unwrap(),
            PathBuf::from("/tmp/my-notes.json")
        );
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "highlight_granularity = \"pixel\"\n").unwrap();
        let err = ReaderConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = ReaderConfig {
            audio_end: AudioEnd::Sura,
            highlight_granularity: FrameGranularity::Word,
            ..Default::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("reading = \"hafs_madani_1405\""));
        assert_eq!(toml::from_str::<ReaderConfig>(&text).unwrap(), config);
    }
}
