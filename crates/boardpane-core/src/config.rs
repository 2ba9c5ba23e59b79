//! Application configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use boardpane_session::SnapshotFormat;
use boardpane_state::Rect;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the tool window session is stored
    pub session_path: PathBuf,
    /// Stream format used when saving; reading detects the format itself
    pub snapshot_format: SnapshotFormat,
    /// Restore tool windows when a frame opens
    pub restore_on_startup: bool,
    /// Main frame bounds used until a session restores its own
    pub frame_bounds: Rect,
    /// Help text per topic, handed to the help service at startup
    pub help_topics: BTreeMap<String, String>,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            session_path: data_dir.join("windows.session"),
            snapshot_format: SnapshotFormat::Tagged,
            restore_on_startup: true,
            frame_bounds: Rect::new(0, 0, 1280, 800),
            help_topics: BTreeMap::new(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("BoardPane"))
            .unwrap_or_else(|| PathBuf::from(".boardpane"))
    }

    /// Reads a JSON config. A missing file yields the defaults; fields absent
    /// from the file keep their default values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.session_path.as_os_str().is_empty() {
            return Err(CoreError::Config("session_path cannot be empty".to_string()));
        }
        if self.frame_bounds.width <= 0 || self.frame_bounds.height <= 0 {
            return Err(CoreError::Config("frame_bounds must have a positive size".to_string()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "snapshot_format": "untagged" }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.snapshot_format, SnapshotFormat::Untagged);
        assert!(config.restore_on_startup);
        assert!(config.session_path.ends_with("windows.session"));
        assert_eq!(config.frame_bounds, Rect::new(0, 0, 1280, 800));
    }

    #[test]
    fn test_frame_bounds_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "frame_bounds": { "x": 20, "y": 30, "width": 1600, "height": 900 } }"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.frame_bounds, Rect::new(20, 30, 1600, 900));
    }

    #[test]
    fn test_degenerate_frame_bounds_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "frame_bounds": { "x": 0, "y": 0, "width": 0, "height": 600 } }"#,
        )
        .unwrap();
        assert!(matches!(Config::load(&path), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::new(dir.path().to_path_buf());
        config.restore_on_startup = false;
        config.frame_bounds = Rect::new(5, 5, 800, 600);
        config
            .help_topics
            .insert("nets".to_string(), "Lists the nets of the board".to_string());
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(config.snapshot_format, SnapshotFormat::Tagged);
    }

    #[test]
    fn test_empty_session_path_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "session_path": "" }"#).unwrap();
        assert!(matches!(Config::load(&path), Err(CoreError::Config(_))));
    }
}
