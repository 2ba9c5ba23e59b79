//! Session files on disk

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use boardpane_window::PersistableHandle;

use crate::error::SessionError;
use crate::format::SnapshotFormat;
use crate::report::{RestoreReport, SaveReport};
use crate::snapshot::SessionSnapshot;
use crate::Result;

#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
    snapshot: SessionSnapshot,
}

impl SessionFile {
    pub fn new<P: AsRef<Path>>(path: P, format: SnapshotFormat) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            snapshot: SessionSnapshot::new(format),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Writes the session next to the target and renames it into place, so an
    /// interrupted save never leaves a half-written session behind.
    pub fn save(&self, windows: &[PersistableHandle]) -> Result<SaveReport> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        let report = match self.write_and_rename(&temp_path, windows) {
            Ok(report) => report,
            Err(err) => {
                if temp_path.exists() {
                    if let Err(cleanup) = fs::remove_file(&temp_path) {
                        tracing::warn!(
                            path = %temp_path.display(),
                            error = %cleanup,
                            "Failed to remove temporary session file"
                        );
                    }
                }
                return Err(err);
            }
        };

        tracing::debug!(path = %self.path.display(), "Wrote session file");
        Ok(report)
    }

    fn write_and_rename(
        &self,
        temp_path: &Path,
        windows: &[PersistableHandle],
    ) -> Result<SaveReport> {
        let mut writer = BufWriter::new(File::create(temp_path)?);
        let report = self.snapshot.write(&mut writer, windows)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        drop(writer);
        fs::rename(temp_path, &self.path)?;
        Ok(report)
    }

    pub fn load(&self, windows: &[PersistableHandle]) -> Result<RestoreReport> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SessionError::NotFound(self.path.display().to_string()),
            _ => SessionError::Io(e),
        })?;
        self.snapshot.read(&mut BufReader::new(file), windows)
    }
}
