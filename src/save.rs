//! Writing buffers to disk.
//!
//! The buffer view hands a file name and the trimmed text to a [`FileSink`].
//! [`DirectorySink`] behaves like a browser download and writes straight into
//! the configured directory; [`DialogSink`] asks first with a native dialog.

use chatpad_config::{SaveConfig, SaveLocation};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced while saving a buffer
#[derive(Debug, Error)]
pub enum SaveError {
    /// The user dismissed the save dialog
    #[error("save cancelled")]
    Cancelled,

    /// No usable target directory could be determined
    #[error("no save directory available")]
    NoDirectory,

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for saved buffers
pub trait FileSink {
    /// Persist `contents` under `file_name` and return where it went.
    fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf, SaveError>;
}

fn write_file(path: PathBuf, contents: &str) -> Result<PathBuf, SaveError> {
    match std::fs::write(&path, contents) {
        Ok(()) => {
            log::info!("Saved buffer to {} ({} bytes)", path.display(), contents.len());
            Ok(path)
        }
        Err(source) => {
            log::error!("Failed to save buffer to {}: {}", path.display(), source);
            Err(SaveError::Io { path, source })
        }
    }
}

/// Resolve the directory a [`SaveLocation`] points at.
///
/// Falls back to the Downloads folder when a custom path is not a directory.
pub fn resolve_save_directory(location: &SaveLocation) -> Option<PathBuf> {
    match location {
        SaveLocation::Downloads => dirs::download_dir(),
        SaveLocation::Cwd => std::env::current_dir().ok().or_else(dirs::download_dir),
        SaveLocation::Custom(path) => {
            let p = PathBuf::from(path);
            if p.is_dir() {
                Some(p)
            } else {
                log::warn!(
                    "Custom save directory {} does not exist, using Downloads",
                    p.display()
                );
                dirs::download_dir()
            }
        }
    }
}

/// Writes files into a fixed directory, overwriting same-named files.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    directory: Option<PathBuf>,
}

impl DirectorySink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
        }
    }

    pub fn from_location(location: &SaveLocation) -> Self {
        Self {
            directory: resolve_save_directory(location),
        }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}

impl FileSink for DirectorySink {
    fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf, SaveError> {
        let directory = self.directory.as_ref().ok_or(SaveError::NoDirectory)?;
        write_file(directory.join(file_name), contents)
    }
}

/// Shows a native save dialog seeded with the file name and directory.
#[derive(Debug, Clone)]
pub struct DialogSink {
    default_dir: Option<PathBuf>,
}

impl DialogSink {
    pub fn from_location(location: &SaveLocation) -> Self {
        Self {
            default_dir: resolve_save_directory(location),
        }
    }
}

impl FileSink for DialogSink {
    fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf, SaveError> {
        let mut dialog = rfd::FileDialog::new().set_file_name(file_name);
        if let Some(dir) = &self.default_dir {
            dialog = dialog.set_directory(dir);
        }

        let path = dialog.save_file().ok_or(SaveError::Cancelled)?;
        write_file(path, contents)
    }
}

/// Sink selected by the `save` config section.
pub fn sink_from_config(config: &SaveConfig) -> Box<dyn FileSink> {
    if config.ask_before_saving {
        Box::new(DialogSink::from_location(&config.location))
    } else {
        Box::new(DirectorySink::from_location(&config.location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path());

        let path = sink.save("notes.js", "let a = 1;").unwrap();
        assert_eq!(path, dir.path().join("notes.js"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "let a = 1;");
    }

    #[test]
    fn test_directory_sink_overwrites() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path());
        sink.save("a.py", "print(1)").unwrap();
        sink.save("a.py", "print(2)").unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("a.py")).unwrap(),
            "print(2)"
        );
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path().join("missing"));
        let err = sink.save("a.js", "1").unwrap_err();
        assert!(matches!(err, SaveError::Io { .. }));
    }

    #[test]
    fn test_custom_location_resolves_existing_dir() {
        let dir = TempDir::new().unwrap();
        let location = SaveLocation::Custom(dir.path().to_string_lossy().into_owned());
        assert_eq!(resolve_save_directory(&location), Some(dir.path().to_path_buf()));
    }
}
