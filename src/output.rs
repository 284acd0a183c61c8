//! Writes rendered posts into the output directory.
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// The configured directory does not exist. It is never created for the user.
    #[error("cannot use specified output directory '{0}': directory does not exist")]
    MissingDirectory(String),

    #[error("cannot use specified output directory '{0}': not a directory")]
    NotADirectory(String),

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Handle to an existing output directory.
#[derive(Debug, Clone)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Validates that `path` is an existing directory.
    pub fn open(path: &Path) -> Result<Self, OutputError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(Self {
                path: path.to_path_buf(),
            }),
            Ok(_) => Err(OutputError::NotADirectory(path.display().to_string())),
            Err(_) => Err(OutputError::MissingDirectory(path.display().to_string())),
        }
    }

    /// Writes `contents` to `<dir>/<filename>`, replacing any existing file.
    ///
    /// The data goes to a temporary sibling first, is synced, then renamed
    /// over the destination, so a failed write never leaves a partial post.
    pub fn write(&self, filename: &str, contents: &str) -> Result<PathBuf, OutputError> {
        use std::time::{SystemTime, UNIX_EPOCH};

        let dst = self.path.join(filename);

        // SEC-009: Randomized temp filename to prevent TOCTOU race conditions
        let random_suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let temp_path = self
            .path
            .join(format!(".{}.tmp.{:016x}", filename, random_suffix));

        let write_err = |source: std::io::Error| OutputError::Write {
            path: dst.display().to_string(),
            source,
        };

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true) // Fails atomically if file exists (prevents symlink race)
            .open(&temp_path)
            .map_err(write_err)?;

        if let Err(e) = file.write_all(contents.as_bytes()).and_then(|_| file.sync_all()) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(write_err(e));
        }
        drop(file);

        // On Windows, rename fails if destination exists, so remove it first
        #[cfg(windows)]
        if dst.exists() {
            if let Err(e) = std::fs::remove_file(&dst) {
                let _ = std::fs::remove_file(&temp_path);
                return Err(write_err(e));
            }
        }

        if let Err(e) = std::fs::rename(&temp_path, &dst) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(write_err(e));
        }

        tracing::debug!(path = %dst.display(), bytes = contents.len(), "Wrote post");
        Ok(dst)
    }
}
