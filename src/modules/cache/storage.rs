use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::RateCode;

/// Flat-file store holding the last observed rate code
pub struct RateCache {
    path: PathBuf,
}

impl RateCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached rate code.
    /// A missing file, unreadable file or non-numeric content is an I/O error.
    pub fn read(&self) -> io::Result<RateCode> {
        let contents = fs::read_to_string(&self.path)?;
        let trimmed = contents.trim();

        trimmed.parse::<RateCode>().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid cached rate {:?} in {}: {}",
                    trimmed,
                    self.path.display(),
                    e
                ),
            )
        })
    }

    /// Replace the cached rate code.
    /// The value is written to a sibling temp file and renamed into place.
    pub fn write(&self, rate: RateCode) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        write!(file, "{}", rate)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        debug!("Cached rate {} in {}", rate, self.path.display());
        Ok(())
    }
}
