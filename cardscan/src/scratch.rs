//! Short-lived image files handed to the OCR engine.
//!
//! A [`ScratchFile`] owns its path: the file is removed when the value is
//! dropped, whichever way the request that created it ends.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use nanoid::nanoid;
use tracing::{debug, warn};

use crate::error::Result;

pub const DEFAULT_FILE_NAME: &str = "image.jpg";
const MAX_FILE_NAME_LEN: usize = 96;

#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Write `bytes` to a fresh file in `dir`, creating the directory if needed.
    ///
    /// The client-supplied `file_name` only contributes a sanitised suffix;
    /// the file always lands directly inside `dir`.
    pub async fn create(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<Self> {
        tokio::fs::create_dir_all(dir).await?;

        let file = Self {
            path: dir.join(scratch_name(file_name)),
        };
        tokio::fs::write(&file.path, bytes).await?;

        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Temporary file deleted"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Temporary file already gone")
            }
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "Could not delete temporary file"
            ),
        }
    }
}

fn scratch_name(file_name: &str) -> String {
    format!(
        "{}_{}_{}",
        Utc::now().timestamp_millis(),
        nanoid!(10),
        sanitize_file_name(file_name)
    )
}

fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILE_NAME_LEN)
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        cleaned
    }
}
