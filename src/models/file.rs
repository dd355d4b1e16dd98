use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::Serialize;

pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Filesystem facts shown next to each image in the file table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FileInfo {
    pub path: PathBuf,
    pub filename: String,
    pub size: u64,
    pub accessed: Option<String>,
    pub modified: Option<String>,
    pub created: Option<String>,
}

impl FileInfo {
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let meta = fs::metadata(path)?;

        let filename = path
            .file_name()
            .map(|value| value.to_string_lossy().to_string())
            .unwrap_or_else(|| String::from("unknown"));

        Ok(Self {
            path: path.to_path_buf(),
            filename,
            size: meta.len(),
            accessed: meta.accessed().ok().map(format_timestamp),
            modified: meta.modified().ok().map(format_timestamp),
            created: meta.created().ok().map(format_timestamp),
        })
    }

    pub fn row(&self) -> [String; 5] {
        [
            self.filename.clone(),
            self.size.to_string(),
            self.accessed.clone().unwrap_or_default(),
            self.modified.clone().unwrap_or_default(),
            self.created.clone().unwrap_or_default(),
        ]
    }
}

pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}
