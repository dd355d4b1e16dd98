use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::container::ContainerReader;
use crate::core::extractor::{BatchExtraction, MetadataExtractor};
use crate::core::formats;
use crate::models::FileInfo;

/// Supported images directly inside `dir`, sorted by file name. Not recursive.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("cannot list directory {}", dir.display()))?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("cannot list directory {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && formats::is_supported(&path) {
            images.push(path);
        }
    }

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

pub fn file_info(path: &Path) -> Result<FileInfo> {
    FileInfo::from_path(path).with_context(|| format!("cannot stat {}", path.display()))
}

/// File table rows for every listed image. Files that vanish between the
/// listing and the stat are left out.
pub fn file_table(dir: &Path) -> Result<Vec<FileInfo>> {
    let rows = list_images(dir)?
        .iter()
        .filter_map(|path| match file_info(path) {
            Ok(info) => Some(info),
            Err(err) => {
                log::warn!("[Scan] {err:#}");
                None
            }
        })
        .collect();
    Ok(rows)
}

/// Lists `dir` and extracts every image sequentially. Only a failure to list
/// the directory is an error; unreadable files end up in `failures`.
pub fn scan_directory<R: ContainerReader>(
    dir: &Path,
    extractor: &MetadataExtractor<R>,
) -> Result<BatchExtraction> {
    let paths = list_images(dir)?;
    let batch = extractor.extract_batch(&paths);

    log::debug!(
        "[Scan] {}: {} records, {} skipped",
        dir.display(),
        batch.records.len(),
        batch.failures.len()
    );

    Ok(batch)
}
