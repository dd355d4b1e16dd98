use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::container::{ContainerReader, ImageContainer, JpegContainerReader};
use crate::core::gps;
use crate::core::tags::TagDecoder;
use crate::models::{DecodedTagMap, MetadataRecord};

#[derive(Debug)]
pub enum ExtractError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    ImageOpen {
        path: PathBuf,
        reason: String,
    },
    UnsupportedFormat(PathBuf),
    InvalidExif {
        path: PathBuf,
        reason: String,
    },
}

impl ExtractError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::ImageOpen { path, .. }
            | Self::UnsupportedFormat(path)
            | Self::InvalidExif { path, .. } => path,
        }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::ImageOpen { path, reason } => {
                write!(f, "not a readable image: {}: {reason}", path.display())
            }
            Self::UnsupportedFormat(path) => {
                write!(f, "unsupported image format: {}", path.display())
            }
            Self::InvalidExif { path, reason } => {
                write!(f, "corrupt EXIF block in {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Records extracted from a batch of files, in input order, plus the files
/// that could not be read.
#[derive(Debug, Default)]
pub struct BatchExtraction {
    pub records: Vec<MetadataRecord>,
    pub failures: Vec<ExtractError>,
}

impl BatchExtraction {
    pub fn total(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

pub struct MetadataExtractor<R = JpegContainerReader> {
    reader: R,
}

impl MetadataExtractor {
    pub fn new() -> Self {
        Self::with_reader(JpegContainerReader)
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ContainerReader> MetadataExtractor<R> {
    pub fn with_reader(reader: R) -> Self {
        Self { reader }
    }

    pub fn extract(&self, path: &Path) -> Result<MetadataRecord> {
        let container = self.reader.open(path)?;

        let tags = match container.raw_tags() {
            Some(raw) => TagDecoder::decode_map(raw),
            None => {
                log::debug!("[Exif] no metadata in {}", path.display());
                DecodedTagMap::new()
            }
        };

        let located = tags.gps().map(gps::coordinates);
        let record = MetadataRecord::new(path, tags, container.pixel_dimensions());

        Ok(match located {
            Some(Ok(Some(coordinates))) => record.with_coordinates(coordinates),
            Some(Err(err)) => {
                log::warn!("[Gps] {}: {err}", path.display());
                record.with_gps_error(err.to_string())
            }
            Some(Ok(None)) | None => record,
        })
    }

    /// Extracts each path in turn. A file that fails is reported and skipped.
    pub fn extract_batch<I, P>(&self, paths: I) -> BatchExtraction
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut batch = BatchExtraction::default();

        for candidate in paths {
            match self.extract(candidate.as_ref()) {
                Ok(record) => batch.records.push(record),
                Err(err) => {
                    log::warn!("[Metadata] skipping file: {err}");
                    batch.failures.push(err);
                }
            }
        }

        batch
    }
}
