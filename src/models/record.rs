use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::models::{DecodedTagMap, TagValue};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Signed decimal degrees, south and west negative.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Everything extracted from one image. Built once; read-only afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetadataRecord {
    filename: String,
    #[serde(skip)]
    path: PathBuf,
    tags: DecodedTagMap,
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gps_error: Option<String>,
    dimensions: Dimensions,
}

impl MetadataRecord {
    pub fn new(path: impl Into<PathBuf>, tags: DecodedTagMap, dimensions: Dimensions) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|value| value.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Self {
            filename,
            path,
            tags,
            latitude: None,
            longitude: None,
            gps_error: None,
            dimensions,
        }
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.latitude = Some(coordinates.latitude);
        self.longitude = Some(coordinates.longitude);
        self
    }

    /// Marks a GPS block that was complete but could not be converted.
    pub fn with_gps_error(mut self, message: impl Into<String>) -> Self {
        self.latitude = None;
        self.longitude = None;
        self.gps_error = Some(message.into());
        self
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tags(&self) -> &DecodedTagMap {
        &self.tags
    }

    pub fn tag(&self, name: &str) -> Option<&TagValue> {
        self.tags.get(name)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates {
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }

    pub fn gps_error(&self) -> Option<&str> {
        self.gps_error.as_deref()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn has_metadata(&self) -> bool {
        !self.tags.is_empty()
    }

    /// (tag, value) pairs for single-image inspection. GPS sub-tags are
    /// listed inline; converted coordinates replace the raw triplets.
    pub fn display_rows(&self) -> Vec<(String, String)> {
        let coordinates = self.coordinates();
        let mut rows = Vec::with_capacity(self.tags.len());

        for (key, value) in self.tags.iter() {
            let Some(gps) = value.as_directory().filter(|_| key.matches("GPSInfo")) else {
                rows.push((key.to_string(), value.to_string()));
                continue;
            };

            for (sub_key, sub_value) in gps.iter() {
                let name = sub_key.to_string();
                let shown = match (coordinates, name.as_str()) {
                    (Some(c), "GPSLatitude") => c.latitude.to_string(),
                    (Some(c), "GPSLongitude") => c.longitude.to_string(),
                    _ => sub_value.to_string(),
                };
                rows.push((name, shown));
            }
        }

        rows
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
