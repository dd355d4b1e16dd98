use std::fs;
use std::io::Cursor;
use std::path::Path;

use exif::{Context, In, Value};
use image::{ImageFormat, ImageReader};

use crate::core::extractor::{ExtractError, Result};
use crate::core::tags::GPS_INFO_TAG;
use crate::models::{Dimensions, Rational, RawTagMap, RawValue};

/// An opened image: its raw tag directory and its real pixel size.
pub trait ImageContainer {
    /// `None` when the image carries no EXIF block.
    fn raw_tags(&self) -> Option<&RawTagMap>;
    fn pixel_dimensions(&self) -> Dimensions;
}

pub trait ContainerReader {
    type Container: ImageContainer;

    fn open(&self, path: &Path) -> Result<Self::Container>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct JpegContainer {
    raw_tags: Option<RawTagMap>,
    dimensions: Dimensions,
}

impl ImageContainer for JpegContainer {
    fn raw_tags(&self) -> Option<&RawTagMap> {
        self.raw_tags.as_ref()
    }

    fn pixel_dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JpegContainerReader;

impl ContainerReader for JpegContainerReader {
    type Container = JpegContainer;

    fn open(&self, path: &Path) -> Result<JpegContainer> {
        let bytes = fs::read(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .map_err(|source| ExtractError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        if reader.format() != Some(ImageFormat::Jpeg) {
            return Err(ExtractError::UnsupportedFormat(path.to_path_buf()));
        }

        let (width, height) =
            reader
                .into_dimensions()
                .map_err(|err| ExtractError::ImageOpen {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                })?;

        let mut exif_reader = exif::Reader::new();
        exif_reader.continue_on_error(true);
        let parsed = exif_reader
            .read_from_container(&mut Cursor::new(&bytes))
            .or_else(|err| {
                err.distill_partial_result(|errors| {
                    for error in errors {
                        log::warn!("[Exif] {}: skipped field: {error}", path.display());
                    }
                })
            });

        // Bad fields are dropped above; only an unparseable block is fatal.
        let raw_tags = match parsed {
            Ok(exif) => Some(raw_tags_from_exif(&exif)),
            Err(exif::Error::NotFound(_)) => None,
            Err(err) => {
                return Err(ExtractError::InvalidExif {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                })
            }
        };

        Ok(JpegContainer {
            raw_tags,
            dimensions: Dimensions::new(width, height),
        })
    }
}

/// Primary-image fields keyed by tag number. GPS fields are nested under the
/// GPSInfo pointer; interoperability fields are dropped.
pub fn raw_tags_from_exif(exif: &exif::Exif) -> RawTagMap {
    let mut tags = RawTagMap::new();
    let mut gps = RawTagMap::new();
    let mut has_gps_pointer = false;

    for field in exif.fields() {
        if field.ifd_num != In::PRIMARY {
            continue;
        }

        let number = field.tag.number();
        match field.tag.context() {
            Context::Gps => gps.insert(number, raw_value(&field.value)),
            Context::Interop => {}
            _ if number == GPS_INFO_TAG => {
                has_gps_pointer = true;
                tags.insert(number, RawValue::Directory(RawTagMap::new()));
            }
            _ => tags.insert(number, raw_value(&field.value)),
        }
    }

    if has_gps_pointer || !gps.is_empty() {
        tags.insert(GPS_INFO_TAG, RawValue::Directory(gps));
    }

    tags
}

fn raw_value(value: &Value) -> RawValue {
    match value {
        Value::Byte(v) => RawValue::Bytes(v.clone()),
        Value::Ascii(lines) => RawValue::Text(
            lines
                .iter()
                .map(|line| {
                    String::from_utf8_lossy(line)
                        .trim_end_matches('\0')
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        Value::Short(v) => RawValue::Integer(v.iter().map(|n| i64::from(*n)).collect()),
        Value::Long(v) => RawValue::Integer(v.iter().map(|n| i64::from(*n)).collect()),
        Value::SByte(v) => RawValue::Integer(v.iter().map(|n| i64::from(*n)).collect()),
        Value::SShort(v) => RawValue::Integer(v.iter().map(|n| i64::from(*n)).collect()),
        Value::SLong(v) => RawValue::Integer(v.iter().map(|n| i64::from(*n)).collect()),
        Value::Rational(v) => RawValue::Rational(
            v.iter()
                .map(|r| Rational::new(i64::from(r.num), i64::from(r.denom)))
                .collect(),
        ),
        Value::SRational(v) => RawValue::Rational(
            v.iter()
                .map(|r| Rational::new(i64::from(r.num), i64::from(r.denom)))
                .collect(),
        ),
        Value::Float(v) => RawValue::Float(v.iter().map(|n| f64::from(*n)).collect()),
        Value::Double(v) => RawValue::Float(v.clone()),
        Value::Undefined(v, _) => RawValue::Bytes(v.clone()),
        Value::Unknown(type_id, count, _) => {
            log::debug!("[Exif] unknown value type {type_id} ({count} items)");
            RawValue::Bytes(Vec::new())
        }
    }
}
