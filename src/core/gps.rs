use std::fmt;

use crate::models::{Coordinates, Rational, TagMap, TagValue};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DmsComponent {
    Degrees,
    Minutes,
    Seconds,
}

impl DmsComponent {
    fn as_str(self) -> &'static str {
        match self {
            Self::Degrees => "degrees",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoordinateAxis {
    Latitude,
    Longitude,
}

impl CoordinateAxis {
    pub fn positive_ref(self) -> &'static str {
        match self {
            Self::Latitude => "N",
            Self::Longitude => "E",
        }
    }

    pub fn limit(self) -> f64 {
        match self {
            Self::Latitude => 90.0,
            Self::Longitude => 180.0,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GpsError {
    ZeroDenominator { component: DmsComponent },
    OutOfRange { axis: CoordinateAxis, value: f64 },
}

impl fmt::Display for GpsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDenominator { component } => {
                write!(f, "zero denominator in GPS {}", component.as_str())
            }
            Self::OutOfRange { axis, value } => write!(
                f,
                "GPS {} {value} outside [-{limit}, {limit}]",
                axis.as_str(),
                limit = axis.limit()
            ),
        }
    }
}

impl std::error::Error for GpsError {}

pub type Result<T> = std::result::Result<T, GpsError>;

/// degrees + minutes/60 + seconds/3600, unsigned.
pub fn to_decimal_degrees(dms: &[Rational; 3]) -> Result<f64> {
    let [degrees, minutes, seconds] = dms;
    let part = |value: &Rational, component| {
        value
            .to_f64()
            .ok_or(GpsError::ZeroDenominator { component })
    };

    let d = part(degrees, DmsComponent::Degrees)?;
    let m = part(minutes, DmsComponent::Minutes)?;
    let s = part(seconds, DmsComponent::Seconds)?;

    Ok(d + m / 60.0 + s / 3600.0)
}

/// Negated unless `reference` is the axis' positive hemisphere ("N" or "E").
pub fn signed_degrees(dms: &[Rational; 3], reference: &str, axis: CoordinateAxis) -> Result<f64> {
    let magnitude = to_decimal_degrees(dms)?;
    let value = if reference.trim() == axis.positive_ref() {
        magnitude
    } else {
        -magnitude
    };

    if value.abs() > axis.limit() {
        return Err(GpsError::OutOfRange { axis, value });
    }
    Ok(value)
}

/// Both coordinates, or `None` unless latitude, latitude ref, longitude and
/// longitude ref are all present.
pub fn coordinates(gps: &TagMap) -> Result<Option<Coordinates>> {
    let (Some(lat), Some(lat_ref), Some(lon), Some(lon_ref)) = (
        gps.get("GPSLatitude").and_then(TagValue::as_triplet),
        reference(gps, "GPSLatitudeRef"),
        gps.get("GPSLongitude").and_then(TagValue::as_triplet),
        reference(gps, "GPSLongitudeRef"),
    ) else {
        return Ok(None);
    };

    let latitude = signed_degrees(lat, lat_ref, CoordinateAxis::Latitude)?;
    let longitude = signed_degrees(lon, lon_ref, CoordinateAxis::Longitude)?;

    Ok(Some(Coordinates {
        latitude,
        longitude,
    }))
}

fn reference<'a>(gps: &'a TagMap, name: &str) -> Option<&'a str> {
    gps.get(name)
        .and_then(TagValue::as_text)
        .filter(|value| !value.trim().is_empty())
}
