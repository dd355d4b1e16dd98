use crate::models::{DecodedTagMap, RawTagMap, RawValue, TagId, TagKey, TagMap, TagValue};

pub const GPS_INFO_TAG: TagId = 0x8825;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TagNamespace {
    Image,
    Gps,
}

/// The value shape a registered tag is expected to carry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TagKind {
    Integer,
    Text,
    Bytes,
    Rational,
    RationalTriplet,
}

#[derive(Clone, Copy, Debug)]
pub struct TagDef {
    pub id: TagId,
    pub name: &'static str,
    pub kind: TagKind,
}

const fn def(id: TagId, name: &'static str, kind: TagKind) -> TagDef {
    TagDef { id, name, kind }
}

use TagKind::{Bytes, Integer, Rational as Rat, RationalTriplet as Triplet, Text};

// Sorted by id.
static IMAGE_TAGS: &[TagDef] = &[
    def(0x000B, "ProcessingSoftware", Text),
    def(0x00FE, "NewSubfileType", Integer),
    def(0x00FF, "SubfileType", Integer),
    def(0x0100, "ImageWidth", Integer),
    def(0x0101, "ImageLength", Integer),
    def(0x0102, "BitsPerSample", Integer),
    def(0x0103, "Compression", Integer),
    def(0x0106, "PhotometricInterpretation", Integer),
    def(0x010E, "ImageDescription", Text),
    def(0x010F, "Make", Text),
    def(0x0110, "Model", Text),
    def(0x0111, "StripOffsets", Integer),
    def(0x0112, "Orientation", Integer),
    def(0x0115, "SamplesPerPixel", Integer),
    def(0x0116, "RowsPerStrip", Integer),
    def(0x0117, "StripByteCounts", Integer),
    def(0x011A, "XResolution", Rat),
    def(0x011B, "YResolution", Rat),
    def(0x011C, "PlanarConfiguration", Integer),
    def(0x0128, "ResolutionUnit", Integer),
    def(0x012D, "TransferFunction", Integer),
    def(0x0131, "Software", Text),
    def(0x0132, "DateTime", Text),
    def(0x013B, "Artist", Text),
    def(0x013E, "WhitePoint", Rat),
    def(0x013F, "PrimaryChromaticities", Rat),
    def(0x0201, "JpegIFOffset", Integer),
    def(0x0202, "JpegIFByteCount", Integer),
    def(0x0211, "YCbCrCoefficients", Rat),
    def(0x0212, "YCbCrSubSampling", Integer),
    def(0x0213, "YCbCrPositioning", Integer),
    def(0x0214, "ReferenceBlackWhite", Rat),
    def(0x4746, "Rating", Integer),
    def(0x8298, "Copyright", Text),
    def(0x829A, "ExposureTime", Rat),
    def(0x829D, "FNumber", Rat),
    def(0x8769, "ExifOffset", Integer),
    def(0x8773, "InterColorProfile", Bytes),
    def(0x8822, "ExposureProgram", Integer),
    def(0x8824, "SpectralSensitivity", Text),
    def(0x8825, "GPSInfo", Integer),
    def(0x8827, "ISOSpeedRatings", Integer),
    def(0x8828, "OECF", Bytes),
    def(0x8830, "SensitivityType", Integer),
    def(0x8832, "RecommendedExposureIndex", Integer),
    def(0x9000, "ExifVersion", Bytes),
    def(0x9003, "DateTimeOriginal", Text),
    def(0x9004, "DateTimeDigitized", Text),
    def(0x9010, "OffsetTime", Text),
    def(0x9011, "OffsetTimeOriginal", Text),
    def(0x9012, "OffsetTimeDigitized", Text),
    def(0x9101, "ComponentsConfiguration", Bytes),
    def(0x9102, "CompressedBitsPerPixel", Rat),
    def(0x9201, "ShutterSpeedValue", Rat),
    def(0x9202, "ApertureValue", Rat),
    def(0x9203, "BrightnessValue", Rat),
    def(0x9204, "ExposureBiasValue", Rat),
    def(0x9205, "MaxApertureValue", Rat),
    def(0x9206, "SubjectDistance", Rat),
    def(0x9207, "MeteringMode", Integer),
    def(0x9208, "LightSource", Integer),
    def(0x9209, "Flash", Integer),
    def(0x920A, "FocalLength", Rat),
    def(0x9214, "SubjectArea", Integer),
    def(0x927C, "MakerNote", Bytes),
    def(0x9286, "UserComment", Bytes),
    def(0x9290, "SubsecTime", Text),
    def(0x9291, "SubsecTimeOriginal", Text),
    def(0x9292, "SubsecTimeDigitized", Text),
    def(0xA000, "FlashPixVersion", Bytes),
    def(0xA001, "ColorSpace", Integer),
    def(0xA002, "ExifImageWidth", Integer),
    def(0xA003, "ExifImageHeight", Integer),
    def(0xA004, "RelatedSoundFile", Text),
    def(0xA005, "ExifInteroperabilityOffset", Integer),
    def(0xA20B, "FlashEnergy", Rat),
    def(0xA20E, "FocalPlaneXResolution", Rat),
    def(0xA20F, "FocalPlaneYResolution", Rat),
    def(0xA210, "FocalPlaneResolutionUnit", Integer),
    def(0xA214, "SubjectLocation", Integer),
    def(0xA215, "ExposureIndex", Rat),
    def(0xA217, "SensingMethod", Integer),
    def(0xA300, "FileSource", Bytes),
    def(0xA301, "SceneType", Bytes),
    def(0xA302, "CFAPattern", Bytes),
    def(0xA401, "CustomRendered", Integer),
    def(0xA402, "ExposureMode", Integer),
    def(0xA403, "WhiteBalance", Integer),
    def(0xA404, "DigitalZoomRatio", Rat),
    def(0xA405, "FocalLengthIn35mmFilm", Integer),
    def(0xA406, "SceneCaptureType", Integer),
    def(0xA407, "GainControl", Integer),
    def(0xA408, "Contrast", Integer),
    def(0xA409, "Saturation", Integer),
    def(0xA40A, "Sharpness", Integer),
    def(0xA40B, "DeviceSettingDescription", Bytes),
    def(0xA40C, "SubjectDistanceRange", Integer),
    def(0xA420, "ImageUniqueID", Text),
    def(0xA430, "CameraOwnerName", Text),
    def(0xA431, "BodySerialNumber", Text),
    def(0xA432, "LensSpecification", Rat),
    def(0xA433, "LensMake", Text),
    def(0xA434, "LensModel", Text),
    def(0xA435, "LensSerialNumber", Text),
    def(0xA500, "Gamma", Rat),
    def(0xC4A5, "PrintImageMatching", Bytes),
];

static GPS_TAGS: &[TagDef] = &[
    def(0, "GPSVersionID", Bytes),
    def(1, "GPSLatitudeRef", Text),
    def(2, "GPSLatitude", Triplet),
    def(3, "GPSLongitudeRef", Text),
    def(4, "GPSLongitude", Triplet),
    def(5, "GPSAltitudeRef", Bytes),
    def(6, "GPSAltitude", Rat),
    def(7, "GPSTimeStamp", Triplet),
    def(8, "GPSSatellites", Text),
    def(9, "GPSStatus", Text),
    def(10, "GPSMeasureMode", Text),
    def(11, "GPSDOP", Rat),
    def(12, "GPSSpeedRef", Text),
    def(13, "GPSSpeed", Rat),
    def(14, "GPSTrackRef", Text),
    def(15, "GPSTrack", Rat),
    def(16, "GPSImgDirectionRef", Text),
    def(17, "GPSImgDirection", Rat),
    def(18, "GPSMapDatum", Text),
    def(19, "GPSDestLatitudeRef", Text),
    def(20, "GPSDestLatitude", Triplet),
    def(21, "GPSDestLongitudeRef", Text),
    def(22, "GPSDestLongitude", Triplet),
    def(23, "GPSDestBearingRef", Text),
    def(24, "GPSDestBearing", Rat),
    def(25, "GPSDestDistanceRef", Text),
    def(26, "GPSDestDistance", Rat),
    def(27, "GPSProcessingMethod", Bytes),
    def(28, "GPSAreaInformation", Bytes),
    def(29, "GPSDateStamp", Text),
    def(30, "GPSDifferential", Integer),
    def(31, "GPSHPositioningError", Rat),
];

pub struct TagDecoder;

impl TagDecoder {
    pub fn lookup(namespace: TagNamespace, id: TagId) -> Option<&'static TagDef> {
        let table = match namespace {
            TagNamespace::Image => IMAGE_TAGS,
            TagNamespace::Gps => GPS_TAGS,
        };
        table
            .binary_search_by_key(&id, |entry| entry.id)
            .ok()
            .map(|index| &table[index])
    }

    /// Registered name for `id`, or the id itself when none is registered.
    pub fn decode(namespace: TagNamespace, id: TagId) -> TagKey {
        match Self::lookup(namespace, id) {
            Some(entry) => TagKey::Named(entry.name),
            None => TagKey::Raw(id),
        }
    }

    pub fn decode_map(raw: &RawTagMap) -> DecodedTagMap {
        Self::decode_namespace(TagNamespace::Image, raw)
    }

    fn decode_namespace(namespace: TagNamespace, raw: &RawTagMap) -> TagMap {
        let mut map = TagMap::new();
        for (id, value) in raw.iter() {
            let (key, value) = Self::decode_entry(namespace, id, value);
            map.insert(key, value);
        }
        map
    }

    fn decode_entry(namespace: TagNamespace, id: TagId, value: &RawValue) -> (TagKey, TagValue) {
        if let RawValue::Directory(sub) = value {
            let inner = match (namespace, id) {
                (TagNamespace::Image, GPS_INFO_TAG) => TagNamespace::Gps,
                _ => namespace,
            };
            let key = Self::decode(namespace, id);
            return (key, TagValue::Directory(Self::decode_namespace(inner, sub)));
        }

        match Self::lookup(namespace, id) {
            Some(entry) => (TagKey::Named(entry.name), typed_value(entry.kind, value)),
            None => {
                log::debug!("[Exif] unregistered {namespace:?} tag 0x{id:04x}");
                (TagKey::Raw(id), natural_value(value))
            }
        }
    }
}

/// Coerces into the registered kind, falling back to the natural shape of
/// the raw value when it does not fit.
fn typed_value(kind: TagKind, value: &RawValue) -> TagValue {
    match (kind, value) {
        (TagKind::Text, RawValue::Bytes(bytes)) => match std::str::from_utf8(bytes) {
            Ok(text) => TagValue::Text(text.trim_end_matches('\0').to_string()),
            Err(_) => TagValue::Bytes(bytes.clone()),
        },
        (TagKind::Integer, RawValue::Bytes(bytes)) if bytes.len() == 1 => {
            TagValue::Integer(i64::from(bytes[0]))
        }
        (TagKind::RationalTriplet, RawValue::Rational(values)) => match values.as_slice() {
            [d, m, s] => TagValue::RationalTriplet([*d, *m, *s]),
            _ => natural_value(value),
        },
        _ => natural_value(value),
    }
}

fn natural_value(value: &RawValue) -> TagValue {
    match value {
        RawValue::Integer(values) => match values.as_slice() {
            [single] => TagValue::Integer(*single),
            _ => TagValue::Integers(values.clone()),
        },
        RawValue::Float(values) => TagValue::Float(values.clone()),
        RawValue::Text(text) => TagValue::Text(text.clone()),
        RawValue::Bytes(bytes) => TagValue::Bytes(bytes.clone()),
        RawValue::Rational(values) => match values.as_slice() {
            [single] => TagValue::Rational(*single),
            _ => TagValue::Rationals(values.clone()),
        },
        RawValue::Directory(sub) => TagValue::Directory(TagDecoder::decode_map(sub)),
    }
}
