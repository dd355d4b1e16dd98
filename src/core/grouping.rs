use crate::models::{
    GroupAxis, GroupResult, GroupingFault, GroupingOptions, GroupingReport, MetadataRecord,
    TagValue,
};

pub const ORIGINAL: &str = "Original";
pub const MODIFIED: &str = "Modified";

const DATE_TAGS: [&str; 3] = ["DateTime", "DateTimeOriginal", "DateTimeDigitized"];

/// Outcome of classifying one record on one axis.
enum Placement {
    Bucket(String),
    Excluded,
    Fault { tag: &'static str, found: &'static str },
}

pub struct GroupingEngine;

impl GroupingEngine {
    /// Partitions `records` along every axis `options` selects. Each result is
    /// rebuilt from scratch; nothing is carried over between calls.
    pub fn group(records: &[MetadataRecord], options: &GroupingOptions) -> GroupingReport {
        let mut report = GroupingReport::default();

        for axis in options.axes() {
            let result = Self::group_axis(records, axis, &mut report.faults);
            log::debug!(
                "[Group] {axis}: {} buckets over {} records",
                result.len(),
                records.len()
            );
            report.results.insert(axis, result);
        }

        report
    }

    pub fn group_axis(
        records: &[MetadataRecord],
        axis: GroupAxis,
        faults: &mut Vec<GroupingFault>,
    ) -> GroupResult {
        let mut result = match axis {
            GroupAxis::Date => GroupResult::with_keys([ORIGINAL, MODIFIED]),
            _ => GroupResult::new(),
        };

        for record in records {
            match Self::place(record, axis) {
                Placement::Bucket(key) => result.push(&key, record.filename()),
                Placement::Excluded => {}
                Placement::Fault { tag, found } => {
                    let fault = GroupingFault {
                        filename: record.filename().to_string(),
                        axis,
                        tag: tag.to_string(),
                        found,
                    };
                    log::debug!("[Group] {fault}");
                    faults.push(fault);
                }
            }
        }

        result
    }

    fn place(record: &MetadataRecord, axis: GroupAxis) -> Placement {
        match axis {
            GroupAxis::Make => by_text_value(record, "Make"),
            GroupAxis::Model => by_text_value(record, "Model"),
            GroupAxis::Software => by_text_value(record, "Software"),
            GroupAxis::Date => by_date_consistency(record),
            GroupAxis::Size => by_size_consistency(record),
        }
    }
}

fn by_text_value(record: &MetadataRecord, tag: &'static str) -> Placement {
    match record.tag(tag) {
        None => Placement::Excluded,
        Some(TagValue::Text(value)) => Placement::Bucket(value.clone()),
        Some(other) => Placement::Fault {
            tag,
            found: other.kind_name(),
        },
    }
}

/// "Original" when all three timestamps agree, missing ones counting as "".
fn by_date_consistency(record: &MetadataRecord) -> Placement {
    let mut values = [""; 3];
    for (slot, tag) in values.iter_mut().zip(DATE_TAGS) {
        match record.tag(tag) {
            None => {}
            Some(TagValue::Text(value)) => *slot = value.as_str(),
            Some(other) => {
                return Placement::Fault {
                    tag,
                    found: other.kind_name(),
                }
            }
        }
    }

    let consistent = values.iter().all(|value| *value == values[0]);
    Placement::Bucket(String::from(if consistent { ORIGINAL } else { MODIFIED }))
}

/// Compares the real pixel size with ExifImageWidth/ExifImageHeight.
fn by_size_consistency(record: &MetadataRecord) -> Placement {
    let width = match exif_dimension(record, "ExifImageWidth") {
        Ok(Some(value)) => value,
        Ok(None) => return Placement::Excluded,
        Err(fault) => return fault,
    };
    let height = match exif_dimension(record, "ExifImageHeight") {
        Ok(Some(value)) => value,
        Ok(None) => return Placement::Excluded,
        Err(fault) => return fault,
    };

    let actual = record.dimensions();
    let unchanged = width == i64::from(actual.width) && height == i64::from(actual.height);
    Placement::Bucket(String::from(if unchanged { ORIGINAL } else { MODIFIED }))
}

fn exif_dimension(
    record: &MetadataRecord,
    tag: &'static str,
) -> Result<Option<i64>, Placement> {
    match record.tag(tag) {
        None => Ok(None),
        Some(TagValue::Integer(value)) => Ok(Some(*value)),
        Some(other) => Err(Placement::Fault {
            tag,
            found: other.kind_name(),
        }),
    }
}
