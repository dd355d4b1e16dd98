mod file;
mod grouping;
mod record;
mod tag;

pub use file::{format_timestamp, FileInfo, TIMESTAMP_FORMAT};
pub use grouping::{GroupAxis, GroupResult, GroupingFault, GroupingOptions, GroupingReport};
pub use record::{Coordinates, Dimensions, MetadataRecord};
pub use tag::{DecodedTagMap, Rational, RawTagMap, RawValue, TagId, TagKey, TagMap, TagValue};
