use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, Serializer};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Serialize)]
pub enum GroupAxis {
    Make,
    Model,
    Date,
    Size,
    Software,
}

impl GroupAxis {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Make => "Make",
            Self::Model => "Model",
            Self::Date => "Date",
            Self::Size => "Size",
            Self::Software => "Software",
        }
    }
}

impl fmt::Display for GroupAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which axes a grouping run covers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingOptions {
    pub make_model: bool,
    pub date: bool,
    pub size: bool,
    pub software: bool,
}

impl GroupingOptions {
    pub fn all() -> Self {
        Self {
            make_model: true,
            date: true,
            size: true,
            software: true,
        }
    }

    pub fn axes(&self) -> Vec<GroupAxis> {
        let mut axes = Vec::new();
        if self.make_model {
            axes.push(GroupAxis::Make);
            axes.push(GroupAxis::Model);
        }
        if self.date {
            axes.push(GroupAxis::Date);
        }
        if self.size {
            axes.push(GroupAxis::Size);
        }
        if self.software {
            axes.push(GroupAxis::Software);
        }
        axes
    }

    pub fn is_empty(&self) -> bool {
        self.axes().is_empty()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct GroupBucket {
    key: String,
    filenames: Vec<String>,
}

/// Buckets in first-seen order; filenames in input order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GroupResult {
    buckets: Vec<GroupBucket>,
}

impl GroupResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            buckets: keys
                .into_iter()
                .map(|key| GroupBucket {
                    key: key.into(),
                    filenames: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn push(&mut self, key: &str, filename: impl Into<String>) {
        let filename = filename.into();
        if let Some(bucket) = self.buckets.iter_mut().find(|bucket| bucket.key == key) {
            bucket.filenames.push(filename);
        } else {
            self.buckets.push(GroupBucket {
                key: key.to_string(),
                filenames: vec![filename],
            });
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.buckets
            .iter()
            .find(|bucket| bucket.key == key)
            .map(|bucket| bucket.filenames.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|bucket| bucket.key.as_str())
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.filenames.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl Serialize for GroupResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.buckets
                .iter()
                .map(|bucket| (&bucket.key, &bucket.filenames)),
        )
    }
}

/// A record left out of one axis because a tag held an unexpected kind of
/// value.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct GroupingFault {
    pub filename: String,
    pub axis: GroupAxis,
    pub tag: String,
    pub found: &'static str,
}

impl fmt::Display for GroupingFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} axis skipped, tag {} holds {}",
            self.filename, self.axis, self.tag, self.found
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct GroupingReport {
    pub results: BTreeMap<GroupAxis, GroupResult>,
    pub faults: Vec<GroupingFault>,
}

impl GroupingReport {
    pub fn get(&self, axis: GroupAxis) -> Option<&GroupResult> {
        self.results.get(&axis)
    }

    pub fn faults_for(&self, axis: GroupAxis) -> impl Iterator<Item = &GroupingFault> {
        self.faults.iter().filter(move |fault| fault.axis == axis)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
