//! Tag lists and leaf metrics.
//!
//! A [`TagList`] is an ordered sequence of single-key tags with value
//! semantics: branching always copies, so a tag pushed on one branch is
//! never visible from a sibling branch or from an already emitted record.

use crate::document::Scalar;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Tag key carrying the device name. Always the first tag of a record.
pub const DEVICE_TAG: &str = "device";
/// Tag key carrying the dot-joined metric path.
pub const TYPE_TAG: &str = "type";
/// Tag key carrying the metric value. Always the last tag of a record.
pub const VALUE_TAG: &str = "value";

/// One identifying tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub key: String,
    pub value: Scalar,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

/// Ordered tags accumulated along one traversal branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TagList {
    tags: Vec<Tag>,
}

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh list seeded with the device tag.
    pub fn for_device(device: &str) -> Self {
        let mut list = Self::new();
        list.push(DEVICE_TAG, device);
        list
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Scalar>) {
        self.tags.push(Tag::new(key, value));
    }

    /// Independent copy for a new traversal branch.
    pub fn branch(&self) -> Self {
        self.clone()
    }

    /// Copy extended with one more tag.
    pub fn with(&self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        let mut list = self.branch();
        list.push(key, value);
        list
    }

    /// First tag with this key.
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.tags.iter().find(|t| t.key == key).map(|t| &t.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }

    /// Mutable access, for consumers that rewrite an emitted record.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tag> {
        self.tags.iter_mut()
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

/// One scalar metric with its full set of identifying tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafMetric {
    pub timestamp_seconds: u64,
    pub tags: TagList,
}

impl LeafMetric {
    pub fn new(timestamp_seconds: u64, tags: TagList) -> Self {
        Self {
            timestamp_seconds,
            tags,
        }
    }

    /// The dot-joined metric path.
    pub fn metric_type(&self) -> Option<&str> {
        self.tags.get(TYPE_TAG).and_then(Scalar::as_str)
    }

    pub fn value(&self) -> Option<&Scalar> {
        self.tags.get(VALUE_TAG)
    }

    pub fn device(&self) -> Option<&str> {
        self.tags.get(DEVICE_TAG).and_then(Scalar::as_str)
    }

    /// Timestamp as a UTC date-time.
    #[cfg(feature = "timestamps")]
    pub fn datetime(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        let secs = i64::try_from(self.timestamp_seconds).ok()?;
        chrono::DateTime::from_timestamp(secs, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_device_seeds_device_tag() {
        let tags = TagList::for_device("mx1");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.keys(), vec!["device"]);
        assert_eq!(tags.get("device"), Some(&Scalar::from("mx1")));
    }

    #[test]
    fn test_branch_is_independent() {
        let mut base = TagList::for_device("mx1");
        base.push("interface", "xe-0/0/0");

        let mut left = base.branch();
        let right = base.with("egress_queue", 1u64);
        left.push("egress_queue", 0u64);

        assert_eq!(base.len(), 2);
        assert_eq!(left.get("egress_queue"), Some(&Scalar::Unsigned(0)));
        assert_eq!(right.get("egress_queue"), Some(&Scalar::Unsigned(1)));
    }

    #[test]
    fn test_serialize_as_single_key_entries() {
        let mut tags = TagList::for_device("mx1");
        tags.push("value", 10u64);
        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(json, r#"[{"device":"mx1"},{"value":10}]"#);
    }

    #[test]
    fn test_leaf_metric_accessors() {
        let mut tags = TagList::for_device("mx1");
        tags.push(TYPE_TAG, "ingress_stats.if_pkts");
        tags.push(VALUE_TAG, 10u64);
        let metric = LeafMetric::new(1_465_467_390, tags);

        assert_eq!(metric.device(), Some("mx1"));
        assert_eq!(metric.metric_type(), Some("ingress_stats.if_pkts"));
        assert_eq!(metric.value(), Some(&Scalar::Unsigned(10)));
    }

    #[cfg(feature = "timestamps")]
    #[test]
    fn test_leaf_metric_datetime() {
        let metric = LeafMetric::new(0, TagList::new());
        assert_eq!(metric.datetime().unwrap().timestamp(), 0);
    }
}
