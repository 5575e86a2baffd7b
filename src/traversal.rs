//! Schema-driven traversal of sensor entries.
//!
//! The walker carries the dot-path of container names and emits one
//! [`LeafMetric`] per scalar leaf. Every emitted record gets its own copy of
//! the tag list, and every element of a repeated group walks on its own
//! branch, so nothing pushed for one record can reach another.

use crate::document::{expect_list, expect_map, expect_scalar, Scalar};
use crate::error::EntryError;
use crate::record::clean_up_name;
use crate::schema::{GroupSpec, Presence, RepeatedSpec, Shape, TagFormat, TagRule, Walk};
use crate::tags::{LeafMetric, TagList, TYPE_TAG, VALUE_TAG};
use serde_json::{Map, Value};

/// Field value, treating JSON null as absent.
fn present<'a>(map: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    map.get(field).filter(|v| !v.is_null())
}

/// Push the tags described by `rules` onto `tags`.
pub(crate) fn apply_tag_rules(
    rules: &[TagRule],
    map: &Map<String, Value>,
    tags: &mut TagList,
) -> Result<(), EntryError> {
    for rule in rules {
        match present(map, rule.field) {
            Some(value) => {
                let scalar = expect_scalar(value, rule.field)?;
                tags.push(rule.tag, format_tag(scalar, rule.format));
            }
            None if rule.presence == Presence::Required => {
                return Err(EntryError::MissingField {
                    field: rule.field.to_string(),
                });
            }
            None => {}
        }
    }
    Ok(())
}

fn format_tag(value: Scalar, format: TagFormat) -> Scalar {
    match format {
        TagFormat::Raw => value,
        TagFormat::Prefixed(prefix) => Scalar::Text(format!("{}{}", prefix, value)),
        TagFormat::CleanName => Scalar::Text(clean_up_name(&value.to_string())),
    }
}

/// Walks one entry and collects its leaf metrics.
pub(crate) struct Walker<'a> {
    timestamp: u64,
    path: Vec<String>,
    out: &'a mut Vec<LeafMetric>,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(timestamp: u64, out: &'a mut Vec<LeafMetric>) -> Self {
        Self {
            timestamp,
            path: Vec::new(),
            out,
        }
    }

    pub(crate) fn enter(&mut self, segment: &str) {
        self.path.push(segment.to_string());
    }

    pub(crate) fn leave(&mut self) {
        self.path.pop();
    }

    /// Dotted location of a field under the current path, for errors.
    fn location(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.path.join("."), name)
        }
    }

    /// Walk the fields of `map` according to `group`, skipping consumed fields.
    pub(crate) fn walk_group(
        &mut self,
        group: &GroupSpec,
        map: &Map<String, Value>,
        skip: &[&str],
        tags: &TagList,
    ) -> Result<(), EntryError> {
        match group.walk {
            Walk::Document => {
                for (name, value) in map {
                    if skip.contains(&name.as_str()) {
                        continue;
                    }
                    let (shape, segment) = group.resolve(name);
                    self.walk_field(shape, name, segment, value, tags)?;
                }
            }
            Walk::Declared => {
                for field in group.fields {
                    if skip.contains(&field.name) {
                        continue;
                    }
                    if let Some(value) = map.get(field.name) {
                        self.walk_field(field.shape, field.name, field.segment(), value, tags)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn walk_field(
        &mut self,
        shape: Shape,
        name: &str,
        segment: &str,
        value: &Value,
        tags: &TagList,
    ) -> Result<(), EntryError> {
        if value.is_null() {
            return Ok(());
        }

        match shape {
            Shape::Discard => {}
            Shape::Scalar => {
                let scalar = expect_scalar(value, &self.location(name))?;
                self.enter(segment);
                self.emit(tags, scalar);
                self.leave();
            }
            Shape::Value => {
                let scalar = expect_scalar(value, &self.location(name))?;
                self.emit(tags, scalar);
            }
            Shape::Group(group) => {
                let map = expect_map(value, &self.location(name))?;
                self.enter(group.label.unwrap_or(segment));
                self.walk_group(group, map, &[], tags)?;
                self.leave();
            }
            Shape::Repeated(repeated) => {
                let items = expect_list(value, &self.location(name))?;
                self.enter(repeated.label.unwrap_or(segment));
                for item in items {
                    self.walk_element(repeated, name, item, tags)?;
                }
                self.leave();
            }
        }
        Ok(())
    }

    /// One element of a repeated group, on its own tag branch.
    fn walk_element(
        &mut self,
        repeated: &RepeatedSpec,
        name: &str,
        item: &Value,
        tags: &TagList,
    ) -> Result<(), EntryError> {
        let map = expect_map(item, name)?;

        let mut branch = tags.branch();
        apply_tag_rules(repeated.tags, map, &mut branch)?;
        let mut consumed: Vec<&str> = repeated.tags.iter().map(|rule| rule.field).collect();

        match repeated.path_key {
            Some(key) => {
                let segment = match present(map, key) {
                    Some(value) => expect_scalar(value, key)?.to_string(),
                    None => {
                        return Err(EntryError::MissingField {
                            field: key.to_string(),
                        })
                    }
                };
                consumed.push(key);
                self.enter(&segment);
                self.walk_group(repeated.element, map, &consumed, &branch)?;
                self.leave();
            }
            None => self.walk_group(repeated.element, map, &consumed, &branch)?,
        }
        Ok(())
    }

    fn emit(&mut self, tags: &TagList, value: Scalar) {
        let mut record = tags.branch();
        record.push(TYPE_TAG, self.path.join("."));
        record.push(VALUE_TAG, value);
        self.out.push(LeafMetric::new(self.timestamp, record));
    }
}
