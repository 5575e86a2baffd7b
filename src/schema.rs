//! Static schema descriptions for sensor payloads.
//!
//! Every sensor type is described once, as data, by an [`ExtractorSpec`].
//! The traversal engine never probes a value to decide what to do with it:
//! it looks the field up in the schema and fails the entry when the value
//! does not have the declared shape.

/// Whether an identifying field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absence fails the owning entry.
    Required,
    /// Absence just means no tag.
    Optional,
}

/// How an identifying field's value becomes a tag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFormat {
    /// Value used as-is.
    Raw,
    /// Value rendered as text and prefixed.
    Prefixed(&'static str),
    /// Value rendered as text and passed through
    /// [`clean_up_name`](crate::record::clean_up_name).
    CleanName,
}

/// Moves one identifying field out of the payload and into the tag list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRule {
    pub field: &'static str,
    pub tag: &'static str,
    pub presence: Presence,
    pub format: TagFormat,
}

impl TagRule {
    pub const fn optional(field: &'static str, tag: &'static str) -> Self {
        Self {
            field,
            tag,
            presence: Presence::Optional,
            format: TagFormat::Raw,
        }
    }

    pub const fn required(field: &'static str, tag: &'static str) -> Self {
        Self {
            field,
            tag,
            presence: Presence::Required,
            format: TagFormat::Raw,
        }
    }

    pub const fn formatted(self, format: TagFormat) -> Self {
        Self { format, ..self }
    }
}

/// Declared shape of a payload field.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// Metadata, never emitted.
    Discard,
    /// Leaf metric; its (possibly renamed) field name is appended to the path.
    Scalar,
    /// Leaf metric emitted at the current path, without its own name.
    Value,
    /// Nested map, walked without branching.
    Group(&'static GroupSpec),
    /// List of maps, one tag-list branch per element.
    Repeated(&'static RepeatedSpec),
}

/// A declared field of a group.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: Shape,
    pub rename: Option<&'static str>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            shape,
            rename: None,
        }
    }

    pub const fn scalar(name: &'static str) -> Self {
        Self::new(name, Shape::Scalar)
    }

    pub const fn value(name: &'static str) -> Self {
        Self::new(name, Shape::Value)
    }

    pub const fn discard(name: &'static str) -> Self {
        Self::new(name, Shape::Discard)
    }

    pub const fn group(name: &'static str, spec: &'static GroupSpec) -> Self {
        Self::new(name, Shape::Group(spec))
    }

    pub const fn repeated(name: &'static str, spec: &'static RepeatedSpec) -> Self {
        Self::new(name, Shape::Repeated(spec))
    }

    /// Emit under a different path segment.
    pub const fn renamed(self, rename: &'static str) -> Self {
        Self {
            rename: Some(rename),
            ..self
        }
    }

    /// Path segment contributed by this field.
    pub fn segment(&self) -> &'static str {
        self.rename.unwrap_or(self.name)
    }
}

/// Order in which a group's fields are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Document order; undeclared fields take the group's `other` shape.
    Document,
    /// Declared order; undeclared fields are ignored.
    Declared,
}

/// Schema of a map-valued payload node.
#[derive(Debug, Clone, Copy)]
pub struct GroupSpec {
    /// Path segment replacing the owning field name (or prefixing an entry).
    pub label: Option<&'static str>,
    pub fields: &'static [FieldSpec],
    pub other: Shape,
    pub walk: Walk,
}

impl GroupSpec {
    /// Group whose every field is a scalar leaf.
    pub const SCALARS: GroupSpec = GroupSpec {
        label: None,
        fields: &[],
        other: Shape::Scalar,
        walk: Walk::Document,
    };

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Shape and path segment for a field found in a document.
    pub fn resolve<'a>(&self, name: &'a str) -> (Shape, &'a str) {
        match self.field(name) {
            Some(spec) => (spec.shape, spec.segment()),
            None => (self.other, name),
        }
    }
}

/// Schema of a repeated group (list of maps).
#[derive(Debug, Clone, Copy)]
pub struct RepeatedSpec {
    /// Path segment replacing the list field name.
    pub label: Option<&'static str>,
    /// Element-identifying tags, added to each element's branch.
    pub tags: &'static [TagRule],
    /// Element field whose value is appended to the path.
    pub path_key: Option<&'static str>,
    pub element: &'static GroupSpec,
}

/// Static description of one sensor type.
#[derive(Debug, Clone, Copy)]
pub struct ExtractorSpec {
    /// Sensor-type key in the telemetry extension.
    pub sensor: &'static str,
    /// Telemetry resource path, for diagnostics only.
    pub resource: &'static str,
    /// Field of the sensor payload holding the list of entries.
    pub entries: &'static str,
    /// Identifying tags pulled from each entry, in record order.
    pub tags: &'static [TagRule],
    /// Internal fields removed from each entry.
    pub discard: &'static [&'static str],
    pub body: &'static GroupSpec,
}

impl ExtractorSpec {
    /// Entry fields that never reach the metric walk.
    pub fn consumed_fields(&self) -> Vec<&'static str> {
        self.tags
            .iter()
            .map(|rule| rule.field)
            .chain(self.discard.iter().copied())
            .collect()
    }
}
