//! Range boundaries and sibling-field reference resolution.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coerce;
use crate::error::CoreError;
use crate::types::Timestamp;

/// A dotted path naming a sibling field of the value being validated.
///
/// Segments are object keys, or array indices when the current node is an
/// array (`"slots.0.start"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    key: String,
}

impl Reference {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// A range boundary: a literal date or a reference resolved at validation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoundary", into = "RawBoundary")]
pub enum DateOrReference {
    Literal(Timestamp),
    Reference(Reference),
}

impl DateOrReference {
    /// Shorthand for a reference boundary.
    pub fn reference(key: impl Into<String>) -> Self {
        Self::Reference(Reference::new(key))
    }

    /// Resolve to a concrete timestamp.
    ///
    /// Literals resolve to themselves. An unresolvable reference is returned
    /// as the error so the caller can report which one failed.
    pub fn resolve<R>(&self, resolver: &R) -> Result<Timestamp, &Reference>
    where
        R: Resolver + ?Sized,
    {
        match self {
            Self::Literal(ts) => Ok(*ts),
            Self::Reference(reference) => resolver.resolve(reference).ok_or(reference),
        }
    }
}

impl From<Timestamp> for DateOrReference {
    fn from(ts: Timestamp) -> Self {
        Self::Literal(ts)
    }
}

impl From<Reference> for DateOrReference {
    fn from(reference: Reference) -> Self {
        Self::Reference(reference)
    }
}

/// Wire form of a boundary: `{ "ref": "path" }` or any coercible date value.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawBoundary {
    Reference(RawRef),
    Literal(Value),
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRef {
    #[serde(rename = "ref")]
    key: String,
}

impl TryFrom<RawBoundary> for DateOrReference {
    type Error = CoreError;

    fn try_from(raw: RawBoundary) -> Result<Self, Self::Error> {
        match raw {
            RawBoundary::Reference(RawRef { key }) if key.trim().is_empty() => Err(
                CoreError::InvalidParams("reference key must not be empty".to_string()),
            ),
            RawBoundary::Reference(RawRef { key }) => Ok(Self::Reference(Reference::new(key))),
            RawBoundary::Literal(value) => coerce::date_from_json(&value)
                .map(Self::Literal)
                .ok_or_else(|| CoreError::InvalidDate(value.to_string())),
        }
    }
}

impl From<DateOrReference> for RawBoundary {
    fn from(boundary: DateOrReference) -> Self {
        match boundary {
            DateOrReference::Literal(ts) => {
                RawBoundary::Literal(Value::String(coerce::format_timestamp(&ts)))
            }
            DateOrReference::Reference(reference) => {
                RawBoundary::Reference(RawRef { key: reference.key })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Looks up references against the object currently being validated.
///
/// Returning `None` means the reference does not name a date in the current
/// context.
pub trait Resolver {
    fn resolve(&self, reference: &Reference) -> Option<Timestamp>;
}

impl<F> Resolver for F
where
    F: Fn(&Reference) -> Option<Timestamp>,
{
    fn resolve(&self, reference: &Reference) -> Option<Timestamp> {
        self(reference)
    }
}

/// Resolver over the parent JSON object of the field being validated.
#[derive(Debug, Clone, Copy)]
pub struct SiblingFields<'a> {
    parent: &'a Map<String, Value>,
}

impl<'a> SiblingFields<'a> {
    pub fn new(parent: &'a Map<String, Value>) -> Self {
        Self { parent }
    }
}

impl Resolver for SiblingFields<'_> {
    fn resolve(&self, reference: &Reference) -> Option<Timestamp> {
        reach(self.parent, reference.key()).and_then(coerce::date_from_json)
    }
}

/// Walk a dotted path through `root`.
pub fn reach<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = root.get(segments.next()?)?;

    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}
