//! Excluded range descriptors.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::reference::DateOrReference;
use crate::error::CoreError;

/// A half-open excluded interval `[from, to)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeDescriptor {
    pub from: DateOrReference,
    pub to: DateOrReference,
}

impl RangeDescriptor {
    pub fn new(from: impl Into<DateOrReference>, to: impl Into<DateOrReference>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// One descriptor, or an ordered list of them.
///
/// Built through `From<RangeDescriptor>` or `TryFrom<Vec<_>>`, which rejects
/// an empty list. Deserialized sets are checked by `OutsideParams`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RangeSet {
    Many(Vec<RangeDescriptor>),
    One(RangeDescriptor),
}

impl RangeSet {
    /// The descriptors in evaluation order.
    pub fn descriptors(&self) -> &[RangeDescriptor] {
        match self {
            Self::One(descriptor) => std::slice::from_ref(descriptor),
            Self::Many(descriptors) => descriptors,
        }
    }

    pub fn len(&self) -> usize {
        self.descriptors().len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors().is_empty()
    }
}

/// Arrays deserialize as `Many`, objects as `One`. Errors from the inner
/// descriptors are reported as-is.
impl<'de> Deserialize<'de> for RangeSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            value @ Value::Array(_) => serde_json::from_value(value)
                .map(Self::Many)
                .map_err(D::Error::custom),
            value @ Value::Object(_) => serde_json::from_value(value)
                .map(Self::One)
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "expected a range object or an array of ranges, got {other}"
            ))),
        }
    }
}

impl From<RangeDescriptor> for RangeSet {
    fn from(descriptor: RangeDescriptor) -> Self {
        Self::One(descriptor)
    }
}

impl TryFrom<Vec<RangeDescriptor>> for RangeSet {
    type Error = CoreError;

    fn try_from(descriptors: Vec<RangeDescriptor>) -> Result<Self, Self::Error> {
        if descriptors.is_empty() {
            return Err(CoreError::InvalidParams(
                "ranges must contain at least 1 range".to_string(),
            ));
        }
        Ok(Self::Many(descriptors))
    }
}
