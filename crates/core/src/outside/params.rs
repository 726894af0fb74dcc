//! Rule parameters as supplied by a schema author.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use super::range::RangeSet;
use super::reference::Resolver;
use super::rule::{check_outside, OutsideError};
use crate::error::CoreError;
use crate::types::Timestamp;

/// Parameters of the outside rule: `{ "ranges": <range or [range, ...]> }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct OutsideParams {
    #[validate(custom(function = "validate_range_set"))]
    pub ranges: RangeSet,
}

impl OutsideParams {
    pub fn new(ranges: impl Into<RangeSet>) -> Self {
        Self {
            ranges: ranges.into(),
        }
    }

    /// Deserialize and validate parameters from JSON.
    pub fn from_json(value: Value) -> Result<Self, CoreError> {
        let params: Self =
            serde_json::from_value(value).map_err(|e| CoreError::InvalidParams(e.to_string()))?;
        params
            .validate()
            .map_err(|e| CoreError::InvalidParams(e.to_string()))?;
        Ok(params)
    }

    /// Run the rule against `value`.
    pub fn check<R>(&self, value: Timestamp, resolver: &R) -> Result<Timestamp, OutsideError>
    where
        R: Resolver + ?Sized,
    {
        check_outside(value, &self.ranges, resolver)
    }
}

fn validate_range_set(ranges: &RangeSet) -> Result<(), ValidationError> {
    if ranges.is_empty() {
        let mut err = ValidationError::new("min_items");
        err.message = Some("ranges must contain at least 1 range".into());
        return Err(err);
    }
    Ok(())
}
