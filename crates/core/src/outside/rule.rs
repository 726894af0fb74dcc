//! The range-exclusion predicate.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::range::RangeSet;
use super::reference::{DateOrReference, Reference, Resolver};
use crate::coerce::format_timestamp;
use crate::types::Timestamp;

/// Why a candidate was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutsideError {
    /// The candidate lies inside `[from, to)`.
    #[error("{value} must be outside {from} and {to}")]
    Outside {
        value: Timestamp,
        from: Timestamp,
        to: Timestamp,
    },

    /// A boundary reference did not resolve to a date.
    #[error("Invalid reference in schema: {reference}")]
    RefError { reference: Reference },
}

/// Error kinds, keyed the way message templates are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutsideErrorKind {
    Outside,
    OutsideRefError,
}

impl OutsideErrorKind {
    /// Template key within the date type's language table.
    pub fn key(self) -> &'static str {
        match self {
            Self::Outside => "outside",
            Self::OutsideRefError => "outsideRefError",
        }
    }

    /// Fully-qualified error code reported to the host engine.
    pub fn code(self) -> &'static str {
        match self {
            Self::Outside => "date.outside",
            Self::OutsideRefError => "date.outsideRefError",
        }
    }
}

impl OutsideError {
    pub fn kind(&self) -> OutsideErrorKind {
        match self {
            Self::Outside { .. } => OutsideErrorKind::Outside,
            Self::RefError { .. } => OutsideErrorKind::OutsideRefError,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Interpolation values for message templates. Empty for reference errors.
    pub fn context(&self) -> Map<String, Value> {
        let mut context = Map::new();
        if let Self::Outside { value, from, to } = self {
            context.insert("value".into(), Value::String(format_timestamp(value)));
            context.insert("from".into(), Value::String(format_timestamp(from)));
            context.insert("to".into(), Value::String(format_timestamp(to)));
        }
        context
    }
}

/// Check that `value` lies outside every range in `ranges`.
///
/// Ranges are visited in order. For each one, both boundaries are resolved
/// before any comparison; the first unresolved reference or the first range
/// containing `value` ends the check. Comparison is at millisecond precision
/// with an inclusive lower bound and an exclusive upper bound.
pub fn check_outside<R>(
    value: Timestamp,
    ranges: &RangeSet,
    resolver: &R,
) -> Result<Timestamp, OutsideError>
where
    R: Resolver + ?Sized,
{
    let value_ms = value.timestamp_millis();

    for range in ranges.descriptors() {
        let from = resolve_boundary(&range.from, resolver)?;
        let to = resolve_boundary(&range.to, resolver)?;

        if value_ms >= from.timestamp_millis() && value_ms < to.timestamp_millis() {
            return Err(OutsideError::Outside { value, from, to });
        }
    }

    Ok(value)
}

fn resolve_boundary<R>(
    boundary: &DateOrReference,
    resolver: &R,
) -> Result<Timestamp, OutsideError>
where
    R: Resolver + ?Sized,
{
    boundary
        .resolve(resolver)
        .map_err(|reference| OutsideError::RefError {
            reference: reference.clone(),
        })
}
