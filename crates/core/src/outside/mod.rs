//! The `outside` date rule.
//!
//! Fails a date that lies inside any of a set of `[from, to)` ranges. Range
//! boundaries are literal dates or references to sibling fields, resolved
//! through a [`Resolver`] supplied by the caller.

pub mod descriptor;
pub mod language;
pub mod params;
pub mod range;
pub mod reference;
pub mod rule;

pub use descriptor::{rule_descriptor, RuleDescriptor};
pub use language::Language;
pub use params::OutsideParams;
pub use range::{RangeDescriptor, RangeSet};
pub use reference::{DateOrReference, Reference, Resolver, SiblingFields};
pub use rule::{check_outside, OutsideError, OutsideErrorKind};
