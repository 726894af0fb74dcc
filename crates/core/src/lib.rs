//! `datefence-core` library crate.
//!
//! The `outside` date rule: asserts that a date falls outside one or more
//! half-open ranges whose boundaries are literal dates or references to
//! sibling fields. Pure logic, no I/O.

pub mod coerce;
pub mod error;
pub mod evaluator;
pub mod outside;
pub mod types;
