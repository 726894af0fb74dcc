//! Declarative description of the rule for a host validation engine.

use std::collections::BTreeMap;

use serde::Serialize;

use super::language::Language;
use super::rule::OutsideErrorKind;

/// Base schema type the rule extends.
pub const BASE_TYPE: &str = "date";

/// Rule name as registered with the host engine.
pub const RULE_NAME: &str = "outside";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    pub base: &'static str,
    pub name: &'static str,
    pub params: Vec<ParamDescriptor>,
    /// Template per error-kind key (`outside`, `outsideRefError`).
    pub language: BTreeMap<&'static str, String>,
}

/// Shape of one rule parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDescriptor {
    pub name: &'static str,
    pub required: bool,
    /// The parameter is one item or an array of items.
    pub one_or_many: bool,
    pub min_items: usize,
    /// Keys every item must carry; each value is a date or `{ "ref": path }`.
    pub item_keys: &'static [&'static str],
}

pub fn rule_descriptor(language: &Language) -> RuleDescriptor {
    let language = [OutsideErrorKind::Outside, OutsideErrorKind::OutsideRefError]
        .into_iter()
        .map(|kind| (kind.key(), language.template(kind).to_string()))
        .collect();

    RuleDescriptor {
        base: BASE_TYPE,
        name: RULE_NAME,
        params: vec![ParamDescriptor {
            name: "ranges",
            required: true,
            one_or_many: true,
            min_items: 1,
            item_keys: &["from", "to"],
        }],
        language,
    }
}
