//! Message templates for the outside rule.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::rule::{OutsideError, OutsideErrorKind};

pub const DEFAULT_OUTSIDE_TEMPLATE: &str = "must be outside {from} and {to}";
pub const DEFAULT_REF_ERROR_TEMPLATE: &str = "invalid reference in schema";

/// Template per error kind. Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Language {
    pub outside: String,
    pub outside_ref_error: String,
}

impl Default for Language {
    fn default() -> Self {
        Self {
            outside: DEFAULT_OUTSIDE_TEMPLATE.to_string(),
            outside_ref_error: DEFAULT_REF_ERROR_TEMPLATE.to_string(),
        }
    }
}

impl Language {
    pub fn template(&self, kind: OutsideErrorKind) -> &str {
        match kind {
            OutsideErrorKind::Outside => &self.outside,
            OutsideErrorKind::OutsideRefError => &self.outside_ref_error,
        }
    }

    /// Render the message for `err`, filling `{value}`, `{from}` and `{to}`.
    pub fn render(&self, err: &OutsideError) -> String {
        interpolate(self.template(err.kind()), &err.context())
    }
}

/// Replace `{name}` placeholders with values from `context`.
///
/// Unknown placeholders and unmatched braces are copied through as-is.
pub fn interpolate(template: &str, context: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        match context.get(name) {
            Some(Value::String(s)) => out.push_str(s),
            Some(other) => out.push_str(&other.to_string()),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}
