//! Field evaluator: applies the outside rule to one field of a JSON record.
//!
//! Pure logic. The record is the validation context; references resolve
//! against the parent object of the validated field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::coerce;
use crate::error::CoreError;
use crate::outside::reference::reach;
use crate::outside::{Language, OutsideParams, SiblingFields};

/// Error code for a present value that is not a date.
pub const DATE_BASE_CODE: &str = "date.base";

pub const DATE_BASE_MESSAGE: &str = "must be a valid date";

/// The outside rule bound to a (possibly dotted) field path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FieldRule {
    #[validate(length(min = 1))]
    pub field: String,
    #[validate(nested)]
    pub params: OutsideParams,
    #[serde(default)]
    pub language: Language,
}

/// Outcome of evaluating one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub context: Map<String, Value>,
}

impl FieldRule {
    pub fn new(field: impl Into<String>, params: OutsideParams) -> Self {
        Self {
            field: field.into(),
            params,
            language: Language::default(),
        }
    }

    /// Parse and validate a rule definition.
    pub fn from_json_str(raw: &str) -> Result<Self, CoreError> {
        let rule: Self =
            serde_json::from_str(raw).map_err(|e| CoreError::InvalidParams(e.to_string()))?;
        rule.validate()
            .map_err(|e| CoreError::InvalidParams(e.to_string()))?;
        Ok(rule)
    }

    /// Evaluate the rule against a single record.
    pub fn evaluate(&self, record: &Map<String, Value>) -> ValidationResult {
        let violation = self.evaluate_field(record);
        ValidationResult {
            is_valid: violation.is_none(),
            errors: violation.into_iter().collect(),
        }
    }

    fn evaluate_field(&self, record: &Map<String, Value>) -> Option<FieldViolation> {
        let (parent, key) = split_parent(record, &self.field)?;
        let raw = parent.get(key)?; // Absent fields are optional

        let Some(value) = coerce::date_from_json(raw) else {
            return Some(self.violation(key, DATE_BASE_CODE, DATE_BASE_MESSAGE, raw, Map::new()));
        };

        match self.params.check(value, &SiblingFields::new(parent)) {
            Ok(_) => None,
            Err(err) => Some(self.violation(
                key,
                err.code(),
                &self.language.render(&err),
                raw,
                err.context(),
            )),
        }
    }

    fn violation(
        &self,
        label: &str,
        code: &str,
        message: &str,
        raw: &Value,
        context: Map<String, Value>,
    ) -> FieldViolation {
        FieldViolation {
            field: self.field.clone(),
            rule_type: code.to_string(),
            message: format!("\"{label}\" {message}"),
            value: Some(raw.clone()),
            context,
        }
    }
}

/// Split a dotted field path into its parent object and final key.
///
/// Returns `None` when an intermediate segment is missing or not an object.
fn split_parent<'a>(
    record: &'a Map<String, Value>,
    field: &'a str,
) -> Option<(&'a Map<String, Value>, &'a str)> {
    match field.rsplit_once('.') {
        None => Some((record, field)),
        Some((parent_path, key)) => match reach(record, parent_path)? {
            Value::Object(parent) => Some((parent, key)),
            _ => None,
        },
    }
}
