//! Problem descriptors.
//!
//! A problem is an open mapping. The coordinator only looks at its `type`
//! label, its rough token count, and an optional `constraints` list; every
//! other field belongs to whatever strategy is plugged into the executor.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::plan::Constraint;
use crate::domain::errors::{DomainError, DomainResult};

/// An opaque problem mapping with at least a `type` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Problem {
    fields: Map<String, Value>,
}

impl Problem {
    /// Create a problem with only a `type` label.
    pub fn new(kind: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("type".to_string(), Value::String(kind.into()));
        Self { fields }
    }

    /// Build a problem from an arbitrary JSON object.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Add or replace a field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Parse a problem from YAML or JSON text.
    ///
    /// JSON is a subset of YAML, so a single YAML parse covers both. The
    /// document must be a mapping.
    pub fn parse(text: &str) -> DomainResult<Self> {
        let value: Value = serde_yaml::from_str(text)?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            Value::Null => Ok(Self::default()),
            other => Err(DomainError::InvalidProblem(format!(
                "expected a mapping, got {}",
                value_kind(&other)
            ))),
        }
    }

    /// Read and parse a problem file.
    pub fn from_file(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            DomainError::InvalidProblem(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&text)
    }

    /// The problem's `type` label, or `"unknown"`.
    pub fn kind(&self) -> &str {
        self.fields
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Rough token count used to size the planning context.
    ///
    /// Keys count one token each, strings count their words (at least one),
    /// scalars count one, and containers count the sum of their contents.
    pub fn complexity(&self) -> usize {
        self.fields.values().map(|value| 1 + value_tokens(value)).sum()
    }

    /// Constraints supplied by the problem itself.
    ///
    /// Returns `None` unless `constraints` is an array whose every entry
    /// parses as a [`Constraint`]; an empty array yields `Some(vec![])`.
    pub fn declared_constraints(&self) -> Option<Vec<Constraint>> {
        let value = self.fields.get("constraints")?;
        if !value.is_array() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} fields)", self.kind(), self.fields.len())
    }
}

fn value_tokens(value: &Value) -> usize {
    match value {
        Value::String(s) => s.split_whitespace().count().max(1),
        Value::Null | Value::Bool(_) | Value::Number(_) => 1,
        Value::Array(items) => items.iter().map(value_tokens).sum(),
        Value::Object(map) => map.values().map(|v| 1 + value_tokens(v)).sum(),
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_defaults_to_unknown() {
        assert_eq!(Problem::default().kind(), "unknown");
        assert_eq!(Problem::new("sudoku").kind(), "sudoku");
    }

    #[test]
    fn test_empty_problem_has_zero_complexity() {
        assert_eq!(Problem::default().complexity(), 0);
    }

    #[test]
    fn test_complexity_counts_keys_and_words() {
        let p = Problem::new("maze pathfinding")
            .with_field("size", 30)
            .with_field("goal", json!([29, 29]));
        // type: 1 + 2 words, size: 1 + 1, goal: 1 + 2 elements
        assert_eq!(p.complexity(), 8);
    }

    #[test]
    fn test_complexity_of_nested_object() {
        let p = Problem::new("x").with_field("limits", json!({"cpu": 1, "mem": "high"}));
        // type: 2, limits: 1 + (1 + 1) + (1 + 1)
        assert_eq!(p.complexity(), 7);
    }

    #[test]
    fn test_parse_yaml_mapping() {
        let p = Problem::parse("type: sudoku\ngrid_size: 9\n").unwrap();
        assert_eq!(p.kind(), "sudoku");
        assert_eq!(p.fields().get("grid_size"), Some(&json!(9)));
    }

    #[test]
    fn test_parse_json_mapping() {
        let p = Problem::parse(r#"{"type": "maze", "obstacles": 0.3}"#).unwrap();
        assert_eq!(p.kind(), "maze");
    }

    #[test]
    fn test_parse_reports_syntax_errors() {
        let err = Problem::parse("type: [unclosed").unwrap_err();
        assert!(matches!(err, DomainError::SerializationError(_)));
    }

    #[test]
    fn test_parse_rejects_non_mapping() {
        let err = Problem::parse("- a\n- b\n").unwrap_err();
        assert!(matches!(err, DomainError::InvalidProblem(_)));
    }

    #[test]
    fn test_declared_constraints() {
        let p = Problem::new("x").with_field(
            "constraints",
            json!([{"type": "memory", "limit": 64.0}, {"type": "accuracy", "threshold": 0.9}]),
        );
        let constraints = p.declared_constraints().unwrap();
        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints[0].kind(), "memory");

        let empty = Problem::new("x").with_field("constraints", json!([]));
        assert_eq!(empty.declared_constraints(), Some(vec![]));
    }

    #[test]
    fn test_declared_constraints_ignores_other_shapes() {
        let p = Problem::new("x").with_field("constraints", "standard_sudoku_rules");
        assert!(p.declared_constraints().is_none());
        let bad = Problem::new("x").with_field("constraints", json!([{"weight": 3}]));
        assert!(bad.declared_constraints().is_none());
        assert!(Problem::new("x").declared_constraints().is_none());
    }
}
