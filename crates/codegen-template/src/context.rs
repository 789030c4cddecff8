/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template value and context types.
//!
//! This module defines the data a template is rendered against. A
//! [`TemplateContext`] is an ordered mapping of top-level keys to
//! [`TemplateValue`]s; nested mappings keep their insertion order too, so the
//! plain substitution pass visits keys in document order.
//!
//! Values usually come from a YAML or JSON configuration file, so conversions
//! from `serde_yaml::Value` and `serde_json::Value` live here as well.

use indexmap::IndexMap;

use crate::error::{TemplateError, TemplateResult};

/// A value that can be substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    /// A string value.
    String(String),

    /// An integral number.
    Integer(i64),

    /// An integral number above `i64::MAX`.
    Unsigned(u64),

    /// A floating point number.
    Float(f64),

    /// A boolean value.
    Bool(bool),

    /// An ordered sequence of values.
    List(Vec<TemplateValue>),

    /// An ordered map of string keys to values.
    Map(IndexMap<String, TemplateValue>),

    /// A null value (`~` / `null` in configuration files).
    Null,
}

impl TemplateValue {
    /// Get a nested field by path.
    ///
    /// For example, `get_path(&["employee", "salary"])` on a Map containing
    /// `{"employee": {"salary": 50000}}` returns the salary value. An empty
    /// path returns the value itself.
    pub fn get_path(&self, path: &[&str]) -> Option<&TemplateValue> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };

        match self {
            TemplateValue::Map(m) => m.get(*first).and_then(|v| v.get_path(rest)),
            _ => None,
        }
    }

    /// Render this value as a string for output.
    ///
    /// Every substitution (filtered, plain, and loop bodies) goes through this
    /// function, so formatting is identical everywhere:
    ///
    /// - String: returned as-is
    /// - Integer, Unsigned: decimal
    /// - Float: shortest round-trip form, integral values keep a `.0`;
    ///   magnitudes of `1e16` and above use exponent notation (`1e+20`)
    /// - Bool: "true" or "false"
    /// - List: `[a, b]`
    /// - Map: `{key: value, other: value}`
    /// - Null: ""
    pub fn stringify(&self) -> String {
        match self {
            TemplateValue::String(s) => s.clone(),
            TemplateValue::Integer(i) => i.to_string(),
            TemplateValue::Unsigned(u) => u.to_string(),
            TemplateValue::Float(f) => format_float(*f),
            TemplateValue::Bool(true) => "true".to_string(),
            TemplateValue::Bool(false) => "false".to_string(),
            TemplateValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(|v| v.stringify()).collect();
                format!("[{}]", rendered.join(", "))
            }
            TemplateValue::Map(m) => {
                let rendered: Vec<String> = m
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v.stringify()))
                    .collect();
                format!("{{{}}}", rendered.join(", "))
            }
            TemplateValue::Null => String::new(),
        }
    }

    /// Borrow the entries of a map value.
    pub fn as_map(&self) -> Option<&IndexMap<String, TemplateValue>> {
        match self {
            TemplateValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

fn format_float(f: f64) -> String {
    if !f.is_finite() {
        return f.to_string();
    }
    if f.abs() >= 1e16 {
        // `{:e}` omits the sign of a positive exponent
        let scientific = format!("{f:e}");
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => scientific,
        };
    }
    if f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

impl Default for TemplateValue {
    fn default() -> Self {
        TemplateValue::Null
    }
}

impl From<&str> for TemplateValue {
    fn from(s: &str) -> Self {
        TemplateValue::String(s.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(s: String) -> Self {
        TemplateValue::String(s)
    }
}

impl From<bool> for TemplateValue {
    fn from(b: bool) -> Self {
        TemplateValue::Bool(b)
    }
}

impl From<i64> for TemplateValue {
    fn from(i: i64) -> Self {
        TemplateValue::Integer(i)
    }
}

impl From<u64> for TemplateValue {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => TemplateValue::Integer(i),
            Err(_) => TemplateValue::Unsigned(u),
        }
    }
}

impl From<f64> for TemplateValue {
    fn from(f: f64) -> Self {
        TemplateValue::Float(f)
    }
}

impl From<Vec<TemplateValue>> for TemplateValue {
    fn from(items: Vec<TemplateValue>) -> Self {
        TemplateValue::List(items)
    }
}

impl From<IndexMap<String, TemplateValue>> for TemplateValue {
    fn from(m: IndexMap<String, TemplateValue>) -> Self {
        TemplateValue::Map(m)
    }
}

impl From<serde_yaml::Value> for TemplateValue {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => TemplateValue::Null,
            Value::Bool(b) => TemplateValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    TemplateValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    TemplateValue::Unsigned(u)
                } else {
                    TemplateValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => TemplateValue::String(s),
            Value::Sequence(items) => {
                TemplateValue::List(items.into_iter().map(TemplateValue::from).collect())
            }
            Value::Mapping(mapping) => TemplateValue::Map(
                mapping
                    .into_iter()
                    .map(|(k, v)| (yaml_key(k), TemplateValue::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => TemplateValue::from(tagged.value),
        }
    }
}

/// YAML allows non-string keys (`1: one`, `true: yes`); they are looked up by
/// their stringified form.
fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        other => TemplateValue::from(other).stringify(),
    }
}

impl From<serde_json::Value> for TemplateValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => TemplateValue::Null,
            Value::Bool(b) => TemplateValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    TemplateValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    TemplateValue::Unsigned(u)
                } else {
                    TemplateValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => TemplateValue::String(s),
            Value::Array(items) => {
                TemplateValue::List(items.into_iter().map(TemplateValue::from).collect())
            }
            Value::Object(object) => TemplateValue::Map(
                object
                    .into_iter()
                    .map(|(k, v)| (k, TemplateValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// The data a template is rendered against.
///
/// Read-only during rendering. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateContext {
    variables: IndexMap<String, TemplateValue>,
}

impl TemplateContext {
    /// Create a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from a value whose root is a map.
    ///
    /// `Null` is accepted and yields an empty context (an empty YAML file
    /// parses to null).
    pub fn from_value(value: TemplateValue) -> TemplateResult<Self> {
        match value {
            TemplateValue::Map(variables) => Ok(Self { variables }),
            TemplateValue::Null => Ok(Self::new()),
            other => Err(TemplateError::InvalidContext {
                message: format!(
                    "expected a mapping at the document root, found {}",
                    kind_name(&other)
                ),
            }),
        }
    }

    /// Parse a YAML document into a context.
    pub fn from_yaml_str(source: &str) -> TemplateResult<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(source)?;
        Self::from_value(value.into())
    }

    /// Parse a JSON document into a context.
    pub fn from_json_str(source: &str) -> TemplateResult<Self> {
        let value: serde_json::Value = serde_json::from_str(source)?;
        Self::from_value(value.into())
    }

    /// Insert a variable, replacing (in place) any previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TemplateValue>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Get a top-level variable.
    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        self.variables.get(key)
    }

    /// Get a variable by path (e.g., `["employee", "salary"]`).
    pub fn get_path(&self, path: &[&str]) -> Option<&TemplateValue> {
        let (first, rest) = path.split_first()?;
        self.get(first).and_then(|v| v.get_path(rest))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    /// Iterate over top-level variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TemplateValue)> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, TemplateValue)> for TemplateContext {
    fn from_iter<I: IntoIterator<Item = (K, TemplateValue)>>(iter: I) -> Self {
        Self {
            variables: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

fn kind_name(value: &TemplateValue) -> &'static str {
    match value {
        TemplateValue::String(_) => "a string",
        TemplateValue::Integer(_) | TemplateValue::Unsigned(_) | TemplateValue::Float(_) => {
            "a number"
        }
        TemplateValue::Bool(_) => "a boolean",
        TemplateValue::List(_) => "a sequence",
        TemplateValue::Map(_) => "a mapping",
        TemplateValue::Null => "null",
    }
}
