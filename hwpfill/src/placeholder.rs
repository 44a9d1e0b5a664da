//! Placeholder values supplied by the caller
//!
//! Values come from TOML or JSON data files, from the `[values]` table of
//! `hwpfill.toml`, or from `--set KEY=VALUE` on the command line. They are
//! read-only while a document is filled.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A value that can be inserted in place of a `${key}` token
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceholderValue {
    /// Absent value, renders as the empty string
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Text, inserted as-is (`\n` becomes a line break)
    Text(String),
    /// Array; has no text form
    List(Vec<PlaceholderValue>),
    /// Nested table; has no text form
    Table(BTreeMap<String, PlaceholderValue>),
}

/// A value that has no text form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} value cannot be rendered as text")]
pub struct RenderError {
    /// Kind of the offending value
    pub kind: &'static str,
}

impl PlaceholderValue {
    /// Render the value as the text inserted into the document
    ///
    /// # Returns
    /// * `Ok(Cow<str>)` - Text form of a scalar value (`Null` → "")
    /// * `Err(RenderError)` - The value is a list or table
    pub fn render(&self) -> Result<Cow<'_, str>, RenderError> {
        match self {
            Self::Null => Ok(Cow::Borrowed("")),
            Self::Bool(b) => Ok(Cow::Owned(b.to_string())),
            Self::Integer(i) => Ok(Cow::Owned(i.to_string())),
            Self::Float(x) => Ok(Cow::Owned(x.to_string())),
            Self::Text(s) => Ok(Cow::Borrowed(s)),
            Self::List(_) => Err(RenderError { kind: "list" }),
            Self::Table(_) => Err(RenderError { kind: "table" }),
        }
    }
}

impl From<&str> for PlaceholderValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PlaceholderValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for PlaceholderValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for PlaceholderValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for PlaceholderValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<PlaceholderValue>> From<Option<T>> for PlaceholderValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<toml::Value> for PlaceholderValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::Text(s),
            toml::Value::Integer(i) => Self::Integer(i),
            toml::Value::Float(x) => Self::Float(x),
            toml::Value::Boolean(b) => Self::Bool(b),
            toml::Value::Datetime(dt) => Self::Text(dt.to_string()),
            toml::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            toml::Value::Table(table) => Self::Table(
                table
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for PlaceholderValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if n.is_f64() {
                    n.as_f64().map_or(Self::Text(n.to_string()), Self::Float)
                } else {
                    // u64 above i64::MAX
                    Self::Text(n.to_string())
                }
            }
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Table(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// Mapping from placeholder key to value
///
/// Keys are case-sensitive. Iteration is ordered by key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceholderMap {
    values: BTreeMap<String, PlaceholderValue>,
}

impl PlaceholderMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PlaceholderValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up the value of a key
    pub fn get(&self, key: &str) -> Option<&PlaceholderValue> {
        self.values.get(key)
    }

    /// Check if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlaceholderValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay another map; its entries win
    pub fn merge(&mut self, other: PlaceholderMap) {
        self.values.extend(other.values);
    }

    /// Build a map from a TOML table
    pub fn from_toml_table(table: toml::Table) -> Self {
        table
            .into_iter()
            .map(|(k, v)| (k, PlaceholderValue::from(v)))
            .collect()
    }

    /// Load a data file, choosing the format by extension
    ///
    /// # Parameters
    /// * `path` - Path to a `.toml` or `.json` file whose top level is a table
    ///
    /// # Returns
    /// * `Ok(PlaceholderMap)` - Successfully loaded values
    /// * `Err(PlaceholderDataError)` - Error reading or parsing the file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PlaceholderDataError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);

        let read = || {
            fs::read_to_string(path)
                .map_err(|e| PlaceholderDataError::IoError(path.to_path_buf(), e))
        };

        match extension.as_deref() {
            Some("toml") => {
                let content = read()?;
                let table: toml::Table = toml::from_str(&content)
                    .map_err(|e| PlaceholderDataError::TomlError(path.to_path_buf(), e))?;
                Ok(Self::from_toml_table(table))
            }
            Some("json") => {
                let content = read()?;
                let map: serde_json::Map<String, serde_json::Value> =
                    serde_json::from_str(&content)
                        .map_err(|e| PlaceholderDataError::JsonError(path.to_path_buf(), e))?;
                Ok(map
                    .into_iter()
                    .map(|(k, v)| (k, PlaceholderValue::from(v)))
                    .collect())
            }
            _ => Err(PlaceholderDataError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Parse a `KEY=VALUE` assignment into a text entry
    ///
    /// # Returns
    /// * `Some((key, value))` - The assignment split at the first `=`
    /// * `None` - No `=` or an empty key
    pub fn parse_assignment(assignment: &str) -> Option<(String, PlaceholderValue)> {
        let (key, value) = assignment.split_once('=')?;
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), PlaceholderValue::Text(value.to_string())))
    }
}

impl<K: Into<String>, V: Into<PlaceholderValue>> FromIterator<(K, V)> for PlaceholderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl fmt::Display for PlaceholderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Ok(text) => write!(f, "{}", text),
            Err(e) => write!(f, "<{}>", e.kind),
        }
    }
}

/// Errors that can occur when loading placeholder data
#[derive(Error, Debug)]
pub enum PlaceholderDataError {
    #[error("IO error reading {path}: {source}", path = .0.display(), source = .1)]
    IoError(PathBuf, #[source] std::io::Error),

    #[error("TOML parse error in {path}: {source}", path = .0.display(), source = .1)]
    TomlError(PathBuf, #[source] toml::de::Error),

    #[error("JSON parse error in {path}: {source}", path = .0.display(), source = .1)]
    JsonError(PathBuf, #[source] serde_json::Error),

    #[error("Unsupported data file format: {path} (expected .toml or .json)", path = .0.display())]
    UnsupportedFormat(PathBuf),
}
