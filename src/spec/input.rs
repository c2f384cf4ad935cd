use crate::foundation::error::{MergeError, MergeResult};
use crate::spec::model::Specification;
use anyhow::Context as _;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A specification as handed over by the caller.
#[derive(Clone, Debug)]
pub enum SpecInput {
    /// JSON text, parsed during normalization.
    Text(String),
    /// An already structured JSON value.
    Structured(Value),
    /// An already typed specification, used as-is.
    Typed(Specification),
}

impl SpecInput {
    /// Read specification text from a file without parsing it yet.
    pub fn from_path(path: impl AsRef<Path>) -> MergeResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("read spec '{}'", path.display()))?;
        Ok(Self::Text(text))
    }

    /// Resolve into a typed specification.
    pub fn normalize(self) -> MergeResult<Specification> {
        match self {
            Self::Text(text) => serde_json::from_str(&text).map_err(MergeError::malformed_spec),
            Self::Structured(value) => {
                serde_json::from_value(value).map_err(MergeError::malformed_spec)
            }
            Self::Typed(spec) => Ok(spec),
        }
    }
}

impl From<&str> for SpecInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for SpecInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for SpecInput {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

impl From<Specification> for SpecInput {
    fn from(spec: Specification) -> Self {
        Self::Typed(spec)
    }
}

/// Runtime tables keyed by name, in insertion (or document) order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataPayload {
    tables: IndexMap<String, Vec<Value>>,
}

impl DataPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse payload text of the form `{"name": [rows...], ...}`.
    ///
    /// Empty or whitespace-only text and a literal `null` both yield an empty payload.
    /// Accepting `null` instead of rejecting it as a non-object is deliberate.
    pub fn from_text(text: &str) -> MergeResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        let tables: Option<IndexMap<String, Vec<Value>>> =
            serde_json::from_str(text).map_err(MergeError::malformed_data)?;
        Ok(Self {
            tables: tables.unwrap_or_default(),
        })
    }

    /// Convert a structured value of the same shape as [`DataPayload::from_text`] accepts.
    pub fn from_value(value: Value) -> MergeResult<Self> {
        let tables: Option<IndexMap<String, Vec<Value>>> =
            serde_json::from_value(value).map_err(MergeError::malformed_data)?;
        Ok(Self {
            tables: tables.unwrap_or_default(),
        })
    }

    /// Add or replace the rows for `name`. A replaced name keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, rows: Vec<Value>) -> Option<Vec<Value>> {
        self.tables.insert(name.into(), rows)
    }

    pub fn with_table(mut self, name: impl Into<String>, rows: Vec<Value>) -> Self {
        self.insert(name, rows);
        self
    }

    pub fn get(&self, name: &str) -> Option<&[Value]> {
        self.tables.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub(crate) fn into_tables(self) -> IndexMap<String, Vec<Value>> {
        self.tables
    }
}

impl From<IndexMap<String, Vec<Value>>> for DataPayload {
    fn from(tables: IndexMap<String, Vec<Value>>) -> Self {
        Self { tables }
    }
}

impl FromIterator<(String, Vec<Value>)> for DataPayload {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Value>)>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}

/// A data payload as handed over by the caller.
#[derive(Clone, Debug, Default)]
pub enum PayloadInput {
    /// No payload; equivalent to an empty mapping.
    #[default]
    Absent,
    /// JSON text, parsed during normalization.
    Text(String),
    /// Already structured tables.
    Tables(DataPayload),
}

impl PayloadInput {
    /// Read payload text from a file without parsing it yet.
    pub fn from_path(path: impl AsRef<Path>) -> MergeResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("read data '{}'", path.display()))?;
        Ok(Self::Text(text))
    }

    pub fn normalize(self) -> MergeResult<DataPayload> {
        match self {
            Self::Absent => Ok(DataPayload::new()),
            Self::Text(text) => DataPayload::from_text(&text),
            Self::Tables(payload) => Ok(payload),
        }
    }
}

impl From<&str> for PayloadInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for PayloadInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<DataPayload> for PayloadInput {
    fn from(payload: DataPayload) -> Self {
        Self::Tables(payload)
    }
}

impl From<Option<DataPayload>> for PayloadInput {
    fn from(payload: Option<DataPayload>) -> Self {
        payload.map_or(Self::Absent, Self::Tables)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/spec/input.rs"]
mod tests;
