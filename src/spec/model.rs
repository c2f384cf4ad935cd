use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A declarative visualization specification.
///
/// Only the `data` attribute is modeled; every other attribute (marks, scales, signals, ...) is
/// carried opaquely in `rest` and serialized back untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    /// Named data tables. `None` when the attribute is absent or `null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<TableDescriptor>>,

    /// All remaining top-level attributes, in document order.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Specification {
    /// Iterate the declared table names in order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.data.iter().flatten().map(|t| t.name.as_str())
    }

    /// Look up the first table with `name`.
    pub fn table(&self, name: &str) -> Option<&TableDescriptor> {
        self.data.as_ref()?.iter().find(|t| t.name == name)
    }

    /// Serialize to compact JSON text.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// One named table inside a specification's `data` sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,

    /// Inline rows. Tables fed from `url` or `source` have no inline values.
    ///
    /// `None` means the attribute is absent; an explicit `null` is kept as `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub values: Option<Value>,

    /// Other descriptor attributes (`url`, `format`, `transform`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TableDescriptor {
    /// Build a bare `{name, values}` descriptor from payload rows.
    pub fn new(name: impl Into<String>, rows: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values: Some(Value::Array(rows)),
            extra: Map::new(),
        }
    }

    /// Inline rows as a slice, if `values` holds an array.
    pub fn rows(&self) -> Option<&[Value]> {
        match self.values.as_ref()? {
            Value::Array(rows) => Some(rows.as_slice()),
            _ => None,
        }
    }
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
#[path = "../../tests/unit/spec/model.rs"]
mod tests;
