//! Reconcile a specification's named tables with a runtime data payload.
//!
//! After a merge the specification holds one descriptor per name in the union of its own table
//! names and the payload keys:
//!
//! - payload rows replace `values` of a same-named table, every other attribute is kept
//! - tables the payload does not mention are left untouched
//! - payload-only names are appended, in payload key order, after the existing tables
//!
//! A payload entry with an empty row list still replaces (empties) the matching table.

use crate::foundation::error::MergeResult;
use crate::spec::input::{DataPayload, PayloadInput, SpecInput};
use crate::spec::model::{Specification, TableDescriptor};
use indexmap::IndexMap;
use serde_json::Value;

/// Normalize both inputs and merge the payload into the specification's `data`.
///
/// Fails only when either input cannot be parsed; the merge itself cannot fail.
#[tracing::instrument(skip_all)]
pub fn merge(
    spec: impl Into<SpecInput>,
    payload: impl Into<PayloadInput>,
) -> MergeResult<Specification> {
    let mut spec = spec.into().normalize()?;
    let payload = payload.into().normalize()?;
    spec.merge_payload(payload);
    Ok(spec)
}

impl Specification {
    /// Merge `payload` into this specification's `data` in place.
    pub fn merge_payload(&mut self, payload: DataPayload) {
        let payload = payload.into_tables();
        let existing = self.data.as_ref().map_or(0, Vec::len);
        tracing::debug!(existing, incoming = payload.len(), "merging data tables");

        let Some(mut tables) = self.data.take() else {
            self.data = Some(
                payload
                    .into_iter()
                    .map(|(name, rows)| TableDescriptor::new(name, rows))
                    .collect(),
            );
            return;
        };

        let index = name_index(&tables);
        for (name, mut rows) in payload {
            let Some(positions) = index.get(&name) else {
                tables.push(TableDescriptor::new(name, rows));
                continue;
            };
            let last = positions.len().saturating_sub(1);
            for (n, &i) in positions.iter().enumerate() {
                let values = if n == last {
                    std::mem::take(&mut rows)
                } else {
                    rows.clone()
                };
                tables[i].values = Some(Value::Array(values));
            }
        }
        self.data = Some(tables);
    }
}

/// Map every table name to the positions it occupies, in first-seen order.
fn name_index(tables: &[TableDescriptor]) -> IndexMap<String, Vec<usize>> {
    let mut index: IndexMap<String, Vec<usize>> = IndexMap::with_capacity(tables.len());
    for (i, table) in tables.iter().enumerate() {
        let positions = index.entry(table.name.clone()).or_default();
        if !positions.is_empty() {
            tracing::warn!(name = %table.name, "specification declares a data table name twice");
        }
        positions.push(i);
    }
    index
}

#[cfg(test)]
#[path = "../tests/unit/merge.rs"]
mod tests;
