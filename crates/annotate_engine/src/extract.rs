//! Plain views of a declaration's annotations.

use annotate_foundation::{DeclarationId, Result, Value};
use indexmap::IndexMap;

use crate::registry::Registry;

/// Projects the mapping `id` owns down to `{key: value}`.
///
/// Repeatable keys map to their accumulated [`Value::List`]; single-valued
/// keys map to the value itself. A declaration that owns no mapping yields an
/// empty map. Keys keep the order in which they were first stored.
pub fn extract_annotations(registry: &Registry, id: DeclarationId) -> Result<IndexMap<String, Value>> {
    Ok(registry
        .annotations(id)?
        .map(|map| {
            map.iter()
                .map(|(key, annotation)| (key.clone(), annotation.value().clone()))
                .collect()
        })
        .unwrap_or_default())
}
