use crate::error::{DigestError, Result};
use crate::model::{EntityKind, Fields, Orderable, UPDATED_AT_FIELD};
use crate::store::DataStore;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Fetch and decode every entity of a kind, in store order.
pub fn fetch_entities<E: Orderable, S: DataStore>(store: &S) -> Result<Vec<E>> {
    store
        .fetch_all(E::KIND)?
        .into_iter()
        .map(|doc| doc.into_entity())
        .collect()
}

/// Point read decoded into an entity.
pub fn fetch_entity<E: Orderable, S: DataStore>(store: &S, id: &str) -> Result<E> {
    store.get(E::KIND, id)?.into_entity()
}

pub fn timestamp(at: DateTime<Utc>) -> Result<Value> {
    Ok(serde_json::to_value(at)?)
}

/// The exact field map a reorder stages for one entity:
/// its ordering field and `updated_at`, nothing else.
pub fn order_fields(kind: EntityKind, priority: u32, now: DateTime<Utc>) -> Result<Fields> {
    let mut fields = Fields::new();
    fields.insert(kind.order_field().to_string(), Value::from(priority));
    fields.insert(UPDATED_AT_FIELD.to_string(), timestamp(now)?);
    Ok(fields)
}

/// Refuse caller-supplied fields that only the store or the ordering logic
/// may set.
pub fn reject_reserved_fields(kind: EntityKind, fields: &Fields) -> Result<()> {
    let reserved: Vec<&str> = kind
        .reserved_fields()
        .into_iter()
        .filter(|name| fields.contains_key(*name))
        .collect();
    if reserved.is_empty() {
        return Ok(());
    }
    Err(DigestError::Validation(format!(
        "Cannot set {} directly on a {}",
        reserved.join(", "),
        kind
    )))
}

/// The title field, when present, must be a non-empty string.
pub fn validate_title(kind: EntityKind, fields: &Fields, required: bool) -> Result<()> {
    let name = kind.title_field();
    match fields.get(name) {
        None if !required => Ok(()),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(()),
        _ => Err(DigestError::Validation(format!(
            "A {} needs a non-empty {}",
            kind, name
        ))),
    }
}

/// Convert a 1-based display position into an index into a list of `len`.
pub fn resolve_position(kind: EntityKind, len: usize, position: usize) -> Result<usize> {
    if position == 0 || position > len {
        return Err(DigestError::Api(format!(
            "No {} at position {} (list has {})",
            kind, position, len
        )));
    }
    Ok(position - 1)
}

/// Short label for messages: `'Title'`.
pub fn fmt_entity<E: Orderable>(entity: &E) -> String {
    format!("'{}'", entity.title())
}
