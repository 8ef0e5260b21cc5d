use super::helpers::{fetch_entity, fmt_entity, reject_reserved_fields, timestamp, validate_title};
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Fields, Orderable, UPDATED_AT_FIELD};
use crate::store::DataStore;
use chrono::Utc;
use tracing::info;

/// Edit content fields of one entity. Ordering and timestamps are not
/// editable here; reorders go through [`super::reorder`].
pub fn run<E: Orderable, S: DataStore>(
    store: &mut S,
    id: &str,
    mut fields: Fields,
) -> Result<CmdResult<E>> {
    reject_reserved_fields(E::KIND, &fields)?;
    validate_title(E::KIND, &fields, false)?;

    // Fail with NotFound before writing
    fetch_entity::<E, S>(store, id)?;

    fields.insert(UPDATED_AT_FIELD.to_string(), timestamp(Utc::now())?);
    store.update(E::KIND, id, fields)?;

    let entity: E = fetch_entity(store, id)?;
    info!(kind = %E::KIND, %id, "updated entity");

    let mut result = CmdResult::default().with_affected(vec![entity.clone()]).changed();
    result.add_message(CmdMessage::success(format!(
        "Updated {} {}",
        E::KIND,
        fmt_entity(&entity)
    )));
    Ok(result)
}
