//! Applying a complete order.
//!
//! [`run`] is a pure "apply this order" primitive: the caller assembles the
//! full list in display order, and every entity's priority becomes its index
//! plus the kind's base. Each entity gets exactly `{<order field>, updated_at}`
//! staged, and the whole list goes to the store as one batch.
//!
//! [`apply`] wraps it in the optimistic protocol used by the interactive
//! commands (shift, drag, explicit reorder): show the new order immediately,
//! confirm it when the store accepts, roll back and re-fetch when it does not.
//! Errors are returned as-is; nothing here retries.

use super::helpers::{order_fields, resolve_position};
use super::CmdResult;
use crate::cache::ListCache;
use crate::commands::CmdMessage;
use crate::error::{DigestError, Result};
use crate::model::Orderable;
use crate::order::assign_sequential;
use crate::store::DataStore;
use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub fn run<E: Orderable, S: DataStore>(store: &mut S, list: &[E]) -> Result<Vec<E>> {
    if list.is_empty() {
        return Ok(Vec::new());
    }
    ensure_well_formed(list)?;

    let now = Utc::now();
    let mut ordered = list.to_vec();
    assign_sequential(&mut ordered);

    let mut updates = Vec::with_capacity(ordered.len());
    for entity in ordered.iter_mut() {
        entity.set_updated_at(now);
        let priority = entity.priority().unwrap_or_default();
        updates.push((
            entity.id().to_string(),
            order_fields(E::KIND, priority, now)?,
        ));
    }

    debug!(kind = %E::KIND, count = updates.len(), "submitting reorder batch");
    store.batch_update(E::KIND, updates)?;
    info!(kind = %E::KIND, count = ordered.len(), "reorder applied");

    Ok(ordered)
}

/// Like [`run`], but first checks every id against the cache's known-good
/// list. Entities the cache never saw fail fast with `StaleReference`,
/// without a store call.
pub fn run_checked<E: Orderable, S: DataStore>(
    store: &mut S,
    cache: &ListCache<E>,
    list: &[E],
) -> Result<Vec<E>> {
    let unknown = cache.unknown_ids(list);
    if !unknown.is_empty() {
        return Err(DigestError::StaleReference {
            kind: E::KIND,
            ids: unknown,
        });
    }
    run(store, list)
}

/// Show `order` optimistically, persist it, and settle the cache.
///
/// On failure the cache is rolled back to its known-good list and then
/// re-fetched from the store, since the store may disagree with both.
pub fn apply<E: Orderable, S: DataStore>(
    store: &mut S,
    cache: &mut ListCache<E>,
    order: Vec<E>,
) -> Result<Vec<E>> {
    cache.apply_optimistic(order.clone())?;

    match run_checked(store, cache, &order) {
        Ok(updated) => {
            cache.confirm(updated.clone());
            Ok(updated)
        }
        Err(err) => {
            warn!(kind = %E::KIND, error = %err, "reorder failed, rolling back");
            cache.rollback();
            if let Err(refresh_err) = cache.refresh(store) {
                warn!(kind = %E::KIND, error = %refresh_err, "re-fetch after failed reorder also failed");
            }
            Err(err)
        }
    }
}

/// Apply an explicit order given as 0-based indexes into the cached list.
/// The indexes must name every item exactly once.
pub fn by_indexes<E: Orderable, S: DataStore>(
    store: &mut S,
    cache: &mut ListCache<E>,
    indexes: &[usize],
) -> Result<CmdResult<E>> {
    let len = cache.len();
    let mut seen = HashSet::new();
    for &index in indexes {
        if index >= len || !seen.insert(index) {
            return Err(DigestError::Validation(format!(
                "Order must list every {} exactly once (positions 1 to {})",
                E::KIND,
                len
            )));
        }
    }
    if indexes.len() != len {
        return Err(DigestError::Validation(format!(
            "Order names {} of {} {} entries",
            indexes.len(),
            len,
            E::KIND
        )));
    }

    let order: Vec<E> = indexes.iter().map(|&i| cache.items()[i].clone()).collect();
    let updated = apply(store, cache, order)?;

    let mut result = CmdResult::default().with_listed(updated).changed();
    result.add_message(CmdMessage::success(format!("Reordered {} entries", len)));
    Ok(result)
}

/// Like [`by_indexes`], with 1-based display positions.
pub fn by_positions<E: Orderable, S: DataStore>(
    store: &mut S,
    cache: &mut ListCache<E>,
    positions: &[usize],
) -> Result<CmdResult<E>> {
    let len = cache.len();
    let indexes = positions
        .iter()
        .map(|&p| resolve_position(E::KIND, len, p))
        .collect::<Result<Vec<_>>>()?;
    by_indexes(store, cache, &indexes)
}

fn ensure_well_formed<E: Orderable>(list: &[E]) -> Result<()> {
    let mut seen = HashSet::new();
    for entity in list {
        if !seen.insert(entity.id()) {
            return Err(DigestError::Api(format!(
                "Reorder list is not well-formed: {} appears twice",
                entity.id()
            )));
        }
    }
    Ok(())
}
