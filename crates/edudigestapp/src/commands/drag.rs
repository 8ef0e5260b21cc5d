use super::helpers::fmt_entity;
use super::{reorder, CmdMessage, CmdResult};
use crate::cache::ListCache;
use crate::drag::{DragState, DropAction};
use crate::error::{DigestError, Result};
use crate::model::Orderable;
use crate::order::splice_move;
use crate::store::DataStore;

/// Apply the outcome of a drag gesture to the cached list.
///
/// `DropAction::None` and a drop onto the source position return the list
/// unchanged without a store call.
pub fn run<E: Orderable, S: DataStore>(
    store: &mut S,
    cache: &mut ListCache<E>,
    action: DropAction,
) -> Result<CmdResult<E>> {
    let (from, to) = match action {
        DropAction::None => return Ok(unchanged(cache)),
        DropAction::Move { from, to } => (from, to),
    };

    let len = cache.len();
    if from >= len || to >= len {
        return Err(DigestError::Api(format!(
            "Cannot move {} from index {} to {}: list has {} entries",
            E::KIND,
            from,
            to,
            len
        )));
    }

    let moved = match splice_move(cache.items(), from, to) {
        Some(order) => order,
        None => return Ok(unchanged(cache)),
    };
    let label = fmt_entity(&cache.items()[from]);

    let updated = reorder::apply(store, cache, moved)?;

    let mut result = CmdResult::default()
        .with_affected(vec![updated[to].clone()])
        .with_listed(updated)
        .changed();
    result.add_message(CmdMessage::success(format!(
        "Moved {} to position {}",
        label,
        to + 1
    )));
    Ok(result)
}

/// Finish `state` over `target` and apply whatever the drop asks for.
pub fn drop_on<E: Orderable, S: DataStore>(
    store: &mut S,
    cache: &mut ListCache<E>,
    state: &mut DragState,
    target: usize,
) -> Result<CmdResult<E>> {
    let action = state.drop_on(target);
    run(store, cache, action)
}

fn unchanged<E: Orderable>(cache: &ListCache<E>) -> CmdResult<E> {
    CmdResult::default().with_listed(cache.items().to_vec())
}
