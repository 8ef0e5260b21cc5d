use super::helpers::fmt_entity;
use super::{reorder, CmdMessage, CmdResult};
use crate::cache::ListCache;
use crate::error::{DigestError, Result};
use crate::model::Orderable;
use crate::order::{move_adjacent, Direction};
use crate::store::DataStore;

/// Move the item at `index` one slot up or down in the cached list.
///
/// Moving the first item up or the last item down leaves the list unchanged
/// and never reaches the store.
pub fn run<E: Orderable, S: DataStore>(
    store: &mut S,
    cache: &mut ListCache<E>,
    index: usize,
    direction: Direction,
) -> Result<CmdResult<E>> {
    let len = cache.len();
    if index >= len {
        return Err(DigestError::Api(format!(
            "Cannot move {} at index {}: list has {} entries",
            E::KIND,
            index,
            len
        )));
    }

    let label = fmt_entity(&cache.items()[index]);
    let moved = match move_adjacent(cache.items(), index, direction) {
        Some(order) => order,
        None => {
            let mut result = CmdResult::default().with_listed(cache.items().to_vec());
            let edge = match direction {
                Direction::Up => "top",
                Direction::Down => "bottom",
            };
            result.add_message(CmdMessage::info(format!(
                "{} is already at the {}",
                label, edge
            )));
            return Ok(result);
        }
    };

    let updated = reorder::apply(store, cache, moved)?;
    let target = match direction {
        Direction::Up => index - 1,
        Direction::Down => index + 1,
    };

    let mut result = CmdResult::default()
        .with_affected(vec![updated[target].clone()])
        .with_listed(updated)
        .changed();
    result.add_message(CmdMessage::success(format!(
        "Moved {} to position {}",
        label,
        target + 1
    )));
    Ok(result)
}
