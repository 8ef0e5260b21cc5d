//! # Ordering Algorithms
//!
//! Pure functions over in-memory lists. Nothing here touches the store; the
//! command layer combines these with store calls.
//!
//! - [`sort_by_priority`]: canonical display order for a kind
//! - [`fill_missing_priorities`]: the gap-filling half of reconciliation
//! - [`assign_sequential`]: priorities from list positions
//! - [`move_adjacent`]: "move up" / "move down" buttons
//! - [`splice_move`]: drag-and-drop reinsertion
//!
//! Interaction helpers return `None` for no-ops (top item moved up, item
//! dropped on itself) so callers can short-circuit before any store call.

use crate::model::Orderable;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

fn compare<E: Orderable>(a: &E, b: &E) -> Ordering {
    // Missing priorities sort last
    let by_priority = match (a.priority(), b.priority()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    if by_priority != Ordering::Equal || !E::KIND.newest_first_on_ties() {
        return by_priority;
    }
    match (a.created_at(), b.created_at()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort ascending by priority, breaking ties per kind. The sort is stable,
/// so kinds without a tie-break keep their input order.
pub fn sort_by_priority<E: Orderable>(list: &mut [E]) {
    list.sort_by(compare);
}

/// Give every entity lacking a priority one that places it after all
/// prioritized entities, in encounter order. Existing priorities are never
/// changed. Returns how many entities were assigned.
pub fn fill_missing_priorities<E: Orderable>(list: &mut [E]) -> usize {
    let base = E::KIND.priority_base();
    let known: Vec<u32> = list.iter().filter_map(|e| e.priority()).collect();

    let after_count = base.saturating_add(known.len() as u32);
    let after_max = known.iter().max().map_or(base, |m| m.saturating_add(1));
    let start = after_count.max(after_max);

    let mut assigned = 0u32;
    for entity in list.iter_mut().filter(|e| e.priority().is_none()) {
        entity.set_priority(start.saturating_add(assigned));
        assigned += 1;
    }
    assigned as usize
}

/// Priorities derived from positions: `base + index`.
pub fn assign_sequential<E: Orderable>(list: &mut [E]) {
    let base = E::KIND.priority_base();
    for (i, entity) in list.iter_mut().enumerate() {
        entity.set_priority(base + i as u32);
    }
}

/// Whether priorities are exactly `base..base + len` in list order.
pub fn is_contiguous<E: Orderable>(list: &[E]) -> bool {
    let base = E::KIND.priority_base();
    list.iter()
        .enumerate()
        .all(|(i, e)| e.priority() == Some(base + i as u32))
}

/// Swap the item at `index` with its neighbour in `direction`.
///
/// Returns `None` when there is nothing to do: moving the first item up,
/// the last item down, or an index outside the list.
pub fn move_adjacent<E: Clone>(list: &[E], index: usize, direction: Direction) -> Option<Vec<E>> {
    if index >= list.len() {
        return None;
    }
    let other = match direction {
        Direction::Up => index.checked_sub(1)?,
        Direction::Down => {
            let next = index + 1;
            if next >= list.len() {
                return None;
            }
            next
        }
    };
    let mut moved = list.to_vec();
    moved.swap(index, other);
    Some(moved)
}

/// Remove the item at `from` and reinsert it at `to` in the shortened list.
///
/// Every item between the two positions shifts by one; this is not a
/// pairwise swap. Returns `None` for a self-drop or an out-of-range index.
pub fn splice_move<E: Clone>(list: &[E], from: usize, to: usize) -> Option<Vec<E>> {
    if from == to || from >= list.len() || to >= list.len() {
        return None;
    }
    let mut moved = list.to_vec();
    let item = moved.remove(from);
    moved.insert(to, item);
    Some(moved)
}
