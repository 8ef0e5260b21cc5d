//! # List Cache
//!
//! A client-side mirror of one entity kind's list, owned by the interaction
//! layer and passed explicitly to the commands that reorder it.
//!
//! The cache holds two lists:
//! - **displayed**: what the UI shows, possibly an optimistic order not yet
//!   confirmed by the store
//! - **known-good**: the last order the store confirmed
//!
//! ```text
//!   refresh ──▶ displayed = known-good = store order
//!   apply_optimistic(order) ──▶ displayed = order, in flight
//!       ├── confirm(items) ──▶ displayed = known-good = items
//!       └── rollback()     ──▶ displayed = known-good
//! ```
//!
//! While a reorder is in flight, further optimistic updates are refused with
//! [`DigestError::ReorderInFlight`]. That serializes reorders of the same
//! list so a second snapshot can never predate the first write.

use crate::commands;
use crate::error::{DigestError, Result};
use crate::model::Orderable;
use crate::store::DataStore;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ListCache<E> {
    displayed: Vec<E>,
    known_good: Vec<E>,
    in_flight: bool,
}

impl<E> Default for ListCache<E> {
    fn default() -> Self {
        Self {
            displayed: Vec::new(),
            known_good: Vec::new(),
            in_flight: false,
        }
    }
}

impl<E: Orderable> ListCache<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the canonical list from the store.
    pub fn load<S: DataStore>(store: &mut S) -> Result<Self> {
        let mut cache = Self::new();
        cache.refresh(store)?;
        Ok(cache)
    }

    /// Replace both lists with the store's canonical order, repairing missing
    /// priorities on the way. Clears the in-flight flag.
    pub fn refresh<S: DataStore>(&mut self, store: &mut S) -> Result<()> {
        let items = commands::list::run::<E, S>(store)?;
        debug!(kind = %E::KIND, count = items.len(), "refreshed list cache");
        self.displayed = items.clone();
        self.known_good = items;
        self.in_flight = false;
        Ok(())
    }

    /// The list as currently displayed.
    pub fn items(&self) -> &[E] {
        &self.displayed
    }

    /// The last order confirmed by the store.
    pub fn known_good(&self) -> &[E] {
        &self.known_good
    }

    pub fn len(&self) -> usize {
        self.displayed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displayed.is_empty()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Show `order` immediately, before the store confirms it.
    pub fn apply_optimistic(&mut self, order: Vec<E>) -> Result<()> {
        if self.in_flight {
            return Err(DigestError::ReorderInFlight);
        }
        self.displayed = order;
        self.in_flight = true;
        Ok(())
    }

    /// The store accepted the reorder; `items` becomes the known-good list.
    pub fn confirm(&mut self, items: Vec<E>) {
        self.displayed = items.clone();
        self.known_good = items;
        self.in_flight = false;
    }

    /// Discard the optimistic order.
    pub fn rollback(&mut self) {
        self.displayed = self.known_good.clone();
        self.in_flight = false;
    }

    /// Ids in `list` that the known-good list does not contain.
    pub fn unknown_ids(&self, list: &[E]) -> Vec<String> {
        let known: HashSet<&str> = self.known_good.iter().map(|e| e.id()).collect();
        list.iter()
            .filter(|e| !known.contains(e.id()))
            .map(|e| e.id().to_string())
            .collect()
    }
}
