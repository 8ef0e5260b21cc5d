//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as
//! the single entry point for every list operation, regardless of the UI
//! driving it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: converts 1-based display positions into ids or
//!   zero-based indexes against a freshly loaded list
//! - **Returns structured types** (`Result<CmdResult<E>>`)
//!
//! ## Two Ways In
//!
//! - **Position methods** ([`DigestApi::move_up`], [`DigestApi::move_to`],
//!   ...) load the list, act once and return. This is what a one-shot client
//!   like the CLI needs.
//! - **Cache methods** ([`DigestApi::load`], [`DigestApi::move_item`],
//!   [`DigestApi::drop_item`], ...) take a [`ListCache`] the client keeps
//!   between interactions, with optimistic display and rollback.
//!
//! ## Generic Over DataStore
//!
//! `DigestApi<S: DataStore>` is generic over the storage backend:
//! - Production: `DigestApi<FileStore>`
//! - Testing: `DigestApi<InMemoryStore>`
//!
//! API tests verify that positions are resolved and the right command is
//! reached. Command logic is tested in the command modules.

use crate::cache::ListCache;
use crate::commands;
use crate::config::DigestConfig;
use crate::drag::DragState;
use crate::error::Result;
use crate::model::{Fields, Orderable};
use crate::order::Direction;
use crate::store::DataStore;

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct DigestApi<S: DataStore> {
    store: S,
    config: DigestConfig,
}

impl<S: DataStore> DigestApi<S> {
    pub fn new(store: S, config: DigestConfig) -> Self {
        Self { store, config }
    }

    /// The admin list, inactive entities included.
    pub fn list<E: Orderable>(&mut self) -> Result<CmdResult<E>> {
        let items = commands::list::run::<E, S>(&mut self.store)?;
        Ok(CmdResult::default().with_listed(items))
    }

    /// What public pages show: active entities only.
    pub fn list_public<E: Orderable>(&mut self) -> Result<CmdResult<E>> {
        let items = commands::list::public::<E, S>(&mut self.store)?;
        Ok(CmdResult::default().with_listed(items))
    }

    pub fn view<E: Orderable>(&mut self, position: usize) -> Result<CmdResult<E>> {
        let id = self.id_at::<E>(position)?;
        commands::view::run(&self.store, &id)
    }

    pub fn create<E: Orderable>(&mut self, fields: Fields) -> Result<CmdResult<E>> {
        commands::create::run(&mut self.store, fields, self.config.default_active)
    }

    pub fn update<E: Orderable>(&mut self, position: usize, fields: Fields) -> Result<CmdResult<E>> {
        let id = self.id_at::<E>(position)?;
        commands::update::run(&mut self.store, &id, fields)
    }

    pub fn set_active<E: Orderable>(&mut self, position: usize, active: bool) -> Result<CmdResult<E>> {
        let id = self.id_at::<E>(position)?;
        commands::activate::run(&mut self.store, &id, active)
    }

    pub fn delete<E: Orderable>(&mut self, position: usize) -> Result<CmdResult<E>> {
        let id = self.id_at::<E>(position)?;
        commands::delete::run(&mut self.store, &id)
    }

    pub fn move_up<E: Orderable>(&mut self, position: usize) -> Result<CmdResult<E>> {
        self.shift_at::<E>(position, Direction::Up)
    }

    pub fn move_down<E: Orderable>(&mut self, position: usize) -> Result<CmdResult<E>> {
        self.shift_at::<E>(position, Direction::Down)
    }

    /// Drag the item at position `from` and drop it at position `to`.
    pub fn move_to<E: Orderable>(&mut self, from: usize, to: usize) -> Result<CmdResult<E>> {
        let mut cache = self.load::<E>()?;
        let from = commands::helpers::resolve_position(E::KIND, cache.len(), from)?;
        let to = commands::helpers::resolve_position(E::KIND, cache.len(), to)?;

        let mut state = DragState::new();
        state.start(from);
        commands::drag::drop_on(&mut self.store, &mut cache, &mut state, to)
    }

    /// Apply a full explicit order given as display positions, e.g.
    /// `[3, 1, 2]` puts the current third item first.
    pub fn reorder<E: Orderable>(&mut self, positions: &[usize]) -> Result<CmdResult<E>> {
        let mut cache = self.load::<E>()?;
        commands::reorder::by_positions(&mut self.store, &mut cache, positions)
    }

    /// A cache over the canonical list, for clients that keep state between
    /// interactions.
    pub fn load<E: Orderable>(&mut self) -> Result<ListCache<E>> {
        ListCache::load(&mut self.store)
    }

    pub fn refresh<E: Orderable>(&mut self, cache: &mut ListCache<E>) -> Result<()> {
        cache.refresh(&mut self.store)
    }

    pub fn move_item<E: Orderable>(
        &mut self,
        cache: &mut ListCache<E>,
        index: usize,
        direction: Direction,
    ) -> Result<CmdResult<E>> {
        commands::shift::run(&mut self.store, cache, index, direction)
    }

    pub fn drop_item<E: Orderable>(
        &mut self,
        cache: &mut ListCache<E>,
        state: &mut DragState,
        target: usize,
    ) -> Result<CmdResult<E>> {
        commands::drag::drop_on(&mut self.store, cache, state, target)
    }

    /// Persist an order the client assembled itself.
    pub fn apply_order<E: Orderable>(
        &mut self,
        cache: &mut ListCache<E>,
        order: Vec<E>,
    ) -> Result<CmdResult<E>> {
        let updated = commands::reorder::apply(&mut self.store, cache, order)?;
        Ok(CmdResult::default().with_listed(updated).changed())
    }

    pub fn config(&self) -> &DigestConfig {
        &self.config
    }

    fn shift_at<E: Orderable>(&mut self, position: usize, direction: Direction) -> Result<CmdResult<E>> {
        let mut cache = self.load::<E>()?;
        let index = commands::helpers::resolve_position(E::KIND, cache.len(), position)?;
        commands::shift::run(&mut self.store, &mut cache, index, direction)
    }

    fn id_at<E: Orderable>(&mut self, position: usize) -> Result<String> {
        let items = commands::list::run::<E, S>(&mut self.store)?;
        let index = commands::helpers::resolve_position(E::KIND, items.len(), position)?;
        Ok(items[index].id().to_string())
    }
}
