//! # EduDigest Ordering Architecture
//!
//! EduDigest's admin panel manages four kinds of ordered content lists:
//! articles, news updates, resource tabs and sidebar tabs. Each list is kept
//! in a document store and displayed in ascending `priority` (or `order`).
//! This crate is the **UI-agnostic core** of that behavior: it knows how to
//! load a list in canonical order, repair missing priorities, and apply a new
//! order atomically, whatever client (CLI, web, desktop) drives it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, generic over the store        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - list/reconcile, reorder, shift, drag, create, delete ... │
//! │  - The only code combining store calls with ordering logic  │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                              │
//!                  ▼                              ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Ordering (order, drag, cache)│ │  Storage Layer (store/)   │
//! │  - Pure list algorithms       │ │  - DataStore trait        │
//! │  - Drag state machine         │ │  - FileStore / InMemory   │
//! │  - ListCache (optimistic UI)  │ │  - Atomic batch updates   │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## The Priority Invariant
//!
//! After any successful reorder of a full list of N entities, their
//! priorities are exactly `base..base + N` in list order. The base is a
//! property of the entity kind (see [`model::EntityKind::priority_base`]).
//! Deleting an entity renumbers the remaining list; loading a list assigns
//! priorities to entities that lack one, appending them at the end.
//!
//! ## Testing Strategy
//!
//! Commands carry most of the tests and run against
//! [`store::memory::InMemoryStore`], which counts committed writes so tests
//! can assert that no-op interactions never touch the store.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each operation
//! - [`order`]: Pure ordering algorithms (sort, reconcile plan, swap, splice)
//! - [`drag`]: Drag-and-drop state machine
//! - [`cache`]: Client-side list cache with optimistic updates and rollback
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Entity kinds, documents and the `Orderable` capability
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and API construction
//! - [`error`]: Error types

pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod drag;
pub mod error;
pub mod init;
pub mod model;
pub mod order;
pub mod store;
