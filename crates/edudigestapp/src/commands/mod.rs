//! # Command Layer
//!
//! This module contains the **core business logic** of EduDigest's ordered
//! lists. Each operation lives in its own submodule as plain Rust functions
//! generic over the entity kind (`E: Orderable`) and the store
//! (`S: DataStore`).
//!
//! ## Role and Responsibilities
//!
//! - Combine store calls with the pure algorithms in [`crate::order`]
//! - Keep the priority invariant: after every successful write a full list
//!   carries priorities `base..base + N`
//! - Drive the optimistic protocol of [`crate::cache::ListCache`]: apply,
//!   confirm on success, roll back and re-fetch on failure
//! - Return structured [`CmdResult`]s, never strings
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal I/O**: No stdout, stderr or exit codes
//! - **Retries**: A failed write is returned as a typed error; whether to try
//!   again is the caller's decision
//! - **Position parsing**: Commands take zero-based indexes or ids
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Tests run against
//! `InMemoryStore`, whose write counter lets them assert that no-op
//! interactions never reach the store.
//!
//! ## Command Modules
//!
//! - [`list`]: Fetch in canonical order, reconciling missing priorities
//! - [`reorder`]: Apply a complete order as one atomic batch
//! - [`shift`]: Move an item one position up or down
//! - [`drag`]: Apply a drag-and-drop gesture
//! - [`create`]: Add an entity at the end of its list
//! - [`update`]: Edit content fields
//! - [`activate`]: Show or hide an entity on public pages
//! - [`delete`]: Remove an entity and renumber the rest
//! - [`view`]: Read a single entity
//! - [`helpers`]: Shared utilities (decoding, field maps, positions)

use serde::Serialize;

pub mod activate;
pub mod create;
pub mod delete;
pub mod drag;
pub mod helpers;
pub mod list;
pub mod reorder;
pub mod shift;
pub mod update;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Structured outcome of a command.
///
/// - `affected`: entities the command created or modified
/// - `listed`: the full list in display order after the command, when the
///   command produced one
/// - `changed`: whether anything was written to the store
#[derive(Debug)]
pub struct CmdResult<E> {
    pub affected: Vec<E>,
    pub listed: Vec<E>,
    pub changed: bool,
    pub messages: Vec<CmdMessage>,
}

impl<E> Default for CmdResult<E> {
    fn default() -> Self {
        Self {
            affected: Vec::new(),
            listed: Vec::new(),
            changed: false,
            messages: Vec::new(),
        }
    }
}

impl<E> CmdResult<E> {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, entities: Vec<E>) -> Self {
        self.affected = entities;
        self
    }

    pub fn with_listed(mut self, entities: Vec<E>) -> Self {
        self.listed = entities;
        self
    }

    pub fn changed(mut self) -> Self {
        self.changed = true;
        self
    }
}
