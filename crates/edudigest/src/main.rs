//! # EduDigest CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/edudigestapp/`: core library with UI-agnostic ordering logic
//! - `crates/edudigest/`: this CLI, depending on the library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/edudigest/src/cli/)                      │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring and dispatch (commands.rs)                │
//! │  - Terminal rendering (render.rs, styles.rs)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/edudigestapp/src/api.rs)                 │
//! │  - Resolves display positions against the current list      │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/edudigestapp/src/commands/*)         │
//! │  - Ordering logic + data access                             │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI layer owns every user-facing concern: argument parsing, context
//! initialization, logging setup, dispatch, error reporting and rendering.
//!
//! ## Testing Approach
//!
//! - **Commands and API**: unit tested in the library against the in-memory store.
//! - **CLI**: `src/cli/` carries unit tests for parsing and rendering;
//!   `tests/` drives the real binary with `assert_cmd` against a temp data dir.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
