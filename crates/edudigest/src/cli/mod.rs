//! # CLI Behavior
//!
//! This is **one possible UI client** for EduDigest's ordered lists, not the
//! application itself. The CLI is the only place that knows about terminal
//! I/O, exit codes and output formatting.
//!
//! ## Positions
//!
//! Every command addresses entities by their 1-based position in the admin
//! list as printed by `edudigest <kind> list`. Positions are resolved against
//! the list as loaded at the start of the command, so a position printed by
//! an earlier `list` may name a different entity if another session has
//! reordered since.
//!
//! ## Naked Execution
//!
//! `edudigest <kind>` with no action defaults to `list`.
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. The filter comes from
//! `RUST_LOG` when set, otherwise `warn` (`info` with `--verbose`).
//!
//! ## Module Structure
//!
//! - `commands`: context setup and dispatch to the API
//! - `render`: output formatting (lists, single entities, messages)
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styling

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
