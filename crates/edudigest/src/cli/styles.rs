//! Styles for the EduDigest CLI.
//!
//! Renderers refer to styles by meaning (an index, a title, a hidden entry),
//! never by colour. `console` drops the escape codes on its own when stdout
//! is not a terminal or `NO_COLOR` is set, so rendered strings are plain in
//! pipes and tests.

use console::Style;
use edudigestapp::commands::MessageLevel;
use once_cell::sync::Lazy;

pub static INDEX: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static HIDDEN: Lazy<Style> = Lazy::new(|| Style::new().dim().italic());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static FIELD: Lazy<Style> = Lazy::new(|| Style::new().cyan());

static INFO: Lazy<Style> = Lazy::new(|| Style::new().blue());
static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow().bold());

pub fn for_level(level: &MessageLevel) -> &'static Style {
    match level {
        MessageLevel::Info => &INFO,
        MessageLevel::Success => &SUCCESS,
        MessageLevel::Warning => &WARNING,
    }
}
