//! Plain-text rendering of command results.
//!
//! Every function here returns a `String`; printing is the caller's job.

use super::styles;
use chrono::{DateTime, Utc};
use edudigestapp::commands::{CmdMessage, CmdResult};
use edudigestapp::model::Orderable;
use serde_json::Value;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const COL_INDEX: usize = 5;
const COL_STATUS: usize = 10;
const ELLIPSIS: char = '…';

/// One line per entity: display position, title, visibility.
pub fn render_list<E: Orderable>(items: &[E]) -> String {
    if items.is_empty() {
        return format!("{}\n", styles::MUTED.apply_to(format!("No {}s yet.", E::KIND)));
    }

    let title_width = LINE_WIDTH.saturating_sub(COL_INDEX + COL_STATUS);
    let mut out = String::new();
    for (i, entity) in items.iter().enumerate() {
        let index = format!("{:>3}.", i + 1);
        let title = pad_to_width(&truncate_to_width(entity.title(), title_width), title_width);
        let status = if entity.is_active() { "" } else { "hidden" };

        let line = format!(
            "{} {} {}",
            styles::INDEX.apply_to(index),
            styles::TITLE.apply_to(title),
            styles::HIDDEN.apply_to(status)
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// All fields of one entity, title first.
pub fn render_entity<E: Orderable>(entity: &E) -> String {
    let mut out = format!("{}\n", styles::TITLE.apply_to(entity.title()));

    let value = serde_json::to_value(entity).unwrap_or(Value::Null);
    if let Value::Object(map) = value {
        let title_field = E::KIND.title_field();
        let mut keys: Vec<&String> = map.keys().filter(|k| k.as_str() != title_field).collect();
        keys.sort();
        let key_width = keys.iter().map(|k| k.width()).max().unwrap_or(0);

        for key in keys {
            let shown = match &map[key] {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            out.push_str(&format!(
                "  {} {}\n",
                styles::FIELD.apply_to(pad_to_width(&format!("{}:", key), key_width + 1)),
                shown
            ));
        }
    }

    if let Some(updated) = entity.updated_at() {
        out.push_str(&format!(
            "  {}\n",
            styles::MUTED.apply_to(format!("updated {}", time_ago(updated)))
        ));
    }
    out
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        out.push_str(&format!(
            "{}\n",
            styles::for_level(&message.level).apply_to(&message.content)
        ));
    }
    out
}

/// Messages, then the resulting list when the command produced one.
pub fn render_result<E: Orderable>(result: &CmdResult<E>) -> String {
    let mut out = render_messages(&result.messages);
    if !result.listed.is_empty() {
        out.push_str(&render_list(&result.listed));
    }
    out
}

fn time_ago(at: DateTime<Utc>) -> String {
    let elapsed = Utc::now()
        .signed_duration_since(at)
        .to_std()
        .unwrap_or_default();
    timeago::Formatter::new().convert(elapsed)
}

fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let budget = max.saturating_sub(ELLIPSIS.width().unwrap_or(1));
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    out
}

fn pad_to_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(pad))
}
