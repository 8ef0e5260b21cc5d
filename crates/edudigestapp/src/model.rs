//! # Domain Model: Orderable Entities
//!
//! EduDigest keeps four kinds of content lists in the document store:
//! [`Article`], [`NewsUpdate`], [`ResourceTab`] and [`SidebarTab`]. Their
//! payloads differ (an article has an author, a sidebar tab has an icon), but
//! all of them take part in the same ordering protocol. That shared
//! capability is the [`Orderable`] trait, so the ordering logic is written
//! once against the trait instead of once per kind.
//!
//! ## Ordering Field
//!
//! Each kind carries an integer ordering field. Articles and news updates
//! call it `priority`; tabs call it `order`. The field may be missing on
//! legacy documents, which is why [`Orderable::priority`] returns an
//! `Option`. Loading a list fills the gaps (see [`crate::commands::list`]).
//!
//! | Kind | Collection | Field | Base | Tie-break |
//! |------|------------|-------|------|-----------|
//! | Article | `articles` | `priority` | 1 | `created_at` newest first |
//! | NewsUpdate | `news_updates` | `priority` | 1 | input order |
//! | ResourceTab | `resource_tabs` | `order` | 0 | input order |
//! | SidebarTab | `sidebar_tabs` | `order` | 0 | input order |
//!
//! ## Documents
//!
//! The store only knows [`Document`]s: an opaque id plus a JSON field map.
//! Entities are decoded from documents with [`Document::into_entity`]. Fields
//! an entity does not model are kept in its `extra` map and never touched by
//! the ordering logic.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::Result;

/// A document's field map, as stored.
pub type Fields = serde_json::Map<String, Value>;

pub const ID_FIELD: &str = "id";
pub const ACTIVE_FIELD: &str = "active";
pub const CREATED_AT_FIELD: &str = "created_at";
pub const UPDATED_AT_FIELD: &str = "updated_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Article,
    NewsUpdate,
    ResourceTab,
    SidebarTab,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Article,
        EntityKind::NewsUpdate,
        EntityKind::ResourceTab,
        EntityKind::SidebarTab,
    ];

    /// Name of the store collection holding this kind.
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Article => "articles",
            EntityKind::NewsUpdate => "news_updates",
            EntityKind::ResourceTab => "resource_tabs",
            EntityKind::SidebarTab => "sidebar_tabs",
        }
    }

    /// Name of the integer field defining display order.
    pub fn order_field(self) -> &'static str {
        match self {
            EntityKind::Article | EntityKind::NewsUpdate => "priority",
            EntityKind::ResourceTab | EntityKind::SidebarTab => "order",
        }
    }

    /// Name of the field shown as the entity's title in lists.
    pub fn title_field(self) -> &'static str {
        match self {
            EntityKind::Article | EntityKind::NewsUpdate => "title",
            EntityKind::ResourceTab | EntityKind::SidebarTab => "label",
        }
    }

    /// Priority assigned to the first element of a fully ordered list.
    pub fn priority_base(self) -> u32 {
        match self {
            EntityKind::Article | EntityKind::NewsUpdate => 1,
            EntityKind::ResourceTab | EntityKind::SidebarTab => 0,
        }
    }

    /// Whether equal priorities are broken by `created_at`, newest first.
    /// Kinds without a tie-break keep their input order.
    pub fn newest_first_on_ties(self) -> bool {
        matches!(self, EntityKind::Article)
    }

    /// Fields callers may never set directly through create/update.
    pub fn reserved_fields(self) -> [&'static str; 4] {
        [
            ID_FIELD,
            self.order_field(),
            CREATED_AT_FIELD,
            UPDATED_AT_FIELD,
        ]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Article => "article",
            EntityKind::NewsUpdate => "news update",
            EntityKind::ResourceTab => "resource tab",
            EntityKind::SidebarTab => "sidebar tab",
        };
        f.write_str(name)
    }
}

/// A stored document: store-assigned id plus its fields (`id` is not a field).
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Decode this document into a typed entity.
    pub fn into_entity<E: Orderable>(self) -> Result<E> {
        let mut fields = self.fields;
        fields.insert(ID_FIELD.to_string(), Value::String(self.id));
        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

/// The capability shared by every entity kind taking part in ordering.
pub trait Orderable: Clone + Serialize + DeserializeOwned {
    const KIND: EntityKind;

    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn priority(&self) -> Option<u32>;
    fn set_priority(&mut self, priority: u32);
    fn is_active(&self) -> bool;
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn updated_at(&self) -> Option<DateTime<Utc>>;
    fn set_updated_at(&mut self, at: DateTime<Utc>);
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Fields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsUpdate {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Fields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceTab {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Fields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarTab {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Fields,
}

macro_rules! impl_orderable {
    ($ty:ty, $kind:expr, $title:ident, $order:ident) => {
        impl Orderable for $ty {
            const KIND: EntityKind = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn title(&self) -> &str {
                &self.$title
            }

            fn priority(&self) -> Option<u32> {
                self.$order
            }

            fn set_priority(&mut self, priority: u32) {
                self.$order = Some(priority);
            }

            fn is_active(&self) -> bool {
                self.active
            }

            fn created_at(&self) -> Option<DateTime<Utc>> {
                self.created_at
            }

            fn updated_at(&self) -> Option<DateTime<Utc>> {
                self.updated_at
            }

            fn set_updated_at(&mut self, at: DateTime<Utc>) {
                self.updated_at = Some(at);
            }
        }
    };
}

impl_orderable!(Article, EntityKind::Article, title, priority);
impl_orderable!(NewsUpdate, EntityKind::NewsUpdate, title, priority);
impl_orderable!(ResourceTab, EntityKind::ResourceTab, label, order);
impl_orderable!(SidebarTab, EntityKind::SidebarTab, label, order);
