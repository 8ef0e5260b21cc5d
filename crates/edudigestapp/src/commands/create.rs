use super::helpers::{fetch_entity, fmt_entity, reject_reserved_fields, timestamp, validate_title};
use super::{list, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Fields, Orderable, ACTIVE_FIELD, CREATED_AT_FIELD, UPDATED_AT_FIELD};
use crate::store::DataStore;
use chrono::Utc;
use serde_json::Value;
use tracing::info;

/// Create an entity at the end of its list.
///
/// The list is loaded (and reconciled) first, so the new entity's priority
/// is always `base + N` over a contiguous list. `active` falls back to
/// `default_active` when the caller does not set it.
pub fn run<E: Orderable, S: DataStore>(
    store: &mut S,
    mut fields: Fields,
    default_active: bool,
) -> Result<CmdResult<E>> {
    validate_title(E::KIND, &fields, true)?;
    reject_reserved_fields(E::KIND, &fields)?;

    let current = list::run::<E, S>(store)?;
    let priority = E::KIND.priority_base() + current.len() as u32;
    let now = timestamp(Utc::now())?;

    fields.insert(E::KIND.order_field().to_string(), Value::from(priority));
    fields
        .entry(ACTIVE_FIELD)
        .or_insert(Value::Bool(default_active));
    fields.insert(CREATED_AT_FIELD.to_string(), now.clone());
    fields.insert(UPDATED_AT_FIELD.to_string(), now);

    let id = store.create(E::KIND, fields)?;
    let entity: E = fetch_entity(store, &id)?;
    info!(kind = %E::KIND, %id, priority, "created entity");

    let mut result = CmdResult::default().with_affected(vec![entity.clone()]).changed();
    result.add_message(CmdMessage::success(format!(
        "Created {} {} at position {}",
        E::KIND,
        fmt_entity(&entity),
        current.len() + 1
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DigestError;
    use crate::model::{Article, EntityKind, ResourceTab, SidebarTab};
    use crate::order::is_contiguous;
    use crate::store::memory::fixtures::StoreFixture;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn create_appends_at_end() {
        let mut fx = StoreFixture::new().with_ordered(EntityKind::Article, &["A", "B"]);

        let result = run::<Article, _>(
            &mut fx.store,
            fields(json!({ "title": "C", "author": "Ada", "content": "Body" })),
            true,
        )
        .unwrap();

        let created = &result.affected[0];
        assert_eq!(created.title, "C");
        assert_eq!(created.author.as_deref(), Some("Ada"));
        assert_eq!(created.priority, Some(3));
        assert!(created.active);
        assert!(created.created_at.is_some());
        assert!(created.updated_at.is_some());

        let all = list::run::<Article, _>(&mut fx.store).unwrap();
        assert_eq!(all.last().map(|a| a.title.as_str()), Some("C"));
        assert!(is_contiguous(&all));
    }

    #[test]
    fn first_tab_gets_order_zero() {
        let mut fx = StoreFixture::new();
        let result =
            run::<ResourceTab, _>(&mut fx.store, fields(json!({ "label": "Guides" })), true).unwrap();
        assert_eq!(result.affected[0].order, Some(0));
    }

    #[test]
    fn create_repairs_legacy_list_first() {
        let mut fx = StoreFixture::new()
            .with_ordered(EntityKind::SidebarTab, &["A"])
            .with_unordered(EntityKind::SidebarTab, "Legacy");

        let result =
            run::<SidebarTab, _>(&mut fx.store, fields(json!({ "label": "New" })), true).unwrap();

        assert_eq!(result.affected[0].order, Some(2));
        let all = list::run::<SidebarTab, _>(&mut fx.store).unwrap();
        let labels: Vec<&str> = all.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "Legacy", "New"]);
        assert!(is_contiguous(&all));
    }

    #[test]
    fn active_defaults_follow_argument() {
        let mut fx = StoreFixture::new();
        let hidden =
            run::<SidebarTab, _>(&mut fx.store, fields(json!({ "label": "Draft" })), false).unwrap();
        assert!(!hidden.affected[0].active);

        let explicit = run::<SidebarTab, _>(
            &mut fx.store,
            fields(json!({ "label": "Live", "active": true })),
            false,
        )
        .unwrap();
        assert!(explicit.affected[0].active);
    }

    #[test]
    fn missing_title_is_rejected() {
        let mut fx = StoreFixture::new();
        let err = run::<Article, _>(&mut fx.store, fields(json!({ "content": "x" })), true)
            .unwrap_err();
        assert!(matches!(err, DigestError::Validation(_)));
        assert_eq!(fx.writes(), 0);
    }

    #[test]
    fn explicit_priority_is_rejected() {
        let mut fx = StoreFixture::new();
        let err = run::<Article, _>(
            &mut fx.store,
            fields(json!({ "title": "x", "priority": 1 })),
            true,
        )
        .unwrap_err();
        assert!(matches!(err, DigestError::Validation(_)));
        assert_eq!(fx.writes(), 0);
    }
}
