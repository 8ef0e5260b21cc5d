use super::helpers::{fetch_entity, fmt_entity, timestamp};
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Fields, Orderable, ACTIVE_FIELD, UPDATED_AT_FIELD};
use crate::store::DataStore;
use chrono::Utc;
use serde_json::Value;
use tracing::info;

/// Show (`active = true`) or hide an entity on public pages. Its position in
/// the admin list does not change.
pub fn run<E: Orderable, S: DataStore>(
    store: &mut S,
    id: &str,
    active: bool,
) -> Result<CmdResult<E>> {
    let current: E = fetch_entity(store, id)?;
    let label = fmt_entity(&current);

    if current.is_active() == active {
        let mut result = CmdResult::default().with_affected(vec![current]);
        result.add_message(CmdMessage::info(format!(
            "{} is already {}",
            label,
            state_name(active)
        )));
        return Ok(result);
    }

    let mut fields = Fields::new();
    fields.insert(ACTIVE_FIELD.to_string(), Value::Bool(active));
    fields.insert(UPDATED_AT_FIELD.to_string(), timestamp(Utc::now())?);
    store.update(E::KIND, id, fields)?;
    info!(kind = %E::KIND, %id, active, "toggled visibility");

    let entity: E = fetch_entity(store, id)?;
    let mut result = CmdResult::default().with_affected(vec![entity]).changed();
    result.add_message(CmdMessage::success(format!(
        "{} is now {}",
        label,
        state_name(active)
    )));
    Ok(result)
}

fn state_name(active: bool) -> &'static str {
    if active {
        "active"
    } else {
        "inactive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::list;
    use crate::model::{Article, EntityKind};
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn deactivate_hides_from_public_list() {
        let mut fx = StoreFixture::new().with_ordered(EntityKind::Article, &["A", "B", "C"]);
        let id = list::run::<Article, _>(&mut fx.store).unwrap()[1].id.clone();

        let result = run::<Article, _>(&mut fx.store, &id, false).unwrap();
        assert!(result.changed);
        assert!(!result.affected[0].active);

        let public: Vec<String> = list::public::<Article, _>(&mut fx.store)
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(public, vec!["A", "C"]);

        let admin = list::run::<Article, _>(&mut fx.store).unwrap();
        assert_eq!(admin[1].id, id);
    }

    #[test]
    fn reactivating_active_entity_is_noop() {
        let mut fx = StoreFixture::new().with_ordered(EntityKind::Article, &["A"]);
        let id = list::run::<Article, _>(&mut fx.store).unwrap()[0].id.clone();
        let before = fx.writes();

        let result = run::<Article, _>(&mut fx.store, &id, true).unwrap();

        assert!(!result.changed);
        assert_eq!(fx.writes(), before);
    }
}
