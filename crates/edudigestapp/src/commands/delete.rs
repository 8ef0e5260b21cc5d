use super::helpers::{fetch_entity, fmt_entity};
use super::{list, reorder, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Orderable;
use crate::store::DataStore;
use tracing::{info, warn};

/// Delete an entity, then renumber the remaining list so priorities stay
/// contiguous.
///
/// The delete and the renumbering are separate store writes. Once the
/// delete has landed the command succeeds: a failure while re-fetching or
/// renumbering the rest only adds a warning, and the gap is closed by any
/// later reorder.
pub fn run<E: Orderable, S: DataStore>(store: &mut S, id: &str) -> Result<CmdResult<E>> {
    let doomed: E = fetch_entity(store, id)?;
    store.delete(E::KIND, id)?;
    info!(kind = %E::KIND, %id, "deleted entity");

    let (listed, renumbered) = match renumber_remaining::<E, S>(store) {
        Ok(list) => (list, true),
        Err(e) => {
            warn!(kind = %E::KIND, error = %e, "renumbering after delete failed");
            (Vec::new(), false)
        }
    };

    let mut result = CmdResult::default()
        .with_affected(vec![doomed.clone()])
        .with_listed(listed)
        .changed();
    result.add_message(CmdMessage::success(format!(
        "Deleted {} {}",
        E::KIND,
        fmt_entity(&doomed)
    )));
    if !renumbered {
        result.add_message(CmdMessage::warning(format!(
            "Could not renumber the remaining {}s; the next reorder will close the gap",
            E::KIND
        )));
    }
    Ok(result)
}

fn renumber_remaining<E: Orderable, S: DataStore>(store: &mut S) -> Result<Vec<E>> {
    let remaining = list::run::<E, S>(store)?;
    reorder::run(store, &remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DigestError;
    use crate::model::{EntityKind, NewsUpdate, ResourceTab, SidebarTab};
    use crate::order::is_contiguous;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn delete_renumbers_remaining() {
        let mut fx = StoreFixture::new().with_ordered(EntityKind::NewsUpdate, &["A", "B", "C", "D"]);
        let id = list::run::<NewsUpdate, _>(&mut fx.store).unwrap()[1].id.clone();

        let result = run::<NewsUpdate, _>(&mut fx.store, &id).unwrap();

        assert_eq!(result.affected[0].title, "B");
        let titles: Vec<&str> = result.listed.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C", "D"]);
        assert!(is_contiguous(&result.listed));

        let stored = list::run::<NewsUpdate, _>(&mut fx.store).unwrap();
        let priorities: Vec<Option<u32>> = stored.iter().map(|n| n.priority).collect();
        assert_eq!(priorities, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn deleting_last_entity_leaves_empty_list() {
        let mut fx = StoreFixture::new().with_ordered(EntityKind::ResourceTab, &["Only"]);
        let id = list::run::<ResourceTab, _>(&mut fx.store).unwrap()[0].id.clone();
        let before = fx.writes();

        let result = run::<ResourceTab, _>(&mut fx.store, &id).unwrap();

        assert!(result.listed.is_empty());
        // The delete itself; renumbering an empty list writes nothing
        assert_eq!(fx.writes(), before + 1);
    }

    #[test]
    fn failed_renumbering_still_reports_delete() {
        let mut fx = StoreFixture::new().with_ordered(EntityKind::NewsUpdate, &["A", "B", "C"]);
        let id = list::run::<NewsUpdate, _>(&mut fx.store).unwrap()[0].id.clone();
        fx.store.backend().fail_writes_after(1);

        let result = run::<NewsUpdate, _>(&mut fx.store, &id).unwrap();

        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.messages[1].level, crate::commands::MessageLevel::Warning);
        assert!(result.listed.is_empty());
        assert_eq!(fx.store.fetch_all(EntityKind::NewsUpdate).unwrap().len(), 2);
    }

    #[test]
    fn failed_legacy_repair_after_delete_still_reports_delete() {
        let mut fx = StoreFixture::new()
            .with_ordered(EntityKind::SidebarTab, &["A", "B"])
            .with_unordered(EntityKind::SidebarTab, "Legacy");
        let stored = fx.store.fetch_all(EntityKind::SidebarTab).unwrap();
        let doomed = stored
            .iter()
            .find(|d| d.fields.get("label") == Some(&serde_json::json!("A")))
            .unwrap()
            .id
            .clone();
        // The delete lands; the repair write for "Legacy" fails
        fx.store.backend().fail_writes_after(1);

        let result = run::<SidebarTab, _>(&mut fx.store, &doomed).unwrap();

        assert!(result.changed);
        assert_eq!(result.affected[0].label, "A");
        assert_eq!(result.messages[1].level, crate::commands::MessageLevel::Warning);
        assert!(matches!(
            fx.store.get(EntityKind::SidebarTab, &doomed),
            Err(DigestError::NotFound { .. })
        ));
    }

    #[test]
    fn deleting_missing_entity_is_not_found() {
        let mut fx = StoreFixture::new();
        assert!(matches!(
            run::<ResourceTab, _>(&mut fx.store, "ghost"),
            Err(DigestError::NotFound { .. })
        ));
    }
}
