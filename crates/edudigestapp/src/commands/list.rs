//! Loading a list in canonical order.
//!
//! Every load reconciles: entities without a priority (legacy documents,
//! writes from older clients) are appended after the prioritized ones and the
//! corrected list is persisted through [`reorder::run`] before it is returned.
//! Entities that already have a priority are never moved relative to each
//! other. When nothing is missing the load performs no write at all.

use super::helpers::fetch_entities;
use super::reorder;
use crate::error::Result;
use crate::model::Orderable;
use crate::order;
use crate::store::DataStore;
use tracing::info;

/// The admin list: every entity of the kind, inactive ones included.
pub fn run<E: Orderable, S: DataStore>(store: &mut S) -> Result<Vec<E>> {
    let raw = fetch_entities::<E, S>(store)?;
    let (list, _) = reconcile(store, raw)?;
    Ok(list)
}

/// The public-facing list: active entities only, in display order.
pub fn public<E: Orderable, S: DataStore>(store: &mut S) -> Result<Vec<E>> {
    Ok(run::<E, S>(store)?
        .into_iter()
        .filter(|e| e.is_active())
        .collect())
}

/// Normalize a raw fetch. Returns the sorted list and whether the store had
/// to be corrected.
pub fn reconcile<E: Orderable, S: DataStore>(store: &mut S, raw: Vec<E>) -> Result<(Vec<E>, bool)> {
    let mut list = raw;
    let filled = order::fill_missing_priorities(&mut list);
    order::sort_by_priority(&mut list);

    if filled == 0 {
        return Ok((list, false));
    }

    info!(kind = %E::KIND, filled, total = list.len(), "assigning missing priorities");
    let list = reorder::run(store, &list)?;
    Ok((list, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DigestError;
    use crate::model::{Article, EntityKind, NewsUpdate, ResourceTab, SidebarTab};
    use crate::store::memory::fixtures::StoreFixture;

    fn titles<E: Orderable>(list: &[E]) -> Vec<&str> {
        list.iter().map(|e| e.title()).collect()
    }

    fn priorities<E: Orderable>(list: &[E]) -> Vec<Option<u32>> {
        list.iter().map(|e| e.priority()).collect()
    }

    #[test]
    fn contiguous_list_loads_without_writes() {
        let mut fx = StoreFixture::new().with_ordered(EntityKind::SidebarTab, &["A", "B", "C"]);
        let before = fx.writes();

        let list = run::<SidebarTab, _>(&mut fx.store).unwrap();

        assert_eq!(titles(&list), vec!["A", "B", "C"]);
        assert_eq!(priorities(&list), vec![Some(0), Some(1), Some(2)]);
        assert_eq!(fx.writes(), before);
    }

    #[test]
    fn reconcile_is_idempotent_on_clean_list() {
        let mut fx = StoreFixture::new().with_ordered(EntityKind::ResourceTab, &["A", "B"]);
        let first = run::<ResourceTab, _>(&mut fx.store).unwrap();
        let before = fx.writes();

        let (second, mutated) = reconcile(&mut fx.store, first.clone()).unwrap();

        assert!(!mutated);
        assert_eq!(second, first);
        assert_eq!(fx.writes(), before);
    }

    #[test]
    fn gap_is_filled_after_known_priorities_with_one_write() {
        let mut fx = StoreFixture::new()
            .with_priority(EntityKind::ResourceTab, "Zero", 0)
            .with_unordered(EntityKind::ResourceTab, "Missing")
            .with_priority(EntityKind::ResourceTab, "One", 1);
        let before = fx.writes();

        let list = run::<ResourceTab, _>(&mut fx.store).unwrap();

        assert_eq!(titles(&list), vec!["Zero", "One", "Missing"]);
        assert_eq!(priorities(&list), vec![Some(0), Some(1), Some(2)]);
        assert_eq!(fx.writes(), before + 1);

        // The store converged: loading again writes nothing
        let again = run::<ResourceTab, _>(&mut fx.store).unwrap();
        assert_eq!(titles(&again), vec!["Zero", "One", "Missing"]);
        assert_eq!(fx.writes(), before + 1);
    }

    #[test]
    fn reconcile_never_reorders_prioritized_entities() {
        let mut fx = StoreFixture::new()
            .with_priority(EntityKind::NewsUpdate, "Second", 5)
            .with_unordered(EntityKind::NewsUpdate, "Legacy")
            .with_priority(EntityKind::NewsUpdate, "First", 2);

        let list = run::<NewsUpdate, _>(&mut fx.store).unwrap();

        assert_eq!(titles(&list), vec!["First", "Second", "Legacy"]);
        // Persisted contiguously with the kind's base
        assert_eq!(priorities(&list), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn articles_with_equal_priority_show_newest_first() {
        let mut fx = StoreFixture::new();
        for (title, created) in [
            ("Older", "2024-01-01T00:00:00Z"),
            ("Newer", "2024-06-01T00:00:00Z"),
        ] {
            let mut fields = crate::model::Fields::new();
            fields.insert("title".into(), serde_json::json!(title));
            fields.insert("priority".into(), serde_json::json!(1));
            fields.insert("created_at".into(), serde_json::json!(created));
            crate::store::DataStore::create(&mut fx.store, EntityKind::Article, fields).unwrap();
        }

        let list = run::<Article, _>(&mut fx.store).unwrap();
        assert_eq!(titles(&list), vec!["Newer", "Older"]);
    }

    #[test]
    fn public_list_hides_inactive() {
        let mut fx = StoreFixture::new()
            .with_ordered(EntityKind::SidebarTab, &["A", "B"])
            .with_inactive(EntityKind::SidebarTab, "Hidden", 2);

        let admin = run::<SidebarTab, _>(&mut fx.store).unwrap();
        let public_list = public::<SidebarTab, _>(&mut fx.store).unwrap();

        assert_eq!(titles(&admin), vec!["A", "B", "Hidden"]);
        assert_eq!(titles(&public_list), vec!["A", "B"]);
    }

    #[test]
    fn empty_collection_loads_empty() {
        let mut fx = StoreFixture::new();
        assert!(run::<Article, _>(&mut fx.store).unwrap().is_empty());
        assert_eq!(fx.writes(), 0);
    }

    #[test]
    fn failed_repair_surfaces_error() {
        let mut fx = StoreFixture::new().with_unordered(EntityKind::ResourceTab, "Legacy");
        fx.store.backend().set_simulate_write_error(true);

        let result = run::<ResourceTab, _>(&mut fx.store);
        assert!(matches!(result, Err(DigestError::Store(_))));
    }
}
