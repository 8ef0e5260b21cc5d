use edudigestapp::api::DigestApi;
use edudigestapp::config::DigestConfig;
use edudigestapp::drag::DragState;
use edudigestapp::model::{Article, Fields, NewsUpdate, Orderable, ResourceTab, SidebarTab};
use edudigestapp::order::{is_contiguous, Direction};
use edudigestapp::store::fs::FileStore;
use edudigestapp::store::memory::InMemoryStore;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn fields(value: serde_json::Value) -> Fields {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

fn titles<E: Orderable>(list: &[E]) -> Vec<String> {
    list.iter().map(|e| e.title().to_string()).collect()
}

fn file_api(dir: &TempDir) -> DigestApi<FileStore> {
    DigestApi::new(
        FileStore::new_fs(dir.path().to_path_buf()),
        DigestConfig::default(),
    )
}

#[test]
fn test_every_interaction_keeps_priorities_contiguous() {
    let mut api = DigestApi::new(InMemoryStore::new(), DigestConfig::default());
    for title in ["Welcome", "Exams", "Holidays", "Sports day", "Library"] {
        api.create::<NewsUpdate>(fields(json!({ "title": title })))
            .unwrap();
    }

    api.move_up::<NewsUpdate>(3).unwrap();
    api.move_down::<NewsUpdate>(1).unwrap();
    api.move_to::<NewsUpdate>(5, 1).unwrap();
    api.reorder::<NewsUpdate>(&[5, 4, 3, 2, 1]).unwrap();
    api.delete::<NewsUpdate>(2).unwrap();

    let list = api.list::<NewsUpdate>().unwrap().listed;
    assert_eq!(list.len(), 4);
    assert!(is_contiguous(&list));
    assert_eq!(list[0].priority, Some(1));
}

#[test]
fn test_legacy_documents_are_repaired_on_disk() {
    let dir = TempDir::new().unwrap();
    // Written by an older client: no ordering field on two of the tabs
    fs::write(
        dir.path().join("resource_tabs.json"),
        r#"{
            "a": { "label": "Guides", "order": 0, "active": true },
            "b": { "label": "Videos", "active": true },
            "c": { "label": "Links", "order": 1, "active": true },
            "d": { "label": "Archive", "active": false }
        }"#,
    )
    .unwrap();

    let mut api = file_api(&dir);
    let list = api.list::<ResourceTab>().unwrap().listed;

    assert_eq!(titles(&list), vec!["Guides", "Links", "Videos", "Archive"]);
    assert!(is_contiguous(&list));

    // Persisted: a fresh session sees the same orders without repairing again
    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("resource_tabs.json")).unwrap())
            .unwrap();
    assert_eq!(raw["b"]["order"], json!(2));
    assert_eq!(raw["d"]["order"], json!(3));

    let public = file_api(&dir).list_public::<ResourceTab>().unwrap().listed;
    assert_eq!(titles(&public), vec!["Guides", "Links", "Videos"]);
}

#[test]
fn test_unknown_fields_survive_reorder() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("sidebar_tabs.json"),
        r#"{
            "x": { "label": "Home", "order": 0, "badge": "new" },
            "y": { "label": "About", "order": 1 }
        }"#,
    )
    .unwrap();

    let mut api = file_api(&dir);
    api.move_to::<SidebarTab>(1, 2).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("sidebar_tabs.json")).unwrap())
            .unwrap();
    assert_eq!(raw["x"]["badge"], json!("new"));
    assert_eq!(raw["x"]["order"], json!(1));
    assert_eq!(raw["y"]["order"], json!(0));
}

#[test]
fn test_articles_tie_break_newest_first_then_reorder_fixes_ties() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("articles.json"),
        r#"{
            "old": { "title": "Old", "priority": 1, "created_at": "2023-09-01T08:00:00Z" },
            "new": { "title": "New", "priority": 1, "created_at": "2024-02-01T08:00:00Z" },
            "mid": { "title": "Mid", "priority": 2, "created_at": "2023-12-01T08:00:00Z" }
        }"#,
    )
    .unwrap();

    let mut api = file_api(&dir);
    let list = api.list::<Article>().unwrap().listed;
    assert_eq!(titles(&list), vec!["New", "Old", "Mid"]);

    // Moving the last item down is a no-op and leaves the tie in place
    let unchanged = api.move_down::<Article>(3).unwrap();
    assert!(!unchanged.changed);

    // Any real reorder renumbers the whole list and removes the tie
    let mut cache = api.load::<Article>().unwrap();
    api.move_item(&mut cache, 1, Direction::Up).unwrap();

    let list = api.list::<Article>().unwrap().listed;
    assert_eq!(titles(&list), vec!["Old", "New", "Mid"]);
    assert!(is_contiguous(&list));
}

#[test]
fn test_cached_session_sees_concurrent_delete_as_stale() {
    let dir = TempDir::new().unwrap();
    let mut admin = file_api(&dir);
    for label in ["A", "B", "C"] {
        admin
            .create::<SidebarTab>(fields(json!({ "label": label })))
            .unwrap();
    }
    let mut cache = admin.load::<SidebarTab>().unwrap();

    // Another session removes B
    let mut other = file_api(&dir);
    other.delete::<SidebarTab>(2).unwrap();

    let mut state = DragState::new();
    state.start(0);
    let err = admin.drop_item(&mut cache, &mut state, 2).unwrap_err();

    assert!(err.requires_refresh());
    let shown: Vec<&str> = cache.items().iter().map(|t| t.label.as_str()).collect();
    assert_eq!(shown, vec!["A", "C"]);

    // After the re-fetch the same gesture goes through
    state.start(0);
    admin.drop_item(&mut cache, &mut state, 1).unwrap();
    let list = admin.list::<SidebarTab>().unwrap().listed;
    let labels: Vec<&str> = list.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["C", "A"]);
}
