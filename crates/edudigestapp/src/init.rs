//! # Data Directory Resolution
//!
//! All four collections of one EduDigest site live in a single data
//! directory, one JSON file per collection. [`initialize`] decides which
//! directory that is, loads the configuration layered over it and builds the
//! API on a [`FileStore`] rooted there.
//!
//! ## Resolution Order
//!
//! 1. `data_override` (the CLI's `--data DIR`), used as-is
//! 2. The `EDUDIGEST_DATA` environment variable, primarily for tests and
//!    scripted setups
//! 3. The OS data directory from `directories` (e.g.
//!    `~/.local/share/edudigest` on Linux)
//! 4. `<cwd>/.edudigest` when the OS reports no home directory
//!
//! ## Configuration Search
//!
//! `edudigest.toml` is looked up in the OS config directory first and then in
//! the data directory; the latter wins key by key. Environment variables
//! (`EDUDIGEST__*`) override both.

use crate::api::DigestApi;
use crate::config::DigestConfig;
use crate::store::fs::FileStore;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const APP_NAME: &str = "edudigest";
pub const CONFIG_FILE: &str = "edudigest.toml";
pub const DATA_ENV: &str = "EDUDIGEST_DATA";
const LOCAL_DATA_DIR: &str = ".edudigest";

pub struct DigestContext {
    pub api: DigestApi<FileStore>,
    pub config: DigestConfig,
    pub data_dir: PathBuf,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "edudigest", APP_NAME)
}

/// Pick the data directory from an explicit override, an environment value,
/// or the platform default.
pub fn resolve_data_dir(cwd: &Path, data_override: Option<PathBuf>, env_value: Option<String>) -> PathBuf {
    if let Some(path) = data_override {
        return path;
    }
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return PathBuf::from(value);
    }
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| cwd.join(LOCAL_DATA_DIR))
}

/// Where `edudigest.toml` is searched, lowest precedence first.
pub fn config_search_paths(data_dir: &Path) -> Vec<SearchPath> {
    let mut paths = Vec::new();
    if let Some(dirs) = project_dirs() {
        paths.push(SearchPath::Path(dirs.config_dir().to_path_buf()));
    }
    paths.push(SearchPath::Path(data_dir.to_path_buf()));
    paths
}

pub fn load_config(data_dir: &Path) -> DigestConfig {
    Clapfig::builder()
        .app_name(APP_NAME)
        .file_name(CONFIG_FILE)
        .search_paths(config_search_paths(data_dir))
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default()
}

/// Build the context for one session.
///
/// # Examples
///
/// ```ignore
/// // Platform data directory (or EDUDIGEST_DATA)
/// let ctx = initialize(&cwd, None);
///
/// // Explicit data directory
/// let ctx = initialize(&cwd, Some(PathBuf::from("/srv/edudigest")));
/// ```
pub fn initialize(cwd: &Path, data_override: Option<PathBuf>) -> DigestContext {
    let env_value = std::env::var(DATA_ENV).ok();
    let data_dir = resolve_data_dir(cwd, data_override, env_value);
    let config = load_config(&data_dir);
    debug!(data_dir = %data_dir.display(), timeout_ms = config.store_timeout_ms, "initialized");

    let store = FileStore::new_fs(data_dir.clone()).with_timeout(config.store_timeout());
    let api = DigestApi::new(store, config.clone());

    DigestContext {
        api,
        config,
        data_dir,
    }
}
