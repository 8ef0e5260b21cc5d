//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the `tracing` subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! Each invocation loads the list fresh, performs one action through the
//! API and prints the outcome. Errors carry through `anyhow` to `main`, which
//! prints them and exits with status 1.

use super::render;
use super::setup::{parse_cli, Cli, Commands, ConfigCommands, KindArg, ListAction};
use anyhow::{Context, Result};
use clap::CommandFactory;
use clapfig::{Clapfig, ConfigAction};
use edudigestapp::api::DigestApi;
use edudigestapp::config::DigestConfig;
use edudigestapp::error::DigestError;
use edudigestapp::init::{config_search_paths, initialize, load_config, APP_NAME, CONFIG_FILE};
use edudigestapp::model::{Article, Fields, NewsUpdate, Orderable, ResourceTab, SidebarTab};
use edudigestapp::store::fs::FileStore;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = parse_cli();
    init_logging(cli.verbose);

    // Completion scripts need no data directory
    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), APP_NAME, &mut std::io::stdout());
        return Ok(());
    }

    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let mut ctx = initialize(&cwd, cli.data.clone());

    if let Commands::Config { action } = &cli.command {
        return handle_config_command(action.as_ref(), &ctx.data_dir);
    }

    let Some((kind, action)) = cli.command.kind_action() else {
        return Ok(());
    };
    debug!(?kind, ?action, data_dir = %ctx.data_dir.display(), "dispatching");

    let output = match kind {
        KindArg::Articles => run_action::<Article>(&mut ctx.api, action),
        KindArg::News => run_action::<NewsUpdate>(&mut ctx.api, action),
        KindArg::ResourceTabs => run_action::<ResourceTab>(&mut ctx.api, action),
        KindArg::SidebarTabs => run_action::<SidebarTab>(&mut ctx.api, action),
    }
    .map_err(|e| with_hint(e, kind))?;

    print!("{}", output);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Dispatch one list action and render its outcome.
fn run_action<E: Orderable>(
    api: &mut DigestApi<FileStore>,
    action: ListAction,
) -> edudigestapp::error::Result<String> {
    let output = match action {
        ListAction::List { public } => {
            let result = if public {
                api.list_public::<E>()?
            } else {
                api.list::<E>()?
            };
            render::render_list(&result.listed)
        }
        ListAction::Show { position } => {
            let result = api.view::<E>(position)?;
            result
                .affected
                .first()
                .map(render::render_entity)
                .unwrap_or_default()
        }
        ListAction::Create { title, set } => {
            let mut fields = to_fields(set);
            fields.insert(E::KIND.title_field().to_string(), title.join(" ").into());
            render::render_result(&api.create::<E>(fields)?)
        }
        ListAction::Edit { position, set } => {
            render::render_result(&api.update::<E>(position, to_fields(set))?)
        }
        ListAction::Activate { position } => {
            render::render_result(&api.set_active::<E>(position, true)?)
        }
        ListAction::Deactivate { position } => {
            render::render_result(&api.set_active::<E>(position, false)?)
        }
        ListAction::Delete { position } => render::render_result(&api.delete::<E>(position)?),
        ListAction::Up { position } => render::render_result(&api.move_up::<E>(position)?),
        ListAction::Down { position } => render::render_result(&api.move_down::<E>(position)?),
        ListAction::Move { from, to } => render::render_result(&api.move_to::<E>(from, to)?),
        ListAction::Reorder { positions } => {
            render::render_result(&api.reorder::<E>(&positions)?)
        }
    };
    Ok(output)
}

fn to_fields(pairs: Vec<(String, serde_json::Value)>) -> Fields {
    pairs.into_iter().collect()
}

/// Point the user at `list` when their view of the list is out of date.
fn with_hint(err: DigestError, kind: KindArg) -> anyhow::Error {
    if err.requires_refresh() {
        let name = match kind {
            KindArg::Articles => "articles",
            KindArg::News => "news",
            KindArg::ResourceTabs => "resource-tabs",
            KindArg::SidebarTabs => "sidebar-tabs",
        };
        anyhow::Error::new(err).context(format!(
            "the list changed or the store is busy; run `edudigest {} list` and try again",
            name
        ))
    } else {
        anyhow::Error::new(err)
    }
}

/// Handle `edudigest config` using clapfig directly.
fn handle_config_command(action: Option<&ConfigCommands>, data_dir: &Path) -> Result<()> {
    match action {
        None => {
            let config = load_config(data_dir);
            let table = toml::Value::try_from(&config).context("cannot serialize config")?;
            if let toml::Value::Table(t) = table {
                for (k, v) in &t {
                    println!("{} = {}", k, format_toml_value(v));
                }
            }
            println!("# data directory: {}", data_dir.display());
            Ok(())
        }
        Some(ConfigCommands::Get { key }) => {
            let action = ConfigAction::Get { key: key.clone(), scope: None };
            let result = Clapfig::builder::<DigestConfig>()
                .app_name(APP_NAME)
                .file_name(CONFIG_FILE)
                .search_paths(config_search_paths(data_dir))
                .strict(false)
                .handle(&action)
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            println!("{result}");
            Ok(())
        }
    }
}

fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}
