//! Display rotation page editor: entry point.
//!
//! Serves the HTTP API the browser editor uses to create, edit, activate and
//! delete the `.html` pages shown on a rotating kiosk display.  Pages live in
//! one flat directory; their rotation status lives in a JSON sidecar.
//!
//! # Usage
//!
//! ```text
//! rotation-editor [OPTIONS]
//!
//! Options:
//!   --settings <FILE>               Optional TOML settings file
//!   --pages-dir <DIR>               Page directory [default: ../pages]
//!   --config-file <FILE>            JSON sidecar [default: ../config/pages-config.json]
//!   --bind <ADDR>                   Listen address [default: 0.0.0.0:8081]
//!   --missing-entry-policy <POLICY> active | inactive [default: active]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                        | Flag                     |
//! |---------------------------------|--------------------------|
//! | `ROTATION_SETTINGS`             | `--settings`             |
//! | `ROTATION_PAGES_DIR`            | `--pages-dir`            |
//! | `ROTATION_CONFIG_FILE`          | `--config-file`          |
//! | `ROTATION_BIND`                 | `--bind`                 |
//! | `ROTATION_MISSING_ENTRY_POLICY` | `--missing-entry-policy` |
//!
//! Flags and variables override the settings file, which overrides the
//! built-in defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rotation_core::MissingEntryPolicy;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rotation_editor::application::PageLifecycle;
use rotation_editor::domain::EditorSettings;
use rotation_editor::infrastructure::storage::settings::load_settings;
use rotation_editor::infrastructure::{spawn_api_server, FsPageDirectory, JsonConfigStore};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Page editor for the display rotation.
#[derive(Debug, Parser)]
#[command(
    name = "rotation-editor",
    about = "Edits display pages and their rotation config",
    version
)]
struct Cli {
    /// TOML settings file.  A missing file is treated as empty.
    #[arg(long, env = "ROTATION_SETTINGS")]
    settings: Option<PathBuf>,

    /// Directory holding the `.html` pages.
    #[arg(long, env = "ROTATION_PAGES_DIR")]
    pages_dir: Option<PathBuf>,

    /// Path of the JSON rotation config.
    #[arg(long, env = "ROTATION_CONFIG_FILE")]
    config_file: Option<PathBuf>,

    /// Address the HTTP API listens on, e.g. `0.0.0.0:8081`.
    #[arg(long, env = "ROTATION_BIND")]
    bind: Option<String>,

    /// Status given to pages that have no config entry: `active` or `inactive`.
    #[arg(long, env = "ROTATION_MISSING_ENTRY_POLICY")]
    missing_entry_policy: Option<String>,
}

impl Cli {
    /// Loads the settings file (if any) and applies the CLI overrides on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file is unreadable or malformed, or if
    /// `--bind` or `--missing-entry-policy` does not parse.
    fn into_settings(self) -> anyhow::Result<EditorSettings> {
        let base = load_settings(self.settings.as_deref()).with_context(|| {
            format!(
                "failed to load settings from {}",
                self.settings
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            )
        })?;
        self.apply(base)
    }

    fn apply(self, mut settings: EditorSettings) -> anyhow::Result<EditorSettings> {
        if let Some(dir) = self.pages_dir {
            settings.pages.dir = dir;
        }
        if let Some(file) = self.config_file {
            settings.pages.config_file = file;
        }
        if let Some(bind) = self.bind {
            settings.server.bind_addr = bind
                .parse::<SocketAddr>()
                .with_context(|| format!("invalid bind address: '{bind}'"))?;
        }
        if let Some(policy) = self.missing_entry_policy {
            settings.pages.missing_entry_policy = policy
                .parse::<MissingEntryPolicy>()
                .context("invalid --missing-entry-policy")?;
        }
        Ok(settings)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Cli::parse().into_settings()?;

    tokio::fs::create_dir_all(&settings.pages.dir)
        .await
        .with_context(|| {
            format!(
                "failed to create page directory {}",
                settings.pages.dir.display()
            )
        })?;

    info!(
        pages = %settings.pages.dir.display(),
        config = %settings.pages.config_file.display(),
        rubbish = %settings.rubbish_dir().display(),
        policy = %settings.pages.missing_entry_policy,
        "rotation editor starting"
    );

    let lifecycle = Arc::new(PageLifecycle::new(
        Arc::new(JsonConfigStore::new(&settings.pages.config_file)),
        Arc::new(FsPageDirectory::new(&settings.pages.dir)),
        settings.pages.missing_entry_policy,
    ));

    let server = spawn_api_server(lifecycle, settings.server.bind_addr)?;
    info!(address = %server.addr(), "editor api ready");

    shutdown_signal().await;
    info!("shutdown requested");
    server.shutdown().await?;

    info!("rotation editor stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        tokio::select! {
            _ = ctrl_c() => {},
            _ = terminate() => {},
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c().await;
    }
}

async fn ctrl_c() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(?err, "failed to install Ctrl+C handler");
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            term.recv().await;
        }
        Err(err) => warn!(?err, "failed to install SIGTERM handler"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
