use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::anyhow;
use clap::Parser;
use client_core::MockAuthenticator;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::LoginFormApp;

#[derive(Parser, Debug)]
#[command(about = "Secure Login desktop form with mocked authentication")]
struct Args {
    /// TOML settings file; missing is fine.
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Simulated authentication latency in milliseconds.
    #[arg(long)]
    latency_ms: Option<u64>,
    /// tracing filter directive, e.g. `desktop_gui=debug`. `RUST_LOG` wins when set.
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut notes = Vec::new();
    let mut settings = config::load_settings(&args.config, &mut notes)?;
    if let Some(latency_ms) = args.latency_ms {
        settings.auth_latency_ms = latency_ms;
    }
    if let Some(filter) = args.log_filter {
        settings.log_filter = filter;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    for note in notes {
        tracing::warn!("{note}");
    }
    tracing::info!(
        auth_latency_ms = settings.auth_latency_ms,
        "starting login form"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let authenticator = Arc::new(MockAuthenticator::new(settings.auth_latency()));
    let worker = backend_bridge::runtime::launch(cmd_rx, ui_tx, authenticator);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Secure Login")
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([360.0, 520.0]),
        ..Default::default()
    };
    let result = eframe::run_native(
        "Secure Login",
        options,
        Box::new(move |_cc| Ok(Box::new(LoginFormApp::new(cmd_tx, ui_rx)))),
    );

    // The app is dropped by now, which cancelled anything pending and asked the
    // worker to stop.
    if worker.join().is_err() {
        tracing::error!("backend worker panicked");
    }
    result.map_err(|err| anyhow!("failed to run login window: {err}"))
}
