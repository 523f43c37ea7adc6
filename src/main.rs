use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;

use venue_dash::app::VenueDashApp;
use venue_dash::config::{Cli, Command, MAX_SESSIONS};
use venue_dash::data::{load_file, Dataset};
use venue_dash::server::{self, SessionStore};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Any load failure stops start-up before a window or socket exists.
    let dataset = match load_file(&cli.data) {
        Ok(ds) => Arc::new(ds),
        Err(e) => {
            log::error!("Failed to load venue data: {e}");
            return Err(e).with_context(|| format!("loading {}", cli.data.display()));
        }
    };

    match cli.command() {
        Command::Gui => run_gui(dataset, cli.default_sector),
        Command::Serve { host, port } => {
            run_server(dataset, cli.default_sector, SocketAddr::new(host, port))
        }
    }
}

fn run_gui(dataset: Arc<Dataset>, default_sector: String) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Wedding Venue Price Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(VenueDashApp::new(dataset, &default_sector)))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}

fn run_server(dataset: Arc<Dataset>, default_sector: String, addr: SocketAddr) -> Result<()> {
    let store = Arc::new(SessionStore::new(dataset, default_sector, MAX_SESSIONS));
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    runtime
        .block_on(server::serve(addr, store))
        .with_context(|| format!("serving on {addr}"))
}
