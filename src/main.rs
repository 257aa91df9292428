use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use tourist_informatics::app::DashboardApp;
use tourist_informatics::cli::Cli;
use tourist_informatics::config::AppConfig;
use tourist_informatics::state::AppState;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    if let Some(output) = &cli.export {
        return tourist_informatics::headless::run(&cli, output);
    }

    let mut state = AppState::default().with_export_file_name(config.export.file_name.clone());
    if let Some(path) = &cli.file {
        if state.load_path(path).is_ok() {
            if let Some(table) = &state.table {
                let selection = cli.selection(table);
                state.set_country(selection.country);
                state.set_destination(selection.destination);
            }
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tourist Informatics",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
