mod app;
mod config;
mod domain;
mod infra;
mod logging;
mod platform;
mod ui;
mod usecase;


use tracing::{error, info};

use crate::config::{default_webview_data_dir, AppConfig};

fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            logging::init_logging(&AppConfig::default());
            let message = format!("{err:#}");
            error!(error = %message, "failed to load config");
            eprintln!("campaign-dashboard: {message}");
            std::process::exit(2);
        }
    };
    logging::init_logging(&config);

    let mut desktop = dioxus::desktop::Config::new().with_window(
        dioxus::desktop::WindowBuilder::new().with_title("ADmyBRAND Analytics"),
    );
    match default_webview_data_dir() {
        Ok(webview_data_dir) => desktop = desktop.with_data_directory(webview_data_dir),
        Err(err) => {
            let message = format!("{err:#}");
            error!(error = %message, "webview data directory unavailable");
        }
    }

    info!(
        page_size = config.page_size,
        refresh_interval_secs = config.refresh_interval_secs,
        campaigns = config.campaign_count,
        "starting dashboard"
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop)
        .with_context(config)
        .launch(app::App);
}
