use casesheet::config::AppConfig;
use casesheet::ui::app::App;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|err| {
        warn!(error = %err, "invalid configuration, using defaults");
        AppConfig::default()
    });
    info!(mode = config.mode.code(), project = %config.project, "starting casesheet");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new().with_window(
                dioxus::desktop::WindowBuilder::new()
                    .with_title("CaseSheet")
                    .with_inner_size(dioxus::desktop::LogicalSize::new(1200.0, 800.0)),
            ),
        )
        .with_context(config)
        .launch(App);
}
