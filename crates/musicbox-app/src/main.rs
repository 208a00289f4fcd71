mod app_state;
mod cli;

use musicbox_config::MusicboxConfig;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

const DEFAULT_LOG_DIRECTIVE: &str = "musicbox=info";

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let path = musicbox_platform::crash_report::write_crash_report(info);

        eprintln!("\n--- musicbox crashed ---");
        if let Some(p) = &path {
            eprintln!("Crash report written to: {}", p.display());
        }
        eprintln!("------------------------\n");

        default_hook(info);
    }));
}

/// Filter directive: `--log-level` wins, then `[logging] level`, scoped to
/// the musicbox crates.
fn log_directive(cli_level: Option<&str>, config: Option<&MusicboxConfig>) -> String {
    match (cli_level, config) {
        (Some(level), _) if level.contains('=') => level.to_string(),
        (Some(level), _) => format!("musicbox={level}"),
        (None, Some(config)) => format!("musicbox={}", config.logging.level.as_directive()),
        (None, None) => DEFAULT_LOG_DIRECTIVE.to_string(),
    }
}

fn init_logging(directive: &str) {
    let directive = directive
        .parse::<Directive>()
        .or_else(|_| DEFAULT_LOG_DIRECTIVE.parse::<Directive>());
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    install_panic_hook();

    let args = cli::parse();

    // Loaded before logging so `[logging] level` can apply; the outcome is
    // logged right after.
    let loaded = musicbox_config::load_config(args.config.as_deref());

    init_logging(&log_directive(
        args.log_level.as_deref(),
        loaded.as_ref().ok(),
    ));

    tracing::info!("musicbox v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        MusicboxConfig::default()
    });
    if let Some(url) = args.url {
        tracing::info!(url = %url, "Start page override");
        config.content.home_url = url;
    }
    tracing::debug!(
        schema = musicbox_config::CONFIG_SCHEMA_VERSION,
        config = %musicbox_config::config_to_json(&config),
        "Effective config"
    );

    if let Err(e) = musicbox_platform::paths::ensure_dirs() {
        tracing::warn!("Failed to create directories: {e}");
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = app_state::MusicboxApp::new(config);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
