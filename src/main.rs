//! # QuadStick
//!
//! Read pilot control input from an R/C transmitter or joystick.
//!
//! Opens the joystick, waits for the startup throttle gesture, then polls
//! demands and mode switches until Ctrl+C or the device goes away.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use quadstick::config::{Config, LoggingConfig};
use quadstick::controller::axis_map::{Platform, TransmitterModel};
use quadstick::controller::joystick::EvdevJoystick;
use quadstick::session;
use quadstick::stick::QuadStick;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(
    name = "quadstick",
    version,
    about = "Read flight controls from an R/C transmitter or joystick"
)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Transmitter model: dx8 or gamepad
    #[arg(short, long)]
    model: Option<TransmitterModel>,

    /// Platform axis mapping: Linux, Windows or Darwin
    #[arg(short, long)]
    platform: Option<String>,

    /// Input event device, e.g. /dev/input/event5
    #[arg(short, long)]
    device: Option<PathBuf>,
}

/// Applies command line overrides on top of the file configuration.
fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(model) = args.model {
        config.controller.model = model.to_string();
    }
    if let Some(platform) = &args.platform {
        config.platform.name = platform.clone();
    }
    if let Some(device) = &args.device {
        config.controller.device_path = device.to_string_lossy().to_string();
    }
}

/// Installs the tracing subscriber.
///
/// `RUST_LOG` overrides the configured level. The returned guard must live
/// until exit so the file writer is flushed.
fn init_logging(
    logging: &LoggingConfig,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .context("invalid log filter")?;

    let (file_layer, guard) = if logging.file.is_empty() {
        (None, None)
    } else {
        let path = Path::new(&logging.file);
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        let name = path.file_name().context("logging.file has no file name")?;
        let appender = tracing_appender::rolling::never(dir, name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::read(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => Config::default(),
    };
    apply_overrides(&mut config, &args);
    config.validate()?;

    let _log_guard = init_logging(&config.logging)?;

    info!("QuadStick v{} starting...", env!("CARGO_PKG_VERSION"));

    let model = config.model()?;
    let platform: Platform = config.platform()?;

    let joystick = if config.controller.device_path.is_empty() {
        EvdevJoystick::open()?
    } else {
        EvdevJoystick::open_path(&config.controller.device_path)?
    };
    info!(
        "Joystick '{}' at {} ({} axes, {} buttons)",
        joystick.name().unwrap_or("unnamed"),
        joystick.device_path(),
        joystick.axis_count(),
        joystick.button_count()
    );

    let mut stick = QuadStick::new(joystick, model, platform, &config.session_settings());
    info!("{} on {}, press Ctrl+C to exit", stick.name(), stick.platform());

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    match session::run(&mut stick, config.poll.rate_hz, shutdown).await {
        Ok(summary) => {
            info!("Total polls: {}", summary.polls);
            Ok(())
        }
        Err(e) => {
            // Leave the failure on screen until the operator quits explicitly
            error!("Polling failed: {}", e);
            eprintln!("ERROR: {}\nPress Ctrl+C to quit.", e);
            let _ = tokio::signal::ctrl_c().await;
            Err(e.into())
        }
    }
}
