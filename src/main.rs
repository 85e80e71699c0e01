use anyhow::Context;
use clap::{Parser, ValueEnum};
use home_energy_dashboard::dashboard::report;
use home_energy_dashboard::config::SourceConfig;
use home_energy_dashboard::{Config, Dashboard, DeviceSource, JsonFileSource, MockDeviceSource};
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Home Energy Dashboard - Prints per-device readings and headline metrics
#[derive(Parser)]
#[command(name = "home-energy-dashboard")]
#[command(version)]
#[command(about = "Home Energy Dashboard - Prints per-device readings and headline metrics", long_about = None)]
struct Cli {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<String>,

    /// Seed for reproducible mock readings (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Toggle a device by id or name before printing (repeatable)
    #[arg(short, long = "toggle", value_name = "ID_OR_NAME")]
    toggles: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

/// A file source when `devices_file` is set, the mock catalog otherwise.
///
/// `cli_seed` overrides the configured seed and has no effect on a file source.
fn build_source(
    source: &SourceConfig,
    cli_seed: Option<u64>,
) -> anyhow::Result<Box<dyn DeviceSource>> {
    if let Some(path) = &source.devices_file {
        if let Some(seed) = cli_seed {
            warn!(
                "--seed {} ignored, devices are read from {}",
                seed,
                path.display()
            );
        }
        info!("Reading devices from {}", path.display());
        return Ok(Box::new(JsonFileSource::new(path)));
    }

    let seed = cli_seed.or(source.seed);
    let mock = MockDeviceSource::new(source.appliances.clone(), seed)?;
    info!(
        "Generating mock readings for {} appliance(s), seed: {:?}",
        mock.profiles().len(),
        seed
    );
    Ok(Box::new(mock))
}

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration first (to get log level)
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // Initialize tracing with log level from config; stdout is reserved for the report
    let app_log_level = config.default.log_level.as_str();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("home_energy_dashboard={}", app_log_level).parse()?),
        )
        .init();

    match &cli.config {
        Some(path) => info!("Configuration loaded from: {}", path),
        None => info!("No configuration file given, using defaults"),
    }
    info!("Log level: {}", config.default.log_level);
    debug!("Debug logging is enabled");
    let mut source = build_source(&config.source, cli.seed)?;

    let mut dashboard = Dashboard::from_source(source.as_mut(), config.tariff.clone())
        .context("Failed to read device set")?;
    let tariff = dashboard.tariff();
    info!(
        "  Tariff: {} {}/kWh over {} days",
        tariff.price_per_kwh, tariff.currency, tariff.days_per_month
    );

    for wanted in &cli.toggles {
        let Some(device_id) = dashboard.find(wanted).map(|d| d.device_id.clone()) else {
            warn!("No device matches '{}', toggle skipped", wanted);
            continue;
        };
        dashboard.toggle(&device_id);
    }

    let snapshot = dashboard.snapshot();
    let output = match cli.format {
        Format::Text => report::render_text(&snapshot)?,
        Format::Json => report::render_json(&snapshot)?,
    };
    print!("{}", output);

    Ok(())
}
