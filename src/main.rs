// Fleet Telemetry Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/fleet-telemetry-simulator
// ```
//
// Or with a bounded, reproducible run written to per-stream files:
//
// ```console
// $ ./target/release/fleet-telemetry-simulator --seed 42 --max-ticks 100 --tick-delay-ms 0 --output-dir out --verbose
// ```

use anyhow::{Context, Result};
use clap::Parser;
use fleet_telemetry_simulator::publish::{DirectoryTransport, StdoutTransport, StreamTransport};
use fleet_telemetry_simulator::simulation::{
    LoggingConfig, LoggingGuard, ShutdownSignal, SimulationDriver, SimulationError,
    SimulationStatistics,
};
use fleet_telemetry_simulator::types::config::CliArgs;
use fleet_telemetry_simulator::types::SimulationConfig;
use std::process;
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let _logging_guard = match init_logging(&args) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {:#}", e);
            process::exit(1);
        }
    };

    info!("Starting Fleet Telemetry Simulator");

    let dry_run = args.dry_run;
    let config = match load_config(args) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    if dry_run {
        if let Err(e) = config.validate() {
            error!("Configuration validation failed: {}", e);
            eprintln!("Error: Configuration validation failed: {}", e);
            process::exit(1);
        }
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    if let Err(e) = run(config) {
        eprintln!("Simulation failed: {:#}", e);
        process::exit(1);
    }

    info!("Fleet Telemetry Simulator completed successfully");
}

fn init_logging(args: &CliArgs) -> Result<LoggingGuard> {
    let mut logging = LoggingConfig::new()
        .with_level(LoggingConfig::level_for_flags(args.verbose, args.debug));
    if args.debug {
        logging = logging.with_span_events();
    }
    if args.json_logs {
        logging = logging.with_json_format().without_ansi();
    }
    if let Some(dir) = &args.log_dir {
        logging = logging.with_file_logging(dir.clone());
    }
    logging.init().map_err(|e| anyhow::anyhow!(e))
}

fn load_config(args: CliArgs) -> Result<SimulationConfig> {
    let config = SimulationConfig::from_cli_args(args).context("Failed to load configuration")?;
    info!("Configuration loaded successfully");
    Ok(config)
}

/// Build the transport the configuration asks for and run until done or interrupted
///
/// The driver validates the configuration before anything is published.
fn run(config: SimulationConfig) -> Result<()> {
    let transport: Box<dyn StreamTransport> = match &config.output.directory {
        Some(dir) => Box::new(
            DirectoryTransport::new(dir)
                .with_context(|| format!("Failed to open output directory '{}'", dir))?,
        ),
        None => Box::new(StdoutTransport::new()),
    };

    let mut driver = SimulationDriver::new(config, transport)
        .map_err(SimulationError::logged)
        .context("Failed to initialize simulation")?;

    let shutdown = ShutdownSignal::new();
    let handler_signal = shutdown.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nReceived interrupt signal, stopping after the current tick...");
        handler_signal.trigger();
    })
    .context("Failed to install Ctrl-C handler")?;

    let result = driver.run(&shutdown).map_err(SimulationError::logged);

    print_final_statistics(driver.statistics());
    result.context("Tick failed")?;
    if shutdown.is_triggered() {
        info!("Simulation stopped by interrupt");
    }
    Ok(())
}

fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Fleet Telemetry Simulator");
    eprintln!("=========================");
    eprintln!("Correlated delivery and truck telemetry event generator");
    eprintln!();

    print_configuration_summary(config);
}

fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Locations: {}", config.fleet.locations.join(", "));
    eprintln!(
        "  Trip distance: {}-{} km, cargo weight: {}-{} t",
        config.fleet.min_trip_distance_km,
        config.fleet.max_trip_distance_km,
        config.fleet.min_cargo_weight_ton,
        config.fleet.max_cargo_weight_ton
    );
    eprintln!("  Base speed: {} km/h", config.fleet.base_average_speed_kmh);
    eprintln!("  Anomaly probability: {:.1}%", config.telemetry.anomaly_probability * 100.0);
    eprintln!("  Lookback: {} days", config.clock.lookback_days);
    eprintln!("  Tick delay: {} ms", config.clock.tick_delay_ms);
    match config.clock.max_ticks {
        Some(ticks) => eprintln!("  Max ticks: {}", ticks),
        None => eprintln!("  Max ticks: unbounded"),
    }
    if let Some(seed) = config.seed {
        eprintln!("  Random seed: {}", seed);
    }
    eprintln!(
        "  Streams: {} / {} ({} bytes per batch)",
        config.output.fleet_stream, config.output.truck_stream, config.output.max_batch_bytes
    );
    match &config.output.directory {
        Some(dir) => eprintln!("  Output: {}", dir),
        None => eprintln!("  Output: stdout"),
    }
    eprintln!();
}

fn print_final_statistics(statistics: &SimulationStatistics) {
    eprintln!();
    eprintln!("{}", statistics.summary());
    eprintln!();
    eprint!("{}", statistics.detailed_breakdown());
}
