//! Configuration structures for the fleet telemetry simulator
//!
//! This module contains the simulation configuration structure and validation logic
//! used to control the behavior and parameters of the simulation system.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::fleet::LocationSet;

/// Default regional location set (Tamil Nadu freight hubs)
pub const DEFAULT_LOCATIONS: [&str; 10] = [
    "Tirunelveli",
    "Chennai",
    "Coimbatore",
    "Madurai",
    "Tiruchirappalli",
    "Salem",
    "Thoothukudi",
    "Kanyakumari",
    "Nagercoil",
    "Vellore",
];

/// Longest trip the fleet may be configured for
pub const MAX_TRIP_DISTANCE_KM: u32 = 10_000;

/// Slowest base speed accepted, in km/h
pub const MIN_BASE_SPEED_KMH: f64 = 1.0;

/// Fastest base speed accepted, in km/h
pub const MAX_BASE_SPEED_KMH: f64 = 1_000.0;

/// Longest lookback window accepted, in days
pub const MAX_LOOKBACK_DAYS: u32 = 3_650;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fleet-telemetry-simulator",
    version = "0.1.0",
    about = "Fleet Telemetry Simulator - Generates correlated delivery and truck telemetry events",
    long_about = "Generates a perpetual stream of logistics events: scheduled deliveries and their resolutions on the fleet stream, and per-trip truck telemetry on the truck stream. Simulated time trails real time by a configurable lookback window.

EXAMPLES:
    # Run with default settings (events as JSON lines on stdout)
    fleet-telemetry-simulator

    # Use a configuration file
    fleet-telemetry-simulator --config config.json

    # Reproducible, bounded, unpaced run written to per-stream files
    fleet-telemetry-simulator --seed 42 --max-ticks 100 --tick-delay-ms 0 --output-dir out

    # Generate configuration template
    fleet-telemetry-simulator --print-config > my-config.json

    # Validate configuration without running
    fleet-telemetry-simulator --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(
        long,
        help = "Stop after this many ticks",
        long_help = "Number of ticks (deliveries) to simulate before exiting. Runs until interrupted when omitted."
    )]
    pub max_ticks: Option<u64>,

    /// Real-time pause between ticks in milliseconds
    #[arg(long, help = "Pause between ticks in milliseconds")]
    pub tick_delay_ms: Option<u64>,

    /// How far behind real time the simulated clock starts
    #[arg(long, help = "Days of lookback for the simulated clock start")]
    pub lookback_days: Option<u32>,

    /// Probability that a delivery's telemetry carries an anomaly (0.0-1.0)
    #[arg(
        long,
        help = "Anomaly probability per delivery (0.0-1.0)",
        long_help = "Probability that one telemetry sample of a delivery carries an injected anomaly. Range: 0.0-1.0. Default: 0.15"
    )]
    pub anomaly_probability: Option<f64>,

    /// Base average truck speed in km/h
    #[arg(long, help = "Base average truck speed in km/h")]
    pub base_speed: Option<f64>,

    /// Directory receiving one JSONL file per stream
    #[arg(
        long,
        help = "Write each stream to <dir>/<stream>.jsonl",
        long_help = "Directory receiving one JSON-lines file per stream. Events go to stdout when omitted."
    )]
    pub output_dir: Option<String>,

    /// Name of the delivery lifecycle stream
    #[arg(long, help = "Fleet stream name")]
    pub fleet_stream: Option<String>,

    /// Name of the telemetry stream
    #[arg(long, help = "Truck telemetry stream name")]
    pub truck_stream: Option<String>,

    /// Maximum serialized size of one batch
    #[arg(long, help = "Maximum batch size in bytes")]
    pub max_batch_bytes: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Directory for daily-rolling log files
    #[arg(long, help = "Also write logs to daily-rolling files in this directory")]
    pub log_dir: Option<String>,

    /// Emit logs as JSON
    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Delivery generation parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FleetConfig {
    /// Regional locations deliveries travel between
    pub locations: Vec<String>,
    /// Shortest trip in kilometers
    pub min_trip_distance_km: u32,
    /// Longest trip in kilometers
    pub max_trip_distance_km: u32,
    /// Lightest load in tons
    pub min_cargo_weight_ton: u32,
    /// Heaviest load in tons
    pub max_cargo_weight_ton: u32,
    /// Average truck speed with no traffic, in km/h
    pub base_average_speed_kmh: f64,
    /// Lowest truck fleet number
    pub min_truck_id: u32,
    /// Highest truck fleet number
    pub max_truck_id: u32,
    /// Lowest driver employee number
    pub min_driver_id: u32,
    /// Highest driver employee number
    pub max_driver_id: u32,
    /// Lowest customer account number
    pub min_customer_id: u32,
    /// Highest customer account number
    pub max_customer_id: u32,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            locations: DEFAULT_LOCATIONS.iter().map(|name| name.to_string()).collect(),
            min_trip_distance_km: 50,
            max_trip_distance_km: 400,
            min_cargo_weight_ton: 5,
            max_cargo_weight_ton: 20,
            base_average_speed_kmh: 60.0,
            min_truck_id: 1,
            max_truck_id: 50,
            min_driver_id: 200,
            max_driver_id: 300,
            min_customer_id: 100,
            max_customer_id: 150,
        }
    }
}

/// Telemetry, fuel model and anomaly parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Distance covered between two telemetry samples
    pub sample_interval_km: u32,
    /// Fuel efficiency of an empty truck in free traffic
    pub base_km_per_liter: f64,
    /// Efficiency lost per ton of cargo
    pub weight_penalty_per_ton: f64,
    /// Efficiency lost in high traffic (0 disables the penalty)
    pub high_traffic_penalty: f64,
    /// Efficiency floor
    pub min_km_per_liter: f64,
    /// Kilograms of CO2 emitted per liter of diesel
    pub co2_per_liter: f64,
    /// Standard deviation of sampled speed around the effective speed
    pub speed_stddev_kmh: f64,
    /// Engine temperature of an unloaded truck
    pub base_engine_temp_c: f64,
    /// Engine temperature added per ton of cargo
    pub engine_temp_per_ton_c: f64,
    /// Engine temperature added in high traffic
    pub high_traffic_temp_bonus_c: f64,
    /// Half-width of the uniform engine temperature noise
    pub engine_temp_noise_c: f64,
    /// Probability that a delivery carries one anomaly (0.0-1.0)
    pub anomaly_probability: f64,
    /// Smallest excess over effective speed for a speeding anomaly
    pub min_speeding_margin_kmh: f64,
    /// Largest excess over effective speed for a speeding anomaly
    pub max_speeding_margin_kmh: f64,
    /// Lower bound of the overheating band
    pub min_overheat_temp_c: f64,
    /// Upper bound of the overheating band
    pub max_overheat_temp_c: f64,
    /// Largest deviation of actual arrival from the last sample, in minutes
    pub max_delivery_slip_minutes: u32,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            sample_interval_km: 25,
            base_km_per_liter: 3.5,
            weight_penalty_per_ton: 0.05,
            high_traffic_penalty: 1.0,
            min_km_per_liter: 1.5,
            co2_per_liter: 2.68,
            speed_stddev_kmh: 10.0,
            base_engine_temp_c: 85.0,
            engine_temp_per_ton_c: 0.3,
            high_traffic_temp_bonus_c: 5.0,
            engine_temp_noise_c: 2.0,
            anomaly_probability: 0.15,
            min_speeding_margin_kmh: 20.0,
            max_speeding_margin_kmh: 40.0,
            min_overheat_temp_c: 105.0,
            max_overheat_temp_c: 115.0,
            max_delivery_slip_minutes: 30,
        }
    }
}

/// Simulated clock and pacing parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    /// How far behind real time the simulated clock starts (and rewinds to)
    pub lookback_days: u32,
    /// Shortest simulated gap between two deliveries
    pub min_advance_minutes: u32,
    /// Longest simulated gap between two deliveries
    pub max_advance_minutes: u32,
    /// Real-time pause between ticks
    pub tick_delay_ms: u64,
    /// Stop after this many ticks; run until interrupted when absent
    pub max_ticks: Option<u64>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            min_advance_minutes: 30,
            max_advance_minutes: 300,
            tick_delay_ms: 5_000,
            max_ticks: None,
        }
    }
}

/// Stream and transport parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Stream receiving FleetEvent and FleetUpdateEvent records
    pub fleet_stream: String,
    /// Stream receiving TruckTelemetry records
    pub truck_stream: String,
    /// Largest serialized batch handed to the transport
    pub max_batch_bytes: usize,
    /// Write `<dir>/<stream>.jsonl` files instead of stdout
    pub directory: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            fleet_stream: "fleet_data".to_string(),
            truck_stream: "truck_data".to_string(),
            max_batch_bytes: 1_048_576,
            directory: None,
        }
    }
}

/// Configuration for the fleet telemetry simulation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SimulationConfig {
    /// Delivery generation parameters
    pub fleet: FleetConfig,
    /// Telemetry generation parameters
    pub telemetry: TelemetryConfig,
    /// Simulated clock parameters
    pub clock: ClockConfig,
    /// Output parameters
    pub output: OutputConfig,
    /// Random seed for reproducible results
    pub seed: Option<u64>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigValidationError {
    /// Not enough locations to pick a distinct pickup and drop-off
    #[error("At least 2 locations are required, got {0}")]
    TooFewLocations(usize),

    /// A location name is blank
    #[error("Location names must not be empty")]
    EmptyLocationName,

    /// The same location appears twice
    #[error("Duplicate location: {0}")]
    DuplicateLocation(String),

    /// A min/max pair is inverted
    #[error("Invalid range for {field}: min ({min}) must be <= max ({max})")]
    InvalidRange {
        /// Name of the range
        field: String,
        /// Configured minimum
        min: f64,
        /// Configured maximum
        max: f64,
    },

    /// A value that must be strictly positive is not
    #[error("{field} must be greater than 0, got {value}")]
    NotPositive {
        /// Name of the field
        field: String,
        /// The offending value
        value: f64,
    },

    /// A value lies outside the bounds the simulated time arithmetic supports
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfBounds {
        /// Name of the field
        field: String,
        /// The offending value
        value: f64,
        /// Smallest accepted value
        min: f64,
        /// Largest accepted value
        max: f64,
    },

    /// A value that must be non-negative is not
    #[error("{field} must be a finite value >= 0, got {value}")]
    Negative {
        /// Name of the field
        field: String,
        /// The offending value
        value: f64,
    },

    /// Probability value is out of range
    #[error("Invalid probability for {field}: {value} (must be between 0.0 and 1.0)")]
    InvalidProbability {
        /// Name of the field with invalid probability
        field: String,
        /// The invalid probability value
        value: f64,
    },

    /// A stream name is blank
    #[error("Stream name for {0} must not be empty")]
    EmptyStreamName(String),

    /// A stream name would escape the output directory
    #[error("Stream name {0:?} must not contain path separators or be '.' or '..'")]
    InvalidStreamName(String),

    /// Both streams share one name
    #[error("Fleet and truck streams must differ, both are {0}")]
    DuplicateStreamName(String),
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(config_path) => Self::from_file(config_path)?,
            None => Self::default(),
        };

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.max_ticks {
            config.clock.max_ticks = Some(value);
        }
        if let Some(value) = args.tick_delay_ms {
            config.clock.tick_delay_ms = value;
        }
        if let Some(value) = args.lookback_days {
            config.clock.lookback_days = value;
        }
        if let Some(value) = args.anomaly_probability {
            config.telemetry.anomaly_probability = value;
        }
        if let Some(value) = args.base_speed {
            config.fleet.base_average_speed_kmh = value;
        }
        if let Some(value) = args.output_dir {
            config.output.directory = Some(value);
        }
        if let Some(value) = args.fleet_stream {
            config.output.fleet_stream = value;
        }
        if let Some(value) = args.truck_stream {
            config.output.truck_stream = value;
        }
        if let Some(value) = args.max_batch_bytes {
            config.output.max_batch_bytes = value;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.validate_fleet()?;
        self.validate_telemetry()?;
        self.validate_clock()?;
        self.validate_output()
    }

    /// Check the fleet section, location set included
    pub fn validate_fleet(&self) -> Result<(), ConfigValidationError> {
        LocationSet::check(&self.fleet.locations)?;
        self.validate_fleet_ranges()
    }

    /// Check the fleet section's numeric ranges and bounds
    ///
    /// Trip distance and base speed are bounded so the longest trip at the
    /// slowest traffic stays a representable duration, and the shortest trip
    /// at the fastest traffic still spans more microseconds than it has samples.
    pub(crate) fn validate_fleet_ranges(&self) -> Result<(), ConfigValidationError> {
        let fleet = &self.fleet;

        validate_positive("min_trip_distance_km", fleet.min_trip_distance_km as f64)?;
        validate_range(
            "trip_distance_km",
            fleet.min_trip_distance_km as f64,
            fleet.max_trip_distance_km as f64,
        )?;
        validate_bounds(
            "max_trip_distance_km",
            fleet.max_trip_distance_km as f64,
            1.0,
            MAX_TRIP_DISTANCE_KM as f64,
        )?;
        validate_range(
            "cargo_weight_ton",
            fleet.min_cargo_weight_ton as f64,
            fleet.max_cargo_weight_ton as f64,
        )?;
        validate_bounds(
            "base_average_speed_kmh",
            fleet.base_average_speed_kmh,
            MIN_BASE_SPEED_KMH,
            MAX_BASE_SPEED_KMH,
        )?;
        validate_range("truck_id", fleet.min_truck_id as f64, fleet.max_truck_id as f64)?;
        validate_range("driver_id", fleet.min_driver_id as f64, fleet.max_driver_id as f64)?;
        validate_range("customer_id", fleet.min_customer_id as f64, fleet.max_customer_id as f64)
    }

    /// Check the telemetry section
    pub fn validate_telemetry(&self) -> Result<(), ConfigValidationError> {
        let telemetry = &self.telemetry;

        validate_positive("sample_interval_km", telemetry.sample_interval_km as f64)?;
        validate_positive("base_km_per_liter", telemetry.base_km_per_liter)?;
        validate_positive("min_km_per_liter", telemetry.min_km_per_liter)?;
        validate_positive("co2_per_liter", telemetry.co2_per_liter)?;
        validate_non_negative("weight_penalty_per_ton", telemetry.weight_penalty_per_ton)?;
        validate_non_negative("high_traffic_penalty", telemetry.high_traffic_penalty)?;
        validate_non_negative("speed_stddev_kmh", telemetry.speed_stddev_kmh)?;
        validate_non_negative("engine_temp_noise_c", telemetry.engine_temp_noise_c)?;
        validate_probability("anomaly_probability", telemetry.anomaly_probability)?;
        validate_range(
            "speeding_margin_kmh",
            telemetry.min_speeding_margin_kmh,
            telemetry.max_speeding_margin_kmh,
        )?;
        validate_range(
            "overheat_temp_c",
            telemetry.min_overheat_temp_c,
            telemetry.max_overheat_temp_c,
        )
    }

    /// Check the clock section
    pub fn validate_clock(&self) -> Result<(), ConfigValidationError> {
        let clock = &self.clock;

        validate_bounds("lookback_days", clock.lookback_days as f64, 1.0, MAX_LOOKBACK_DAYS as f64)?;
        validate_positive("min_advance_minutes", clock.min_advance_minutes as f64)?;
        validate_range(
            "advance_minutes",
            clock.min_advance_minutes as f64,
            clock.max_advance_minutes as f64,
        )?;
        if let Some(max_ticks) = clock.max_ticks {
            validate_positive("max_ticks", max_ticks as f64)?;
        }
        Ok(())
    }

    /// Check the output section
    pub fn validate_output(&self) -> Result<(), ConfigValidationError> {
        let output = &self.output;

        validate_stream_name("fleet_stream", &output.fleet_stream)?;
        validate_stream_name("truck_stream", &output.truck_stream)?;
        if output.fleet_stream == output.truck_stream {
            return Err(ConfigValidationError::DuplicateStreamName(output.fleet_stream.clone()));
        }
        validate_positive("max_batch_bytes", output.max_batch_bytes as f64)
    }

    /// The lookback window as a chrono duration
    pub fn lookback(&self) -> chrono::Duration {
        chrono::Duration::days(self.clock.lookback_days as i64)
    }

    /// The inter-tick pause as a std duration
    pub fn tick_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.clock.tick_delay_ms)
    }
}

fn validate_range(field: &str, min: f64, max: f64) -> Result<(), ConfigValidationError> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(ConfigValidationError::InvalidRange { field: field.to_string(), min, max });
    }
    Ok(())
}

fn validate_positive(field: &str, value: f64) -> Result<(), ConfigValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigValidationError::NotPositive { field: field.to_string(), value });
    }
    Ok(())
}

fn validate_bounds(field: &str, value: f64, min: f64, max: f64) -> Result<(), ConfigValidationError> {
    if !(min..=max).contains(&value) {
        return Err(ConfigValidationError::OutOfBounds { field: field.to_string(), value, min, max });
    }
    Ok(())
}

/// Stream names become file names under the output directory
fn validate_stream_name(field: &str, name: &str) -> Result<(), ConfigValidationError> {
    if name.trim().is_empty() {
        return Err(ConfigValidationError::EmptyStreamName(field.to_string()));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ConfigValidationError::InvalidStreamName(name.to_string()));
    }
    Ok(())
}

fn validate_non_negative(field: &str, value: f64) -> Result<(), ConfigValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigValidationError::Negative { field: field.to_string(), value });
    }
    Ok(())
}

fn validate_probability(field: &str, value: f64) -> Result<(), ConfigValidationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigValidationError::InvalidProbability { field: field.to_string(), value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_config_default() {
        let config = SimulationConfig::default();

        assert_eq!(config.fleet.locations.len(), 10);
        assert_eq!(config.fleet.min_trip_distance_km, 50);
        assert_eq!(config.fleet.max_trip_distance_km, 400);
        assert_eq!(config.fleet.base_average_speed_kmh, 60.0);
        assert_eq!(config.telemetry.base_km_per_liter, 3.5);
        assert_eq!(config.telemetry.min_km_per_liter, 1.5);
        assert_eq!(config.telemetry.anomaly_probability, 0.15);
        assert_eq!(config.clock.lookback_days, 30);
        assert_eq!(config.clock.tick_delay_ms, 5_000);
        assert_eq!(config.output.fleet_stream, "fleet_data");
        assert_eq!(config.output.truck_stream, "truck_data");
        assert!(config.seed.is_none());
        assert!(config.clock.max_ticks.is_none());
    }

    #[test]
    fn test_simulation_config_validation_success() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs::try_parse_from([
            "test",
            "--seed",
            "54321",
            "--max-ticks",
            "12",
            "--tick-delay-ms",
            "0",
            "--anomaly-probability",
            "0.5",
            "--fleet-stream",
            "deliveries",
        ])
        .unwrap();

        let config = SimulationConfig::from_cli_args(args).unwrap();

        assert_eq!(config.seed, Some(54321));
        assert_eq!(config.clock.max_ticks, Some(12));
        assert_eq!(config.clock.tick_delay_ms, 0);
        assert_eq!(config.telemetry.anomaly_probability, 0.5);
        assert_eq!(config.output.fleet_stream, "deliveries");
        // Default values should remain for non-overridden fields
        assert_eq!(config.output.truck_stream, "truck_data");
        assert_eq!(config.clock.lookback_days, 30);
    }

    #[test]
    fn test_config_file_loading_is_partial() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "fleet": { "locations": ["Alpha", "Beta", "Gamma"], "max_cargo_weight_ton": 12 },
            "telemetry": { "high_traffic_penalty": 0.0 },
            "seed": 12345
        }"#;
        temp_file.write_all(config_json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = SimulationConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.fleet.locations, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(config.fleet.max_cargo_weight_ton, 12);
        assert_eq!(config.fleet.min_cargo_weight_ton, 5);
        assert_eq!(config.telemetry.high_traffic_penalty, 0.0);
        assert_eq!(config.telemetry.co2_per_liter, 2.68);
        assert_eq!(config.seed, Some(12345));
    }

    #[test]
    fn test_config_file_errors() {
        assert!(matches!(
            SimulationConfig::from_file("/definitely/not/here.json"),
            Err(ConfigError::FileNotFound(_))
        ));

        let temp_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            SimulationConfig::from_file(temp_file.path()),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
    }

    #[test]
    fn test_validation_locations() {
        let mut config = SimulationConfig::default();
        config.fleet.locations = vec!["Chennai".to_string()];
        assert_eq!(config.validate(), Err(ConfigValidationError::TooFewLocations(1)));

        config.fleet.locations = vec!["Chennai".to_string(), "Chennai".to_string()];
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::DuplicateLocation("Chennai".to_string()))
        );

        config.fleet.locations = vec!["Chennai".to_string(), " ".to_string()];
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyLocationName));
    }

    #[test]
    fn test_validation_inverted_range() {
        let mut config = SimulationConfig::default();
        config.fleet.min_cargo_weight_ton = 30;
        config.fleet.max_cargo_weight_ton = 10;

        match config.validate() {
            Err(ConfigValidationError::InvalidRange { field, min, max }) => {
                assert_eq!(field, "cargo_weight_ton");
                assert_eq!(min, 30.0);
                assert_eq!(max, 10.0);
            }
            other => panic!("Expected InvalidRange error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_positive_values() {
        let mut config = SimulationConfig::default();
        config.telemetry.min_km_per_liter = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::NotPositive { field, .. }) if field == "min_km_per_liter"
        ));

        let mut config = SimulationConfig::default();
        config.fleet.min_trip_distance_km = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::NotPositive { field, .. }) if field == "min_trip_distance_km"
        ));

        let mut config = SimulationConfig::default();
        config.clock.max_ticks = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_probability_and_stddev() {
        let mut config = SimulationConfig::default();
        config.telemetry.anomaly_probability = 1.5;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidProbability {
                field: "anomaly_probability".to_string(),
                value: 1.5
            })
        );

        let mut config = SimulationConfig::default();
        config.telemetry.speed_stddev_kmh = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigValidationError::Negative { .. })));
    }

    #[test]
    fn test_validation_streams() {
        let mut config = SimulationConfig::default();
        config.output.truck_stream = config.output.fleet_stream.clone();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::DuplicateStreamName("fleet_data".to_string()))
        );

        let mut config = SimulationConfig::default();
        config.output.fleet_stream = String::new();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyStreamName("fleet_stream".to_string()))
        );
    }

    #[test]
    fn test_validation_stream_names_stay_inside_output_directory() {
        for name in ["../fleet", "nested/fleet", "fleet\\data", "..", "."] {
            let mut config = SimulationConfig::default();
            config.output.fleet_stream = name.to_string();
            assert_eq!(
                config.validate(),
                Err(ConfigValidationError::InvalidStreamName(name.to_string())),
                "stream name {:?} should be rejected",
                name
            );
        }

        let mut config = SimulationConfig::default();
        config.output.truck_stream = "truck.data-v2".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_base_speed_bounds() {
        for speed in [1e14, 1e-9, MAX_BASE_SPEED_KMH + 1.0, f64::INFINITY, f64::NAN] {
            let mut config = SimulationConfig::default();
            config.fleet.base_average_speed_kmh = speed;
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigValidationError::OutOfBounds { ref field, .. })
                        if field == "base_average_speed_kmh"
                ),
                "base speed {} should be rejected",
                speed
            );
        }

        let mut config = SimulationConfig::default();
        config.fleet.base_average_speed_kmh = MIN_BASE_SPEED_KMH;
        assert!(config.validate().is_ok());
        config.fleet.base_average_speed_kmh = MAX_BASE_SPEED_KMH;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_trip_distance_and_lookback_bounds() {
        let mut config = SimulationConfig::default();
        config.fleet.max_trip_distance_km = MAX_TRIP_DISTANCE_KM + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::OutOfBounds { field, .. }) if field == "max_trip_distance_km"
        ));

        let mut config = SimulationConfig::default();
        config.clock.lookback_days = u32::MAX;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::OutOfBounds {
                field: "lookback_days".to_string(),
                value: u32::MAX as f64,
                min: 1.0,
                max: MAX_LOOKBACK_DAYS as f64,
            })
        );

        config.clock.lookback_days = 0;
        assert!(config.validate().is_err());
        config.clock.lookback_days = MAX_LOOKBACK_DAYS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_print_json_round_trips() {
        let config = SimulationConfig { seed: Some(7), ..SimulationConfig::default() };
        let json = config.print_json().unwrap();
        let parsed: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_helper_durations() {
        let config = SimulationConfig::default();
        assert_eq!(config.lookback(), chrono::Duration::days(30));
        assert_eq!(config.tick_delay(), std::time::Duration::from_secs(5));
    }
}
