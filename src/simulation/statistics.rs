//! Run statistics
//!
//! Counters accumulated by the driver over a run, printed as a summary when
//! the binary exits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::types::{AlertType, DeliveryStatus};

/// Counters for one simulation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStatistics {
    /// Completed ticks
    pub ticks: u64,
    /// Deliveries generated
    pub deliveries: u64,
    /// Telemetry samples generated
    pub telemetry_samples: u64,
    /// Deliveries resolved on time
    pub completed_deliveries: u64,
    /// Deliveries resolved late
    pub delayed_deliveries: u64,
    /// Speeding anomalies injected
    pub speeding_alerts: u64,
    /// Engine temperature anomalies injected
    pub engine_temp_alerts: u64,
    /// Times the simulated clock was rewound
    pub clock_resets: u64,
    /// Batches sent, per stream
    pub batches_per_stream: BTreeMap<String, u64>,
    /// Wall-clock duration of the run
    pub simulation_duration: Duration,
}

impl SimulationStatistics {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a resolved delivery
    pub fn record_resolution(&mut self, status: DeliveryStatus) {
        match status {
            DeliveryStatus::Completed => self.completed_deliveries += 1,
            DeliveryStatus::Delayed => self.delayed_deliveries += 1,
            DeliveryStatus::Scheduled => {}
        }
    }

    /// Count an injected anomaly
    pub fn record_alert(&mut self, alert: AlertType) {
        match alert {
            AlertType::Speeding => self.speeding_alerts += 1,
            AlertType::HighEngineTemp => self.engine_temp_alerts += 1,
        }
    }

    /// Count batches sent to a stream
    pub fn record_batches(&mut self, stream: &str, batches: usize) {
        *self.batches_per_stream.entry(stream.to_string()).or_insert(0) += batches as u64;
    }

    /// Batches sent to a stream so far
    pub fn batches(&self, stream: &str) -> u64 {
        self.batches_per_stream.get(stream).copied().unwrap_or(0)
    }

    /// Total anomalies of any kind
    pub fn total_alerts(&self) -> u64 {
        self.speeding_alerts + self.engine_temp_alerts
    }

    /// Share of resolved deliveries that arrived late
    pub fn delayed_percentage(&self) -> f64 {
        let resolved = self.completed_deliveries + self.delayed_deliveries;
        if resolved == 0 {
            0.0
        } else {
            self.delayed_deliveries as f64 / resolved as f64 * 100.0
        }
    }

    /// Share of deliveries that carried an anomaly
    pub fn anomaly_percentage(&self) -> f64 {
        if self.deliveries == 0 {
            0.0
        } else {
            self.total_alerts() as f64 / self.deliveries as f64 * 100.0
        }
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "Run Summary: {} ticks | {} deliveries ({} completed, {} delayed, {:.1}% late) | {} telemetry samples | {} anomalies ({:.1}%) | {} clock resets",
            self.ticks,
            self.deliveries,
            self.completed_deliveries,
            self.delayed_deliveries,
            self.delayed_percentage(),
            self.telemetry_samples,
            self.total_alerts(),
            self.anomaly_percentage(),
            self.clock_resets
        )
    }

    /// Multi-line breakdown
    pub fn detailed_breakdown(&self) -> String {
        let mut breakdown = String::new();
        breakdown.push_str("=== Run Breakdown ===\n");
        breakdown.push_str(&format!("Ticks: {}\n", self.ticks));
        breakdown.push_str(&format!("Duration: {:.2}s\n\n", self.simulation_duration.as_secs_f64()));

        breakdown.push_str("Deliveries:\n");
        breakdown.push_str(&format!("  • Generated: {}\n", self.deliveries));
        breakdown.push_str(&format!("  • Completed: {}\n", self.completed_deliveries));
        breakdown.push_str(&format!(
            "  • Delayed: {} ({:.1}%)\n",
            self.delayed_deliveries,
            self.delayed_percentage()
        ));

        breakdown.push_str("\nTelemetry:\n");
        breakdown.push_str(&format!("  • Samples: {}\n", self.telemetry_samples));
        breakdown.push_str(&format!("  • Speeding alerts: {}\n", self.speeding_alerts));
        breakdown.push_str(&format!("  • Engine temperature alerts: {}\n", self.engine_temp_alerts));

        breakdown.push_str("\nBatches:\n");
        for (stream, batches) in &self.batches_per_stream {
            breakdown.push_str(&format!("  • {}: {}\n", stream, batches));
        }
        breakdown.push_str(&format!("\nClock resets: {}\n", self.clock_resets));

        breakdown
    }
}
