//! Simulation driver
//!
//! Runs the tick loop: each tick generates one delivery at the simulated time,
//! publishes it, publishes its telemetry, publishes its resolution and then
//! advances the clock. One tick completes fully before the next begins.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::events::{FleetEventRecord, FleetUpdateRecord, TruckTelemetryRecord};
use crate::fleet::{resolve_delivery, Delivery, DeliveryGenerator, DeliveryUpdate};
use crate::publish::{Publisher, StreamTransport};
use crate::simulation::{
    ShutdownSignal, SimulationClock, SimulationResult, SimulationStatistics,
};
use crate::telemetry::{Anomaly, TelemetryGenerator, TelemetrySample};
use crate::types::SimulationConfig;

/// Longest uninterrupted sleep while pausing between ticks
const PAUSE_SLICE: Duration = Duration::from_millis(100);

/// What one tick produced
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Clock to pass into the next tick
    pub next_clock: SimulationClock,
    /// Whether the clock was rewound before generating
    pub rewound: bool,
    /// The delivery generated this tick
    pub delivery: Delivery,
    /// Its resolution
    pub update: DeliveryUpdate,
    /// Its telemetry
    pub samples: Vec<TelemetrySample>,
    /// Anomaly applied to the telemetry
    pub anomaly: Anomaly,
}

/// Drives deliveries, telemetry and resolutions into a publisher
#[derive(Debug)]
pub struct SimulationDriver<T> {
    config: SimulationConfig,
    deliveries: DeliveryGenerator,
    telemetry: TelemetryGenerator,
    publisher: Publisher<T>,
    rng: StdRng,
    statistics: SimulationStatistics,
}

impl<T: StreamTransport> SimulationDriver<T> {
    /// Create a driver publishing through `transport`
    #[instrument(skip(config, transport), fields(transport = transport.name()))]
    pub fn new(config: SimulationConfig, transport: T) -> SimulationResult<Self> {
        // Each component checks its own configuration section
        let deliveries = DeliveryGenerator::new(&config)?;
        let telemetry = TelemetryGenerator::new(&config)?;
        config.validate_clock()?;
        config.validate_output()?;
        info!(
            "Initializing simulation driver with {} locations, streams '{}' and '{}'",
            config.fleet.locations.len(),
            config.output.fleet_stream,
            config.output.truck_stream
        );

        let rng = if let Some(seed) = config.seed {
            info!("Using deterministic seed: {}", seed);
            StdRng::seed_from_u64(seed)
        } else {
            debug!("Using entropy-based random seed");
            StdRng::from_entropy()
        };

        Ok(Self {
            deliveries,
            telemetry,
            publisher: Publisher::new(transport, config.output.max_batch_bytes),
            rng,
            statistics: SimulationStatistics::new(),
            config,
        })
    }

    /// The configuration the driver runs with
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Counters accumulated so far
    pub fn statistics(&self) -> &SimulationStatistics {
        &self.statistics
    }

    /// Borrow the transport
    pub fn transport(&self) -> &T {
        self.publisher.transport()
    }

    /// Take back the transport
    pub fn into_transport(self) -> T {
        self.publisher.into_transport()
    }

    /// Clock for a run starting at `real_now`
    pub fn start_clock(&self, real_now: DateTime<Utc>) -> SimulationClock {
        SimulationClock::starting_at(real_now, self.config.lookback())
    }

    /// Run one tick at `clock`, with `real_now` as the rewind bound
    ///
    /// Publishes to the fleet stream, then the truck stream, then the fleet
    /// stream again. Any publish failure aborts the tick.
    #[instrument(skip(self, clock), fields(simulated_time = %clock.now()))]
    pub fn tick(
        &mut self,
        clock: SimulationClock,
        real_now: DateTime<Utc>,
    ) -> SimulationResult<TickReport> {
        let (clock, rewound) = clock.rewind_if_ahead(real_now);
        if rewound {
            warn!("Simulated time overtook real time, rewinding to {}", clock.initial());
            self.statistics.clock_resets += 1;
        }

        let delivery = self.deliveries.generate(clock.now(), &mut self.rng);
        info!(
            "New delivery {} ({}) at {}",
            delivery.delivery_id,
            delivery.route(),
            clock.now().format("%Y-%m-%d %H:%M")
        );
        self.publish_fleet_event(&delivery)?;

        let trip = self.telemetry.generate(&delivery, &mut self.rng);
        self.publish_telemetry(&trip.samples)?;
        if let Some(alert) = trip.anomaly.alert_type() {
            info!("Alert {} on truck {} for delivery {}", alert, delivery.truck_id, delivery.delivery_id);
            self.statistics.record_alert(alert);
        }

        let update = resolve_delivery(&delivery, trip.actual_delivery_time);
        self.publish_update(&update)?;
        info!("Delivery {} resolved as {}", update.delivery_id, update.delivery_status);

        let clock_config = &self.config.clock;
        let minutes = self
            .rng
            .gen_range(clock_config.min_advance_minutes..=clock_config.max_advance_minutes);
        let next_clock = clock.advance(minutes as i64);

        self.statistics.ticks += 1;
        self.statistics.deliveries += 1;
        self.statistics.telemetry_samples += trip.samples.len() as u64;
        self.statistics.record_resolution(update.delivery_status);

        Ok(TickReport {
            next_clock,
            rewound,
            delivery,
            update,
            samples: trip.samples,
            anomaly: trip.anomaly,
        })
    }

    /// Tick until `max_ticks` is reached or `shutdown` is triggered
    ///
    /// Real time is read from the system clock. Returns the clock the next
    /// tick would have used.
    pub fn run(&mut self, shutdown: &ShutdownSignal) -> SimulationResult<SimulationClock> {
        let started = Instant::now();
        let mut clock = self.start_clock(Utc::now());
        info!("Starting simulation from {}", clock.now());

        while !shutdown.is_triggered() && !self.tick_limit_reached() {
            let report = self.tick(clock, Utc::now())?;
            clock = report.next_clock;

            if self.tick_limit_reached() {
                break;
            }
            self.pause(shutdown);
        }

        if shutdown.is_triggered() {
            info!("Shutdown requested, stopping after {} ticks", self.statistics.ticks);
        }
        self.statistics.simulation_duration = started.elapsed();
        info!("{}", self.statistics.summary());
        Ok(clock)
    }

    fn tick_limit_reached(&self) -> bool {
        self.config.clock.max_ticks.map_or(false, |max| self.statistics.ticks >= max)
    }

    /// Sleep for the tick delay in slices so a shutdown is noticed promptly
    fn pause(&self, shutdown: &ShutdownSignal) {
        let deadline = Instant::now() + self.config.tick_delay();
        loop {
            let now = Instant::now();
            if shutdown.is_triggered() || now >= deadline {
                return;
            }
            std::thread::sleep(PAUSE_SLICE.min(deadline - now));
        }
    }

    fn publish_fleet_event(&mut self, delivery: &Delivery) -> SimulationResult<()> {
        let stream = self.config.output.fleet_stream.clone();
        let batches = self.publisher.publish(&stream, &[FleetEventRecord::from(delivery)])?;
        self.statistics.record_batches(&stream, batches);
        Ok(())
    }

    fn publish_telemetry(&mut self, samples: &[TelemetrySample]) -> SimulationResult<()> {
        let stream = self.config.output.truck_stream.clone();
        let records: Vec<TruckTelemetryRecord> =
            samples.iter().map(TruckTelemetryRecord::from).collect();
        let batches = self.publisher.publish(&stream, &records)?;
        self.statistics.record_batches(&stream, batches);
        Ok(())
    }

    fn publish_update(&mut self, update: &DeliveryUpdate) -> SimulationResult<()> {
        let stream = self.config.output.fleet_stream.clone();
        let batches = self.publisher.publish(&stream, &[FleetUpdateRecord::from(update)])?;
        self.statistics.record_batches(&stream, batches);
        Ok(())
    }
}
