//! Simulated readings for when no device is reporting.
//!
//! Every `interval_ms` the [`Simulator`] draws a temperature and humidity
//! from the configured ranges, derives the actuator states from the
//! temperature, and offers the result to the [`ReadingStore`]. The store
//! refuses it once a device has reported, so after the first live reading
//! every tick is a no-op.
//!
//! Actuator derivation is mutually exclusive: the fan runs above
//! `fan_threshold`; the light runs above `light_threshold` only when the
//! fan is off.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sensorhub_types::{Reading, SensorValues};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::store::ReadingStore;

/// Periodic reading synthesizer.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Create a simulator from validated configuration.
    pub const fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// The configured tick period.
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.config.interval_ms)
    }

    /// Draw one plausible set of sensor values.
    ///
    /// Values are rounded to one decimal, matching what a DHT-class
    /// sensor reports.
    pub fn synthesize<R: Rng>(&self, rng: &mut R) -> SensorValues {
        let temperature = round_tenth(
            rng.random_range(self.config.temperature_min..self.config.temperature_max),
        );
        let humidity =
            round_tenth(rng.random_range(self.config.humidity_min..self.config.humidity_max));
        let (fan_on, light_on) = self.actuators_for(temperature);

        SensorValues {
            temperature,
            humidity,
            fan_on,
            light_on,
        }
    }

    /// Derive `(fan_on, light_on)` from a temperature.
    pub fn actuators_for(&self, temperature: f64) -> (bool, bool) {
        let fan_on = temperature > self.config.fan_threshold;
        let light_on = temperature > self.config.light_threshold && !fan_on;
        (fan_on, light_on)
    }

    /// Run one tick: synthesize and offer to the store.
    ///
    /// Returns the stored reading, or `None` if live data has taken over.
    pub async fn tick<R: Rng>(&self, store: &ReadingStore, rng: &mut R) -> Option<Reading> {
        let values = self.synthesize(rng);
        store.apply_simulated(values).await
    }

    /// Tick forever on the configured period.
    ///
    /// Uses the configured seed when present, OS entropy otherwise. The
    /// first suppressed tick is logged; later ones are silent.
    pub async fn run(self, store: Arc<ReadingStore>) {
        let mut rng = self
            .config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        let mut ticker = tokio::time::interval(self.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_ms = self.config.interval_ms,
            seeded = self.config.seed.is_some(),
            "Simulator started"
        );

        let mut suspended = false;
        loop {
            ticker.tick().await;
            match self.tick(&store, &mut rng).await {
                Some(reading) => debug!(
                    temperature = reading.temperature,
                    humidity = reading.humidity,
                    fan_on = reading.fan_on,
                    light_on = reading.light_on,
                    "Simulated reading"
                ),
                None if !suspended => {
                    suspended = true;
                    info!("Live data received, simulation suspended");
                }
                None => {}
            }
        }
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use sensorhub_types::ReadingSource;

    use super::*;

    fn simulator() -> Simulator {
        Simulator::new(SimulationConfig::default())
    }

    #[test]
    fn hot_reading_runs_fan_not_light() {
        assert_eq!(simulator().actuators_for(26.0), (true, false));
    }

    #[test]
    fn mild_reading_runs_light_only() {
        assert_eq!(simulator().actuators_for(22.5), (false, true));
    }

    #[test]
    fn cool_reading_runs_nothing() {
        assert_eq!(simulator().actuators_for(20.5), (false, false));
    }

    #[test]
    fn thresholds_are_exclusive() {
        // Exactly at a threshold does not exceed it.
        assert_eq!(simulator().actuators_for(24.0), (false, true));
        assert_eq!(simulator().actuators_for(21.0), (false, false));
    }

    #[test]
    fn synthesized_values_stay_in_range_and_never_run_both() {
        let sim = simulator();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = sim.synthesize(&mut rng);
            assert!((20.0..=28.0).contains(&v.temperature), "{v:?}");
            assert!((60.0..=80.0).contains(&v.humidity), "{v:?}");
            assert!(!(v.fan_on && v.light_on), "{v:?}");
            assert_eq!((v.fan_on, v.light_on), sim.actuators_for(v.temperature));
        }
    }

    #[test]
    fn synthesized_values_have_one_decimal() {
        let sim = simulator();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let v = sim.synthesize(&mut rng);
            let scaled = v.temperature * 10.0;
            assert!((scaled - scaled.round()).abs() < 1e-9, "{v:?}");
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let sim = simulator();
        let mut a = StdRng::seed_from_u64(3);
        let mut b = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            assert_eq!(sim.synthesize(&mut a), sim.synthesize(&mut b));
        }
    }

    #[tokio::test]
    async fn tick_writes_until_live_data_arrives() {
        let sim = simulator();
        let store = ReadingStore::new();
        let mut rng = StdRng::seed_from_u64(1);

        let reading = sim.tick(&store, &mut rng).await;
        assert_eq!(reading.map(|r| r.source), Some(ReadingSource::Simulated));

        let live = SensorValues {
            temperature: 30.0,
            humidity: 10.0,
            fan_on: false,
            light_on: false,
        };
        store.apply_live(live).await;

        assert!(sim.tick(&store, &mut rng).await.is_none());
        assert_eq!(store.get().await.values(), live);
    }

    #[tokio::test(start_paused = true)]
    async fn run_ticks_on_the_configured_period() {
        let store = Arc::new(ReadingStore::new());
        let mut rx = store.subscribe();
        let config = SimulationConfig {
            seed: Some(11),
            ..SimulationConfig::default()
        };
        let handle = tokio::spawn(Simulator::new(config).run(Arc::clone(&store)));

        let start = tokio::time::Instant::now();
        for _ in 0..3 {
            let reading = rx.recv().await;
            assert_eq!(reading.map(|r| r.source).ok(), Some(ReadingSource::Simulated));
        }
        // First tick fires immediately, then every 3 seconds.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(6), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(9), "{elapsed:?}");

        handle.abort();
    }
}
