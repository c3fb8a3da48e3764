// src/simulation/config.rs

use crate::error::{SimError, SimResult};
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use std::time::Duration;

/// Half-open range `[min, max)` of durations, sampled uniformly.
/// A range with `min == max` always yields `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationRange {
    pub min: Duration,
    pub max: Duration,
}

impl DurationRange {
    pub const fn from_millis(min: u64, max: u64) -> Self {
        Self {
            min: Duration::from_millis(min),
            max: Duration::from_millis(max),
        }
    }

    pub const fn fixed(value: Duration) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let (Some(low), Some(high)) = (nanos(self.min), nanos(self.max)) else {
            return self.min;
        };
        if low >= high {
            return self.min;
        }
        Duration::from_nanos(Uniform::new(low, high).sample(rng))
    }

    fn validate(&self, name: &str) -> SimResult<()> {
        if self.min > self.max {
            return Err(SimError::invalid_config(format!(
                "{} has min {:?} greater than max {:?}",
                name, self.min, self.max
            )));
        }
        if nanos(self.max).is_none() {
            return Err(SimError::invalid_config(format!(
                "{} max {:?} is too large",
                name, self.max
            )));
        }
        Ok(())
    }
}

fn nanos(duration: Duration) -> Option<u64> {
    u64::try_from(duration.as_nanos()).ok()
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub producer_count: usize,
    pub consumer_count: usize,
    pub buffer_capacity: usize,
    /// Wall-clock length of the whole run.
    pub run_duration: Duration,
    /// Idle time between two items made by one barista.
    pub producer_interval: DurationRange,
    /// Idle time after each purchase attempt by one customer.
    pub consumer_interval: DurationRange,
    /// Each customer draws its patience once from this range.
    pub consumer_patience: DurationRange,
    /// How long a barista waits for a free slot before retrying.
    pub producer_wait: Duration,
    pub observer_interval: Duration,
    /// Seeds every actor's generator; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            producer_count: 2,
            consumer_count: 3,
            buffer_capacity: 10,
            run_duration: Duration::from_secs(30),
            producer_interval: DurationRange::from_millis(500, 2000),
            consumer_interval: DurationRange::from_millis(1000, 3000),
            consumer_patience: DurationRange::from_millis(2000, 5000),
            producer_wait: Duration::from_secs(1),
            observer_interval: Duration::from_secs(3),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.buffer_capacity == 0 {
            return Err(SimError::invalid_config(
                "buffer_capacity must be at least 1",
            ));
        }
        if self.run_duration.is_zero() {
            return Err(SimError::invalid_config("run_duration must be non-zero"));
        }
        if self.observer_interval.is_zero() {
            return Err(SimError::invalid_config(
                "observer_interval must be non-zero",
            ));
        }
        // Zero waits would turn the actor loops into spins
        if self.producer_wait.is_zero() {
            return Err(SimError::invalid_config("producer_wait must be non-zero"));
        }
        if self.consumer_patience.min.is_zero() {
            return Err(SimError::invalid_config(
                "consumer_patience must be non-zero",
            ));
        }
        if self.consumer_interval.min.is_zero() {
            return Err(SimError::invalid_config(
                "consumer_interval must be non-zero",
            ));
        }
        self.producer_interval.validate("producer_interval")?;
        self.consumer_interval.validate("consumer_interval")?;
        self.consumer_patience.validate("consumer_patience")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.producer_count, 2);
        assert_eq!(config.consumer_count, 3);
        assert_eq!(config.buffer_capacity, 10);
    }

    #[test]
    fn rejects_unrunnable_settings() {
        let zero_capacity = SimulationConfig {
            buffer_capacity: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            zero_capacity.validate(),
            Err(SimError::InvalidConfig { .. })
        ));

        let inverted = SimulationConfig {
            consumer_patience: DurationRange::from_millis(5000, 2000),
            ..SimulationConfig::default()
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn rejects_zero_waits() {
        let no_wait = SimulationConfig {
            producer_wait: Duration::ZERO,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            no_wait.validate(),
            Err(SimError::InvalidConfig { .. })
        ));

        let no_patience = SimulationConfig {
            consumer_patience: DurationRange::fixed(Duration::ZERO),
            ..SimulationConfig::default()
        };
        assert!(matches!(
            no_patience.validate(),
            Err(SimError::InvalidConfig { .. })
        ));

        let no_idle = SimulationConfig {
            consumer_interval: DurationRange::from_millis(0, 100),
            ..SimulationConfig::default()
        };
        assert!(matches!(
            no_idle.validate(),
            Err(SimError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_ranges_beyond_nanosecond_precision() {
        let huge = SimulationConfig {
            producer_interval: DurationRange {
                min: Duration::from_millis(1),
                max: Duration::MAX,
            },
            ..SimulationConfig::default()
        };
        assert!(huge.validate().is_err());

        // Sampling an oversized range falls back to the lower bound instead of panicking
        let mut rng = StdRng::seed_from_u64(5);
        let range = DurationRange {
            min: Duration::MAX,
            max: Duration::MAX,
        };
        assert_eq!(range.sample(&mut rng), Duration::MAX);
        let wide = DurationRange {
            min: Duration::from_secs(u64::MAX / 2),
            max: Duration::MAX,
        };
        assert_eq!(wide.sample(&mut rng), wide.min);
    }

    #[test]
    fn samples_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let range = DurationRange::from_millis(500, 2000);
        for _ in 0..500 {
            let d = range.sample(&mut rng);
            assert!(d >= range.min && d < range.max, "{d:?} out of range");
        }

        let fixed = DurationRange::fixed(Duration::from_millis(100));
        assert_eq!(fixed.sample(&mut rng), Duration::from_millis(100));
    }
}
