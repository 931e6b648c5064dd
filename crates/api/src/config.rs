//! Simulator configuration (environment driven).

use std::time::Duration;

/// Default artificial latency of a simulated call.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

/// Default probability that a simulated call fails.
pub const DEFAULT_FAILURE_RATE: f64 = 0.05;

const ENV_DELAY_MS: &str = "ADMINCONSOLE_API_DELAY_MS";
const ENV_FAILURE_RATE: &str = "ADMINCONSOLE_API_FAILURE_RATE";
const ENV_SEED: &str = "ADMINCONSOLE_API_SEED";

/// Configuration of the simulated API layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Latency added to every call. Zero skips the timer entirely.
    pub delay: Duration,
    /// Probability in `[0, 1]` that a call fails on its own.
    pub failure_rate: f64,
    /// Seed for the failure RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            failure_rate: DEFAULT_FAILURE_RATE,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// No latency, no random failures. Forced failures still apply.
    pub fn deterministic() -> Self {
        Self {
            delay: Duration::ZERO,
            failure_rate: 0.0,
            seed: Some(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = clamp_rate(rate);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; invalid values fall back to
    /// the defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_DELAY_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.delay = Duration::from_millis(ms),
                Err(err) => {
                    tracing::warn!("{ENV_DELAY_MS}={raw:?} is not a number of milliseconds ({err}); using default");
                }
            }
        }

        if let Some(raw) = lookup(ENV_FAILURE_RATE) {
            match raw.trim().parse::<f64>() {
                Ok(rate) if rate.is_finite() => config.failure_rate = clamp_rate(rate),
                _ => {
                    tracing::warn!("{ENV_FAILURE_RATE}={raw:?} is not a probability; using default");
                }
            }
        }

        if let Some(raw) = lookup(ENV_SEED) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => config.seed = Some(seed),
                Err(err) => tracing::warn!("{ENV_SEED}={raw:?} ignored ({err})"),
            }
        }

        config
    }
}

fn clamp_rate(rate: f64) -> f64 {
    if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_variables_yield_defaults() {
        let config = SimulatorConfig::from_lookup(|_| None);
        assert_eq!(config, SimulatorConfig::default());
    }

    #[test]
    fn valid_variables_override_defaults() {
        let config = SimulatorConfig::from_lookup(lookup(&[
            ("ADMINCONSOLE_API_DELAY_MS", "20"),
            ("ADMINCONSOLE_API_FAILURE_RATE", "0.5"),
            ("ADMINCONSOLE_API_SEED", "42"),
        ]));
        assert_eq!(config.delay, Duration::from_millis(20));
        assert_eq!(config.failure_rate, 0.5);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn invalid_variables_fall_back_and_rates_are_clamped() {
        let config = SimulatorConfig::from_lookup(lookup(&[
            ("ADMINCONSOLE_API_DELAY_MS", "soon"),
            ("ADMINCONSOLE_API_FAILURE_RATE", "7"),
        ]));
        assert_eq!(config.delay, DEFAULT_DELAY);
        assert_eq!(config.failure_rate, 1.0);

        let config = SimulatorConfig::from_lookup(lookup(&[("ADMINCONSOLE_API_FAILURE_RATE", "NaN")]));
        assert_eq!(config.failure_rate, DEFAULT_FAILURE_RATE);
    }
}
