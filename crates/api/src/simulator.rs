//! Latency + failure injection standing in for real network IO.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimulatorConfig;
use crate::envelope::ApiResponse;

/// When a simulated call fails on its own (forced failures aside).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailurePolicy {
    Never,
    Always,
    /// Each call fails independently with probability `rate`.
    Random { rate: f64 },
}

impl FailurePolicy {
    pub fn from_rate(rate: f64) -> Self {
        if rate.is_nan() || rate <= 0.0 {
            FailurePolicy::Never
        } else if rate >= 1.0 {
            FailurePolicy::Always
        } else {
            FailurePolicy::Random { rate }
        }
    }
}

/// Produces [`ApiResponse`] envelopes after an artificial delay.
///
/// Callers must not assume determinism unless the policy is `Never`/`Always`.
#[derive(Debug)]
pub struct Simulator {
    delay: Duration,
    policy: FailurePolicy,
    rng: Mutex<StdRng>,
}

impl Simulator {
    pub fn new(config: &SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            delay: config.delay,
            policy: FailurePolicy::from_rate(config.failure_rate),
            rng: Mutex::new(rng),
        }
    }

    /// Zero delay, never fails on its own.
    pub fn deterministic() -> Self {
        Self::new(&SimulatorConfig::deterministic())
    }

    /// Out-of-range random rates collapse to `Never` or `Always`.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = match policy {
            FailurePolicy::Random { rate } => FailurePolicy::from_rate(rate),
            other => other,
        };
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    fn roll_failure(&self) -> bool {
        match self.policy {
            FailurePolicy::Never => false,
            FailurePolicy::Always => true,
            FailurePolicy::Random { rate } => self
                .rng
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .gen_bool(rate),
        }
    }

    /// Wait for the configured delay, then answer with `data` or a failure.
    ///
    /// Fails when `force_fail` is set or the policy says so. On success `data`
    /// is echoed back; on failure it is dropped.
    pub async fn simulate<R>(&self, entity_name: &str, data: R, force_fail: bool) -> ApiResponse<R> {
        let will_fail = self.roll_failure() || force_fail;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if will_fail {
            tracing::debug!(entity = entity_name, forced = force_fail, "simulated call failed");
            ApiResponse::failure(format!("operation on {entity_name} failed"))
        } else {
            ApiResponse::ok(data, format!("{entity_name} processed successfully"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_from_rate_picks_the_degenerate_cases() {
        assert_eq!(FailurePolicy::from_rate(0.0), FailurePolicy::Never);
        assert_eq!(FailurePolicy::from_rate(-1.0), FailurePolicy::Never);
        assert_eq!(FailurePolicy::from_rate(1.0), FailurePolicy::Always);
        assert_eq!(FailurePolicy::from_rate(0.05), FailurePolicy::Random { rate: 0.05 });
    }

    #[tokio::test]
    async fn successful_call_echoes_the_payload() {
        let simulator = Simulator::deterministic();
        let response = simulator.simulate("scope", vec![1, 2, 3], false).await;
        assert!(response.success);
        assert_eq!(response.data, Some(vec![1, 2, 3]));
        assert_eq!(response.message, "scope processed successfully");
    }

    #[tokio::test]
    async fn forced_failure_drops_the_payload() {
        let simulator = Simulator::deterministic();
        let response = simulator.simulate("partner", "payload", true).await;
        assert!(!response.success);
        assert_eq!(response.data, None);
        assert_eq!(response.message, "operation on partner failed");
    }

    #[tokio::test]
    async fn always_policy_fails_every_call() {
        let simulator = Simulator::deterministic().with_policy(FailurePolicy::Always);
        for _ in 0..5 {
            assert!(!simulator.simulate("profile", (), false).await.success);
        }
    }

    #[tokio::test]
    async fn out_of_range_random_policy_is_normalized() {
        let simulator = Simulator::deterministic().with_policy(FailurePolicy::Random { rate: 1.5 });
        assert_eq!(simulator.policy(), FailurePolicy::Always);
        assert!(!simulator.simulate("scope", (), false).await.success);

        let simulator = Simulator::deterministic().with_policy(FailurePolicy::Random { rate: f64::NAN });
        assert_eq!(simulator.policy(), FailurePolicy::Never);
        assert!(simulator.simulate("scope", (), false).await.success);

        let simulator = Simulator::deterministic().with_policy(FailurePolicy::Random { rate: 0.25 });
        assert_eq!(simulator.policy(), FailurePolicy::Random { rate: 0.25 });
    }

    #[tokio::test]
    async fn seeded_random_policy_is_reproducible() {
        let config = SimulatorConfig::deterministic()
            .with_failure_rate(0.5)
            .with_seed(7);
        let a = Simulator::new(&config);
        let b = Simulator::new(&config);

        let mut outcomes_a = Vec::new();
        let mut outcomes_b = Vec::new();
        for _ in 0..32 {
            outcomes_a.push(a.simulate("scope", (), false).await.success);
            outcomes_b.push(b.simulate("scope", (), false).await.success);
        }
        assert_eq!(outcomes_a, outcomes_b);
        assert!(outcomes_a.contains(&true));
        assert!(outcomes_a.contains(&false));
    }
}
