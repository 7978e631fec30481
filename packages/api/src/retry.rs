//! Retry policy with exponential backoff and jitter
//!
//! Only errors that [`pinroot_client::Error::is_retryable`] accepts are ever
//! repeated; chain and expiry failures are final on the first attempt.

use std::time::Duration;

use fastrand::Rng;
use pinroot_client::Error;

/// Retry policy configuration, durations in milliseconds
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay_ms: u64,
    /// Upper bound for any single delay
    pub max_delay_ms: u64,
    /// Growth factor between consecutive delays
    pub backoff_multiplier: f64,
    /// Jitter as a fraction of the delay (0.0 to 1.0)
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 500,
            max_delay_ms: 10_000,
            backoff_multiplier: 2.0,
            jitter_factor: 0.1,
        }
    }
}

impl RetryPolicy {
    /// More attempts with short delays, for callers that block on the result.
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            max_attempts: 5,
            initial_delay_ms: 100,
            max_delay_ms: 5_000,
            backoff_multiplier: 1.5,
            jitter_factor: 0.2,
        }
    }

    /// Single attempt only.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay_ms: 0,
            max_delay_ms: 0,
            backoff_multiplier: 1.0,
            jitter_factor: 0.0,
        }
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    ///
    /// Attempt 0 never waits. The base delay grows by `backoff_multiplier`
    /// per attempt, is capped at `max_delay_ms`, and then moved by up to half
    /// of `jitter_factor` in either direction.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let base_delay = (self.initial_delay_ms as f64 * self.backoff_multiplier.powi(exponent))
            .min(self.max_delay_ms as f64);

        let jitter_range = base_delay * self.jitter_factor;
        let mut rng = Rng::new();
        let jitter = rng.f64() * jitter_range - (jitter_range / 2.0);

        let final_delay = (base_delay + jitter).max(0.0);
        Duration::from_millis(final_delay as u64)
    }

    /// Whether `error` may be retried under this policy.
    #[must_use]
    pub fn is_retryable_error(&self, error: &Error) -> bool {
        self.max_attempts > 1 && error.is_retryable()
    }

    /// Check the policy parameters for consistency.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }

        if self.backoff_multiplier <= 0.0 {
            return Err("backoff_multiplier must be positive".to_string());
        }

        if !(0.0..=1.0).contains(&self.jitter_factor) {
            return Err("jitter_factor must be between 0.0 and 1.0".to_string());
        }

        if self.initial_delay_ms > self.max_delay_ms {
            return Err("initial_delay_ms cannot exceed max_delay_ms".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_attempt_never_waits() {
        assert_eq!(RetryPolicy::default().calculate_delay(0), Duration::ZERO);
    }

    #[test]
    fn test_delay_grows_and_caps() {
        let policy = RetryPolicy {
            jitter_factor: 0.0,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.calculate_delay(1), Duration::from_millis(500));
        assert_eq!(policy.calculate_delay(2), Duration::from_millis(1000));
        assert_eq!(policy.calculate_delay(3), Duration::from_millis(2000));
        assert_eq!(policy.calculate_delay(30), Duration::from_millis(10_000));
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let policy = RetryPolicy {
            jitter_factor: 0.5,
            ..RetryPolicy::default()
        };
        for _ in 0..100 {
            let delay = policy.calculate_delay(1).as_millis();
            assert!((375..=625).contains(&delay), "delay {delay} out of range");
        }
    }

    #[test]
    fn test_presets_validate() {
        assert!(RetryPolicy::default().validate().is_ok());
        assert!(RetryPolicy::aggressive().validate().is_ok());
        assert!(RetryPolicy::no_retry().validate().is_ok());
    }

    #[test]
    fn test_invalid_policies_are_reported() {
        let zero = RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        };
        assert!(zero.validate().is_err());

        let jitter = RetryPolicy {
            jitter_factor: 1.5,
            ..RetryPolicy::default()
        };
        assert!(jitter.validate().is_err());

        let inverted = RetryPolicy {
            initial_delay_ms: 20_000,
            ..RetryPolicy::default()
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_only_network_errors_retry() {
        let policy = RetryPolicy::default();
        let refused = pinroot_client::error::connection(
            "127.0.0.1:1",
            std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
        );
        assert!(policy.is_retryable_error(&refused));
        assert!(!RetryPolicy::no_retry().is_retryable_error(&refused));

        let missing = Error::NoCertificates {
            url: "https://oidc.example.com".to_string(),
        };
        assert!(!policy.is_retryable_error(&missing));
    }
}
