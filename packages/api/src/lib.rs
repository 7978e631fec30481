//! Pinroot public API
//!
//! Root CA thumbprints for OpenID Connect issuers, with a per-attempt
//! deadline, retries for network failures and provider reconciliation on top
//! of [`pinroot_client`].
//!
//! ```no_run
//! # async fn run() -> pinroot::Result<()> {
//! use std::time::Duration;
//!
//! let pinroot = pinroot::Pinroot::builder()
//!     .timeout(Duration::from_secs(10))
//!     .retry_policy(pinroot::RetryPolicy::aggressive())
//!     .build();
//! let anchor = pinroot
//!     .download_thumbprint("https://oidc.eks.us-east-1.amazonaws.com/id/EXAMPLE")
//!     .await?;
//! println!("{}", anchor.thumbprint);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

use std::time::Duration;

pub mod reconciler;
pub mod retry;

pub use pinroot_client::provider::{self, IdentityProviderApi};
pub use pinroot_client::{
    Error, ExpiryAdvisory, FingerprintAlgorithm, ProbeConfig, Result, Thumbprint, TlsProbe,
    TrustAnchorResult,
};
pub use reconciler::{ProviderProperties, ProviderReconciler, ThumbprintSource};
pub use retry::RetryPolicy;

/// Main entry point: a configured probe plus deadline and retry policy.
#[derive(Debug, Clone, Default)]
pub struct Pinroot {
    probe: TlsProbe,
    timeout: Option<Duration>,
    retry_policy: RetryPolicy,
}

impl Pinroot {
    /// Defaults: 180 day advisory, SHA-1, system store completion, no
    /// deadline, three attempts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> PinrootBuilder {
        PinrootBuilder::default()
    }

    #[must_use]
    pub fn config(&self) -> &ProbeConfig {
        self.probe.config()
    }

    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Resolve the root CA thumbprint for `issuer_url`.
    ///
    /// Each attempt runs under the configured timeout. Connection failures
    /// and timeouts are retried with backoff; everything else returns at
    /// once.
    pub async fn download_thumbprint(&self, issuer_url: &str) -> Result<TrustAnchorResult> {
        let mut attempt = 1;
        loop {
            match self.attempt(issuer_url).await {
                Ok(result) => return Ok(result),
                Err(e)
                    if self.retry_policy.is_retryable_error(&e)
                        && attempt < self.retry_policy.max_attempts =>
                {
                    let delay = self.retry_policy.calculate_delay(attempt);
                    tracing::debug!(
                        "Attempt {} for {} failed: {}; retrying in {:?}",
                        attempt,
                        issuer_url,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn attempt(&self, issuer_url: &str) -> Result<TrustAnchorResult> {
        let Some(limit) = self.timeout else {
            return self.probe.download_thumbprint(issuer_url).await;
        };

        match tokio::time::timeout(limit, self.probe.download_thumbprint(issuer_url)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                url: issuer_url.to_string(),
                elapsed: limit,
            }),
        }
    }

    /// Create a provider for `properties`, deriving the thumbprint when none
    /// is given. Returns the provider arn.
    pub async fn register_provider<A: IdentityProviderApi>(
        &self,
        api: &A,
        properties: &ProviderProperties,
    ) -> Result<String> {
        ProviderReconciler::new(api, self).create(properties).await
    }

    /// Bring the provider at `provider_arn` from `old` to `new`. Returns the
    /// arn now in use, which differs from `provider_arn` when the issuer URL
    /// changed.
    pub async fn sync_provider<A: IdentityProviderApi>(
        &self,
        api: &A,
        provider_arn: &str,
        old: &ProviderProperties,
        new: &ProviderProperties,
    ) -> Result<String> {
        ProviderReconciler::new(api, self)
            .update(provider_arn, old, new)
            .await
    }
}

impl ThumbprintSource for Pinroot {
    async fn thumbprint(&self, issuer_url: &str) -> Result<String> {
        let result = self.download_thumbprint(issuer_url).await?;
        Ok(result.thumbprint.into_string())
    }
}

/// Builder for [`Pinroot`]
#[derive(Debug, Clone, Default)]
pub struct PinrootBuilder {
    config: ProbeConfig,
    timeout: Option<Duration>,
    retry_policy: RetryPolicy,
}

impl PinrootBuilder {
    #[must_use]
    pub fn config(mut self, config: ProbeConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn expiry_warning_days(mut self, days: i64) -> Self {
        self.config.expiry_warning_days = days;
        self
    }

    #[must_use]
    pub fn fingerprint_algorithm(mut self, algorithm: FingerprintAlgorithm) -> Self {
        self.config.fingerprint_algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn system_roots(mut self, enabled: bool) -> Self {
        self.config.complete_from_system_roots = enabled;
        self
    }

    /// Deadline for each attempt.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    #[must_use]
    pub fn no_retry(self) -> Self {
        self.retry_policy(RetryPolicy::no_retry())
    }

    /// Finish the builder. An invalid retry policy is logged and replaced by
    /// the default one.
    #[must_use]
    pub fn build(self) -> Pinroot {
        let retry_policy = match self.retry_policy.validate() {
            Ok(()) => self.retry_policy,
            Err(e) => {
                tracing::warn!("Invalid retry policy: {}, using default policy", e);
                RetryPolicy::default()
            }
        };

        Pinroot {
            probe: TlsProbe::with_config(self.config),
            timeout: self.timeout,
            retry_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_carries_settings() {
        let pinroot = Pinroot::builder()
            .expiry_warning_days(30)
            .fingerprint_algorithm(FingerprintAlgorithm::Sha256)
            .system_roots(false)
            .timeout(Duration::from_secs(5))
            .no_retry()
            .build();

        assert_eq!(pinroot.config().expiry_warning_days, 30);
        assert_eq!(
            pinroot.config().fingerprint_algorithm,
            FingerprintAlgorithm::Sha256
        );
        assert!(!pinroot.config().complete_from_system_roots);
        assert_eq!(pinroot.timeout, Some(Duration::from_secs(5)));
        assert_eq!(pinroot.retry_policy().max_attempts, 1);
    }

    #[test]
    fn test_invalid_retry_policy_falls_back() {
        let pinroot = Pinroot::builder()
            .retry_policy(RetryPolicy {
                max_attempts: 0,
                ..RetryPolicy::default()
            })
            .build();
        assert_eq!(pinroot.retry_policy(), &RetryPolicy::default());
    }
}
