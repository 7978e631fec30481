//! Probe configuration
//!
//! A single read-only value handed to every invocation. Nothing in here is
//! mutated while a probe runs, so one config can serve any number of
//! concurrent lookups.

use serde::{Deserialize, Serialize};

/// Roots expiring within this many days produce an advisory.
pub const DEFAULT_EXPIRY_WARNING_DAYS: i64 = 180;

/// Digest used to fingerprint the root certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FingerprintAlgorithm {
    /// 20-byte digest, the form identity providers expect as a thumbprint.
    #[default]
    Sha1,
    Sha256,
}

impl FingerprintAlgorithm {
    /// Digest length in bytes.
    #[must_use]
    pub fn output_len(self) -> usize {
        match self {
            FingerprintAlgorithm::Sha1 => 20,
            FingerprintAlgorithm::Sha256 => 32,
        }
    }
}

/// Configuration for a trust anchor probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProbeConfig {
    /// Advisory threshold for the candidate root, in days
    pub expiry_warning_days: i64,
    /// Digest used for the root fingerprint
    pub fingerprint_algorithm: FingerprintAlgorithm,
    /// Look up an issuer the server omitted in the local system store
    pub complete_from_system_roots: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            expiry_warning_days: DEFAULT_EXPIRY_WARNING_DAYS,
            fingerprint_algorithm: FingerprintAlgorithm::default(),
            complete_from_system_roots: true,
        }
    }
}

impl ProbeConfig {
    /// Configuration that only ever looks at what the peer sent.
    #[must_use]
    pub fn presented_only() -> Self {
        Self {
            complete_from_system_roots: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_expiry_warning_days(mut self, days: i64) -> Self {
        self.expiry_warning_days = days;
        self
    }

    #[must_use]
    pub fn with_fingerprint_algorithm(mut self, algorithm: FingerprintAlgorithm) -> Self {
        self.fingerprint_algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn with_system_roots(mut self, enabled: bool) -> Self {
        self.complete_from_system_roots = enabled;
        self
    }
}
