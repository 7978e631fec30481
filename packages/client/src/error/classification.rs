use std::error::Error as StdError;
use std::io;

use super::types::Error;

impl Error {
    /// Returns true if the issuer URL could not be turned into an endpoint.
    #[must_use]
    pub fn is_invalid_endpoint(&self) -> bool {
        matches!(self, Error::InvalidEndpoint { .. })
    }

    /// Returns true if the error came from the network or the TLS handshake.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection { .. })
    }

    /// Returns true if the local TLS configuration was rejected.
    #[must_use]
    pub fn is_tls_config(&self) -> bool {
        matches!(self, Error::TlsConfig { .. })
    }

    /// Returns true if the peer presented no certificates.
    #[must_use]
    pub fn is_no_certificates(&self) -> bool {
        matches!(self, Error::NoCertificates { .. })
    }

    /// Returns true if the presented chain does not end in a self-issued root.
    #[must_use]
    pub fn is_chain_not_rooted(&self) -> bool {
        matches!(self, Error::ChainNotRooted { .. })
    }

    /// Returns true if the candidate root has already expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        matches!(self, Error::ExpiredCertificate { .. })
    }

    /// Returns true if the error is related to a timeout.
    ///
    /// Covers both the caller deadline and socket level timeouts surfaced
    /// through a connection error.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        if matches!(self, Error::Timeout { .. }) {
            return true;
        }

        let mut source = self.source();
        while let Some(err) = source {
            if let Some(io) = err.downcast_ref::<io::Error>()
                && io.kind() == io::ErrorKind::TimedOut
            {
                return true;
            }
            source = err.source();
        }

        false
    }

    /// Whether repeating the same lookup could plausibly succeed.
    ///
    /// Configuration and policy failures are permanent for a given issuer;
    /// only network trouble is worth another attempt.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Connection { .. } | Error::Timeout { .. })
    }
}
