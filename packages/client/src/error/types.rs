use std::time::Duration;

use crate::tls::certificate::DistinguishedName;

/// A Result alias where the Err case is `pinroot_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Every way a trust anchor lookup can fail.
///
/// Only [`Error::Connection`] and [`Error::Timeout`] describe transient
/// conditions; see [`Error::is_retryable`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The issuer URL has no host the probe could connect to.
    #[error("unable to determine host from issuer url {url}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: Option<BoxError>,
    },

    /// TCP connect, TLS handshake or socket failure.
    #[error("failed to connect to {endpoint}: {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// The local TLS client configuration could not be built.
    #[error("failed to build TLS client configuration: {source}")]
    TlsConfig {
        #[source]
        source: rustls::Error,
    },

    /// The peer completed the handshake without presenting a usable leaf.
    #[error("No certificates were returned for the mentioned url: {url}")]
    NoCertificates { url: String },

    /// The farthest certificate of the walked chain is not self-issued.
    #[error(
        "Subject and Issuer of certificate received are different. Received: 'Subject' is {subject} and 'Issuer': {issuer}"
    )]
    ChainNotRooted {
        subject: DistinguishedName,
        issuer: DistinguishedName,
    },

    /// The candidate root is past its not-after time.
    #[error("The certificate has already expired on: {expired_on}")]
    ExpiredCertificate {
        expired_on: String,
        days_remaining: i64,
    },

    /// A caller-imposed deadline elapsed before the probe finished.
    #[error("trust anchor lookup for {url} timed out after {elapsed:?}")]
    Timeout { url: String, elapsed: Duration },

    /// The identity-provider API rejected or failed a request.
    #[error("identity provider request `{operation}` failed: {source}")]
    Provider {
        operation: &'static str,
        #[source]
        source: BoxError,
    },
}
