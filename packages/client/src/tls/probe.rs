//! TLS probe
//!
//! Connects to an issuer, records the certificates it presents and runs the
//! trust anchor pipeline over them.

use std::sync::Arc;
use std::time::SystemTime;

use rustls::ClientConfig;
use rustls::pki_types::CertificateDer;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

use super::roots::load_system_roots;
use super::verifier::ObservingVerifier;
use crate::anchor::{TrustAnchorResult, resolve_trust_anchor};
use crate::chain::{ChainArena, walk_chain};
use crate::config::ProbeConfig;
use crate::endpoint::IssuerEndpoint;
use crate::error::{self, Result};

/// Trust anchor probe for issuer endpoints.
///
/// Holds only read-only configuration; each call opens and closes its own
/// connection, so one probe can be shared across concurrent lookups.
#[derive(Debug, Clone, Default)]
pub struct TlsProbe {
    config: ProbeConfig,
}

impl TlsProbe {
    /// Create new probe with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ProbeConfig::default())
    }

    #[must_use]
    pub fn with_config(config: ProbeConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Resolve the root CA thumbprint for `issuer_url`.
    ///
    /// No timeout or retry is applied here; wrap the call if you need either.
    pub async fn download_thumbprint(&self, issuer_url: &str) -> Result<TrustAnchorResult> {
        tracing::info!(
            "Downloading certificate authority thumbprint for {}",
            issuer_url
        );

        let endpoint = IssuerEndpoint::parse(issuer_url)?;
        let presented = self.capture_chain(&endpoint).await?;
        let arena = self.link_chain(&presented).await;

        let result = resolve_trust_anchor(&arena, &self.config, SystemTime::now(), issuer_url)?;

        tracing::info!(
            "Certificate Authority thumbprint for {} is {}",
            issuer_url,
            result.thumbprint
        );
        Ok(result)
    }

    /// Handshake with `endpoint` and return the certificates it presented,
    /// leaf first.
    ///
    /// The connection is closed before returning. On failure paths the
    /// socket is dropped with the stream that owns it.
    pub async fn capture_chain(
        &self,
        endpoint: &IssuerEndpoint,
    ) -> Result<Vec<CertificateDer<'static>>> {
        let server_name = endpoint.server_name()?;
        let client_config = probe_client_config().map_err(error::tls_config)?;

        tracing::debug!("Creating probe TLS connection to {}", endpoint);
        let tcp_stream = TcpStream::connect((endpoint.host(), endpoint.port()))
            .await
            .map_err(|e| error::connection(endpoint, e))?;

        let connector = TlsConnector::from(Arc::new(client_config));
        let mut tls_stream = connector
            .connect(server_name, tcp_stream)
            .await
            .map_err(|e| error::connection(endpoint, e))?;

        let certificates = tls_stream
            .get_ref()
            .1
            .peer_certificates()
            .map(<[CertificateDer<'static>]>::to_vec)
            .unwrap_or_default();

        // The chain is already in hand; a failed close_notify changes nothing.
        if let Err(e) = tls_stream.shutdown().await {
            tracing::debug!("Closing probe connection to {} failed: {}", endpoint, e);
        }

        tracing::debug!(
            "{} presented {} certificates",
            endpoint,
            certificates.len()
        );
        Ok(certificates)
    }

    /// Link the presented certificates, completing from the system store
    /// only when the presented ones do not already end in a self-issued
    /// certificate.
    async fn link_chain(&self, presented: &[CertificateDer<'static>]) -> ChainArena {
        let algorithm = self.config.fingerprint_algorithm;
        let arena = ChainArena::from_presented(presented, &[], algorithm);

        if !self.wants_system_roots(&arena) {
            return arena;
        }

        let store = match tokio::task::spawn_blocking(load_system_roots).await {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("Loading system certificates failed: {}", e);
                return arena;
            }
        };

        ChainArena::from_presented(presented, &store, algorithm)
    }

    fn wants_system_roots(&self, presented: &ChainArena) -> bool {
        self.config.complete_from_system_roots
            && !walk_chain(presented)
                .last()
                .is_some_and(|node| node.is_self_issued())
    }
}

/// Client configuration with chain verification disabled.
fn probe_client_config() -> std::result::Result<ClientConfig, rustls::Error> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let verifier = Arc::new(ObservingVerifier::new(provider.clone()));

    let client_config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .dangerous()
        .with_custom_certificate_verifier(verifier)
        .with_no_client_auth();

    Ok(client_config)
}

/// Resolve the root CA thumbprint for `issuer_url` with default settings.
pub async fn download_thumbprint(issuer_url: &str) -> Result<TrustAnchorResult> {
    TlsProbe::new().download_thumbprint(issuer_url).await
}
