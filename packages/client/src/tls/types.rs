//! Core types for presented certificates

use std::time::SystemTime;

use rustls::pki_types::CertificateDer;

use super::certificate::DistinguishedName;

/// Where a certificate in the chain came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateOrigin {
    /// Sent by the server during the handshake
    Peer,
    /// Filled in from the local system store because the server omitted it
    SystemStore,
}

/// One X.509 certificate, reduced to what the trust anchor pipeline reads.
#[derive(Debug, Clone)]
pub struct CertificateNode {
    pub subject: DistinguishedName,
    pub issuer: DistinguishedName,
    pub not_after: SystemTime,
    /// Colon-separated uppercase hex digest of the DER encoding
    pub fingerprint: String,
    /// Raw encoding; empty for nodes built by hand
    pub der: CertificateDer<'static>,
    pub origin: CertificateOrigin,
}

impl CertificateNode {
    /// Build a node without an encoding, e.g. from already extracted fields.
    #[must_use]
    pub fn new(
        subject: DistinguishedName,
        issuer: DistinguishedName,
        not_after: SystemTime,
        fingerprint: impl Into<String>,
    ) -> Self {
        Self {
            subject,
            issuer,
            not_after,
            fingerprint: fingerprint.into(),
            der: CertificateDer::from(Vec::new()),
            origin: CertificateOrigin::Peer,
        }
    }

    /// Subject and issuer carry the same name.
    ///
    /// This is a name comparison only; no key or signature is looked at.
    #[must_use]
    pub fn is_self_issued(&self) -> bool {
        self.subject == self.issuer
    }
}
