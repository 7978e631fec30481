//! DER certificate parsing into [`CertificateNode`]

use der::Decode;
use rustls::pki_types::CertificateDer;
use x509_cert::Certificate as X509CertCert;

use super::fingerprint::compute_fingerprint;
use super::name::DistinguishedName;
use crate::config::FingerprintAlgorithm;
use crate::tls::types::{CertificateNode, CertificateOrigin};

/// Parse a DER certificate and fingerprint its full encoding.
pub fn parse_certificate_from_der(
    cert_der: &CertificateDer<'_>,
    algorithm: FingerprintAlgorithm,
    origin: CertificateOrigin,
) -> Result<CertificateNode, der::Error> {
    let cert = X509CertCert::from_der(cert_der.as_ref())?;
    let tbs = &cert.tbs_certificate;

    Ok(CertificateNode {
        subject: DistinguishedName::from_x509(&tbs.subject),
        issuer: DistinguishedName::from_x509(&tbs.issuer),
        not_after: tbs.validity.not_after.to_system_time(),
        fingerprint: compute_fingerprint(cert_der.as_ref(), algorithm),
        der: cert_der.clone().into_owned(),
        origin,
    })
}
