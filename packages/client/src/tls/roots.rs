//! Local system certificates used to complete a truncated chain

use rustls::pki_types::CertificateDer;

/// Load the platform's root certificates.
///
/// Load problems are logged and skipped; an empty list just means no chain
/// completion happens.
pub fn load_system_roots() -> Vec<CertificateDer<'static>> {
    let cert_result = rustls_native_certs::load_native_certs();

    for err in &cert_result.errors {
        tracing::warn!("Certificate load error: {}", err);
    }
    tracing::debug!("Loaded {} system certificates", cert_result.certs.len());

    cert_result.certs
}
