//! Certificate fingerprint (digest) computation

use ring::digest;

use crate::config::FingerprintAlgorithm;

/// Compute the fingerprint of DER-encoded certificate bytes.
///
/// Returns a colon-separated uppercase hex string (e.g. `"AB:CD:EF:..."`).
#[must_use]
pub fn compute_fingerprint(der_bytes: &[u8], algorithm: FingerprintAlgorithm) -> String {
    let algorithm = match algorithm {
        FingerprintAlgorithm::Sha1 => &digest::SHA1_FOR_LEGACY_USE_ONLY,
        FingerprintAlgorithm::Sha256 => &digest::SHA256,
    };
    let hash = digest::digest(algorithm, der_bytes);

    hash.as_ref()
        .iter()
        .map(|b| hex::encode_upper([*b]))
        .collect::<Vec<_>>()
        .join(":")
}
