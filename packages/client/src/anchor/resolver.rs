//! Chain → trust anchor pipeline

use std::time::SystemTime;

use rustls::pki_types::CertificateDer;
use serde::Serialize;

use super::root::select_root;
use super::thumbprint::Thumbprint;
use super::validity::{ExpiryAdvisory, assess_validity};
use crate::chain::{ChainArena, walk_chain};
use crate::config::ProbeConfig;
use crate::error::{Error, Result};
use crate::tls::certificate::DistinguishedName;

/// What the probe hands to identity provider registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustAnchorResult {
    pub thumbprint: Thumbprint,
    pub days_remaining: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<ExpiryAdvisory>,
    pub root_subject: DistinguishedName,
}

impl TrustAnchorResult {
    /// True when the root expires within the configured warning window.
    #[must_use]
    pub fn expires_soon(&self) -> bool {
        self.advisory.is_some()
    }
}

/// Walk, root check, validity policy and thumbprint over a linked arena.
///
/// `url` is only used in error messages.
pub fn resolve_trust_anchor(
    arena: &ChainArena,
    config: &ProbeConfig,
    now: SystemTime,
    url: &str,
) -> Result<TrustAnchorResult> {
    let chain = walk_chain(arena);
    if chain.is_empty() {
        return Err(Error::NoCertificates {
            url: url.to_string(),
        });
    }
    tracing::debug!("Walked {} unique certificates for {}", chain.len(), url);

    let root = select_root(&chain, url)?;
    let validity = assess_validity(root.not_after, now, config.expiry_warning_days)?;

    Ok(TrustAnchorResult {
        thumbprint: Thumbprint::from_fingerprint(&root.fingerprint),
        days_remaining: validity.days_remaining,
        advisory: validity.advisory,
        root_subject: root.subject.clone(),
    })
}

/// Run the pipeline over a chain captured elsewhere, leaf first.
///
/// `store` plays the part of the local system roots; pass an empty slice to
/// judge the presented certificates alone.
pub fn resolve_presented_chain(
    presented: &[CertificateDer<'_>],
    store: &[CertificateDer<'_>],
    config: &ProbeConfig,
    now: SystemTime,
    url: &str,
) -> Result<TrustAnchorResult> {
    let arena = ChainArena::from_presented(presented, store, config.fingerprint_algorithm);
    resolve_trust_anchor(&arena, config, now, url)
}
