//! Root selection

use crate::chain::ChainSet;
use crate::error::{Error, Result};
use crate::tls::types::CertificateNode;

/// Pick the candidate root: the last node of the walk, accepted only when
/// it is self-issued.
///
/// Self-issued is decided on names alone, so an intermediate naming itself
/// as issuer passes while a root the peer never sent does not.
pub fn select_root<'a>(chain: &ChainSet<'a>, url: &str) -> Result<&'a CertificateNode> {
    let root = chain.last().ok_or_else(|| Error::NoCertificates {
        url: url.to_string(),
    })?;

    if !root.is_self_issued() {
        return Err(Error::ChainNotRooted {
            subject: root.subject.clone(),
            issuer: root.issuer.clone(),
        });
    }

    Ok(root)
}
