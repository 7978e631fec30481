//! Trust anchor derivation
//!
//! Everything after the handshake: pick the root out of the walked chain,
//! judge its remaining lifetime and turn its fingerprint into a thumbprint.

pub mod resolver;
pub mod root;
pub mod thumbprint;
pub mod validity;

pub use resolver::{TrustAnchorResult, resolve_presented_chain, resolve_trust_anchor};
pub use root::select_root;
pub use thumbprint::Thumbprint;
pub use validity::{ExpiryAdvisory, ValidityAssessment, assess_validity, days_until};
