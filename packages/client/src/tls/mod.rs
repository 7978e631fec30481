//! TLS probe and certificate handling
//!
//! The probe deliberately skips chain verification: it observes what an
//! issuer presents so that a trust anchor can be derived from it.

pub mod certificate;
pub mod probe;
pub mod roots;
pub mod types;
pub(crate) mod verifier;

pub use probe::{TlsProbe, download_thumbprint};
pub use roots::load_system_roots;
pub use types::{CertificateNode, CertificateOrigin};
