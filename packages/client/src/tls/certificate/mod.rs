//! Certificate handling module
//!
//! Parsing of presented certificates, their names and fingerprints.

pub mod fingerprint;
pub mod name;
pub mod parser;

pub use fingerprint::compute_fingerprint;
pub use name::DistinguishedName;
pub use parser::parse_certificate_from_der;
