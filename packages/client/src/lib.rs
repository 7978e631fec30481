//! # Pinroot client
//!
//! Derives the root CA thumbprint an OpenID Connect identity provider needs
//! from the TLS chain its issuer presents.
//!
//! ## Features
//!
//! - **Observing TLS probe** over rustls that records the presented chain
//! - **Cycle-safe chain walk** over an arena of linked certificates
//! - **Chain completion** from the platform's root store when the issuer
//!   omits its root
//! - **Expiry advisories** for roots close to the end of their validity
//!
//! ## Usage
//!
//! ```no_run
//! # async fn run() -> pinroot_client::Result<()> {
//! let anchor = pinroot_client::download_thumbprint(
//!     "https://oidc.eks.us-east-1.amazonaws.com/id/EXAMPLE",
//! )
//! .await?;
//! println!("{} ({} days left)", anchor.thumbprint, anchor.days_remaining);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod anchor;
pub mod chain;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod provider;
pub mod tls;

pub use anchor::{ExpiryAdvisory, Thumbprint, TrustAnchorResult};
pub use config::{FingerprintAlgorithm, ProbeConfig};
pub use endpoint::IssuerEndpoint;
pub use error::{Error, Result};
pub use provider::IdentityProviderApi;
pub use tls::certificate::DistinguishedName;
pub use tls::{CertificateNode, CertificateOrigin, TlsProbe, download_thumbprint};
