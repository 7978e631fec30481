//! Issuer URL to `(host, port)` resolution

use std::fmt;

use rustls::pki_types::ServerName;
use url::{Host, Url};

use crate::error::{self, Result};

/// Port used when the issuer URL does not name one.
pub const DEFAULT_PORT: u16 = 443;

/// Where the TLS probe connects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerEndpoint {
    host: String,
    port: u16,
    is_ip: bool,
}

impl IssuerEndpoint {
    /// Parse an issuer URL such as `https://oidc.example.com/id/ABCDEF`.
    ///
    /// Only an explicit port in the URL overrides [`DEFAULT_PORT`]; the scheme
    /// is not consulted. Fails with `InvalidEndpoint` when the URL does not
    /// parse or carries no host.
    pub fn parse(issuer_url: &str) -> Result<Self> {
        let url = Url::parse(issuer_url)
            .map_err(|e| error::invalid_endpoint_with(issuer_url, e))?;

        let (host, is_ip) = match url.host() {
            Some(Host::Domain(domain)) if !domain.is_empty() => (domain.to_string(), false),
            Some(Host::Ipv4(ip)) => (ip.to_string(), true),
            Some(Host::Ipv6(ip)) => (ip.to_string(), true),
            _ => return Err(error::invalid_endpoint(issuer_url)),
        };

        Ok(Self {
            host,
            port: url.port().unwrap_or(DEFAULT_PORT),
            is_ip,
        })
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Name presented to the peer. DNS hosts travel as SNI, IP literals don't.
    pub(crate) fn server_name(&self) -> Result<ServerName<'static>> {
        ServerName::try_from(self.host.clone())
            .map_err(|e| error::invalid_endpoint_with(self.host.clone(), e))
    }
}

impl fmt::Display for IssuerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ip && self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
