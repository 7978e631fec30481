use super::types::{BoxError, Error};

/// Creates an `Error` for an issuer URL without a usable host.
pub fn invalid_endpoint(url: impl Into<String>) -> Error {
    Error::InvalidEndpoint {
        url: url.into(),
        source: None,
    }
}

/// Creates an `Error` for an issuer URL that failed to parse.
pub fn invalid_endpoint_with<E: Into<BoxError>>(url: impl Into<String>, e: E) -> Error {
    Error::InvalidEndpoint {
        url: url.into(),
        source: Some(e.into()),
    }
}

/// Creates an `Error` for a connect, handshake or socket failure.
pub fn connection(endpoint: impl std::fmt::Display, source: std::io::Error) -> Error {
    Error::Connection {
        endpoint: endpoint.to_string(),
        source,
    }
}

/// Creates an `Error` for a TLS client configuration the probe could not build.
pub fn tls_config(source: rustls::Error) -> Error {
    Error::TlsConfig { source }
}

/// Creates an `Error` for a failed identity-provider API call.
pub fn provider<E: Into<BoxError>>(operation: &'static str, e: E) -> Error {
    Error::Provider {
        operation,
        source: e.into(),
    }
}
