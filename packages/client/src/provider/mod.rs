//! Identity provider API interface
//!
//! The thumbprint ends up in an OpenID Connect provider registration. This
//! module only describes that API; callers construct a client for their
//! platform and pass it where it is needed.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateProviderRequest {
    pub url: String,
    #[serde(rename = "ClientIDList")]
    pub client_ids: Vec<String>,
    pub thumbprint_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateProviderResponse {
    #[serde(rename = "OpenIDConnectProviderArn")]
    pub provider_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteProviderRequest {
    #[serde(rename = "OpenIDConnectProviderArn")]
    pub provider_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateThumbprintRequest {
    #[serde(rename = "OpenIDConnectProviderArn")]
    pub provider_arn: String,
    pub thumbprint_list: Vec<String>,
}

/// Add or remove a single client id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClientIdRequest {
    #[serde(rename = "OpenIDConnectProviderArn")]
    pub provider_arn: String,
    #[serde(rename = "ClientID")]
    pub client_id: String,
}

/// Trust management API for OpenID Connect providers.
///
/// Implementations report their own failures through
/// [`crate::error::provider`].
pub trait IdentityProviderApi: Send + Sync {
    fn create_provider(
        &self,
        request: CreateProviderRequest,
    ) -> impl Future<Output = Result<CreateProviderResponse>> + Send;

    fn delete_provider(
        &self,
        request: DeleteProviderRequest,
    ) -> impl Future<Output = Result<()>> + Send;

    fn update_thumbprint(
        &self,
        request: UpdateThumbprintRequest,
    ) -> impl Future<Output = Result<()>> + Send;

    fn add_client_id(&self, request: ClientIdRequest) -> impl Future<Output = Result<()>> + Send;

    fn remove_client_id(
        &self,
        request: ClientIdRequest,
    ) -> impl Future<Output = Result<()>> + Send;
}
