//! OpenID Connect provider lifecycle over [`IdentityProviderApi`]

use std::future::Future;

use hashbrown::HashSet;
use pinroot_client::Result;
use pinroot_client::provider::{
    ClientIdRequest, CreateProviderRequest, DeleteProviderRequest, IdentityProviderApi,
    UpdateThumbprintRequest,
};
use serde::{Deserialize, Serialize};

/// Where the reconciler gets a thumbprint when the caller supplied none.
pub trait ThumbprintSource: Send + Sync {
    fn thumbprint(&self, issuer_url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Desired state of a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderProperties {
    pub url: String,
    pub client_ids: Vec<String>,
    /// Empty means "derive from the issuer's root CA".
    pub thumbprints: Vec<String>,
}

impl ProviderProperties {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_ids.push(client_id.into());
        self
    }

    #[must_use]
    pub fn with_thumbprint(mut self, thumbprint: impl Into<String>) -> Self {
        self.thumbprints.push(thumbprint.into());
        self
    }
}

/// Drives create, update and delete of one provider.
pub struct ProviderReconciler<'a, A, S> {
    api: &'a A,
    source: &'a S,
}

impl<'a, A, S> ProviderReconciler<'a, A, S>
where
    A: IdentityProviderApi,
    S: ThumbprintSource,
{
    pub fn new(api: &'a A, source: &'a S) -> Self {
        Self { api, source }
    }

    /// Create the provider and return its arn.
    pub async fn create(&self, properties: &ProviderProperties) -> Result<String> {
        let thumbprint_list = self.thumbprints_for(properties).await?;

        tracing::info!("Creating OpenID Connect provider for {}", properties.url);
        let response = self
            .api
            .create_provider(CreateProviderRequest {
                url: properties.url.clone(),
                client_ids: properties.client_ids.clone(),
                thumbprint_list,
            })
            .await?;

        Ok(response.provider_arn)
    }

    /// Move the provider at `provider_arn` from `old` to `new`.
    ///
    /// Returns the arn that now represents the provider. A changed issuer
    /// URL creates a replacement; removing the old provider is left to the
    /// caller.
    pub async fn update(
        &self,
        provider_arn: &str,
        old: &ProviderProperties,
        new: &ProviderProperties,
    ) -> Result<String> {
        if old.url != new.url {
            tracing::info!(
                "Issuer url changed from {} to {}, replacing provider",
                old.url,
                new.url
            );
            return self.create(new).await;
        }

        if sorted(&old.thumbprints) != sorted(&new.thumbprints) {
            let thumbprint_list = self.thumbprints_for(new).await?;
            tracing::info!("Updating thumbprints of {}", provider_arn);
            self.api
                .update_thumbprint(UpdateThumbprintRequest {
                    provider_arn: provider_arn.to_string(),
                    thumbprint_list,
                })
                .await?;
        }

        let (added, removed) = diff(&old.client_ids, &new.client_ids);
        for client_id in added {
            tracing::debug!("Adding client id {} to {}", client_id, provider_arn);
            self.api
                .add_client_id(ClientIdRequest {
                    provider_arn: provider_arn.to_string(),
                    client_id,
                })
                .await?;
        }
        for client_id in removed {
            tracing::debug!("Removing client id {} from {}", client_id, provider_arn);
            self.api
                .remove_client_id(ClientIdRequest {
                    provider_arn: provider_arn.to_string(),
                    client_id,
                })
                .await?;
        }

        Ok(provider_arn.to_string())
    }

    pub async fn delete(&self, provider_arn: &str) -> Result<()> {
        tracing::info!("Deleting OpenID Connect provider {}", provider_arn);
        self.api
            .delete_provider(DeleteProviderRequest {
                provider_arn: provider_arn.to_string(),
            })
            .await
    }

    async fn thumbprints_for(&self, properties: &ProviderProperties) -> Result<Vec<String>> {
        if !properties.thumbprints.is_empty() {
            return Ok(properties.thumbprints.clone());
        }
        let thumbprint = self.source.thumbprint(&properties.url).await?;
        Ok(vec![thumbprint])
    }
}

fn sorted(values: &[String]) -> Vec<&str> {
    let mut values: Vec<&str> = values.iter().map(String::as_str).collect();
    values.sort_unstable();
    values
}

/// `(added, removed)` going from `old` to `new`, in encounter order.
fn diff(old: &[String], new: &[String]) -> (Vec<String>, Vec<String>) {
    let old_set: HashSet<&str> = old.iter().map(String::as_str).collect();
    let new_set: HashSet<&str> = new.iter().map(String::as_str).collect();

    let mut seen = HashSet::new();
    let added = new
        .iter()
        .filter(|id| !old_set.contains(id.as_str()) && seen.insert(id.as_str()))
        .cloned()
        .collect();

    let mut seen = HashSet::new();
    let removed = old
        .iter()
        .filter(|id| !new_set.contains(id.as_str()) && seen.insert(id.as_str()))
        .cloned()
        .collect();

    (added, removed)
}
