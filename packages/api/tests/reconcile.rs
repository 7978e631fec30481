use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use pinroot::provider::{
    ClientIdRequest, CreateProviderRequest, CreateProviderResponse, DeleteProviderRequest,
    UpdateThumbprintRequest,
};
use pinroot::{
    IdentityProviderApi, Pinroot, ProviderProperties, ProviderReconciler, Result,
    ThumbprintSource,
};

const ISSUER: &str = "https://oidc.example.com/id/ABCDEF";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Create(CreateProviderRequest),
    Delete(String),
    UpdateThumbprint(Vec<String>),
    AddClientId(String),
    RemoveClientId(String),
}

#[derive(Default)]
struct RecordingApi {
    calls: Mutex<Vec<Call>>,
}

impl RecordingApi {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl IdentityProviderApi for RecordingApi {
    async fn create_provider(
        &self,
        request: CreateProviderRequest,
    ) -> Result<CreateProviderResponse> {
        let provider_arn = format!("arn:test:oidc-provider/{}", request.url);
        self.record(Call::Create(request));
        Ok(CreateProviderResponse { provider_arn })
    }

    async fn delete_provider(&self, request: DeleteProviderRequest) -> Result<()> {
        self.record(Call::Delete(request.provider_arn));
        Ok(())
    }

    async fn update_thumbprint(&self, request: UpdateThumbprintRequest) -> Result<()> {
        self.record(Call::UpdateThumbprint(request.thumbprint_list));
        Ok(())
    }

    async fn add_client_id(&self, request: ClientIdRequest) -> Result<()> {
        self.record(Call::AddClientId(request.client_id));
        Ok(())
    }

    async fn remove_client_id(&self, request: ClientIdRequest) -> Result<()> {
        self.record(Call::RemoveClientId(request.client_id));
        Ok(())
    }
}

struct FixedSource {
    lookups: AtomicUsize,
}

impl FixedSource {
    fn new() -> Self {
        Self {
            lookups: AtomicUsize::new(0),
        }
    }
}

impl ThumbprintSource for FixedSource {
    async fn thumbprint(&self, _issuer_url: &str) -> Result<String> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok("9E99A48A9960B14926BB7F3B02E22DA2B0AB7280".to_string())
    }
}

#[tokio::test]
async fn test_create_derives_thumbprint_when_missing() {
    let api = RecordingApi::default();
    let source = FixedSource::new();
    let reconciler = ProviderReconciler::new(&api, &source);

    let arn = reconciler
        .create(&ProviderProperties::new(ISSUER).with_client_id("sts.amazonaws.com"))
        .await
        .unwrap();

    assert_eq!(arn, format!("arn:test:oidc-provider/{ISSUER}"));
    assert_eq!(source.lookups.load(Ordering::SeqCst), 1);
    assert_eq!(
        api.calls(),
        vec![Call::Create(CreateProviderRequest {
            url: ISSUER.to_string(),
            client_ids: vec!["sts.amazonaws.com".to_string()],
            thumbprint_list: vec!["9E99A48A9960B14926BB7F3B02E22DA2B0AB7280".to_string()],
        })]
    );
}

#[tokio::test]
async fn test_create_keeps_supplied_thumbprints() {
    let api = RecordingApi::default();
    let source = FixedSource::new();
    let reconciler = ProviderReconciler::new(&api, &source);

    reconciler
        .create(&ProviderProperties::new(ISSUER).with_thumbprint("AAAA"))
        .await
        .unwrap();

    assert_eq!(source.lookups.load(Ordering::SeqCst), 0);
    let Call::Create(request) = &api.calls()[0] else {
        panic!("expected a create call");
    };
    assert_eq!(request.thumbprint_list, vec!["AAAA".to_string()]);
}

#[tokio::test]
async fn test_url_change_replaces_provider() {
    let api = RecordingApi::default();
    let source = FixedSource::new();
    let reconciler = ProviderReconciler::new(&api, &source);

    let old = ProviderProperties::new(ISSUER);
    let new = ProviderProperties::new("https://oidc.example.com/id/FEDCBA");
    let arn = reconciler.update("arn:old", &old, &new).await.unwrap();

    assert_eq!(arn, "arn:test:oidc-provider/https://oidc.example.com/id/FEDCBA");
    assert_eq!(api.calls().len(), 1);
    assert!(matches!(api.calls()[0], Call::Create(_)));
}

#[tokio::test]
async fn test_update_diffs_client_ids_and_thumbprints() {
    let api = RecordingApi::default();
    let source = FixedSource::new();
    let reconciler = ProviderReconciler::new(&api, &source);

    let old = ProviderProperties::new(ISSUER)
        .with_client_id("a")
        .with_client_id("b")
        .with_thumbprint("AAAA");
    let new = ProviderProperties::new(ISSUER)
        .with_client_id("b")
        .with_client_id("c");

    let arn = reconciler.update("arn:same", &old, &new).await.unwrap();

    assert_eq!(arn, "arn:same");
    assert_eq!(
        api.calls(),
        vec![
            Call::UpdateThumbprint(vec![
                "9E99A48A9960B14926BB7F3B02E22DA2B0AB7280".to_string()
            ]),
            Call::AddClientId("c".to_string()),
            Call::RemoveClientId("a".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_unchanged_properties_issue_no_calls() {
    let api = RecordingApi::default();
    let source = FixedSource::new();
    let reconciler = ProviderReconciler::new(&api, &source);

    let old = ProviderProperties::new(ISSUER)
        .with_client_id("a")
        .with_thumbprint("BBBB")
        .with_thumbprint("AAAA");
    let new = ProviderProperties::new(ISSUER)
        .with_client_id("a")
        .with_thumbprint("AAAA")
        .with_thumbprint("BBBB");

    reconciler.update("arn:same", &old, &new).await.unwrap();

    assert!(api.calls().is_empty());
    assert_eq!(source.lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_delete_forwards_arn() {
    let api = RecordingApi::default();
    let source = FixedSource::new();
    ProviderReconciler::new(&api, &source)
        .delete("arn:gone")
        .await
        .unwrap();

    assert_eq!(api.calls(), vec![Call::Delete("arn:gone".to_string())]);
}

#[tokio::test]
async fn test_pinroot_registers_with_supplied_thumbprint() {
    let api = RecordingApi::default();
    let pinroot = Pinroot::new();

    let arn = pinroot
        .register_provider(&api, &ProviderProperties::new(ISSUER).with_thumbprint("CCCC"))
        .await
        .unwrap();

    assert_eq!(arn, format!("arn:test:oidc-provider/{ISSUER}"));

    let synced = pinroot
        .sync_provider(
            &api,
            &arn,
            &ProviderProperties::new(ISSUER).with_thumbprint("CCCC"),
            &ProviderProperties::new(ISSUER)
                .with_thumbprint("CCCC")
                .with_client_id("web"),
        )
        .await
        .unwrap();

    assert_eq!(synced, arn);
    assert_eq!(api.calls().last(), Some(&Call::AddClientId("web".to_string())));
}

#[test]
fn test_properties_deserialize_with_defaults() {
    let properties: ProviderProperties =
        serde_json::from_str(r#"{ "url": "https://oidc.example.com", "clientIds": ["x"] }"#)
            .unwrap();
    assert_eq!(properties.url, "https://oidc.example.com");
    assert_eq!(properties.client_ids, vec!["x".to_string()]);
    assert!(properties.thumbprints.is_empty());
}
