use cms_access::UninitializedPolicy;
use cms_client::{
    endpoints, ApiClient, ApiRequest, AuthorizationGate, ClientError, GateError, Method, RouteArgs,
};
use cms_test_utils::{store_with, uninitialized_store, RecordingTransport};
use serde::Deserialize;

fn client_for(gate: AuthorizationGate, transport: RecordingTransport) -> ApiClient<RecordingTransport> {
    ApiClient::new("https://cms.test/api", gate, transport)
}

#[tokio::test]
async fn requests_before_login_fail_open() {
    let client = client_for(AuthorizationGate::new(uninitialized_store()), RecordingTransport::new());

    client
        .call(&endpoints::AUDIT_LOGS_LIST, &RouteArgs::new(), None)
        .await
        .unwrap();

    assert_eq!(client.transport().request_count(), 1);
}

#[tokio::test]
async fn strict_policy_blocks_before_login() {
    let gate = AuthorizationGate::new(uninitialized_store()).with_policy(UninitializedPolicy::Deny);
    let client = client_for(gate, RecordingTransport::new());

    let err = client
        .call(&endpoints::AUDIT_LOGS_LIST, &RouteArgs::new(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Gate(GateError::NotInitialized { .. })));
    assert_eq!(client.transport().request_count(), 0);

    // public endpoints stay reachable
    client.call(&endpoints::LOGIN, &RouteArgs::new(), None).await.unwrap();
    assert_eq!(client.transport().request_count(), 1);
}

#[tokio::test]
async fn denial_reports_required_and_held_permissions() {
    let store = store_with(&["admin.section.read"]);
    let client = client_for(AuthorizationGate::new(store), RecordingTransport::new());

    let err = client
        .call(
            &endpoints::SECTION_UPDATE,
            &RouteArgs::new().with("section_id", 42),
            Some(serde_json::json!({ "fields": [] })),
        )
        .await
        .unwrap_err();

    let denied = err.permission_denied().expect("denied");
    assert_eq!(denied.required_permissions, vec!["admin.section.update"]);
    assert_eq!(denied.user_permissions, vec!["admin.section.read"]);
    assert_eq!(denied.endpoint, "https://cms.test/api/admin/sections/42");
    assert!(!err.is_retryable());
    assert_eq!(client.transport().request_count(), 0);
}

#[tokio::test]
async fn undeclared_request_is_rejected_before_transport() {
    let client = client_for(AuthorizationGate::new(store_with(&[])), RecordingTransport::new());

    let err = client
        .dispatch(ApiRequest::untyped(Method::Get, "https://cms.test/api/admin/users"))
        .await
        .unwrap_err();

    match err {
        ClientError::Gate(gate) => assert!(gate.is_integration_error()),
        other => panic!("expected gate error, got {other:?}"),
    }
    assert_eq!(client.transport().request_count(), 0);
}

#[tokio::test]
async fn permission_change_takes_effect_on_next_call() {
    let store = store_with(&[]);
    let client = client_for(AuthorizationGate::new(store.clone()), RecordingTransport::new());

    assert!(client.call(&endpoints::USERS_LIST, &RouteArgs::new(), None).await.is_err());

    store.set_permissions(["admin.user.read"]);
    assert!(client.call(&endpoints::USERS_LIST, &RouteArgs::new(), None).await.is_ok());

    store.clear_permissions();
    assert!(!store.is_initialized());
}

#[derive(Debug, Deserialize, PartialEq)]
struct UserRow {
    id: u64,
    email: String,
}

#[tokio::test]
async fn call_json_decodes_body_and_maps_status() {
    let transport = RecordingTransport::new()
        .with_response(200, serde_json::json!([{ "id": 1, "email": "a@cms.test" }]))
        .with_response(500, serde_json::json!({ "error": "boom" }));
    let client = client_for(AuthorizationGate::new(store_with(&["admin.user.read"])), transport);

    let users: Vec<UserRow> = client
        .call_json(&endpoints::USERS_LIST, &RouteArgs::new(), None)
        .await
        .unwrap();
    assert_eq!(
        users,
        vec![UserRow {
            id: 1,
            email: "a@cms.test".into()
        }]
    );

    let err = client
        .call(&endpoints::USERS_LIST, &RouteArgs::new(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Status { endpoint: "users.list", status: 500 }));
    assert!(err.is_retryable());

    let sent = client.transport().requests();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].url, "https://cms.test/api/admin/users");
    assert_eq!(sent[0].method, Method::Get);
}

#[tokio::test]
async fn public_route_arguments_cannot_reach_admin_paths() {
    let client = client_for(AuthorizationGate::new(store_with(&[])), RecordingTransport::new());

    // the admin route itself is denied
    let err = client
        .call(&endpoints::USER_GET, &RouteArgs::new().with("user_id", 7), None)
        .await
        .unwrap_err();
    assert!(err.permission_denied().is_some());

    client
        .call(
            &endpoints::PAGE_CONTENT,
            &RouteArgs::new().with("page_keyword", "../admin/users/7?x=1"),
            None,
        )
        .await
        .unwrap();
    let sent = client.transport().requests();
    assert_eq!(sent.len(), 1);
    let url = reqwest::Url::parse(&sent[0].url).unwrap();
    assert!(url.path().starts_with("/api/pages/"), "{}", url.path());
    assert_eq!(url.query(), None);

    let err = client
        .call(&endpoints::PAGE_CONTENT, &RouteArgs::new().with("page_keyword", ".."), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Route(_)));
    assert_eq!(client.transport().request_count(), 1);
}
