use dss_client::{ApiKeyAuth, BearerAuth, DssClient, DssError, ENV_API_KEY, ENV_DSS_URL};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_api_key_is_sent_as_basic_auth() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/api/projects/"))
        .and(header("authorization", "Basic c2VjcmV0Og=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"projectKey": "PKEY", "name": "Sales"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = DssClient::new(server.uri(), ApiKeyAuth::new("secret"))
        .expect("Failed to create client");
    let projects = client.list_projects().await.expect("Failed to list projects");

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["projectKey"], "PKEY");
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/api/projects/"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = DssClient::new(server.uri(), BearerAuth::new("tok"))
        .expect("Failed to create client");
    assert!(client.list_projects().await.expect("Failed to list projects").is_empty());
}

#[tokio::test]
async fn test_create_project_returns_handle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/public/api/projects/"))
        .and(body_json(json!({"projectKey": "NEWP", "name": "New project", "owner": "admin"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "Created"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = DssClient::new(server.uri(), ApiKeyAuth::new("secret"))
        .expect("Failed to create client");
    let project = client
        .create_project("NEWP", "New project", "admin")
        .await
        .expect("Failed to create project");

    assert_eq!(project.project_key(), "NEWP");
}

#[tokio::test]
async fn test_unauthorized_is_reported_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/api/projects/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errorType": "com.dataiku.dip.exceptions.UnauthorizedException",
            "detailedMessage": "No API key provided"
        })))
        .mount(&server)
        .await;

    let client = DssClient::new(server.uri(), ApiKeyAuth::new("wrong"))
        .expect("Failed to create client");
    let err = client.list_projects().await.expect_err("Listing should fail");

    match err {
        DssError::Api { status, message, .. } => {
            assert_eq!(status, 401);
            assert_eq!(message, "No API key provided");
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_failure_is_http_error() {
    // Nothing listens on port 1
    let client = DssClient::new("http://127.0.0.1:1", dss_client::NoAuth)
        .expect("Failed to create client");
    let result = client.list_projects().await;

    assert!(matches!(result, Err(DssError::Http(_))));
}

#[tokio::test]
async fn test_from_env() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public/api/projects/"))
        .and(header("authorization", "Basic ZW52a2V5Og=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    std::env::remove_var(ENV_DSS_URL);
    assert!(matches!(DssClient::from_env(), Err(DssError::Config(_))));

    std::env::set_var(ENV_DSS_URL, server.uri());
    std::env::set_var(ENV_API_KEY, "envkey");
    let client = DssClient::from_env().expect("Failed to create client from env");
    client.list_projects().await.expect("Failed to list projects");
}
