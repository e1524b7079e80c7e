//! Session contract tests against a local mock API

use rightscale_client::{ClientConfig, RightScaleClient, RightScaleError};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn form_field(key: &str, value: &str) -> String {
    format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
}

#[tokio::test]
async fn test_login_posts_credentials_and_keeps_cookies() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .and(header("X-API-Version", "1.5"))
        .and(body_string_contains(form_field("email", "ops@example.com")))
        .and(body_string_contains(form_field("password", "secret")))
        .and(body_string_contains(form_field("account_href", "/api/accounts/1234")))
        .respond_with(ResponseTemplate::new(204).insert_header("Set-Cookie", "rs_gbl=abc123; Path=/"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/session"))
        .and(header("cookie", "rs_gbl=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "You have successfully logged into the RightScale API.",
            "links": [{"rel": "account", "href": "/api/accounts/1234"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = RightScaleClient::with_url(server.uri()).unwrap();
    client.login("ops@example.com", "secret", "1234").await.unwrap();

    let session = client.session().await.unwrap();
    assert!(session.message.unwrap().contains("successfully"));
    assert_eq!(session.links[0].href, "/api/accounts/1234");
}

#[tokio::test]
async fn test_login_reissues_post_on_redirect() {
    let shard = MockServer::start().await;
    let global = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/api/session", shard.uri()).as_str()),
        )
        .expect(1)
        .mount(&global)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .and(body_string_contains(form_field("email", "ops@example.com")))
        .and(body_string_contains(form_field("account_href", "/api/accounts/1234")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&shard)
        .await;

    let client = RightScaleClient::with_url(global.uri()).unwrap();
    client.login("ops@example.com", "secret", "1234").await.unwrap();
}

#[tokio::test]
async fn test_rejected_login_is_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
        .mount(&server)
        .await;

    let client = RightScaleClient::with_url(server.uri()).unwrap();
    let err = client.login("ops@example.com", "wrong", "1234").await.unwrap_err();
    assert!(matches!(err, RightScaleError::Authentication(_)));
    assert!(err.is_remote());
}

#[tokio::test]
async fn test_instance_login_and_instance_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session/instance"))
        .and(body_string_contains(form_field("instance_token", "tok-1")))
        .and(body_string_contains(form_field("account_href", "/api/accounts/1234")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/session/instance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "db-master",
            "state": "operational",
            "links": [{"rel": "self", "href": "/api/clouds/1/instances/ABC"}]
        })))
        .mount(&server)
        .await;

    let mut config = ClientConfig::new(server.uri());
    config.account_id = Some("1234".to_string());
    config.instance_token = Some("tok-1".to_string());

    let client = RightScaleClient::connect(config).await.unwrap();
    let instance = client.instance_session().await.unwrap();
    assert_eq!(instance.name, "db-master");
    assert_eq!(instance.state.as_deref(), Some("operational"));
}

#[tokio::test]
async fn test_accounts_sends_credentials_as_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session/accounts"))
        .and(query_param("email", "ops@example.com"))
        .and(query_param("password", "p&ss word"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "Production", "links": [{"rel": "self", "href": "/api/accounts/1234"}]},
            {"name": "Staging", "links": [{"rel": "self", "href": "/api/accounts/5678"}]}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = RightScaleClient::with_url(server.uri()).unwrap();
    let accounts = client.accounts("ops@example.com", "p&ss word").await.unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[1].name, "Staging");
}

#[tokio::test]
async fn test_redirected_accounts_request_keeps_credentials() {
    let shard = MockServer::start().await;
    let global = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session/accounts"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}/api/session/accounts", shard.uri()).as_str()),
        )
        .expect(1)
        .mount(&global)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/session/accounts"))
        .and(query_param("email", "ops@example.com"))
        .and(query_param("password", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "Production", "links": [{"rel": "self", "href": "/api/accounts/1234"}]}
        ])))
        .expect(1)
        .mount(&shard)
        .await;

    let client = RightScaleClient::with_url(global.uri()).unwrap();
    let accounts = client.accounts("ops@example.com", "secret").await.unwrap();
    assert_eq!(accounts[0].name, "Production");
}

#[tokio::test]
async fn test_session_follows_login_to_shard_host() {
    let shard = MockServer::start().await;
    let global = MockServer::start().await;
    // Different host names so the shard's cookies are not sent to the global host
    let global_url = global.uri().replace("127.0.0.1", "localhost");

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/api/session", shard.uri()).as_str()),
        )
        .expect(1)
        .mount(&global)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .expect(0)
        .mount(&global)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .and(body_string_contains(form_field("email", "ops@example.com")))
        .respond_with(ResponseTemplate::new(204).insert_header("Set-Cookie", "rs_gbl=shard1; Path=/"))
        .expect(1)
        .mount(&shard)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/session"))
        .and(header("cookie", "rs_gbl=shard1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "You have successfully logged into the RightScale API.",
            "links": []
        })))
        .expect(1)
        .mount(&shard)
        .await;

    let client = RightScaleClient::with_url(global_url).unwrap();
    client.login("ops@example.com", "secret", "1234").await.unwrap();
    assert_eq!(client.base_url(), shard.uri());

    let session = client.session().await.unwrap();
    assert!(session.message.is_some());
}
