use riskview_domain::{C4cSettings, Credentials};
use riskview_infra::C4cClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BASE_PATH: &str = "/sap/c4c/odata/v1/c4codataapi/";

/// Route logs to the test harness; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().with_env_filter("debug").try_init();
}

pub fn credentials() -> Credentials {
    Credentials::new("my362429", "analyst", "secret").expect("valid credentials")
}

/// Client pointed at the mock server's OData root.
pub fn client_for(server: &MockServer) -> C4cClient {
    let settings = C4cSettings {
        base_url_override: Some(format!("{}{BASE_PATH}", server.uri())),
        request_timeout_ms: 2_000,
        probe_timeout_ms: 1_000,
        ..C4cSettings::default()
    };
    C4cClient::new(settings).expect("client should build")
}

/// Serve `rows` as the result set of `collection`.
pub async fn mount_rows(server: &MockServer, collection: &str, rows: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}{collection}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "d": { "results": rows } })),
        )
        .mount(server)
        .await;
}

/// Answer `collection` with a status code and C4C error envelope.
pub async fn mount_error(server: &MockServer, collection: &str, status: u16, message: &str) {
    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}{collection}")))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
            "error": { "code": "SY/530", "message": { "lang": "en", "value": message } }
        })))
        .mount(server)
        .await;
}
