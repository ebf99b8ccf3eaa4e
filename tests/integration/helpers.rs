//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use chrono::Utc;
use http::{Request, StatusCode};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use lockin_api::{AppState, build_router};
use lockin_core::config::AppConfig;
use lockin_database::DatabasePool;

/// Secret shared by the test config and the token signer.
const JWT_SECRET: &str = "integration-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

/// A provisioned caller.
pub struct TestUser {
    /// Bearer token
    pub token: String,
    /// Profile id
    pub id: Uuid,
}

/// Response captured from a test request
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Parsed JSON body (`Null` when empty)
    pub body: Value,
}

impl TestResponse {
    /// The `data` payload of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `error` code of an error body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    /// Create a new test application, or `None` when no test database is configured.
    ///
    /// Tests share one database; each test provisions its own users so no
    /// cleanup between tests is needed.
    pub async fn try_new() -> Option<Self> {
        let Ok(url) = std::env::var("LOCKIN_TEST_DATABASE_URL") else {
            eprintln!("LOCKIN_TEST_DATABASE_URL not set, skipping");
            return None;
        };

        let config = AppConfig::from_toml_str(&format!(
            r#"
            [database]
            url = "{url}"
            max_connections = 5
            min_connections = 0

            [auth]
            jwt_secret = "{JWT_SECRET}"
            allow_anonymous = false

            [worker]
            enabled = false
            "#
        ))
        .expect("Failed to parse test config");

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");

        lockin_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let state = AppState::build(config, db);
        Some(Self {
            router: build_router(state),
        })
    }

    /// Provision a fresh user through `GET /api/me`.
    pub async fn user(&self, name: &str) -> TestUser {
        let subject = Uuid::new_v4().to_string();
        let token = sign_token(&subject, &format!("{name}-{subject}@example.com"), name);

        let resp = self.request("GET", "/api/me", None, Some(&token)).await;
        assert_eq!(resp.status, StatusCode::OK, "provisioning failed: {}", resp.body);
        let id = resp.data()["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("profile id");

        TestUser { token, id }
    }

    /// Make a request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(serde_json::to_vec(&json).expect("serialize body"))
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("build request"))
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Create a daily UTC group owned by `owner` and return its id.
    pub async fn daily_group(&self, owner: &TestUser, target_minutes: i32) -> Uuid {
        let now = Utc::now();
        let resp = self
            .request(
                "POST",
                "/api/groups",
                Some(json!({
                    "name": "Deep Work Club",
                    "start_at": now - chrono::Duration::days(7),
                    "end_at": now + chrono::Duration::days(30),
                    "timezone": "UTC",
                    "period": "daily",
                    "period_target_minutes": target_minutes,
                })),
                Some(&owner.token),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
        id_of(&resp.data()["id"])
    }

    /// Create a session, optionally inside a group, and return its id.
    pub async fn session(&self, creator: &TestUser, group_id: Option<Uuid>) -> Uuid {
        let resp = self
            .request(
                "POST",
                "/api/sessions",
                Some(json!({ "group_id": group_id })),
                Some(&creator.token),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
        id_of(&resp.data()["id"])
    }
}

/// Parse a JSON string value as a UUID.
pub fn id_of(value: &Value) -> Uuid {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| panic!("not a uuid: {value}"))
}

/// Sign an HS256 identity token the way the external provider would.
pub fn sign_token(subject: &str, email: &str, name: &str) -> String {
    let claims = json!({
        "sub": subject,
        "email": email,
        "name": name,
        "exp": (Utc::now() + chrono::Duration::hours(1)).timestamp(),
        "iat": Utc::now().timestamp(),
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("sign token")
}
