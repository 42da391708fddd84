use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use opsdesk::config::Config;

pub const TEST_TOKEN: &str = "test-token";

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(TEST_TOKEN)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(TEST_TOKEN)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(TEST_TOKEN)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete(&self, path: &str) -> StatusCode {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(TEST_TOKEN)
            .send()
            .await
            .expect("delete request failed");
        resp.status()
    }

    /// Create an organization, return its id.
    pub async fn create_organization(&self, name: &str) -> String {
        let (body, status) = self.post("/api/organizations", &json!({ "name": name })).await;
        assert_eq!(status, StatusCode::OK, "create organization failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Create a client, return its id.
    pub async fn create_client(&self, name: &str) -> String {
        let (body, status) = self.post("/api/clients", &json!({ "name": name })).await;
        assert_eq!(status, StatusCode::OK, "create client failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Create a team member, return its id.
    pub async fn create_member(&self, name: &str, email: &str, role: &str) -> String {
        let (body, status) = self
            .post(
                "/api/team-members",
                &json!({ "name": name, "email": email, "role": role }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create member failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Create an organization-level task, return the task JSON.
    pub async fn create_org_task(&self, organization_id: &str, title: &str) -> Value {
        let (body, status) = self
            .post(
                "/api/tasks",
                &json!({ "organizationId": organization_id, "title": title }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create task failed: {body}");
        body
    }

    /// Create a proposal with items, return the proposal JSON.
    pub async fn create_proposal(&self, client_id: &str, title: &str, items: Value) -> Value {
        let (body, status) = self
            .post(
                "/api/admin/proposals",
                &json!({ "clientId": client_id, "title": title, "status": "sent", "items": items }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create proposal failed: {body}");
        body
    }
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    // Create a unique test database
    let db_name = format!("opsdesk_test_{}", Uuid::now_v7().to_string().replace('-', ""));

    // Connect to default postgres DB to create test DB
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    // Connect to test DB and run migrations
    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let config = Config {
        database_url: test_url,
        api_token: TEST_TOKEN.to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        log_level: "warn".to_string(),
        default_timezone: chrono_tz::Tz::UTC,
    };

    let app = opsdesk::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });

    TestApp {
        addr,
        pool,
        client: Client::new(),
        db_name,
    }
}

/// Drop the per-test database.
pub async fn cleanup(app: TestApp) {
    let TestApp { pool, db_name, .. } = app;
    pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    if let Ok(admin_pool) = PgPoolOptions::new().max_connections(1).connect(&admin_url).await {
        let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
            .execute(&admin_pool)
            .await;
        admin_pool.close().await;
    }
}
