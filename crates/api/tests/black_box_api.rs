use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use stockroom_auth::AuthConfig;
use stockroom_api::app::services::{build_in_memory, RuntimeConfig};
use stockroom_infra::DEFAULT_ADMIN_EMAIL;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build the app (same router as prod) against in-memory stores,
        // bound to an ephemeral port.
        let config = RuntimeConfig::for_tests(AuthConfig {
            secret_key: "test-secret".to_string(),
            issuer: "stockroom".to_string(),
            audience: "stockroom-clients".to_string(),
            expiry_minutes: 10,
        });
        let services = build_in_memory(&config).await.expect("failed to wire services");
        let app = stockroom_api::app::build_app(Arc::new(services));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn login(&self, client: &reqwest::Client, email: &str, password: &str) -> serde_json::Value {
        let res = client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        res.json().await.unwrap()
    }

    async fn admin_token(&self, client: &reqwest::Client) -> String {
        let body = self.login(client, DEFAULT_ADMIN_EMAIL, "P@ssw0rd").await;
        body["data"]["token"].as_str().unwrap().to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn login_and_refresh_end_to_end() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = srv.login(&client, DEFAULT_ADMIN_EMAIL, "P@ssw0rd").await;
    assert_eq!(body["version"], "1.1");
    assert_eq!(body["status"], 200);
    assert_eq!(body["success_message"], "Login successful.");
    assert_eq!(body["data"]["role"], "Admin");
    let access = body["data"]["token"].as_str().unwrap();
    let refresh = body["data"]["refresh_token"].as_str().unwrap();
    assert!(!access.is_empty());
    assert!(!refresh.is_empty());

    let res = client
        .post(format!("{}/api/auth/refresh", srv.base_url))
        .json(&json!({ "refresh_token": refresh }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], 200);
    assert_eq!(body["success_message"], "Token refreshed successfully.");
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
    // Refresh responses carry the access token only.
    assert!(body["data"].get("refresh_token").is_none());
    assert!(body["data"].get("role").is_none());
}

#[tokio::test]
async fn login_requires_credentials() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({ "email": "", "password": "  " }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], 400);
    assert_eq!(body["error_messages"][0], "Email and Password are required.");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({ "email": DEFAULT_ADMIN_EMAIL, "password": "not-it" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error_messages"][0], "Invalid credentials.");
}

#[tokio::test]
async fn unknown_accounts_and_inactive_accounts_read_the_same() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({ "email": "nobody@x.com", "password": "pw" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body["error_messages"][0],
        "Invalid credentials or inactive user."
    );
}

#[tokio::test]
async fn protected_endpoints_require_a_valid_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/users", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/api/users", srv.base_url))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn whoami_reflects_the_token_claims() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.admin_token(&client).await;

    let res = client
        .get(format!("{}/api/whoami", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["subject"], DEFAULT_ADMIN_EMAIL);
    assert_eq!(body["role"], "Admin");
}

#[tokio::test]
async fn warehouse_and_item_lifecycle_with_paging() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.admin_token(&client).await;

    // Create a warehouse.
    let res = client
        .post(format!("{}/api/warehouses", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Central",
            "address": "Main St 1",
            "city": "Oslo",
            "country": "Norway",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success_message"], "Warehouse created successfully.");
    let warehouse_id = body["data"]["id"].as_str().unwrap().to_string();

    // Duplicate name conflicts.
    let res = client
        .post(format!("{}/api/warehouses", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Central",
            "address": "Elsewhere 2",
            "city": "Bergen",
            "country": "Norway",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Create three items.
    for n in 0..3 {
        let res = client
            .post(format!("{}/api/items", srv.base_url))
            .bearer_auth(&token)
            .json(&json!({
                "item_name": format!("item-{n}"),
                "sku_code": format!("SKU-{n}"),
                "quantity": n,
                "cost_price": 250,
                "warehouse_id": warehouse_id,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    // Page of two, then page of one; total is stable.
    let res = client
        .get(format!(
            "{}/api/items?page_index=0&page_size=2",
            srv.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["paging"]["total_count"], 3);
    assert_eq!(body["paging"]["total_pages"], 2);
    assert_eq!(body["paging"]["current_page"], 0);
    assert_eq!(body["paging"]["has_next"], true);
    assert_eq!(body["paging"]["has_previous"], false);

    let res = client
        .get(format!(
            "{}/api/items?page_index=1&page_size=2",
            srv.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["paging"]["total_count"], 3);

    // Filter narrows the counted set.
    let res = client
        .get(format!("{}/api/items?filter=item-1", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["paging"]["total_count"], 1);

    // The warehouse reports its item count.
    let res = client
        .get(format!("{}/api/warehouses/{warehouse_id}", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"]["items_count"], 3);

    // Unknown item id is a 404 envelope.
    let res = client
        .get(format!(
            "{}/api/items/00000000-0000-0000-0000-000000000000",
            srv.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error_messages"][0], "Warehouse item not found.");
}

#[tokio::test]
async fn admin_account_cannot_be_deleted() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.admin_token(&client).await;

    let res = client
        .get(format!("{}/api/users", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let admin_id = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["email"] == DEFAULT_ADMIN_EMAIL)
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let res = client
        .delete(format!("{}/api/users/{admin_id}", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error_messages"][0], "Admin user cannot be deleted.");
}

#[tokio::test]
async fn logs_endpoint_is_admin_only() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let admin_token = srv.admin_token(&client).await;

    // Create and log in as a non-admin user.
    let res = client
        .post(format!("{}/api/users", srv.base_url))
        .bearer_auth(&admin_token)
        .json(&json!({
            "email": "auditor@x.com",
            "full_name": "Audrey",
            "role": "Auditor",
            "active": true,
            "password": "pw",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = srv.login(&client, "auditor@x.com", "pw").await;
    let auditor_token = body["data"]["token"].as_str().unwrap().to_string();

    let res = client
        .get(format!("{}/api/logs", srv.base_url))
        .bearer_auth(&auditor_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The admin gets past the gate; no log file exists in the test run.
    let res = client
        .get(format!("{}/api/logs", srv.base_url))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_ids_are_bad_requests() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.admin_token(&client).await;

    let res = client
        .get(format!("{}/api/warehouses/not-a-uuid", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error_messages"][0], "Invalid warehouse id.");
}
