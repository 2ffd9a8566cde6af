use beerstock_api::app::{build_app, services::AppServices, BEERS_PATH};
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, fresh in-memory store, ephemeral port.
        let app = build_app(AppServices::in_memory());
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

    fn beers(&self) -> String {
        format!("{}{}", self.base_url, BEERS_PATH)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn brahma() -> serde_json::Value {
    json!({
        "name": "Brahma",
        "brand": "Ambev",
        "max": 50,
        "quantity": 10,
        "type": "LAGER",
    })
}

async fn create(client: &reqwest::Client, srv: &TestServer, body: serde_json::Value) -> serde_json::Value {
    let res = client.post(srv.beers()).json(&body).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_returns_created_beer() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create(&client, &srv, brahma()).await;
    assert_eq!(created["name"], "Brahma");
    assert_eq!(created["brand"], "Ambev");
    assert_eq!(created["type"], "LAGER");
    assert_eq!(created["quantity"], 10);
    assert!(created["id"].as_i64().is_some());
}

#[tokio::test]
async fn create_without_required_field_is_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut body = brahma();
    body["brand"] = serde_json::Value::Null;
    let res = client.post(srv.beers()).json(&body).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let mut body = brahma();
    body["name"] = json!("   ");
    let res = client.post(srv.beers()).json(&body).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_name_is_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create(&client, &srv, brahma()).await;
    let res = client.post(srv.beers()).json(&brahma()).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "already_exists");
}

#[tokio::test]
async fn get_by_name_and_list() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.beers()).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let empty: serde_json::Value = res.json().await.unwrap();
    assert_eq!(empty, json!([]));

    create(&client, &srv, brahma()).await;

    let res = client
        .get(format!("{}/Brahma", srv.beers()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let found: serde_json::Value = res.json().await.unwrap();
    assert_eq!(found["brand"], "Ambev");

    let res = client.get(srv.beers()).send().await.unwrap();
    let all: serde_json::Value = res.json().await.unwrap();
    assert_eq!(all[0]["name"], "Brahma");
    assert_eq!(all[0]["type"], "LAGER");

    let res = client
        .get(format!("{}/Skol", srv.beers()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stock_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create(&client, &srv, brahma()).await;
    let id = created["id"].as_i64().unwrap();

    let adjust = |op: &'static str, quantity: i64| {
        let client = client.clone();
        let url = format!("{}/{}/{}", srv.beers(), id, op);
        async move {
            client
                .patch(url)
                .json(&json!({ "quantity": quantity }))
                .send()
                .await
                .unwrap()
        }
    };

    let res = adjust("increment", 5).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["quantity"], 15);

    let res = adjust("increment", 40).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "capacity_exceeded");

    let res = adjust("decrement", 20).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insufficient_stock");

    let res = adjust("decrement", 15).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["quantity"], 0);

    let res = adjust("increment", 0).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .delete(format!("{}/{}", srv.beers(), id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .delete(format!("{}/{}", srv.beers(), id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/Brahma", srv.beers()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_or_malformed_ids() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .patch(format!("{}/999/increment", srv.beers()))
        .json(&json!({ "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(format!("{}/not-a-number", srv.beers()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
