use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use server::dto::{ErrorResponse, ItemResponse};
use server::routes;
use server::state::AppState;
use service::items::MemoryItemStore;

struct TestApp {
    base_url: String,
    store: Arc<MemoryItemStore>,
    shutdown: CancellationToken,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let store = Arc::new(MemoryItemStore::new());
    let shutdown = CancellationToken::new();
    let state = AppState::new(store.clone(), Duration::from_secs(5), shutdown.clone());

    let app = routes::build_router(state);
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, store, shutdown })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn health_ok() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn create_returns_201_with_item() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(format!("{}/item", app.base_url))
        .json(&json!({"name": "Alex"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let body = res.json::<ItemResponse>().await?;
    assert_eq!(body.status, "Create OK");
    let item = body.item.expect("item in response");
    assert_eq!(item.id, 1);
    assert_eq!(item.name, "Alex");
    Ok(())
}

#[tokio::test]
async fn create_empty_name_is_bad_request() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    for body in [json!({"name": ""}), json!({})] {
        let res = c.post(format!("{}/item", app.base_url)).json(&body).send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
        let err = res.json::<ErrorResponse>().await?;
        assert_eq!(err.error, "bad request");
    }
    assert_eq!(app.store.next_id().await, 1);
    Ok(())
}

#[tokio::test]
async fn create_malformed_body_is_bad_request() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/item", app.base_url))
        .json(&json!({"name": "Alex", "age": 3}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c
        .post(format!("{}/item", app.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<ErrorResponse>().await?.error, "bad request");

    assert!(app.store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn get_and_delete_missing_are_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(format!("{}/item/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<ErrorResponse>().await?.error, "not found");

    // repeated deletes of an absent id keep answering 404
    for _ in 0..2 {
        let res = c.delete(format!("{}/item/1", app.base_url)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    }
    Ok(())
}

#[tokio::test]
async fn invalid_ids_are_bad_request() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    for id in ["0", "-5", "abc"] {
        let res = c.get(format!("{}/item/{}", app.base_url, id)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST, "get {id}");
        let res = c.delete(format!("{}/item/{}", app.base_url, id)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST, "delete {id}");
    }
    Ok(())
}

#[tokio::test]
async fn crud_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(format!("{}/item", app.base_url)).json(&json!({"name": "Alex"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let id = res.json::<ItemResponse>().await?.item.expect("item").id;

    let res = c.get(format!("{}/item/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<ItemResponse>().await?;
    assert_eq!(body.status, "Get OK");
    assert_eq!(body.item.expect("item").name, "Alex");

    let res = c.delete(format!("{}/item/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, json!({"status": "Delete OK"}));

    let res = c.get(format!("{}/item/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_crud_flow() -> anyhow::Result<()> {
    const N: usize = 10;
    let app = start_server().await?;
    let c = client();
    let base = app.base_url.clone();

    let mut set = JoinSet::new();
    for i in 0..N {
        let (c, base) = (c.clone(), base.clone());
        set.spawn(async move {
            let res = c.post(format!("{base}/item")).json(&json!({"name": format!("input-{i}")})).send().await?;
            anyhow::ensure!(res.status() == HttpStatusCode::CREATED, "create status {}", res.status());
            let body = res.json::<ItemResponse>().await?;
            body.item.map(|item| item.id).ok_or_else(|| anyhow::anyhow!("missing item"))
        });
    }
    let mut ids = Vec::with_capacity(N);
    while let Some(res) = set.join_next().await {
        ids.push(res??);
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), N);

    let mut gets = JoinSet::new();
    for id in ids.clone() {
        let (c, base) = (c.clone(), base.clone());
        gets.spawn(async move { c.get(format!("{base}/item/{id}")).send().await.map(|r| r.status()) });
    }
    while let Some(res) = gets.join_next().await {
        assert_eq!(res??, HttpStatusCode::OK);
    }

    let mut deletes = JoinSet::new();
    for id in ids {
        let (c, base) = (c.clone(), base.clone());
        deletes.spawn(async move { c.delete(format!("{base}/item/{id}")).send().await.map(|r| r.status()) });
    }
    while let Some(res) = deletes.join_next().await {
        assert_eq!(res??, HttpStatusCode::OK);
    }

    assert!(app.store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn requests_after_shutdown_signal_fail_with_500() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(format!("{}/item", app.base_url)).json(&json!({"name": "Alex"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    app.shutdown.cancel();

    let res = c.get(format!("{}/item/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json::<ErrorResponse>().await?.error, "internal server error");

    let res = c.post(format!("{}/item", app.base_url)).json(&json!({"name": "Bob"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.store.next_id().await, 2);
    Ok(())
}
