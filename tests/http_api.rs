use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use moviefinder::catalog::Catalog;
use moviefinder::config::Config;
use moviefinder::recommend::{RecommendError, Recommender};
use moviefinder::server::{build_router, AppState};

const CATALOG: &str = r#"[
    {"movie_name": "Dune", "year": 2021, "genres": "Sci-Fi,Drama", "rating": 4.5},
    {"movie_name": "Dune Part Two", "year": 2024, "genres": "Sci-Fi", "rating": 4.8},
    {"title": "Heat", "year": 1995, "genres": "Crime,Drama", "rating": 3.9},
    {"movie_name": "Arrival", "year": 2016, "genres": "Sci-Fi,Drama"}
]"#;

/// Echoes the payload back inside a recommendation list.
struct EchoRecommender;

#[async_trait]
impl Recommender for EchoRecommender {
    async fn invoke(&self, payload: &Value) -> Result<Value, RecommendError> {
        Ok(json!({ "recommendations": [payload] }))
    }
}

struct BrokenRecommender;

#[async_trait]
impl Recommender for BrokenRecommender {
    async fn invoke(&self, _payload: &Value) -> Result<Value, RecommendError> {
        Err(RecommendError::EmptyOutput)
    }
}

struct TestApp {
    _dir: TempDir,
    router: Router,
}

fn make_app(catalog: Catalog, recommender: Arc<dyn Recommender>) -> TestApp {
    let dir = TempDir::new().expect("tmpdir");
    let frontend = dir.path().join("frontend");
    let data = dir.path().join("data");
    let images = dir.path().join("images");
    for d in [&frontend, &data, &images] {
        std::fs::create_dir_all(d).unwrap();
    }
    std::fs::write(frontend.join("index.html"), "<h1>movies</h1>").unwrap();
    std::fs::write(frontend.join("app.js"), "console.log('hi');").unwrap();
    std::fs::write(data.join("genres.json"), r#"["Drama"]"#).unwrap();
    std::fs::write(images.join("poster.txt"), "poster").unwrap();

    let mut config = Config::default();
    config.frontend = frontend.to_string_lossy().to_string();
    config.datadir = data.to_string_lossy().to_string();
    config.imagedir = images.to_string_lossy().to_string();

    let router = build_router(AppState::new(config, catalog, recommender));
    TestApp { _dir: dir, router }
}

fn default_app() -> TestApp {
    let catalog = Catalog::from_json("catalog.json", CATALOG).unwrap();
    make_app(catalog, Arc::new(EchoRecommender))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &TestApp, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &TestApp, req: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, req).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn search_by_name_and_year() {
    let app = default_app();
    let (status, body) =
        send_json(&app, post_json("/api/search", json!({"name": "dune", "year": 2021}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"recommendations": [
            {"title": "Dune", "year": 2021, "genres": "Sci-Fi,Drama", "rating": 4.5, "distance": 0}
        ]})
    );
}

#[tokio::test]
async fn search_without_constraints_returns_catalog_in_order() {
    let app = default_app();
    let (status, body) = send_json(&app, post_json("/api/search", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Dune", "Dune Part Two", "Heat", "Arrival"]);
}

#[tokio::test]
async fn search_missing_rating_is_omitted() {
    let app = default_app();
    let (_, body) = send_json(&app, post_json("/api/search", json!({"name": "arrival"}))).await;

    let hit = &body["recommendations"][0];
    assert_eq!(hit["title"], "Arrival");
    assert!(hit.get("rating").is_none());
    assert_eq!(hit["distance"], 0);
}

#[tokio::test]
async fn search_rating_threshold_as_string() {
    let app = default_app();
    let (_, body) =
        send_json(&app, post_json("/api/search", json!({"average_rating": "4.0"}))).await;

    assert_eq!(body["recommendations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn search_malformed_year_is_empty_not_error() {
    let app = default_app();
    let (status, body) =
        send_json(&app, post_json("/api/search", json!({"year": "next year"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"recommendations": []}));
}

#[tokio::test]
async fn search_bad_field_is_generic_500() {
    let app = default_app();
    let (status, body) = send_json(&app, post_json("/api/search", json!({"name": 42}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Server Error"}));
}

#[tokio::test]
async fn search_empty_catalog() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("db-movies-final.json");
    let catalog = Catalog::load_or_empty(missing.to_str().unwrap());
    let app = make_app(catalog, Arc::new(EchoRecommender));

    let (status, body) =
        send_json(&app, post_json("/api/search", json!({"name": "dune"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"recommendations": []}));
}

#[tokio::test]
async fn search_is_repeatable() {
    let app = default_app();
    let query = json!({"genre": "Drama", "average_rating": 3});

    let (_, first) = send(&app, post_json("/api/search", query.clone())).await;
    let (_, second) = send(&app, post_json("/api/search", query)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn recommend_relays_backend_output() {
    let app = default_app();
    let payload = json!({"genre": "Action|Sci-Fi", "year": 1999});
    let (status, body) = send_json(&app, post_json("/api/recommend", payload.clone())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"recommendations": [payload]}));
}

#[tokio::test]
async fn recommend_failure_is_empty_list() {
    let catalog = Catalog::from_json("catalog.json", CATALOG).unwrap();
    let app = make_app(catalog, Arc::new(BrokenRecommender));

    let (status, bytes) = send(&app, post_json("/api/recommend", json!({"genre": "Drama"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, br#"{"recommendations":[]}"#.to_vec());
}

#[cfg(unix)]
#[tokio::test]
async fn recommend_silent_script_is_empty_list() {
    use moviefinder::recommend::ScriptRecommender;

    let dir = TempDir::new().unwrap();
    let script = dir.path().join("predict.sh");
    std::fs::write(&script, "exit 0\n").unwrap();

    let rec = ScriptRecommender::new("sh", Some(script.to_string_lossy().to_string()));
    let app = make_app(Catalog::empty(), Arc::new(rec));

    let (status, body) = send_json(&app, post_json("/api/recommend", json!({"year": 2000}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"recommendations": []}));
}

#[tokio::test]
async fn static_files() {
    let app = default_app();

    let (status, bytes) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"<h1>movies</h1>".to_vec());

    let (status, bytes) = send(&app, get("/app.js")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"console.log('hi');".to_vec());

    let (status, bytes) = send(&app, get("/data/genres.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, br#"["Drama"]"#.to_vec());

    let (status, bytes) = send(&app, get("/images/poster.txt")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"poster".to_vec());

    let (status, _) = send(&app, get("/images/missing.png")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
