//! Integration tests for `FeedClient` and `CatalogLoader`.
//!
//! Each test stands up a local `wiremock` server, so no real network traffic
//! is made.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use asistencia_core::{parse_seed, CatalogSource};
use asistencia_feed::{CatalogLoader, FeedClient, FeedError};

const FEED: &str = "\
nombre_proveedor,categoria,lat,lng,ciudad,provincia,numero_celular
Grúas Andinas,Grúa,-0.18,-78.47,Quito,Pichincha,0991234567
,Grúa,,,Quito,Pichincha,099
\"Clínica del Puerto, Norte\",Médica,-2.19,-79.89,Guayaquil,Guayas,0987654321
";

const SEED: &str = r"
providers:
  - name: Seguros Sierra
    category: Seguro
    city: Cuenca
    province: Azuay
    lat: -2.90
    lng: -79.00
";

fn test_client() -> FeedClient {
    FeedClient::new(5, "asistencia-test/0.1", 0, 0).expect("failed to build test FeedClient")
}

fn test_client_with_retries(max_retries: u32) -> FeedClient {
    FeedClient::new(5, "asistencia-test/0.1", max_retries, 0)
        .expect("failed to build test FeedClient")
}

async fn serve(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/feed.csv"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// FeedClient
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_text_returns_body() {
    let server = MockServer::start().await;
    serve(&server, 200, FEED).await;

    let text = test_client()
        .fetch_text(&format!("{}/feed.csv", server.uri()))
        .await
        .expect("fetch should succeed");

    assert!(text.starts_with("nombre_proveedor,"));
}

#[tokio::test]
async fn fetch_text_maps_404_to_not_found() {
    let server = MockServer::start().await;
    serve(&server, 404, "").await;

    let result = test_client()
        .fetch_text(&format!("{}/feed.csv", server.uri()))
        .await;

    assert!(
        matches!(result, Err(FeedError::NotFound { .. })),
        "expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_text_retries_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed.csv"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    serve(&server, 200, FEED).await;

    let result = test_client_with_retries(2)
        .fetch_text(&format!("{}/feed.csv", server.uri()))
        .await;

    assert!(result.is_ok(), "expected Ok after retry, got: {result:?}");
}

#[tokio::test]
async fn fetch_text_gives_up_without_retries() {
    let server = MockServer::start().await;
    serve(&server, 503, "").await;

    let result = test_client()
        .fetch_text(&format!("{}/feed.csv", server.uri()))
        .await;

    assert!(
        matches!(result, Err(FeedError::UnexpectedStatus { status: 503, .. })),
        "got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// CatalogLoader
// ---------------------------------------------------------------------------

#[tokio::test]
async fn loader_uses_feed_and_drops_rows_without_location() {
    let server = MockServer::start().await;
    serve(&server, 200, FEED).await;

    let loader = CatalogLoader::new(test_client(), format!("{}/feed.csv", server.uri()));
    let catalog = loader.load().await;

    assert_eq!(catalog.source(), CatalogSource::Feed);
    let names: Vec<&str> = catalog.providers().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Grúas Andinas", "Clínica del Puerto, Norte"]);
}

#[tokio::test]
async fn loader_falls_back_to_seed_when_feed_fails() {
    let server = MockServer::start().await;
    serve(&server, 404, "").await;

    let seed = parse_seed(SEED).expect("seed parses");
    let loader = CatalogLoader::new(test_client(), format!("{}/feed.csv", server.uri()))
        .with_seed(seed);
    let catalog = loader.load().await;

    assert_eq!(catalog.source(), CatalogSource::Seed);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.providers()[0].name, "Seguros Sierra");
}

#[tokio::test]
async fn loader_falls_back_to_seed_when_feed_has_no_usable_rows() {
    let server = MockServer::start().await;
    serve(
        &server,
        200,
        "nombre_proveedor,categoria,lat,lng\n,Grúa,,\nSin Mapa,Dental,0,0\n",
    )
    .await;

    let loader = CatalogLoader::new(test_client(), format!("{}/feed.csv", server.uri()));
    let catalog = loader.load().await;

    assert_eq!(catalog.source(), CatalogSource::Seed);
    assert!(catalog.is_empty(), "built-in seed never invents providers");
}

#[tokio::test]
async fn reloads_never_reuse_ids() {
    let server = MockServer::start().await;
    serve(&server, 200, FEED).await;

    let loader = CatalogLoader::new(test_client(), format!("{}/feed.csv", server.uri()));
    let first = loader.load().await;
    let second = loader.load().await;

    for p in first.providers() {
        assert!(second.get(&p.id).is_none(), "id {} reused across loads", p.id);
    }
}

#[tokio::test]
async fn seed_only_loader_regenerates_ids() {
    let seed = parse_seed(SEED).expect("seed parses");
    let loader = CatalogLoader::seed_only(test_client()).with_seed(seed);

    let first = loader.load().await;
    let second = loader.load().await;

    assert_eq!(first.source(), CatalogSource::Seed);
    assert_ne!(first.providers()[0].id, second.providers()[0].id);
}
