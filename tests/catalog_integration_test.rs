use garage_catalog::core::export::OutputFormat;
use garage_catalog::{
    source_for_location, CatalogError, CatalogLoader, GarageSession, HttpSource, LoadOutcome,
    LocalStorage, StorageSource, Tolerance,
};
use httpmock::prelude::*;
use std::time::Duration;
use tempfile::TempDir;

fn garage_document() -> serde_json::Value {
    serde_json::json!([
        {
            "_id": "1",
            "name": "Warehouse A",
            "location": { "lat": "47.13111", "long": "-61.54801" },
            "cars": {
                "location": "West wing",
                "vehicles": [
                    { "_id": 1, "make": "Volkswagen", "model": "Jetta III", "year_model": 1995,
                      "price": 12947.52, "licensed": true, "date_added": "2018-09-18" },
                    { "_id": 2, "make": "Chevrolet", "model": "Corvette", "year_model": 2004,
                      "price": 20019.64, "licensed": false, "date_added": "2018-01-27" },
                    { "_id": 3, "make": "Ford", "model": "Expedition EL", "year_model": 2008,
                      "price": 27323.42, "licensed": false, "date_added": "2018-07-03" }
                ]
            }
        },
        {
            "_id": "2",
            "name": "Warehouse B",
            "location": { "lat": "15.95386", "long": "7.06246" },
            "cars": {
                "location": "East wing",
                "vehicles": [
                    { "_id": 1, "make": "Mitsubishi", "model": "Montero", "year_model": 2002,
                      "price": 16564.57, "licensed": true, "date_added": "2017-11-21" },
                    { "_id": 2, "make": "Mazda", "model": "MX-5", "year_model": 2013,
                      "licensed": true, "date_added": "2017-06-30" }
                ]
            }
        }
    ])
}

fn loader_for(server: &MockServer, path: &str) -> CatalogLoader<HttpSource> {
    let source = HttpSource::new(server.url(path), Duration::from_secs(5)).unwrap();
    CatalogLoader::new(source)
}

#[tokio::test]
async fn test_lenient_http_load_sorts_and_reports_skips() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/warehouses.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(garage_document());
    });

    let loader = loader_for(&server, "/warehouses.json").with_tolerance(Tolerance::Lenient);
    let report = loader.load().await.unwrap();
    api_mock.assert();

    assert_eq!(report.warehouses.len(), 2);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.skipped[0].warehouse, "Warehouse B");
    assert_eq!(report.skipped[0].index, 1);

    let ids: Vec<&str> = report.warehouses[0]
        .vehicles
        .iter()
        .map(|v| v.id.as_str())
        .collect();
    assert_eq!(ids, vec!["2", "3", "1"]);
}

#[tokio::test]
async fn test_strict_http_load_rejects_document() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/warehouses.json");
        then.status(200).json_body(garage_document());
    });

    let err = loader_for(&server, "/warehouses.json")
        .load()
        .await
        .unwrap_err();
    match err {
        CatalogError::ParseError { message } => {
            assert!(message.contains("Warehouse B"), "{}", message);
            assert!(message.contains("price"), "{}", message);
        }
        other => panic!("expected ParseError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_fetch_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/failed");
        then.status(500);
    });

    let mut session = GarageSession::new();
    let result = session.load_from(&loader_for(&server, "/failed")).await;
    api_mock.assert();

    assert!(matches!(result, Err(CatalogError::FetchError { .. })));
    assert!(session.warehouses().is_empty());
    assert!(session.last_error().is_some());
}

#[tokio::test]
async fn test_unreachable_host_is_fetch_error() {
    let source = HttpSource::new("http://127.0.0.1:9/warehouses.json", Duration::from_secs(2)).unwrap();
    let err = CatalogLoader::new(source).load().await.unwrap_err();
    assert!(matches!(err, CatalogError::FetchError { .. }));
}

#[tokio::test]
async fn test_session_sorting_after_http_load() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/warehouses.json");
        then.status(200).json_body(garage_document());
    });

    let loader = loader_for(&server, "/warehouses.json").with_tolerance(Tolerance::Lenient);
    let mut session = GarageSession::new();
    let outcome = session.load_from(&loader).await.unwrap();
    assert_eq!(
        outcome,
        LoadOutcome::Applied {
            warehouses: 2,
            skipped: 1
        }
    );

    session.apply_sort_from_control("sortby-tab-0", "price-dsc").unwrap();
    let prices: Vec<f64> = session.warehouses()[0]
        .vehicles
        .iter()
        .map(|v| v.price)
        .collect();
    assert_eq!(prices, vec![27323.42, 20019.64, 12947.52]);

    let err = session.apply_sort(0, "horsepower-asc").unwrap_err();
    assert!(matches!(err, CatalogError::InvalidKeyError { .. }));
    assert_eq!(session.sort_spec(0).unwrap().to_string(), "price-dsc");
}

#[tokio::test]
async fn test_load_from_local_file_and_export_csv() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().to_str().unwrap().to_string();
    std::fs::write(
        temp_dir.path().join("warehouses.json"),
        serde_json::to_vec(&garage_document()).unwrap(),
    )
    .unwrap();

    let source = StorageSource::new(LocalStorage::new(base), "warehouses.json");
    let report = CatalogLoader::new(source)
        .with_tolerance(Tolerance::Lenient)
        .load()
        .await
        .unwrap();

    let csv = OutputFormat::Csv.render(&report.warehouses).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 1 + 4);
    assert!(lines[1].starts_with("Warehouse A,2,Chevrolet,Corvette,2004,2018-01-27"));
    assert!(lines[4].starts_with("Warehouse B,1,Mitsubishi"));
}

#[tokio::test]
async fn test_source_for_location_reads_files() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("garage.json");
    std::fs::write(&path, b"[]").unwrap();

    let source = source_for_location(path.to_str().unwrap(), Duration::from_secs(1)).unwrap();
    let report = CatalogLoader::new(source).load().await.unwrap();
    assert!(report.warehouses.is_empty());

    let missing = source_for_location(
        temp_dir.path().join("missing.json").to_str().unwrap(),
        Duration::from_secs(1),
    )
    .unwrap();
    assert!(matches!(
        CatalogLoader::new(missing).load().await,
        Err(CatalogError::FetchError { .. })
    ));
}
