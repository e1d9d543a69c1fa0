use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use pluvio_server::models::Reading;

mod common;
use common::mock_app::MockApp;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn ingest_request(payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri("/dados_pluviometros")
        .method(Method::POST)
        .header("Content-Type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn station_readings(app: &MockApp, pluviometro_id: i64) -> Vec<Reading> {
    sqlx::query_as(
        "SELECT * FROM dados_pluviometros WHERE pluviometro_id = $1 ORDER BY data_hora ASC",
    )
    .bind(pluviometro_id)
    .fetch_all(app.storage.get_pool())
    .await
    .unwrap()
}

#[tokio::test]
async fn test_ingest_creates_reading_with_exact_values() {
    let app = MockApp::new().await;
    let station = app.create_test_station("X123").await;

    let response = app
        .router
        .clone()
        .oneshot(ingest_request(json!([{
            "numero_serie": "X123",
            "temperatura": 22.5,
            "umidade": 60.0,
            "chuva": 0.0,
            "data_hora": "2024-01-01T10:00:00",
        }])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["results"][0]["accepted"], json!(true));

    let readings = station_readings(&app, station.id).await;
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].temperatura, 22.5);
    assert_eq!(readings[0].umidade, 60.0);
    assert_eq!(readings[0].chuva, 0.0);
    assert_eq!(
        readings[0].data_hora,
        time::macros::datetime!(2024-01-01 10:00:00)
    );
}

#[tokio::test]
async fn test_ingest_unknown_serial_creates_no_row_and_still_acks_ok() {
    let app = MockApp::new().await;
    let station = app.create_test_station("X123").await;

    let response = app
        .router
        .clone()
        .oneshot(ingest_request(json!([{
            "numero_serie": "ZZZZ",
            "temperatura": 18.0,
        }])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["results"][0]["accepted"], json!(false));
    assert!(body["results"][0]["reason"].is_string());

    assert!(station_readings(&app, station.id).await.is_empty());
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dados_pluviometros")
        .fetch_one(app.storage.get_pool())
        .await
        .unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_ingest_defaults_missing_fields_to_zero_and_now() {
    let app = MockApp::new().await;
    let station = app.create_test_station("X124").await;

    let response = app
        .router
        .clone()
        .oneshot(ingest_request(json!([{"numero_serie": "X124"}])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let readings = station_readings(&app, station.id).await;
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].temperatura, 0.0);
    assert_eq!(readings[0].umidade, 0.0);
    assert_eq!(readings[0].chuva, 0.0);

    // Defaulted timestamp is the insertion moment, not some epoch zero.
    let now = time::OffsetDateTime::now_utc();
    let stored = readings[0].data_hora.assume_utc();
    assert!((now - stored).whole_minutes().abs() < 5);
}

#[tokio::test]
async fn test_ingest_mixed_batch_keeps_accepting_after_a_skip() {
    let app = MockApp::new().await;
    let station = app.create_test_station("X125").await;

    let response = app
        .router
        .clone()
        .oneshot(ingest_request(json!([
            {"numero_serie": "ZZZZ", "umidade": 80.0},
            {"numero_serie": "X125", "umidade": 75.0, "data_hora": "2024-01-06T09:05:00"},
            {"numero_serie": "X125", "umidade": 76.0, "data_hora": "2024-01-06T09:10:00"},
        ])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["accepted"], json!(false));
    assert_eq!(results[1]["accepted"], json!(true));
    assert_eq!(results[2]["accepted"], json!(true));

    assert_eq!(station_readings(&app, station.id).await.len(), 2);
}

#[tokio::test]
async fn test_resubmitting_a_batch_duplicates_rows() {
    let app = MockApp::new().await;
    let station = app.create_test_station("X126").await;

    let payload = json!([{
        "numero_serie": "X126",
        "umidade": 50.0,
        "data_hora": "2024-01-07T12:00:00",
    }]);

    for _ in 0..2 {
        let response = app
            .router
            .clone()
            .oneshot(ingest_request(payload.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // No idempotency key: the second submission lands as a second row.
    assert_eq!(station_readings(&app, station.id).await.len(), 2);
}
