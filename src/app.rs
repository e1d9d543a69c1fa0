use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use time::UtcOffset;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::{SchemaManager, Settings, Storage};
use crate::handles::*;
use crate::repositories::{AuditRepository, ReadingRepository, StationRepository};
use crate::services::{AggregationService, IngestionService, WeatherService};

pub async fn create_app(settings: &Arc<Settings>) -> Router {
    let storage = Arc::new(
        Storage::new(settings.database.clone(), SchemaManager::default())
            .await
            .unwrap(),
    );

    let weather = WeatherService::from_settings(&settings.weather).map(Arc::new);
    let utc_offset = UtcOffset::from_hms(settings.app.utc_offset_hours, 0, 0).unwrap();

    build_router(storage, weather, utc_offset)
}

pub fn build_router(
    storage: Arc<Storage>,
    weather: Option<Arc<WeatherService>>,
    utc_offset: UtcOffset,
) -> Router {
    let aggregation = Arc::new(AggregationService::new(storage.clone()));
    let ingestion = Arc::new(IngestionService::new(storage.clone()));

    let home = Router::new().route("/", get(dashboard)).with_state(DashboardState {
        aggregation: aggregation.clone(),
        utc_offset,
    });

    let stations = Router::new()
        .route("/pluviometro", get(list_stations))
        .route("/pluviometros", get(list_stations).post(create_station))
        .route("/pluviometros/:id/edit", get(edit_station))
        .route(
            "/pluviometros/:id",
            put(update_station).delete(delete_station),
        )
        .with_state(StationState {
            storage: storage.clone(),
            stations: Arc::new(StationRepository::new(storage.clone())),
            readings: Arc::new(ReadingRepository::new(storage.clone())),
            audit: Arc::new(AuditRepository::new(storage.clone())),
            aggregation: aggregation.clone(),
        });

    let readings = Router::new()
        .route("/pluviometros/dados", get(readings_feed))
        .route("/dados_pluviometros", post(ingest_readings))
        .with_state(ReadingState {
            aggregation,
            ingestion,
            weather,
            utc_offset,
        });

    Router::new()
        .merge(home)
        .merge(stations)
        .merge(readings)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
