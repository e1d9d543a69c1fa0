use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::json;
use time::UtcOffset;

use crate::errors::ApiError;
use crate::services::{
    AggregationService, Enrichment, IngestionService, ReadingSubmission, ReadingWithStation,
    WeatherService, local_now,
};

#[derive(Clone)]
pub struct ReadingState {
    pub aggregation: Arc<AggregationService>,
    pub ingestion: Arc<IngestionService>,
    pub weather: Option<Arc<WeatherService>>,
    pub utc_offset: UtcOffset,
}

#[derive(Debug, Serialize)]
pub struct FeedItem {
    #[serde(flatten)]
    pub reading: ReadingWithStation,
    pub enrichment: Option<Enrichment>,
}

/// Chronological reading history across all stations. Enrichment rides
/// along when the weather service is enabled, and degrades to null when it
/// is disabled or the external call fails.
pub async fn readings_feed(
    State(state): State<ReadingState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state.aggregation.all_readings_chronological().await?;

    let mut per_station: HashMap<i64, Option<Enrichment>> = HashMap::new();
    let mut data = Vec::with_capacity(rows.len());

    for row in rows {
        let enrichment = match &state.weather {
            Some(weather) => {
                if let Some(cached) = per_station.get(&row.pluviometro_id) {
                    cached.clone()
                } else {
                    let fetched = match weather.fetch(row.latitude, row.longitude).await {
                        Ok(enrichment) => Some(enrichment),
                        Err(error) => {
                            tracing::warn!(
                                pluviometro_id = row.pluviometro_id,
                                error = %error,
                                "weather enrichment unavailable"
                            );
                            None
                        }
                    };
                    per_station.insert(row.pluviometro_id, fetched.clone());
                    fetched
                }
            }
            None => None,
        };

        data.push(FeedItem {
            reading: row,
            enrichment,
        });
    }

    Ok(Json(json!({
        "status": "success",
        "data": data,
    })))
}

/// Batch ingestion from field devices. The top-level status stays "ok" no
/// matter how many entries were skipped; per-item outcomes carry the detail.
pub async fn ingest_readings(
    State(state): State<ReadingState>,
    Json(batch): Json<Vec<ReadingSubmission>>,
) -> Result<impl IntoResponse, ApiError> {
    let results = state
        .ingestion
        .ingest(batch, local_now(state.utc_offset))
        .await?;

    Ok(Json(json!({
        "status": "ok",
        "results": results,
    })))
}
