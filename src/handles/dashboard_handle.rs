use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde_json::json;
use time::UtcOffset;

use crate::errors::ApiError;
use crate::services::{AggregationService, local_now};

#[derive(Clone)]
pub struct DashboardState {
    pub aggregation: Arc<AggregationService>,
    pub utc_offset: UtcOffset,
}

/// Home dashboard: today's readings grouped per station.
pub async fn dashboard(State(state): State<DashboardState>) -> Result<impl IntoResponse, ApiError> {
    let dados_pluviometros = state
        .aggregation
        .today_grouped_by_station(local_now(state.utc_offset))
        .await?;

    Ok(Json(json!({
        "dados_pluviometros": dados_pluviometros,
    })))
}
