use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;

use crate::configs::Storage;
use crate::errors::{ApiError, StationError, ValidationError};
use crate::handles::Actor;
use crate::models::{AuditEntry, Station};
use crate::repositories::{AuditRepository, ReadingRepository, StationRepository};
use crate::services::AggregationService;

/// Station registration form. All fields optional at the wire level so
/// missing ones surface as field errors instead of a body rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationForm {
    pub nome: Option<String>,
    pub codigo: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub endereco: Option<String>,
    pub numero: Option<String>,
    pub cep: Option<String>,
}

impl StationForm {
    pub fn validate(&self) -> Result<Station, ValidationError> {
        let mut errors = ValidationError::new();

        require_text(&mut errors, "nome", &self.nome, 255);
        require_text(&mut errors, "codigo", &self.codigo, 100);
        require_text(&mut errors, "cidade", &self.cidade, 255);

        if self.latitude.is_none() {
            errors.push("latitude", "campo obrigatório e numérico");
        }
        if self.longitude.is_none() {
            errors.push("longitude", "campo obrigatório e numérico");
        }

        match &self.estado {
            Some(estado) if estado.chars().count() != 2 => {
                errors.push("estado", "deve ter exatamente 2 caracteres");
            }
            Some(_) => {}
            None => errors.push("estado", "campo obrigatório"),
        }

        cap_text(&mut errors, "endereco", &self.endereco, 255);
        cap_text(&mut errors, "numero", &self.numero, 20);
        cap_text(&mut errors, "cep", &self.cep, 20);

        errors.into_result()?;

        Ok(Station {
            id: 0,
            numero_serie: self.codigo.clone().unwrap_or_default(),
            nome: self.nome.clone().unwrap_or_default(),
            endereco: self.endereco.clone(),
            numero: self.numero.clone(),
            cidade: self.cidade.clone().unwrap_or_default(),
            cep: self.cep.clone(),
            estado: self.estado.clone().unwrap_or_default(),
            latitude: self.latitude.unwrap_or_default(),
            longitude: self.longitude.unwrap_or_default(),
        })
    }
}

fn require_text(
    errors: &mut ValidationError,
    field: &'static str,
    value: &Option<String>,
    max: usize,
) {
    match value {
        Some(text) if text.trim().is_empty() => errors.push(field, "campo obrigatório"),
        Some(text) if text.chars().count() > max => {
            errors.push(field, format!("máximo de {max} caracteres"));
        }
        Some(_) => {}
        None => errors.push(field, "campo obrigatório"),
    }
}

fn cap_text(
    errors: &mut ValidationError,
    field: &'static str,
    value: &Option<String>,
    max: usize,
) {
    if let Some(text) = value {
        if text.chars().count() > max {
            errors.push(field, format!("máximo de {max} caracteres"));
        }
    }
}

#[derive(Clone)]
pub struct StationState {
    pub storage: Arc<Storage>,
    pub stations: Arc<StationRepository>,
    pub readings: Arc<ReadingRepository>,
    pub audit: Arc<AuditRepository>,
    pub aggregation: Arc<AggregationService>,
}

fn log_persistence_error(actor: &Actor, acao: &str, dados: &StationForm, error: &sqlx::Error) {
    tracing::error!(
        usuario = %actor.0,
        tabela = "pluviometros",
        acao = acao,
        dados = ?dados,
        error = %error,
        "persistence failure"
    );
}

pub async fn list_stations(
    State(state): State<StationState>,
) -> Result<impl IntoResponse, ApiError> {
    let stations = state.aggregation.latest_per_station().await?;

    Ok(Json(stations))
}

pub async fn edit_station(
    Path(id): Path<i64>,
    State(state): State<StationState>,
) -> Result<impl IntoResponse, ApiError> {
    let station = state
        .stations
        .find_by_id(id)
        .await?
        .ok_or(StationError::NotFound)?;

    Ok(Json(station))
}

pub async fn create_station(
    State(state): State<StationState>,
    actor: Actor,
    Json(form): Json<StationForm>,
) -> Result<impl IntoResponse, ApiError> {
    let mut station = form.validate()?;

    if state.stations.serial_taken(&station.numero_serie, None).await? {
        let mut errors = ValidationError::new();
        errors.push("codigo", "numero_serie já cadastrado");
        return Err(errors.into());
    }

    let mut tx = state
        .storage
        .get_pool()
        .begin()
        .await
        .inspect_err(|e| log_persistence_error(&actor, "criacao", &form, e))?;
    let id = state
        .stations
        .create(&station, &mut tx)
        .await
        .inspect_err(|e| log_persistence_error(&actor, "criacao", &form, e))?;
    tx.commit()
        .await
        .inspect_err(|e| log_persistence_error(&actor, "criacao", &form, e))?;

    station.id = id;

    tracing::info!(
        usuario = %actor.0,
        tabela = "pluviometros",
        acao = "criacao",
        id = id,
        numero_serie = %station.numero_serie,
        "station registered"
    );

    Ok((StatusCode::CREATED, Json(station)))
}

pub async fn update_station(
    Path(id): Path<i64>,
    State(state): State<StationState>,
    actor: Actor,
    Json(form): Json<StationForm>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .stations
        .find_by_id(id)
        .await?
        .ok_or(StationError::NotFound)?;

    let mut station = form.validate()?;

    // The create-path uniqueness rule applies on update too, minus own row.
    if state
        .stations
        .serial_taken(&station.numero_serie, Some(id))
        .await?
    {
        let mut errors = ValidationError::new();
        errors.push("codigo", "numero_serie já cadastrado");
        return Err(errors.into());
    }

    let mut tx = state
        .storage
        .get_pool()
        .begin()
        .await
        .inspect_err(|e| log_persistence_error(&actor, "atualizacao", &form, e))?;
    state
        .stations
        .update(id, &station, &mut tx)
        .await
        .inspect_err(|e| log_persistence_error(&actor, "atualizacao", &form, e))?;
    tx.commit()
        .await
        .inspect_err(|e| log_persistence_error(&actor, "atualizacao", &form, e))?;

    station.id = id;

    tracing::info!(
        usuario = %actor.0,
        tabela = "pluviometros",
        acao = "atualizacao",
        id = id,
        "station updated"
    );

    Ok(Json(station))
}

pub async fn delete_station(
    Path(id): Path<i64>,
    State(state): State<StationState>,
    actor: Actor,
) -> Result<impl IntoResponse, ApiError> {
    let Some(station) = state.stations.find_by_id(id).await? else {
        tracing::warn!(
            usuario = %actor.0,
            tabela = "pluviometros",
            acao = "exclusao",
            id = id,
            "station not found for deletion"
        );
        return Err(StationError::NotFound.into());
    };

    // Readings reference the station by id; deletion would orphan the series.
    if state.readings.count_by_station_id(id).await? > 0 {
        return Err(StationError::HasReadings.into());
    }

    let snapshot =
        serde_json::to_value(&station).map_err(|e| ApiError::InternalError(e.into()))?;

    let mut tx = state.storage.get_pool().begin().await?;
    state
        .audit
        .create(
            &AuditEntry {
                id: 0,
                usuario: actor.0.clone(),
                acao: "exclusao".to_string(),
                tabela: "pluviometros".to_string(),
                dados: snapshot,
                time: OffsetDateTime::now_utc(),
            },
            &mut tx,
        )
        .await?;
    state.stations.delete(id, &mut tx).await?;
    tx.commit().await?;

    tracing::info!(
        usuario = %actor.0,
        tabela = "pluviometros",
        acao = "exclusao",
        id = id,
        numero_serie = %station.numero_serie,
        "station deleted"
    );

    Ok(Json(json!({
        "status": "success",
        "message": "Pluviômetro excluído com sucesso."
    })))
}
