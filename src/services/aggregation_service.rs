use std::sync::Arc;

use serde::Serialize;
use sqlx::Error;
use time::{PrimitiveDateTime, Time};

use crate::configs::Storage;
use crate::models::data_hora_format;

/// Station merged with its newest reading. Stations that never reported
/// still appear, with the reading columns null.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct StationLatest {
    pub id: i64,
    pub numero_serie: String,
    pub nome: String,
    pub endereco: Option<String>,
    pub numero: Option<String>,
    pub cidade: String,
    pub cep: Option<String>,
    pub estado: String,
    pub latitude: f64,
    pub longitude: f64,
    pub umidade: Option<f64>,
    pub temperatura: Option<f64>,
    #[serde(with = "data_hora_format::option")]
    pub data_hora: Option<PrimitiveDateTime>,
}

/// One reading joined with its station's descriptive fields.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReadingWithStation {
    pub id: i64,
    pub pluviometro_id: i64,
    pub nome: String,
    pub numero_serie: String,
    pub latitude: f64,
    pub longitude: f64,
    pub cidade: String,
    pub umidade: f64,
    pub chuva: f64,
    pub temperatura: f64,
    #[serde(with = "data_hora_format")]
    pub data_hora: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadingSample {
    pub umidade: f64,
    pub temperatura: f64,
    pub chuva: f64,
    #[serde(with = "data_hora_format")]
    pub data_hora: PrimitiveDateTime,
}

/// A station's readings for the current day, station fields emitted once.
#[derive(Debug, Clone, Serialize)]
pub struct StationDay {
    pub id: i64,
    pub numero_serie: String,
    pub nome: String,
    pub cidade: String,
    pub estado: String,
    pub latitude: f64,
    pub longitude: f64,
    pub dados: Vec<ReadingSample>,
}

#[derive(sqlx::FromRow)]
struct TodayRow {
    pluviometro_id: i64,
    numero_serie: String,
    nome: String,
    cidade: String,
    estado: String,
    latitude: f64,
    longitude: f64,
    umidade: f64,
    temperatura: f64,
    chuva: f64,
    data_hora: PrimitiveDateTime,
}

/// Read-only projections over stations and readings. Empty result sets are
/// empty collections, never errors.
pub struct AggregationService {
    storage: Arc<Storage>,
}

impl AggregationService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Every station with its single newest reading. Ties on `data_hora`
    /// resolve to the lowest reading id so repeated calls agree.
    pub async fn latest_per_station(&self) -> Result<Vec<StationLatest>, Error> {
        let stations: Vec<StationLatest> = sqlx::query_as(
            r#"
            SELECT p.id, p.numero_serie, p.nome, p.endereco, p.numero, p.cidade,
                   p.cep, p.estado, p.latitude, p.longitude,
                   d.umidade, d.temperatura, d.data_hora
            FROM pluviometros p
            LEFT JOIN dados_pluviometros d ON d.id = (
                SELECT d2.id FROM dados_pluviometros d2
                WHERE d2.pluviometro_id = p.id
                ORDER BY d2.data_hora DESC, d2.id ASC
                LIMIT 1
            )
            ORDER BY p.id ASC
            "#,
        )
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(stations)
    }

    /// Every reading with its station's descriptive fields, oldest first.
    pub async fn all_readings_chronological(&self) -> Result<Vec<ReadingWithStation>, Error> {
        let readings: Vec<ReadingWithStation> = sqlx::query_as(
            r#"
            SELECT d.id, d.pluviometro_id, p.nome, p.numero_serie, p.latitude,
                   p.longitude, p.cidade, d.umidade, d.chuva, d.temperatura, d.data_hora
            FROM dados_pluviometros d
            JOIN pluviometros p ON p.id = d.pluviometro_id
            ORDER BY d.data_hora ASC, d.id ASC
            "#,
        )
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(readings)
    }

    /// Readings since local midnight, grouped per station. Stations without
    /// a qualifying reading are omitted.
    pub async fn today_grouped_by_station(
        &self,
        now_local: PrimitiveDateTime,
    ) -> Result<Vec<StationDay>, Error> {
        let day_start = PrimitiveDateTime::new(now_local.date(), Time::MIDNIGHT);

        let rows: Vec<TodayRow> = sqlx::query_as(
            r#"
            SELECT d.pluviometro_id, p.numero_serie, p.nome, p.cidade, p.estado,
                   p.latitude, p.longitude, d.umidade, d.temperatura, d.chuva, d.data_hora
            FROM dados_pluviometros d
            JOIN pluviometros p ON p.id = d.pluviometro_id
            WHERE d.data_hora >= $1
            ORDER BY d.pluviometro_id ASC, d.data_hora ASC, d.id ASC
            "#,
        )
        .bind(day_start)
        .fetch_all(self.storage.get_pool())
        .await?;

        let mut grouped: Vec<StationDay> = Vec::new();
        for row in rows {
            let sample = ReadingSample {
                umidade: row.umidade,
                temperatura: row.temperatura,
                chuva: row.chuva,
                data_hora: row.data_hora,
            };

            match grouped.last_mut() {
                Some(group) if group.id == row.pluviometro_id => group.dados.push(sample),
                _ => grouped.push(StationDay {
                    id: row.pluviometro_id,
                    numero_serie: row.numero_serie,
                    nome: row.nome,
                    cidade: row.cidade,
                    estado: row.estado,
                    latitude: row.latitude,
                    longitude: row.longitude,
                    dados: vec![sample],
                }),
            }
        }

        Ok(grouped)
    }
}
