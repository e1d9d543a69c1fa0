use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::Error;
use time::PrimitiveDateTime;

use crate::configs::Storage;
use crate::models::{Reading, data_hora_format};
use crate::repositories::{ReadingRepository, StationRepository};

/// One reading as reported by a field device, keyed by station serial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingSubmission {
    pub numero_serie: String,
    pub temperatura: Option<f64>,
    pub umidade: Option<f64>,
    pub chuva: Option<f64>,
    #[serde(default, with = "data_hora_format::option")]
    pub data_hora: Option<PrimitiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    pub numero_serie: String,
    pub accepted: bool,
    pub reason: Option<String>,
}

/// Best-effort batch append. An unknown serial skips that entry and the
/// batch carries on; there is no idempotency key, so resubmitting a batch
/// duplicates its rows.
pub struct IngestionService {
    storage: Arc<Storage>,
    stations: StationRepository,
    readings: ReadingRepository,
}

impl IngestionService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self {
            stations: StationRepository::new(storage.clone()),
            readings: ReadingRepository::new(storage.clone()),
            storage,
        }
    }

    pub async fn ingest(
        &self,
        batch: Vec<ReadingSubmission>,
        now_local: PrimitiveDateTime,
    ) -> Result<Vec<IngestOutcome>, Error> {
        let mut outcomes = Vec::with_capacity(batch.len());

        for submission in batch {
            let Some(station) = self.stations.find_by_serial(&submission.numero_serie).await?
            else {
                tracing::warn!(
                    numero_serie = %submission.numero_serie,
                    "skipping reading for unknown serial"
                );
                outcomes.push(IngestOutcome {
                    numero_serie: submission.numero_serie,
                    accepted: false,
                    reason: Some("numero_serie desconhecido".to_string()),
                });
                continue;
            };

            let reading = Reading {
                id: 0,
                pluviometro_id: station.id,
                umidade: submission.umidade.unwrap_or(0.0),
                chuva: submission.chuva.unwrap_or(0.0),
                temperatura: submission.temperatura.unwrap_or(0.0),
                data_hora: submission.data_hora.unwrap_or(now_local),
            };

            let mut tx = self.storage.get_pool().begin().await?;
            self.readings.create(&reading, &mut tx).await?;
            tx.commit().await?;

            outcomes.push(IngestOutcome {
                numero_serie: submission.numero_serie,
                accepted: true,
                reason: None,
            });
        }

        Ok(outcomes)
    }
}
