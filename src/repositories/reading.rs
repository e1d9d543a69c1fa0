use std::sync::Arc;

use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Reading;

pub struct ReadingRepository {
    storage: Arc<Storage>,
}

impl ReadingRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl ReadingRepository {
    pub async fn create(
        &self,
        item: &Reading,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i64, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO dados_pluviometros (pluviometro_id, umidade, chuva, temperatura, data_hora)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(item.pluviometro_id)
        .bind(item.umidade)
        .bind(item.chuva)
        .bind(item.temperatura)
        .bind(item.data_hora)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Reading>, Error> {
        let reading: Option<Reading> =
            sqlx::query_as("SELECT * FROM dados_pluviometros WHERE id = $1")
                .bind(id)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(reading)
    }

    // Full series of one station, oldest first
    pub async fn find_by_station_id(&self, pluviometro_id: i64) -> Result<Vec<Reading>, Error> {
        let readings: Vec<Reading> = sqlx::query_as(
            r#"
            SELECT * FROM dados_pluviometros
            WHERE pluviometro_id = $1
            ORDER BY data_hora ASC, id ASC
            "#,
        )
        .bind(pluviometro_id)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(readings)
    }

    // Used by the delete-restrict rule
    pub async fn count_by_station_id(&self, pluviometro_id: i64) -> Result<i64, Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM dados_pluviometros WHERE pluviometro_id = $1")
                .bind(pluviometro_id)
                .fetch_one(self.storage.get_pool())
                .await?;

        Ok(count)
    }
}
