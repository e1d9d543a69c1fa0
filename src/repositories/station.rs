use std::sync::Arc;

use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Station;

pub struct StationRepository {
    storage: Arc<Storage>,
}

impl StationRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl StationRepository {
    // Register new station
    pub async fn create(
        &self,
        item: &Station,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i64, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO pluviometros
                (numero_serie, nome, endereco, numero, cidade, cep, estado, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&item.numero_serie)
        .bind(&item.nome)
        .bind(&item.endereco)
        .bind(&item.numero)
        .bind(&item.cidade)
        .bind(&item.cep)
        .bind(&item.estado)
        .bind(item.latitude)
        .bind(item.longitude)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Station>, Error> {
        let station: Option<Station> = sqlx::query_as("SELECT * FROM pluviometros WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(station)
    }

    // Serial lookup used by the ingestion path
    pub async fn find_by_serial(&self, numero_serie: &str) -> Result<Option<Station>, Error> {
        let station: Option<Station> =
            sqlx::query_as("SELECT * FROM pluviometros WHERE numero_serie = $1")
                .bind(numero_serie)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(station)
    }

    pub async fn find_all(&self) -> Result<Vec<Station>, Error> {
        let stations: Vec<Station> = sqlx::query_as("SELECT * FROM pluviometros ORDER BY id")
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(stations)
    }

    // Uniqueness probe; `exclude_id` lets an update keep its own serial
    pub async fn serial_taken(
        &self,
        numero_serie: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM pluviometros
            WHERE numero_serie = $1 AND id != $2
            "#,
        )
        .bind(numero_serie)
        .bind(exclude_id.unwrap_or(-1))
        .fetch_one(self.storage.get_pool())
        .await?;

        Ok(count > 0)
    }

    pub async fn update(
        &self,
        id: i64,
        item: &Station,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE pluviometros
            SET numero_serie = $1, nome = $2, endereco = $3, numero = $4,
                cidade = $5, cep = $6, estado = $7, latitude = $8, longitude = $9
            WHERE id = $10
            "#,
        )
        .bind(&item.numero_serie)
        .bind(&item.nome)
        .bind(&item.endereco)
        .bind(&item.numero)
        .bind(&item.cidade)
        .bind(&item.cep)
        .bind(&item.estado)
        .bind(item.latitude)
        .bind(item.longitude)
        .bind(id)
        .execute(&mut **transaction)
        .await?;

        Ok(())
    }

    pub async fn delete(
        &self,
        id: i64,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query("DELETE FROM pluviometros WHERE id = $1")
            .bind(id)
            .execute(&mut **transaction)
            .await?;

        Ok(())
    }
}
