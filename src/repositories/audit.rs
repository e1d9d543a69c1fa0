use std::sync::Arc;

use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::AuditEntry;

pub struct AuditRepository {
    storage: Arc<Storage>,
}

impl AuditRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl AuditRepository {
    pub async fn create(
        &self,
        item: &AuditEntry,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i64, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO registros_auditoria (usuario, acao, tabela, dados, time)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&item.usuario)
        .bind(&item.acao)
        .bind(&item.tabela)
        .bind(&item.dados)
        .bind(item.time)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    pub async fn find_by_table(&self, tabela: &str) -> Result<Vec<AuditEntry>, Error> {
        let entries: Vec<AuditEntry> = sqlx::query_as(
            r#"
            SELECT * FROM registros_auditoria
            WHERE tabela = $1
            ORDER BY id ASC
            "#,
        )
        .bind(tabela)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(entries)
    }
}
