use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use super::Table;

/// One audited mutation. `dados` holds the payload or pre-delete snapshot.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuditEntry {
    pub id: i64,
    pub usuario: String,
    pub acao: String,
    pub tabela: String,
    pub dados: Value,
    pub time: OffsetDateTime,
}

#[derive(Clone)]
pub struct AuditTable;

impl Table for AuditTable {
    fn name(&self) -> &'static str {
        "registros_auditoria"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS registros_auditoria (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                usuario VARCHAR(255) NOT NULL,
                acao VARCHAR(50) NOT NULL,
                tabela VARCHAR(255) NOT NULL,
                dados JSON NOT NULL DEFAULT '{}',
                time TIMESTAMP NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS registros_auditoria;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
