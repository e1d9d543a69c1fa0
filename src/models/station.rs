use serde::{Deserialize, Serialize};

use crate::models::Table;

/// A registered rain gauge. `numero_serie` is the identifier field devices
/// report under; the numeric id never leaves the server.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Station {
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
}

#[derive(Clone)]
pub struct StationTable;

impl Table for StationTable {
    fn name(&self) -> &'static str {
        "pluviometros"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS pluviometros (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                numero_serie VARCHAR(100) NOT NULL UNIQUE,
                nome VARCHAR(255) NOT NULL,
                endereco VARCHAR(255),
                numero VARCHAR(20),
                cidade VARCHAR(255) NOT NULL,
                cep VARCHAR(20),
                estado CHAR(2) NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS pluviometros;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
