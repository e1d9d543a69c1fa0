use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::models::{Table, data_hora_format};

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reading {
    pub id: i64,
    pub pluviometro_id: i64,
    pub umidade: f64,
    pub chuva: f64,
    pub temperatura: f64,
    #[serde(with = "data_hora_format")]
    pub data_hora: PrimitiveDateTime,
}

#[derive(Clone)]
pub struct ReadingTable;

impl Table for ReadingTable {
    fn name(&self) -> &'static str {
        "dados_pluviometros"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS dados_pluviometros (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                pluviometro_id INTEGER NOT NULL,
                umidade REAL NOT NULL,
                chuva REAL NOT NULL,
                temperatura REAL NOT NULL,
                data_hora DATETIME NOT NULL,
                FOREIGN KEY (pluviometro_id) REFERENCES pluviometros (id)
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS dados_pluviometros;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["pluviometros"]
    }
}
