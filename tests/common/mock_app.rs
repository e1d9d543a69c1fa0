use std::sync::Arc;

use axum::Router;
use time::{PrimitiveDateTime, UtcOffset};

use pluvio_server::app::build_router;
use pluvio_server::configs::{Database, SchemaManager, Storage};
use pluvio_server::models::{Reading, Station};

pub struct MockApp {
    pub storage: Arc<Storage>,
    pub router: Router,
}

impl MockApp {
    pub async fn new() -> Self {
        let storage = Arc::new(
            Storage::new(
                Database {
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        );

        // Tests run without weather enrichment and with a UTC wall clock.
        let router = build_router(storage.clone(), None, UtcOffset::UTC);

        Self { storage, router }
    }

    pub async fn create_test_station(&self, numero_serie: &str) -> Station {
        sqlx::query_as::<_, Station>(
            r#"
            INSERT INTO pluviometros
                (numero_serie, nome, endereco, numero, cidade, cep, estado, latitude, longitude)
                VALUES ($1, 'Pluviômetro Teste', NULL, NULL, 'Campinas', NULL, 'SP', -22.9, -47.06)
                RETURNING *;
            "#,
        )
        .bind(numero_serie)
        .fetch_one(self.storage.get_pool())
        .await
        .unwrap()
    }

    pub async fn create_test_reading(
        &self,
        pluviometro_id: i64,
        umidade: f64,
        data_hora: PrimitiveDateTime,
    ) -> Reading {
        sqlx::query_as::<_, Reading>(
            r#"
            INSERT INTO dados_pluviometros (pluviometro_id, umidade, chuva, temperatura, data_hora)
                VALUES ($1, $2, 0.0, 20.0, $3)
                RETURNING *;
            "#,
        )
        .bind(pluviometro_id)
        .bind(umidade)
        .bind(data_hora)
        .fetch_one(self.storage.get_pool())
        .await
        .unwrap()
    }
}
