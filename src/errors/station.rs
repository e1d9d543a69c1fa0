use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum StationError {
    #[error("Pluviômetro não encontrado")]
    NotFound,

    #[error("Pluviômetro possui leituras registradas e não pode ser excluído")]
    HasReadings,
}

impl StationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StationError::NotFound => StatusCode::NOT_FOUND,
            StationError::HasReadings => StatusCode::CONFLICT,
        }
    }
}
