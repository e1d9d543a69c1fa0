mod aggregation_service;
mod ingestion_service;
mod weather_service;

pub use aggregation_service::{
    AggregationService, ReadingSample, ReadingWithStation, StationDay, StationLatest,
};
pub use ingestion_service::{IngestOutcome, IngestionService, ReadingSubmission};
pub use weather_service::{DailyForecast, Enrichment, WeatherService};

use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Wall-clock "now" in the deployment's configured timezone offset.
/// Reading timestamps are stored as naive local datetimes.
pub fn local_now(offset: UtcOffset) -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc().to_offset(offset);

    PrimitiveDateTime::new(now.date(), now.time())
}
