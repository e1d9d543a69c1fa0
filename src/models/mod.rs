mod audit;
mod reading;
mod station;

pub use audit::{AuditEntry, AuditTable};
pub use reading::{Reading, ReadingTable};
pub use station::{Station, StationTable};

// Reading timestamps are naive local wall-clock values, reported by field
// devices as `2024-01-01T10:00:00`.
time::serde::format_description!(
    pub data_hora_format,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]"
);

pub trait Table {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;

    /// The dependencies of the table
    fn dependencies(&self) -> Vec<&'static str>;
}
