mod audit;
mod reading;
mod station;

pub use audit::AuditRepository;
pub use reading::ReadingRepository;
pub use station::StationRepository;
