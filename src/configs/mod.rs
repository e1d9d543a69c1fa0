mod schema;
mod settings;
mod storage;

pub use schema::SchemaManager;
pub use settings::{App, Database, Settings, Weather};
pub use storage::Storage;
