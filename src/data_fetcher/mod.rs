pub mod api;
pub mod models;
pub mod processors;

pub use api::{ApiClient, Completion, IngestReport, ingest_league};
pub use models::{PlayerRecord, StatValue};
pub use processors::StatCategoryMap;
