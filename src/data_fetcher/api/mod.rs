pub mod client;
pub mod fetch_utils;
pub mod http_client;
pub mod orchestrator;
pub mod urls;

pub use client::ApiClient;
pub use http_client::*;
pub use orchestrator::{Completion, IngestReport, PaginationOutcome, ingest_league, paginate_players};
pub use urls::*;
