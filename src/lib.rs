//! Yahoo Fantasy Basketball ranking library
//!
//! This library ingests season statistics for every player of a Yahoo
//! Fantasy NBA league, normalizes the stat encodings and ranks the players
//! with a nine-category z-score model.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fantasy_hoops_ranker::auth::{AuthorizationMode, CredentialFile, OAuthClient, TokenStore};
//! use fantasy_hoops_ranker::config::Config;
//! use fantasy_hoops_ranker::data_fetcher::api::{ApiClient, create_http_client_with_timeout};
//! use fantasy_hoops_ranker::pipeline::{RunOptions, run_ranking};
//! use fantasy_hoops_ranker::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let http = create_http_client_with_timeout(config.http_timeout_seconds)?;
//!     let tokens = TokenStore::new(
//!         CredentialFile::new(config.credential_path()),
//!         OAuthClient::new(http.clone(), &config),
//!         AuthorizationMode::Interactive,
//!     );
//!     let mut client = ApiClient::new(http, config.api_base_url.clone(), tokens);
//!
//!     let options = RunOptions {
//!         league_key: "428.l.12345".to_string(),
//!         page_size: config.page_size,
//!         top_n: config.top_n,
//!         output_dir: config.output_dir.clone().into(),
//!     };
//!     let summary = run_ranking(&mut client, &options)
//!         .await
//!         .map_err(|failure| failure.source)?;
//!     println!("Ranked {} players", summary.ranked);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod ranking;
pub mod table_view;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use auth::{Credential, TokenProvider, TokenStore};
pub use config::Config;
pub use data_fetcher::{ApiClient, Completion, IngestReport, PlayerRecord, StatCategoryMap, StatValue};
pub use error::{AppError, ErrorKind};
pub use ranking::{NormalizedPlayerRecord, RankedPlayerRecord, rank_players};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
