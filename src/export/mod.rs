//! CSV artifacts written by a run and read back by the viewer.

pub mod player_stats;
pub mod rankings;

use std::path::Path;

use tokio::fs;
use tracing::info;

use crate::error::AppError;

pub use player_stats::{player_stats_csv, write_player_stats_csv};
pub use rankings::{
    RankingFilter, RankingRow, RankingTable, rankings_csv, read_rankings_csv, write_rankings_csv,
};

/// Finishes an in-memory CSV writer and returns its bytes.
fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, AppError> {
    writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))
}

/// Writes `contents` next to `path` and renames it into place.
async fn write_artifact(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).await?;
    }

    let tmp = path.with_extension("csv.tmp");
    fs::write(&tmp, contents).await?;
    fs::rename(&tmp, path).await?;

    info!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}
