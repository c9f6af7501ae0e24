//! Normalization and z-score ranking of flattened player records.

pub mod categories;
pub mod engine;
pub mod normalize;

pub use categories::Category;
pub use engine::{
    CategoryZScores, PoolStats, RankedPlayerRecord, compute_pool_stats, compute_zscore,
    rank_players, top_ranked,
};
pub use normalize::{
    NormalizedPlayerRecord, normalize_count, normalize_percentage, normalize_player,
    normalize_players, parse_fraction,
};
