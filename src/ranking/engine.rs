// Z-score composite ranking over the nine categories.

use std::cmp::Ordering;
use tracing::{debug, warn};

use super::categories::Category;
use super::normalize::NormalizedPlayerRecord;
use crate::constants::ranking::STDEV_EPSILON;

/// Mean and standard deviation for a single category across the player pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolStats {
    pub mean: f64,
    pub stdev: f64,
}

/// Compute mean and population standard deviation (N denominator) for a
/// slice of values. An empty slice yields zeros.
pub fn compute_pool_stats(values: &[f64]) -> PoolStats {
    if values.is_empty() {
        return PoolStats {
            mean: 0.0,
            stdev: 0.0,
        };
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    PoolStats {
        mean,
        stdev: variance.sqrt(),
    }
}

/// Returns 0.0 when the standard deviation is approximately zero.
pub fn compute_zscore(value: f64, stats: &PoolStats) -> f64 {
    if stats.stdev < STDEV_EPSILON {
        return 0.0;
    }
    (value - stats.mean) / stats.stdev
}

/// Signed per-category contributions of one player. Turnovers are already
/// inverted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryZScores {
    values: [f64; Category::ALL.len()],
}

impl CategoryZScores {
    pub fn get(&self, category: Category) -> f64 {
        self.values[category as usize]
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlayerRecord {
    /// 1-based, unique and gapless.
    pub rank: usize,
    pub fantasy_score: f64,
    pub zscores: CategoryZScores,
    pub player: NormalizedPlayerRecord,
}

/// Pool statistics of every category, indexed like [`Category::ALL`].
pub fn category_pool_stats(players: &[NormalizedPlayerRecord]) -> [PoolStats; Category::ALL.len()] {
    Category::ALL.map(|category| {
        let values: Vec<f64> = players
            .iter()
            .map(|player| player.category_value(category))
            .collect();
        compute_pool_stats(&values)
    })
}

/// Scores and ranks the whole population.
///
/// Order is Fantasy_Score descending, then player key ascending. Players whose
/// score is not finite are left out.
pub fn rank_players(players: &[NormalizedPlayerRecord]) -> Vec<RankedPlayerRecord> {
    let pool = category_pool_stats(players);
    for (category, stats) in Category::ALL.iter().zip(pool.iter()) {
        debug!(
            "{}: mean {:.3}, stdev {:.3}",
            category.display_name(),
            stats.mean,
            stats.stdev
        );
    }

    let mut scored: Vec<RankedPlayerRecord> = players
        .iter()
        .filter_map(|player| {
            let values = Category::ALL.map(|category| {
                let z = compute_zscore(player.category_value(category), &pool[category as usize]);
                if category.is_negative() { -z } else { z }
            });
            let zscores = CategoryZScores { values };
            let fantasy_score = zscores.total();

            if !fantasy_score.is_finite() {
                warn!("Dropping {} with non-finite score", player.player_key);
                return None;
            }

            Some(RankedPlayerRecord {
                rank: 0,
                fantasy_score,
                zscores,
                player: player.clone(),
            })
        })
        .collect();

    scored.sort_by(|a, b| match b.fantasy_score.total_cmp(&a.fantasy_score) {
        Ordering::Equal => a.player.player_key.cmp(&b.player.player_key),
        other => other,
    });

    for (position, ranked) in scored.iter_mut().enumerate() {
        ranked.rank = position + 1;
    }

    scored
}

/// The best `n` of an already ranked list.
pub fn top_ranked(ranked: &[RankedPlayerRecord], n: usize) -> &[RankedPlayerRecord] {
    &ranked[..n.min(ranked.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    fn pool() -> Vec<NormalizedPlayerRecord> {
        vec![
            TestDataBuilder::normalized_player("428.p.1", [30, 10, 5, 2, 1, 3], Some(50), Some(80), 4),
            TestDataBuilder::normalized_player("428.p.2", [20, 5, 8, 1, 0, 1], Some(40), Some(90), 2),
            TestDataBuilder::normalized_player("428.p.3", [10, 15, 2, 3, 2, 0], None, Some(70), 3),
            TestDataBuilder::normalized_player("428.p.4", [25, 7, 6, 1, 1, 2], Some(45), None, 1),
        ]
    }

    #[test]
    fn test_compute_pool_stats_population() {
        let stats = compute_pool_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.stdev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_compute_pool_stats_empty() {
        assert_eq!(compute_pool_stats(&[]), PoolStats { mean: 0.0, stdev: 0.0 });
    }

    #[test]
    fn test_zscores_sum_to_zero_per_category() {
        let ranked = rank_players(&pool());
        for category in Category::ALL {
            let sum: f64 = ranked.iter().map(|r| r.zscores.get(category)).sum();
            assert!(sum.abs() < 1e-9, "{} sums to {sum}", category.display_name());
        }
    }

    #[test]
    fn test_zero_variance_category_scores_zero() {
        let players: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|key| TestDataBuilder::normalized_player(key, [10, 5, 5, 1, 1, 7], Some(50), Some(80), 2))
            .collect();
        let ranked = rank_players(&players);
        for record in &ranked {
            for category in Category::ALL {
                assert_eq!(record.zscores.get(category), 0.0);
            }
            assert_eq!(record.fantasy_score, 0.0);
        }
        let keys: Vec<_> = ranked.iter().map(|r| r.player.player_key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rank_is_bijection_ordered_by_score_then_key() {
        let ranked = rank_players(&pool());
        let ranks: Vec<_> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.fantasy_score > b.fantasy_score
                    || (a.fantasy_score == b.fantasy_score && a.player.player_key < b.player.player_key)
            );
        }
    }

    #[test]
    fn test_ties_break_on_player_key() {
        let players = vec![
            TestDataBuilder::normalized_player("428.p.20", [10, 0, 0, 0, 0, 0], None, None, 0),
            TestDataBuilder::normalized_player("428.p.3", [10, 0, 0, 0, 0, 0], None, None, 0),
            TestDataBuilder::normalized_player("428.p.100", [0, 0, 0, 0, 0, 0], None, None, 0),
        ];
        let ranked = rank_players(&players);
        let keys: Vec<_> = ranked.iter().map(|r| r.player.player_key.as_str()).collect();
        assert_eq!(keys, vec!["428.p.20", "428.p.3", "428.p.100"]);
    }

    #[test]
    fn test_turnovers_above_average_contribute_negatively() {
        let players = vec![
            TestDataBuilder::normalized_player("careless", [0, 0, 0, 0, 0, 0], None, None, 5),
            TestDataBuilder::normalized_player("careful", [0, 0, 0, 0, 0, 0], None, None, 1),
        ];
        let ranked = rank_players(&players);
        assert_eq!(ranked[0].player.player_key, "careful");
        assert!(ranked[1].zscores.get(Category::Turnovers) < 0.0);
        assert!((ranked[1].zscores.get(Category::Turnovers) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_three_player_hand_computed_scores() {
        // PTS 10/20/30 (mean 20, std sqrt(200/3)); every other category flat.
        let players = vec![
            TestDataBuilder::normalized_player("p1", [10, 4, 4, 1, 1, 1], Some(50), Some(50), 2),
            TestDataBuilder::normalized_player("p2", [20, 4, 4, 1, 1, 1], Some(50), Some(50), 2),
            TestDataBuilder::normalized_player("p3", [30, 4, 4, 1, 1, 1], Some(50), Some(50), 2),
        ];
        let std = (200.0_f64 / 3.0).sqrt();
        let ranked = rank_players(&players);

        assert_eq!(ranked[0].player.player_key, "p3");
        assert!((ranked[0].fantasy_score - 10.0 / std).abs() < 1e-9);
        assert_eq!(ranked[1].player.player_key, "p2");
        assert!(ranked[1].fantasy_score.abs() < 1e-9);
        assert_eq!(ranked[2].player.player_key, "p1");
        assert!((ranked[2].fantasy_score + 10.0 / std).abs() < 1e-9);
    }

    #[test]
    fn test_null_percentage_counts_as_zero() {
        let players = vec![
            TestDataBuilder::normalized_player("with", [0, 0, 0, 0, 0, 0], Some(50), None, 0),
            TestDataBuilder::normalized_player("without", [0, 0, 0, 0, 0, 0], None, None, 0),
        ];
        let ranked = rank_players(&players);
        assert_eq!(ranked[0].player.player_key, "with");
        assert!((ranked[0].zscores.get(Category::FieldGoalPct) - 1.0).abs() < 1e-12);
        assert!((ranked[1].zscores.get(Category::FieldGoalPct) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let players = pool();
        assert_eq!(rank_players(&players), rank_players(&players));
    }

    #[test]
    fn test_empty_population() {
        assert!(rank_players(&[]).is_empty());
    }

    #[test]
    fn test_top_ranked_truncates() {
        let ranked = rank_players(&pool());
        assert_eq!(top_ranked(&ranked, 2).len(), 2);
        assert_eq!(top_ranked(&ranked, 150).len(), 4);
        assert!(top_ranked(&ranked, 0).is_empty());
    }
}
