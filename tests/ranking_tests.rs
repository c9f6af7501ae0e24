//! Ranking from flattened records, checked against hand-computed z-scores.

use fantasy_hoops_ranker::data_fetcher::models::PlayerRecord;
use fantasy_hoops_ranker::ranking::{Category, normalize_players, rank_players};
use fantasy_hoops_ranker::testing_utils::TestDataBuilder;

const TOLERANCE: f64 = 1e-9;

fn three_player_pool() -> Vec<PlayerRecord> {
    vec![
        TestDataBuilder::player_record(
            "428.p.1",
            "Low Scorer",
            &[
                ("PTS", "10"),
                ("REB", "5"),
                ("AST", "2"),
                ("ST", "1"),
                ("BLK", "0"),
                ("3PTM", "1"),
                ("FG%", ".400"),
                ("FT%", ".800"),
                ("TO", "3"),
            ],
        ),
        TestDataBuilder::player_record(
            "428.p.2",
            "No Free Throws",
            &[
                ("PTS", "20"),
                ("REB", "5"),
                ("AST", "4"),
                ("ST", "1"),
                ("BLK", "1"),
                ("3PTM", "2"),
                ("FG%", ".500"),
                ("FT%", "-"),
                ("TO", "1"),
            ],
        ),
        TestDataBuilder::player_record(
            "428.p.3",
            "High Scorer",
            &[
                ("PTS", "30"),
                ("REB", "5"),
                ("AST", "6"),
                ("ST", "1"),
                ("BLK", "2"),
                ("3PTM", "3"),
                ("FG%", ".600"),
                ("FT%", ".900"),
                ("TO", "2"),
            ],
        ),
    ]
}

/// FT% of the pool is 80, null (counted as 0) and 90.
fn free_throw_zscores() -> [f64; 3] {
    let values = [80.0, 0.0, 90.0];
    let mean = values.iter().sum::<f64>() / 3.0;
    let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 3.0).sqrt();
    values.map(|v| (v - mean) / std)
}

#[test]
fn test_three_player_scores_match_hand_computation() {
    // Every evenly spaced 3-value category gives z-scores of -k, 0, +k.
    let k = 1.5f64.sqrt();
    let ft = free_throw_zscores();

    let ranked = rank_players(&normalize_players(&three_player_pool()));
    assert_eq!(ranked.len(), 3);

    let keys: Vec<_> = ranked.iter().map(|r| r.player.player_key.as_str()).collect();
    assert_eq!(keys, vec!["428.p.3", "428.p.2", "428.p.1"]);

    let score_of = |key: &str| {
        ranked
            .iter()
            .find(|r| r.player.player_key == key)
            .map(|r| r.fantasy_score)
            .unwrap()
    };
    // Five spread categories, flat REB and ST, FT% and inverted turnovers.
    assert!((score_of("428.p.1") - (-5.0 * k + ft[0] - k)).abs() < TOLERANCE);
    assert!((score_of("428.p.2") - (ft[1] + k)).abs() < TOLERANCE);
    assert!((score_of("428.p.3") - (5.0 * k + ft[2])).abs() < TOLERANCE);
}

#[test]
fn test_flat_categories_contribute_nothing() {
    let ranked = rank_players(&normalize_players(&three_player_pool()));
    for player in &ranked {
        assert_eq!(player.zscores.get(Category::Rebounds), 0.0);
        assert_eq!(player.zscores.get(Category::Steals), 0.0);
    }
}

#[test]
fn test_turnovers_are_inverted() {
    let k = 1.5f64.sqrt();
    let ranked = rank_players(&normalize_players(&three_player_pool()));
    let most_turnovers = ranked
        .iter()
        .find(|r| r.player.player_key == "428.p.1")
        .unwrap();
    assert!((most_turnovers.zscores.get(Category::Turnovers) + k).abs() < TOLERANCE);
}

#[test]
fn test_category_zscores_sum_to_zero_across_pool() {
    let ranked = rank_players(&normalize_players(&three_player_pool()));
    for category in Category::ALL {
        let sum: f64 = ranked.iter().map(|r| r.zscores.get(category)).sum();
        assert!(sum.abs() < TOLERANCE, "{category:?} sums to {sum}");
    }
}

#[test]
fn test_score_is_sum_of_category_zscores() {
    let ranked = rank_players(&normalize_players(&three_player_pool()));
    for player in &ranked {
        assert!((player.fantasy_score - player.zscores.total()).abs() < TOLERANCE);
    }
}

#[test]
fn test_ranking_is_stable_under_input_order() {
    let mut reversed = three_player_pool();
    reversed.reverse();

    let forward = rank_players(&normalize_players(&three_player_pool()));
    let backward = rank_players(&normalize_players(&reversed));

    let keys = |ranked: &[fantasy_hoops_ranker::RankedPlayerRecord]| {
        ranked
            .iter()
            .map(|r| (r.rank, r.player.player_key.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&forward), keys(&backward));
}

#[test]
fn test_identical_players_tie_break_on_player_key() {
    let stats = [("PTS", "10"), ("REB", "4"), ("FG%", ".500"), ("TO", "1")];
    let records = vec![
        TestDataBuilder::player_record("428.p.20", "Twin B", &stats),
        TestDataBuilder::player_record("428.p.10", "Twin A", &stats),
    ];

    let ranked = rank_players(&normalize_players(&records));
    assert_eq!(ranked[0].player.player_key, "428.p.10");
    assert_eq!(ranked[0].rank, 1);
    assert_eq!(ranked[1].rank, 2);
    assert_eq!(ranked[0].fantasy_score, 0.0);
}
