//! Read-only terminal table of the ranking artifact.

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::Write;

use crate::error::AppError;
use crate::export::{RankingFilter, RankingRow};

fn header_fg() -> Color {
    Color::AnsiValue(51)
} // Bright cyan
fn positive_fg() -> Color {
    Color::AnsiValue(46)
} // Bright green
fn negative_fg() -> Color {
    Color::AnsiValue(196)
} // Red
fn muted_fg() -> Color {
    Color::AnsiValue(245)
} // Grey

const NAME_WIDTH: usize = 24;

fn pct(value: Option<u8>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn header_line() -> String {
    format!(
        "{:>4}  {:<NAME_WIDTH$} {:<4} {:<3} {:>7} {:>5} {:>5} {:>5} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4}",
        "#", "Player", "Team", "Pos", "Score", "PTS", "REB", "AST", "ST", "BLK", "3PTM", "FG%", "FT%", "TO"
    )
}

fn row_line(row: &RankingRow) -> String {
    format!(
        "{:>4}  {:<NAME_WIDTH$} {:<4} {:<3} {:>7.2} {:>5} {:>5} {:>5} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4}",
        row.rank,
        truncate(&row.full_name, NAME_WIDTH),
        row.editorial_team_abbr,
        row.primary_position,
        row.fantasy_score,
        row.points,
        row.rebounds,
        row.assists,
        row.steals,
        row.blocks,
        row.three_pointers_made,
        pct(row.field_goal_pct),
        pct(row.free_throw_pct),
        row.turnovers,
    )
}

fn describe_filter(filter: &RankingFilter) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(position) = &filter.position {
        parts.push(format!("position {position}"));
    }
    if let Some(query) = filter.name_query.as_deref().filter(|q| !q.trim().is_empty()) {
        parts.push(format!("name contains \"{}\"", query.trim()));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Writes the filtered rows as an aligned table followed by a count line.
/// With `color` off, no escape sequences are emitted.
pub fn render_ranking_table<W: Write>(
    out: &mut W,
    rows: &[&RankingRow],
    total: usize,
    filter: &RankingFilter,
    color: bool,
) -> Result<(), AppError> {
    if let Some(description) = describe_filter(filter) {
        writeln!(out, "Filter: {description}")?;
    }

    if color {
        queue!(
            out,
            SetAttribute(Attribute::Bold),
            SetForegroundColor(header_fg()),
            Print(header_line()),
            ResetColor,
            SetAttribute(Attribute::Reset),
            Print("\n"),
        )?;
    } else {
        writeln!(out, "{}", header_line())?;
    }

    for row in rows {
        let line = row_line(row);
        if color {
            let fg = if row.fantasy_score >= 0.0 {
                positive_fg()
            } else {
                negative_fg()
            };
            queue!(out, SetForegroundColor(fg), Print(line), ResetColor, Print("\n"))?;
        } else {
            writeln!(out, "{line}")?;
        }
    }

    let summary = if rows.is_empty() && total == 0 {
        "No ranked players.".to_string()
    } else {
        format!("Displaying {} of {} players.", rows.len(), total)
    };
    if color {
        queue!(out, SetForegroundColor(muted_fg()), Print(summary), ResetColor, Print("\n"))?;
    } else {
        writeln!(out, "{summary}")?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rank: usize, name: &str, position: &str, score: f64) -> RankingRow {
        RankingRow {
            rank,
            full_name: name.to_string(),
            editorial_team_abbr: "DEN".to_string(),
            primary_position: position.to_string(),
            fantasy_score: score,
            points: 2000,
            rebounds: 900,
            assists: 700,
            steals: 100,
            blocks: 60,
            three_pointers_made: 80,
            field_goal_pct: Some(58),
            free_throw_pct: None,
            turnovers: 250,
        }
    }

    fn render(rows: &[&RankingRow], total: usize, filter: &RankingFilter) -> String {
        let mut out = Vec::new();
        render_ranking_table(&mut out, rows, total, filter, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_table_lists_rows_and_count() {
        let a = row(1, "Nikola Jokic", "C", 14.25);
        let b = row(2, "Shai Gilgeous-Alexander", "PG", 12.5);
        let text = render(&[&a, &b], 150, &RankingFilter::default());

        assert!(text.lines().next().unwrap().contains("Player"));
        assert!(text.contains("Nikola Jokic"));
        assert!(text.contains("14.25"));
        assert!(text.ends_with("Displaying 2 of 150 players.\n"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_null_percentage_shows_dash() {
        let a = row(1, "Nikola Jokic", "C", 1.0);
        let line = row_line(&a);
        assert!(line.contains(" 58    -"));
    }

    #[test]
    fn test_empty_artifact_message() {
        let text = render(&[], 0, &RankingFilter::default());
        assert!(text.contains("No ranked players."));
    }

    #[test]
    fn test_filter_is_described() {
        let filter = RankingFilter {
            position: Some("C".to_string()),
            name_query: Some("jok".to_string()),
        };
        let text = render(&[], 10, &filter);
        assert!(text.starts_with("Filter: position C, name contains \"jok\""));
        assert!(text.contains("Displaying 0 of 10 players."));
    }

    #[test]
    fn test_long_names_are_truncated() {
        assert_eq!(truncate("short", 10), "short");
        let cut = truncate("Giannis Antetokounmpo Jr. The Third", NAME_WIDTH);
        assert_eq!(cut.chars().count(), NAME_WIDTH);
        assert!(cut.ends_with('…'));
    }
}
