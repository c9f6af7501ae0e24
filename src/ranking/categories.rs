/// Display name of the field-goal made/attempted composite stat.
pub const FIELD_GOALS_MADE_ATTEMPTED: &str = "FGM/A";

/// Display name of the free-throw made/attempted composite stat.
pub const FREE_THROWS_MADE_ATTEMPTED: &str = "FTM/A";

/// The nine scoring categories of a standard 9-cat league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    ThreePointersMade,
    FieldGoalPct,
    FreeThrowPct,
    Turnovers,
}

impl Category {
    /// In artifact column order.
    pub const ALL: [Category; 9] = [
        Category::Points,
        Category::Rebounds,
        Category::Assists,
        Category::Steals,
        Category::Blocks,
        Category::ThreePointersMade,
        Category::FieldGoalPct,
        Category::FreeThrowPct,
        Category::Turnovers,
    ];

    /// Stat display name as the league settings spell it.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Points => "PTS",
            Category::Rebounds => "REB",
            Category::Assists => "AST",
            Category::Steals => "ST",
            Category::Blocks => "BLK",
            Category::ThreePointersMade => "3PTM",
            Category::FieldGoalPct => "FG%",
            Category::FreeThrowPct => "FT%",
            Category::Turnovers => "TO",
        }
    }

    pub fn is_percentage(self) -> bool {
        matches!(self, Category::FieldGoalPct | Category::FreeThrowPct)
    }

    /// More is worse.
    pub fn is_negative(self) -> bool {
        self == Category::Turnovers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_turnovers_are_negative() {
        let negative: Vec<_> = Category::ALL.iter().filter(|c| c.is_negative()).collect();
        assert_eq!(negative, vec![&Category::Turnovers]);
    }

    #[test]
    fn test_display_names_are_unique() {
        let mut names: Vec<_> = Category::ALL.iter().map(|c| c.display_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Category::ALL.len());
    }
}
