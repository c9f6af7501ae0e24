use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Which command a set of arguments selects. Exactly one runs per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Rank,
    ListLeagues,
    Show,
    SetLeague,
    ListConfig,
}

/// Yahoo Fantasy Basketball ranker
///
/// Downloads season stats for every player in a Yahoo Fantasy NBA league,
/// scores them with a nine-category z-score model and writes the top players
/// to a CSV file for draft preparation.
///
/// Without options it runs the full pipeline for the configured league.
/// The first run asks for the Yahoo app's consumer key and secret and for
/// an authorization code; both are remembered for later runs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// League to rank, e.g. 428.l.12345. Overrides the configured league for this run.
    #[arg(long = "league", short = 'L', value_name = "LEAGUE_KEY")]
    pub league: Option<String>,

    /// Directory for the CSV artifacts (default: ./data).
    #[arg(long = "output-dir", short = 'o', value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Number of ranked players written to the ranking file (default: 150).
    #[arg(long = "top", short = 'n', value_name = "N")]
    pub top: Option<usize>,

    /// Players requested per API page (default: 25).
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<u32>,

    /// Never prompt for an authorization code. Fails if no stored credential exists.
    #[arg(long = "no-prompt")]
    pub no_prompt: bool,

    /// List the NBA leagues of the logged-in Yahoo account and exit.
    #[arg(long = "list-leagues", help_heading = "Commands")]
    pub list_leagues: bool,

    /// Show the ranking file from the last run as a table instead of fetching.
    #[arg(long = "show", short = 's', help_heading = "Commands")]
    pub show: bool,

    /// With --show: only players with this primary position (e.g. PG, C).
    #[arg(long = "position", short = 'p', requires = "show", help_heading = "Commands")]
    pub position: Option<String>,

    /// With --show: only players whose name contains this text (case-insensitive).
    #[arg(long = "search", short = 'q', requires = "show", help_heading = "Commands")]
    pub search: Option<String>,

    /// Save a league key to the config as the default league.
    #[arg(long = "set-league", value_name = "LEAGUE_KEY", help_heading = "Configuration")]
    pub set_league: Option<String>,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Log at debug level.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Only log to the log file, not to the terminal.
    #[arg(long = "quiet", help_heading = "Debug")]
    pub quiet: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

impl Args {
    /// The selected command. Configuration commands take precedence over
    /// `--show` and `--list-leagues`.
    pub fn command(&self) -> Command {
        if self.list_config {
            Command::ListConfig
        } else if self.set_league.is_some() {
            Command::SetLeague
        } else if self.show {
            Command::Show
        } else if self.list_leagues {
            Command::ListLeagues
        } else {
            Command::Rank
        }
    }
}
