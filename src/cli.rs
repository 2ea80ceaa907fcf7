use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "propline")]
#[command(version = "0.1.0")]
#[command(about = "Player prop lines joined with roster and weekly stat distributions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding default.toml and <PROPLINE_ENV>.toml
    #[arg(long, default_value = "config", env = "PROPLINE_CONFIG_DIR")]
    pub config_dir: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve,
    /// Print the quarterback roster
    Roster {
        /// Season (defaults to the one in progress)
        #[arg(long)]
        season: Option<i32>,
        /// Include inactive players
        #[arg(long)]
        all: bool,
        /// Only starters
        #[arg(long)]
        starters: bool,
        /// Cap the number of players (0 = no cap)
        #[arg(long, default_value = "0")]
        limit: usize,
    },
    /// Print the current posted lines for a player
    Line {
        /// Player id (GSIS) or slug
        player: String,
        /// Bypass the cached odds payload (spends a credit)
        #[arg(long)]
        refresh: bool,
    },
    /// Print weekly passing-yard distributions for a player
    Distribution {
        /// Player id (GSIS) or slug
        player: String,
        #[arg(long)]
        line: Option<f64>,
        #[arg(long)]
        min_attempts: Option<f64>,
    },
}
