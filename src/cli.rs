use clap::Parser;

use crate::cmd::Commands;

/// Status reports for Monday.com boards, plus a local to-do list.
/// Board data comes from the API (MONDAY_API_TOKEN) or an --input JSON file.
#[derive(Parser)]
#[command(name = "boardbot", version, about = "Monday.com board reports from the terminal")]
pub struct Cli {
    /// IANA time zone for due-date checks and the report footer.
    /// Defaults to $TIMEZONE, then America/New_York.
    #[arg(long, global = true)]
    pub timezone: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}
