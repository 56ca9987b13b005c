use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use crm_schedule::calendar::arithmetic::parse_date_key;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "crm-schedule",
    version,
    about = "Agenda and week views for CRM events, calls and action items"
)]
pub struct Cli {
    /// Config file (defaults to <config dir>/crm-schedule/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Items file, overriding `items_file` from the config
    #[arg(long)]
    pub items: Option<PathBuf>,

    /// Reference date as YYYY-MM-DD (defaults to today)
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Interactive terminal UI (default)
    Tui,
    /// Print the month-grouped agenda
    Agenda,
    /// Print the week strip containing --date
    Week,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Tui)
    }
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date_key(raw).ok_or_else(|| format!("expected YYYY-MM-DD, got `{raw}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_tui() {
        let cli = Cli::parse_from(["crm-schedule"]);
        assert_eq!(cli.command(), Command::Tui);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_week_with_date() {
        let cli = Cli::parse_from(["crm-schedule", "-vv", "--date", "2025-04-02", "week"]);
        assert_eq!(cli.command(), Command::Week);
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2025, 4, 2));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn rejects_loose_dates() {
        assert!(Cli::try_parse_from(["crm-schedule", "--date", "2025-4-2"]).is_err());
    }
}
