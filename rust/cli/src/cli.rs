//! Command-line definitions parsed by [`crate::run`].

use crate::policy::Policy;
use clap::{Parser, Subcommand, ValueEnum};
use holdem_shot_rooms::logging::LogFormat;

#[derive(Parser, Debug)]
#[command(
    name = "holdem-shot",
    about = "Hold'em & Shot: two-seat Hold'em with Jokers and an elimination draw",
    version
)]
pub struct HoldemShotCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal round 1 of a match and show both hands and the board
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Rank two private cards against a five-card board
    Eval {
        /// Two cards, e.g. "As JK"
        #[arg(long)]
        private: String,
        /// Five cards without Jokers, e.g. "7s 7h 7d 2c Kd"
        #[arg(long)]
        board: String,
    },
    /// Play many matches offline and summarize how they ended
    Sim {
        #[arg(long)]
        matches: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum)]
        policy: Option<Policy>,
        /// Write every settled round as JSONL
        #[arg(long)]
        output: Option<String>,
    },
    /// Play one match through a local room and print what each seat is told
    Duel {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum)]
        policy: Option<Policy>,
        /// Install the tracing subscriber (RUST_LOG sets the filter)
        #[arg(long)]
        log: bool,
        /// Log line format; implies --log
        #[arg(long, value_enum)]
        log_format: Option<LogStyle>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogStyle {
    /// Human-readable lines with file and line
    Pretty,
    /// One JSON object per line
    Json,
}

impl From<LogStyle> for LogFormat {
    fn from(style: LogStyle) -> Self {
        match style {
            LogStyle::Pretty => LogFormat::Pretty,
            LogStyle::Json => LogFormat::Json,
        }
    }
}

impl Commands {
    /// Which log format `duel` should install, if any.
    pub fn duel_log_format(log: bool, log_format: Option<LogStyle>) -> Option<LogFormat> {
        match (log, log_format) {
            (_, Some(style)) => Some(style.into()),
            (true, None) => Some(LogFormat::Pretty),
            (false, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> HoldemShotCli {
        HoldemShotCli::try_parse_from(args).unwrap()
    }

    #[test]
    fn log_format_selects_json() {
        let cli = parse(&["holdem-shot", "duel", "--log-format", "json"]);
        let Commands::Duel {
            log, log_format, ..
        } = cli.cmd
        else {
            panic!("expected duel");
        };
        assert!(!log);
        assert_eq!(log_format, Some(LogStyle::Json));
        assert_eq!(
            Commands::duel_log_format(log, log_format),
            Some(LogFormat::Json)
        );
    }

    #[test]
    fn plain_log_flag_means_pretty() {
        assert_eq!(Commands::duel_log_format(true, None), Some(LogFormat::Pretty));
        assert_eq!(Commands::duel_log_format(false, None), None);
    }

    #[test]
    fn unknown_log_format_is_refused() {
        assert!(HoldemShotCli::try_parse_from(["holdem-shot", "duel", "--log-format", "xml"]).is_err());
    }
}
