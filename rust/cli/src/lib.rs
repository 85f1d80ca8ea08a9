//! # Hold'em & Shot CLI Library
//!
//! Command-line front end for the Hold'em & Shot engine and room service.
//!
//! The entry point is [`run`], which parses the arguments, runs one
//! subcommand and returns the process exit code.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["holdem-shot", "sim", "--matches", "10", "--seed", "7"];
//! let code = holdem_shot_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Subcommands
//!
//! - `deal`: deal round 1 of a seeded match
//! - `eval`: rank two private cards (Jokers allowed) against a board
//! - `sim`: play many matches offline and summarize the outcomes
//! - `duel`: play one match through a local room, seat to seat
//! - `cfg`: show the resolved configuration and its sources

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod policy;
pub mod ui;

use cli::{Commands, HoldemShotCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_duel_command, handle_eval_command,
    handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["deal", "eval", "sim", "duel", "cfg"];

/// Parses `args` and runs the selected subcommand.
///
/// Help and version go to `out` with exit code 0. Parse errors and failed
/// commands are reported on `err` with exit code 2.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemShotCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = write_usage(err, &e.to_string());
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Deal { seed } => handle_deal_command(seed, out),
        Commands::Eval { private, board } => handle_eval_command(&private, &board, out),
        Commands::Sim {
            matches,
            seed,
            policy,
            output,
        } => handle_sim_command(matches, seed, policy, output.as_deref(), out, err),
        Commands::Duel {
            seed,
            policy,
            log,
            log_format,
        } => handle_duel_command(
            seed,
            policy,
            Commands::duel_log_format(log, log_format),
            out,
            err,
        ),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn write_usage(err: &mut dyn Write, clap_message: &str) -> std::io::Result<()> {
    writeln!(err, "{}", clap_message)?;
    writeln!(err)?;
    writeln!(err, "Hold'em & Shot CLI")?;
    writeln!(err, "Usage: holdem-shot <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: holdem-shot --help")
}
