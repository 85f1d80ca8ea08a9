//! Command handlers for the holdem-shot CLI.
//!
//! Each command lives in its own module and exposes
//! `handle_COMMAND_command(...) -> Result<(), CliError>`, writing to the
//! `&mut dyn Write` streams it is given.

pub mod cfg;
pub mod deal;
pub mod duel;
pub mod eval;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use duel::handle_duel_command;
pub use eval::handle_eval_command;
pub use sim::handle_sim_command;
