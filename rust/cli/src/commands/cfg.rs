//! `cfg`: print the resolved configuration with the source of every value.
//!
//! ```json
//! {
//!   "cli": {
//!     "matches": { "value": 100, "source": "default" },
//!     ...
//!   },
//!   "rooms": {
//!     "deal_delay_ms": { "value": 600, "source": "default" },
//!     ...
//!   }
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use holdem_shot_rooms::settings;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };
    let settings::SettingsResolved {
        settings: rooms,
        sources: room_sources,
    } = match settings::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid room settings: {}", e))?;
            return Err(CliError::Config(format!("Invalid room settings: {}", e)));
        }
    };

    let display = serde_json::json!({
        "cli": {
            "seed": { "value": config.seed, "source": sources.seed },
            "matches": { "value": config.matches, "source": sources.matches },
            "max_rounds": { "value": config.max_rounds, "source": sources.max_rounds },
            "policy": { "value": config.policy, "source": sources.policy },
        },
        "rooms": {
            "deal_delay_ms": { "value": rooms.deal_delay_ms, "source": room_sources.deal_delay_ms },
            "roulette_spin_ms": { "value": rooms.roulette_spin_ms, "source": room_sources.roulette_spin_ms },
            "next_round_delay_ms": { "value": rooms.next_round_delay_ms, "source": room_sources.next_round_delay_ms },
            "turn_timeout_ms": { "value": rooms.turn_timeout_ms, "source": room_sources.turn_timeout_ms },
            "command_buffer": { "value": rooms.command_buffer, "source": room_sources.command_buffer },
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
