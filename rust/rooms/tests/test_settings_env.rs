use std::io::Write;

use holdem_shot_rooms::settings::{load_with_sources, ValueSource, CONFIG_ENV};
use serial_test::serial;

const VARS: [&str; 6] = [
    CONFIG_ENV,
    "HOLDEM_SHOT_DEAL_DELAY_MS",
    "HOLDEM_SHOT_ROULETTE_SPIN_MS",
    "HOLDEM_SHOT_NEXT_ROUND_DELAY_MS",
    "HOLDEM_SHOT_TURN_TIMEOUT_MS",
    "HOLDEM_SHOT_COMMAND_BUFFER",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn file_and_env_layer_over_defaults() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "next_round_delay_ms = 1500").unwrap();
    writeln!(file, "turn_timeout_ms = 20000").unwrap();
    std::env::set_var(CONFIG_ENV, file.path());
    std::env::set_var("HOLDEM_SHOT_TURN_TIMEOUT_MS", "off");
    std::env::set_var("HOLDEM_SHOT_COMMAND_BUFFER", "16");

    let resolved = load_with_sources().unwrap();
    clear_env();

    assert_eq!(resolved.settings.next_round_delay_ms, 1500);
    assert_eq!(resolved.sources.next_round_delay_ms, ValueSource::File);
    assert_eq!(resolved.settings.turn_timeout_ms, None);
    assert_eq!(resolved.sources.turn_timeout_ms, ValueSource::Env);
    assert_eq!(resolved.settings.command_buffer, 16);
    assert_eq!(resolved.settings.deal_delay_ms, 600);
    assert_eq!(resolved.sources.deal_delay_ms, ValueSource::Default);
}

#[test]
#[serial]
fn missing_config_file_is_an_error() {
    clear_env();
    std::env::set_var(CONFIG_ENV, "/definitely/not/here.toml");
    let result = load_with_sources();
    clear_env();
    assert!(result.is_err());
}
