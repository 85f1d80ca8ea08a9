use holdem_shot_cli::run;

fn run_ok(args: &[&str]) -> String {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args, &mut out, &mut err);
    assert_eq!(code, 0, "stderr: {}", String::from_utf8_lossy(&err));
    String::from_utf8(out).unwrap()
}

#[test]
fn deal_prints_board_and_holes() {
    let s = run_ok(&["holdem-shot", "deal", "--seed", "1"]);
    assert!(s.starts_with("Seed: 1\n"));
    assert!(s.contains("Opener: "));
    assert!(s.contains("Hole P1:"));
    assert!(s.contains("Hole P2:"));
    assert!(s.contains("Board:"));
}

#[test]
fn deal_is_reproducible_and_seed_sensitive() {
    let a = run_ok(&["holdem-shot", "deal", "--seed", "2024"]);
    let b = run_ok(&["holdem-shot", "deal", "--seed", "2024"]);
    let c = run_ok(&["holdem-shot", "deal", "--seed", "2025"]);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn help_goes_to_stdout_with_success() {
    let s = run_ok(&["holdem-shot", "--help"]);
    assert!(s.contains("deal"));
    assert!(s.contains("duel"));
}

#[test]
fn unknown_command_lists_commands_on_stderr() {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(["holdem-shot", "shuffle"], &mut out, &mut err);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    let e = String::from_utf8_lossy(&err);
    assert!(e.contains("Commands:"));
    for cmd in ["deal", "eval", "sim", "duel", "cfg"] {
        assert!(e.contains(&format!("  {}", cmd)));
    }
}
