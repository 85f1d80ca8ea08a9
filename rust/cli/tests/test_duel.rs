use holdem_shot_cli::run;

#[test]
fn duel_plays_one_match_to_the_end() {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(
        ["holdem-shot", "duel", "--seed", "21", "--policy", "random"],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 0, "stderr: {}", String::from_utf8_lossy(&err));
    let s = String::from_utf8(out).unwrap();
    assert!(s.contains("[P1] round 1: FlopExchange"));
    assert!(s.contains("[P2] round 1: FlopExchange"));
    assert!(s.contains("showdown"));
    assert!(s.lines().last().unwrap().starts_with("Winner: "));
}

#[test]
fn exchanges_are_only_announced_to_the_opponent() {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(["holdem-shot", "duel", "--seed", "8"], &mut out, &mut err);
    assert_eq!(code, 0);
    let s = String::from_utf8(out).unwrap();
    let announced: Vec<&str> = s
        .lines()
        .filter(|l| l.contains("exchanges slots") || l.contains("stands pat"))
        .collect();
    assert!(!announced.is_empty());
    for line in announced {
        let told = &line[1..3];
        let actor = &line[5..7];
        assert_ne!(told, actor, "{}", line);
    }
}

#[test]
fn json_log_format_keeps_the_transcript_intact() {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(
        ["holdem-shot", "duel", "--seed", "4", "--log-format", "json"],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 0, "stderr: {}", String::from_utf8_lossy(&err));
    let s = String::from_utf8(out).unwrap();
    assert!(s.starts_with("Seed: 4"));
    assert!(s.lines().last().unwrap().starts_with("Winner: "));
}

#[test]
fn unknown_log_format_is_a_usage_error() {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(
        ["holdem-shot", "duel", "--log-format", "xml"],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(!err.is_empty());
}
