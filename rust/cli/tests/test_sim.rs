use holdem_shot_cli::run;
use std::fs;

fn field(out: &str, name: &str) -> u64 {
    out.lines()
        .find_map(|l| l.strip_prefix(&format!("{}: ", name)))
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or_else(|| panic!("missing {} in {}", name, out))
}

#[test]
fn sim_summarizes_every_match() {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(
        ["holdem-shot", "sim", "--matches", "20", "--seed", "7", "--policy", "random"],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 0, "stderr: {}", String::from_utf8_lossy(&err));
    let s = String::from_utf8(out).unwrap();
    assert!(s.contains("Policy: random"));
    assert_eq!(field(&s, "Matches"), 20);
    let decided = field(&s, "Eliminated P1") + field(&s, "Eliminated P2");
    assert_eq!(decided + field(&s, "Unfinished"), 20);
    assert!(field(&s, "Rounds") >= 20);
}

#[test]
fn sim_writes_rounds_as_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rounds.jsonl");
    let path_str = path.to_string_lossy().to_string();

    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(
        ["holdem-shot", "sim", "--matches", "3", "--seed", "42", "--output", &path_str],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 0);

    let contents = fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = contents
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let s = String::from_utf8(out).unwrap();
    assert_eq!(records.len() as u64, field(&s, "Rounds"));

    let mut ids: Vec<&str> = records
        .iter()
        .map(|r| r["match_id"].as_str().unwrap())
        .collect();
    ids.dedup();
    assert_eq!(ids.len(), 3, "one match id per match, rounds in order");
    assert!(records.iter().all(|r| r["ts"].is_string()));
    assert!(records.iter().all(|r| r["outcome"]["kind"].is_string()));
}

#[test]
fn sim_is_deterministic_for_a_seed() {
    let run_once = || {
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        let code = run(
            ["holdem-shot", "sim", "--matches", "10", "--seed", "5", "--policy", "random"],
            &mut out,
            &mut err,
        );
        assert_eq!(code, 0);
        String::from_utf8(out).unwrap()
    };
    assert_eq!(run_once(), run_once());
}

#[test]
fn zero_matches_is_an_error() {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(["holdem-shot", "sim", "--matches", "0"], &mut out, &mut err);
    assert_eq!(code, 2);
    assert!(String::from_utf8_lossy(&err).contains("matches must be >= 1"));
}
