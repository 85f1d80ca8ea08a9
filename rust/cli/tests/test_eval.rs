use holdem_shot_cli::run;

fn eval(private: &str, board: &str) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(
        ["holdem-shot", "eval", "--private", private, "--board", board],
        &mut out,
        &mut err,
    );
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn joker_makes_quads_on_trip_board() {
    let (code, out, _) = eval("JK 2s", "7s 7h 7d 3c Kd");
    assert_eq!(code, 0);
    assert!(out.contains("Hand: Four of a Kind, 7s"));
    assert!(out.contains("Best five: "));
}

#[test]
fn joker_finishes_a_royal_flush() {
    let (code, out, _) = eval("JK As", "Ks Qs Js 2h 3d");
    assert_eq!(code, 0);
    assert!(out.contains("Hand: Royal Flush"), "{}", out);
}

#[test]
fn plain_hands_evaluate_without_jokers() {
    let (code, out, _) = eval("Ah Ad", "2c 7d 9h Js 4s");
    assert_eq!(code, 0);
    assert!(out.contains("Hand: One Pair, As"), "{}", out);
    assert!(out.contains("Jokers: 0"));
}

#[test]
fn duplicate_cards_exit_with_error() {
    let (code, out, err) = eval("Ah Ad", "Ah 7d 9h Js 4s");
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.starts_with("Error: "));
}

#[test]
fn joker_on_the_board_is_rejected() {
    let (code, _, err) = eval("Ah Ad", "JK 7d 9h Js 4s");
    assert_eq!(code, 2);
    assert!(err.contains("Jokers cannot be used here"));
}
