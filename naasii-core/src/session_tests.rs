use crate::config::GameConfig;
use crate::scoring::calculate_score;
use crate::session::{GameSession, SessionError};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn new_session_validates_player_count() {
    let cfg = GameConfig::default();
    assert!(GameSession::new(&names(&["A", "B"]), &cfg).is_ok());
    assert!(GameSession::new(&names(&["A", "B", "C", "D"]), &cfg).is_ok());

    let err = GameSession::new(&names(&["A"]), &cfg).unwrap_err();
    assert!(matches!(err, SessionError::PlayerCount { got: 1, .. }));

    let err = GameSession::new(&names(&["A", "B", "C", "D", "E"]), &cfg).unwrap_err();
    assert!(matches!(err, SessionError::PlayerCount { got: 5, .. }));
}

#[test]
fn new_session_rejects_empty_and_duplicate_names() {
    let cfg = GameConfig::default();
    assert!(matches!(
        GameSession::new(&names(&["A", "  "]), &cfg),
        Err(SessionError::BadPlayerName(_))
    ));
    assert!(matches!(
        GameSession::new(&names(&["A", "A"]), &cfg),
        Err(SessionError::BadPlayerName(_))
    ));
    // Names are trimmed before comparison.
    assert!(matches!(
        GameSession::new(&names(&["A", " A "]), &cfg),
        Err(SessionError::BadPlayerName(_))
    ));
}

#[test]
fn new_session_rejects_round_count_outside_config_bounds() {
    let mut cfg = GameConfig::default();
    cfg.max_rounds = 2; // below min_rounds = 3
    assert!(matches!(
        GameSession::new(&names(&["A", "B"]), &cfg),
        Err(SessionError::RoundCount { got: 2, .. })
    ));
}

#[test]
fn round_progression_and_finish() {
    let mut cfg = GameConfig::default();
    cfg.max_rounds = 3;
    let mut s = GameSession::new(&names(&["A", "B"]), &cfg).unwrap();

    assert_eq!(s.current_round, 1);
    assert!(!s.is_finished());
    for _ in 0..3 {
        s.advance_round();
    }
    assert!(s.is_finished());
}

#[test]
fn record_score_credits_the_current_round() {
    let cfg = GameConfig::default();
    let mut s = GameSession::new(&names(&["A", "B"]), &cfg).unwrap();
    let result = calculate_score(&[1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6]).unwrap();

    s.record_score(0, &result).unwrap();
    assert_eq!(s.players[0].score, 90);
    assert_eq!(s.players[0].score_history[0].round, 1);

    assert!(matches!(
        s.record_score(9, &result),
        Err(SessionError::NoSuchPlayer(9))
    ));
}

#[test]
fn standings_sort_by_total_with_stable_ties() {
    let cfg = GameConfig::default();
    let mut s = GameSession::new(&names(&["A", "B", "C"]), &cfg).unwrap();
    let big = calculate_score(&[1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6]).unwrap();
    let small = calculate_score(&[1, 1, 1, 2, 3, 4, 5, 6, 2, 3, 4, 5]).unwrap();

    s.record_score(1, &big).unwrap();
    s.record_score(0, &small).unwrap();
    s.record_score(2, &small).unwrap();

    let order: Vec<&str> = s.standings().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(order, vec!["B", "A", "C"]);
    assert_eq!(s.leader().unwrap().name, "B");
}

#[test]
fn from_parts_roundtrips_session_fields() {
    let cfg = GameConfig::default();
    let mut s = GameSession::new(&names(&["A", "B"]), &cfg).unwrap();
    let result = calculate_score(&[4, 4, 4, 4, 1, 1, 2, 2, 3, 3, 6, 6]).unwrap();
    s.record_score(0, &result).unwrap();
    s.advance_round();

    let rebuilt = GameSession::from_parts(s.players.clone(), s.current_round, s.max_rounds);
    assert_eq!(rebuilt, s);
}
