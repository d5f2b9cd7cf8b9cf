//! Round lifecycle tests for the game state machine.

use mathchat_game::{Challenge, Game, GameConfig, GameStatus};
use mathchat_protocol::Nickname;
use rand::SeedableRng;
use rand::rngs::StdRng;

// =========================================================================
// Helpers
// =========================================================================

fn game() -> Game<StdRng> {
    Game::new(GameConfig::default(), StdRng::seed_from_u64(7))
}

fn nick(name: &str) -> Nickname {
    Nickname::new(name)
}

fn answer(challenge: &Challenge) -> String {
    challenge.result().to_string()
}

/// Any integer that is not the answer.
fn wrong(challenge: &Challenge) -> String {
    (challenge.result() + 1).to_string()
}

// =========================================================================
// try_start_round
// =========================================================================

#[test]
fn test_single_participant_never_starts_a_round() {
    let mut g = game();
    assert!(g.try_start_round(0).is_none());
    assert!(g.try_start_round(1).is_none());
    assert_eq!(g.status(), GameStatus::Idle);
}

#[test]
fn test_two_participants_start_a_round() {
    let mut g = game();
    let challenge = g.try_start_round(2).expect("round should start");
    assert_eq!(g.status(), GameStatus::InProgress);
    assert_eq!(g.current_challenge(), Some(&challenge));
}

#[test]
fn test_start_is_idempotent_while_in_progress() {
    let mut g = game();
    let first = g.try_start_round(2).unwrap();

    for participants in [2, 3, 10] {
        assert!(g.try_start_round(participants).is_none());
    }
    assert_eq!(g.current_challenge(), Some(&first));
}

#[test]
fn test_custom_min_participants() {
    let mut g = Game::new(
        GameConfig { min_participants: 3 },
        StdRng::seed_from_u64(1),
    );
    assert!(g.try_start_round(2).is_none());
    assert!(g.try_start_round(3).is_some());
}

// =========================================================================
// try_accept
// =========================================================================

#[test]
fn test_accept_ignored_when_idle() {
    let mut g = game();
    assert!(!g.try_accept(&nick("ann"), "0"));
    assert_eq!(g.status(), GameStatus::Idle);
}

#[test]
fn test_wrong_and_malformed_answers_change_nothing() {
    let mut g = game();
    let challenge = g.try_start_round(2).unwrap();

    for text in [wrong(&challenge), "".into(), "forty".into(), "4 2".into(), "1.5".into()] {
        assert!(!g.try_accept(&nick("ann"), &text), "{text:?} should not match");
    }
    assert_eq!(g.status(), GameStatus::InProgress);
    assert_eq!(g.current_challenge(), Some(&challenge));
}

#[test]
fn test_correct_answer_accepted_exactly_once() {
    let mut g = game();
    let challenge = g.try_start_round(2).unwrap();

    assert!(g.try_accept(&nick("ann"), &answer(&challenge)));
    assert_eq!(g.status(), GameStatus::Over);

    // A second correct answer after the round is over loses.
    assert!(!g.try_accept(&nick("bob"), &answer(&challenge)));
    assert_eq!(g.last_winner(), Some(&nick("ann")));
    assert_eq!(g.rounds_played(), 1);
}

// =========================================================================
// Re-arming
// =========================================================================

#[test]
fn test_round_rearms_after_win() {
    let mut g = game();
    let first = g.try_start_round(2).unwrap();
    assert!(g.try_accept(&nick("ann"), &answer(&first)));

    let second = g.try_start_round(2).expect("should re-arm from Over");
    assert_eq!(g.status(), GameStatus::InProgress);

    // Only the new answer counts now.
    if second.result() != first.result() {
        assert!(!g.try_accept(&nick("bob"), &answer(&first)));
    }
    assert!(g.try_accept(&nick("bob"), &answer(&second)));
    assert_eq!(g.rounds_played(), 2);
}

#[test]
fn test_over_stays_over_without_enough_participants() {
    let mut g = game();
    let challenge = g.try_start_round(2).unwrap();
    assert!(g.try_accept(&nick("ann"), &answer(&challenge)));

    assert!(g.try_start_round(1).is_none());
    assert_eq!(g.status(), GameStatus::Over);

    // The next qualifying join re-arms.
    assert!(g.try_start_round(2).is_some());
}

#[test]
fn test_many_rounds_each_accept_once() {
    let mut g = game();
    for round in 1..=50 {
        let challenge = g.try_start_round(4).unwrap();
        assert!(!g.try_accept(&nick("x"), &wrong(&challenge)));
        assert!(g.try_accept(&nick("x"), &answer(&challenge)));
        assert!(!g.try_accept(&nick("y"), &answer(&challenge)));
        assert_eq!(g.rounds_played(), round);
    }
}
