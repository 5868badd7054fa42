use std::time::Duration;

use broadside::{
    ManualScheduler, MatchConfig, MatchController, MatchError, Side, Status, TokioScheduler,
};
use rand::{rngs::SmallRng, SeedableRng};

const DELAY: Duration = Duration::from_millis(250);

fn manual(seed: u64) -> (ManualScheduler, MatchController<ManualScheduler>) {
    let scheduler = ManualScheduler::new();
    let controller =
        MatchController::with_rng(scheduler.clone(), DELAY, SmallRng::seed_from_u64(seed));
    (scheduler, controller)
}

#[test]
fn test_player_attack_schedules_reply() {
    let (scheduler, controller) = manual(1);
    assert_eq!(scheduler.pending(), 0);

    controller.attack(Side::Player, 0, 0).unwrap();
    assert!(controller.has_pending_move());
    assert_eq!(scheduler.pending_delays(), vec![DELAY]);

    let state = controller.snapshot();
    assert_eq!(state.turn(), Side::Opponent);
    assert_eq!(state.player_board().hit_count(), 0);
}

#[test]
fn test_player_locked_out_while_opponent_thinks() {
    let (scheduler, controller) = manual(2);
    controller.attack(Side::Player, 1, 1).unwrap();
    let before = controller.snapshot();

    assert_eq!(
        controller.attack(Side::Player, 2, 2).unwrap_err(),
        MatchError::InvalidTurn { actor: Side::Player }
    );
    assert_eq!(controller.snapshot(), before);
    assert_eq!(scheduler.pending(), 1);
}

#[test]
fn test_scheduled_reply_hands_turn_back() {
    let (scheduler, controller) = manual(3);
    controller.attack(Side::Player, 4, 4).unwrap();

    assert_eq!(scheduler.run_pending(), 1);
    assert!(!controller.has_pending_move());

    let state = controller.snapshot();
    assert_eq!(state.turn(), Side::Player);
    assert_eq!(state.shots(Side::Opponent), 1);
    assert_eq!(state.player_board().hit_count(), 1);
    assert!(matches!(
        state.status(),
        Status::Hit(Side::Opponent) | Status::Miss(Side::Opponent)
    ));

    // nothing left to run
    assert_eq!(scheduler.run_pending(), 0);
}

#[test]
fn test_reset_cancels_pending_reply() {
    let (scheduler, controller) = manual(4);
    controller.attack(Side::Player, 0, 5).unwrap();
    controller.reset();

    assert!(!controller.has_pending_move());
    assert_eq!(scheduler.pending(), 0);
    assert_eq!(scheduler.run_pending(), 0);

    let state = controller.snapshot();
    assert_eq!(state.turn(), Side::Player);
    assert_eq!(state.status(), Status::PlayersTurn);
    assert_eq!(state.shots(Side::Opponent), 0);
    assert_eq!(state.player_board().hit_count(), 0);
    assert_eq!(state.opponent_board().hit_count(), 0);
}

#[test]
fn test_immediate_move_supersedes_scheduled_one() {
    let (scheduler, controller) = manual(5);
    controller.attack(Side::Player, 9, 9).unwrap();

    let report = controller.opponent_move().expect("opponent's turn");
    assert_eq!(report.actor, Side::Opponent);
    assert!(!controller.has_pending_move());
    assert_eq!(scheduler.run_pending(), 0);

    let state = controller.snapshot();
    assert_eq!(state.shots(Side::Opponent), 1);
    assert_eq!(state.turn(), Side::Player);
    assert!(controller.opponent_move().is_none());
}

#[test]
fn test_host_driven_opponent_attack_cancels_reply() {
    let (scheduler, controller) = manual(6);
    controller.attack(Side::Player, 3, 3).unwrap();
    controller.attack(Side::Opponent, 7, 7).unwrap();

    assert_eq!(scheduler.run_pending(), 0);
    let state = controller.snapshot();
    assert_eq!(state.turn(), Side::Player);
    assert!(state.player_board().is_hit(7, 7).unwrap());
    assert_eq!(state.shots(Side::Opponent), 1);
}

#[test]
fn test_host_driven_opponent_hit_is_remembered() {
    let (_scheduler, controller) = manual(12);
    let (row, col) = controller
        .snapshot()
        .player_board()
        .ship_mask()
        .iter()
        .next()
        .unwrap();
    controller.attack(Side::Player, 0, 0).unwrap();
    controller.attack(Side::Opponent, row, col).unwrap();

    let state = controller.snapshot();
    assert_eq!(state.targeter().last_hit(), Some((row, col)));
    assert!(!state.targeter().hunt_queue().is_empty());
}

#[test]
fn test_rejected_attack_schedules_nothing() {
    let (scheduler, controller) = manual(7);
    assert_eq!(
        controller.attack(Side::Player, 10, 3).unwrap_err(),
        MatchError::OutOfBounds { row: 10, col: 3 }
    );
    assert_eq!(scheduler.pending(), 0);
    assert_eq!(controller.snapshot().turn(), Side::Player);
}

#[test]
fn test_reply_dropped_after_controller_is_gone() {
    let (scheduler, controller) = manual(8);
    controller.attack(Side::Player, 2, 8).unwrap();
    drop(controller);
    // the task still runs but finds no match to act on
    assert_eq!(scheduler.run_pending(), 1);
}

#[test]
fn test_seeded_config_is_reproducible() {
    let config = MatchConfig {
        thinking_delay: DELAY,
        seed: Some(77),
    };
    let a = MatchController::new(ManualScheduler::new(), config);
    let b = MatchController::new(ManualScheduler::new(), config);
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.thinking_delay(), DELAY);
}

#[tokio::test(start_paused = true)]
async fn test_tokio_reply_lands_after_delay() {
    let controller = MatchController::with_rng(
        TokioScheduler::current().unwrap(),
        DELAY,
        SmallRng::seed_from_u64(9),
    );
    controller.attack(Side::Player, 5, 5).unwrap();

    tokio::time::sleep(DELAY / 2).await;
    assert_eq!(controller.snapshot().turn(), Side::Opponent);
    assert!(controller.has_pending_move());

    tokio::time::sleep(DELAY).await;
    let state = controller.snapshot();
    assert_eq!(state.turn(), Side::Player);
    assert_eq!(state.shots(Side::Opponent), 1);
    assert!(!controller.has_pending_move());
}

#[tokio::test(start_paused = true)]
async fn test_tokio_reset_before_delay_elapses() {
    let controller = MatchController::with_rng(
        TokioScheduler::current().unwrap(),
        DELAY,
        SmallRng::seed_from_u64(10),
    );
    controller.attack(Side::Player, 0, 9).unwrap();
    tokio::time::sleep(DELAY / 2).await;
    controller.reset();

    tokio::time::sleep(DELAY * 4).await;
    let state = controller.snapshot();
    assert_eq!(state.turn(), Side::Player);
    assert_eq!(state.status(), Status::PlayersTurn);
    assert_eq!(state.shots(Side::Opponent), 0);
    assert_eq!(state.player_board().hit_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_each_update() {
    let controller = MatchController::with_rng(
        TokioScheduler::current().unwrap(),
        DELAY,
        SmallRng::seed_from_u64(11),
    );
    let mut updates = controller.subscribe();
    assert_eq!(updates.borrow().status(), Status::PlayersTurn);

    controller.attack(Side::Player, 6, 1).unwrap();
    updates.changed().await.unwrap();
    assert_eq!(updates.borrow_and_update().turn(), Side::Opponent);

    updates.changed().await.unwrap();
    let state = updates.borrow_and_update().clone();
    assert_eq!(state.turn(), Side::Player);
    assert_eq!(state.shots(Side::Opponent), 1);
    assert_eq!(state, controller.snapshot());
}
