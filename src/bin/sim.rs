//! Headless match: a second targeter plays the player's side against the
//! opponent, through the controller with a manual scheduler.

use broadside::{
    init_logging, ManualScheduler, MatchConfig, MatchController, Outcome, Side, TargeterState,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Upper bound on player turns; a legal match ends within 100.
const MAX_TURNS: usize = 200;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;

    let scheduler = ManualScheduler::new();
    let config = MatchConfig {
        seed: Some(seed),
        ..MatchConfig::default()
    };
    let controller = MatchController::new(scheduler.clone(), config);
    let mut player_rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
    let mut player = TargeterState::new();

    for _ in 0..MAX_TURNS {
        let state = controller.snapshot();
        if state.winner().is_some() {
            break;
        }
        let (row, col) = player
            .choose_target(state.opponent_board(), &mut player_rng)
            .ok_or_else(|| anyhow::anyhow!("player ran out of targets"))?;
        let report = controller.attack(Side::Player, row, col)?;
        let after = controller.snapshot();
        player.record_result(
            row,
            col,
            report.outcome == Outcome::Hit,
            after.opponent_board(),
        );
        scheduler.run_pending();
    }

    let state = controller.snapshot();
    let winner = state
        .winner()
        .ok_or_else(|| anyhow::anyhow!("no winner after {} turns", MAX_TURNS))?;
    let result = json!({
        "winner": winner,
        "player_shots": state.shots(Side::Player),
        "opponent_shots": state.shots(Side::Opponent),
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
