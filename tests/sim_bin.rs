use std::process::Command;

fn run_sim(seed: &str) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_sim"))
        .arg(seed)
        .env("BROADSIDE_LOG", "off")
        .output()
        .expect("failed to run sim binary")
}

#[test]
fn sim_binary_smoke() {
    let output = run_sim("7");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");

    let winner = v["winner"].as_str().expect("winner is a string");
    assert!(winner == "Player" || winner == "Opponent");
    let player_shots = v["player_shots"].as_u64().unwrap();
    let opponent_shots = v["opponent_shots"].as_u64().unwrap();
    assert!(player_shots >= 17 && player_shots <= 100);
    assert!(opponent_shots <= 100);
    // the player always shoots first
    assert!(player_shots == opponent_shots || player_shots == opponent_shots + 1);
}

#[test]
fn sim_binary_is_deterministic() {
    let a = run_sim("42");
    let b = run_sim("42");
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn sim_binary_rejects_bad_args() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .output()
        .expect("failed to run sim binary");
    assert!(!output.status.success());

    assert!(!run_sim("not-a-number").status.success());
}
