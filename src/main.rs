use broadside::{
    cli::{coord_to_string, parse_command, render_match, Command},
    init_logging, MatchConfig, MatchController, Side, TokioScheduler,
};

use clap::{Parser, Subcommand};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in this terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Opponent thinking delay in milliseconds")]
        delay_ms: Option<u64>,
    },
}

const HELP: &str = "Type a target like B7, `reset` for a new match, or `quit`.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { seed, delay_ms } => {
            let mut config = MatchConfig::from_env();
            if seed.is_some() {
                config.seed = seed;
            }
            if let Some(ms) = delay_ms {
                config.thinking_delay = Duration::from_millis(ms);
            }
            if let Some(s) = config.seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            play(config).await
        }
    }
}

async fn play(config: MatchConfig) -> anyhow::Result<()> {
    let controller = MatchController::new(TokioScheduler::current()?, config);
    let mut updates = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    loop {
        // Wait out the opponent's reply before prompting again.
        while {
            let state = controller.snapshot();
            state.turn() == Side::Opponent && state.winner().is_none()
        } {
            updates.changed().await?;
        }

        let state = controller.snapshot();
        print!("\n{}", render_match(&state));
        if state.winner().is_some() {
            println!("Type `reset` to play again or `quit` to leave.");
        }
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::Reset) => controller.reset(),
            Ok(Command::Fire((row, col))) => match controller.attack(Side::Player, row, col) {
                Ok(report) => println!(
                    "You fired at {}: {:?}",
                    coord_to_string(row, col),
                    report.outcome
                ),
                Err(e) => println!("{}", e),
            },
            Err(msg) => println!("{}", msg),
        }
    }
    Ok(())
}
