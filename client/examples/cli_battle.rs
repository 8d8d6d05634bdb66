use anyhow::{Context, Result};
use async_trait::async_trait;
use outlaw_battle::{BattleState, InvalidAction, SideState};
use outlaw_client::{
    ActionReport, BattleClient, BattleCommand, BattleHandle, Handler, Phase, SessionConfig, Side,
};
use outlaw_protocol::parse_command;
use outlaw_team::{Catalogue, available_cards, battle_cards, select_loadout};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

struct CliBattle;

#[async_trait]
impl Handler for CliBattle {
    async fn on_action(&mut self, report: &ActionReport) {
        for line in &report.log {
            println!("  {}", line);
        }
    }

    async fn on_phase(&mut self, phase: Phase, turn: u32) {
        if phase == Phase::Player {
            println!("-- turn {} --", turn);
        }
    }

    async fn on_rejected(&mut self, command: &BattleCommand, error: &InvalidAction) {
        println!("Rejected {}: {}", command.to_protocol_string(), error);
    }

    async fn on_finished(&mut self, winner: Side, turn: u32) {
        match winner {
            Side::Player => println!("You won on turn {}. /reset to play again.", turn),
            Side::Enemy => println!("You lost on turn {}. /reset to try again.", turn),
        }
    }

    async fn on_reset(&mut self, state: &BattleState) {
        println!("Battle reset.");
        print_state(state);
    }

    async fn on_snapshot(&mut self, state: &BattleState) {
        print_state(state);
    }
}

fn print_side(title: &str, side: &SideState) {
    println!("{}:", title);
    for unit in &side.units {
        let mut flags = Vec::new();
        if unit.is_defeated() {
            flags.push("down".to_string());
        }
        if unit.acted {
            flags.push("acted".to_string());
        }
        if unit.bonus_attack > 0 {
            flags.push(format!("+{} atk", unit.bonus_attack));
        }
        if unit.vulnerable_turns > 0 {
            flags.push(format!("vulnerable {}", unit.vulnerable_turns));
        }

        println!(
            "  {:<9} {:<16} {:>3}/{:<3} {}",
            unit.id.to_string(),
            unit.name,
            unit.hp,
            unit.max_hp,
            flags.join(", ")
        );
    }
}

fn print_state(state: &BattleState) {
    println!("Turn {} ({} phase)", state.turn, state.phase);
    print_side("Your team", &state.players);
    print_side("Enemies", &state.enemies);
}

fn print_help() {
    println!("Commands:");
    println!("  /attack <player-N> <enemy-N>  - Attack with one of your cards");
    println!("  /status                       - Show both teams");
    println!("  /reset                        - Start over");
    println!("  /quit                         - Exit");
}

fn handle_input(line: &str, handle: &BattleHandle) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return true;
    }

    match line.trim_start_matches('/') {
        "help" => print_help(),
        "quit" | "exit" => return false,
        _ => match parse_command(line) {
            Ok(command) => {
                if let Err(e) = handle.send(command) {
                    println!("Error: {}", e);
                    return false;
                }
            }
            Err(e) => println!("{}. Type /help for commands.", e),
        },
    }

    true
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Optional comma-separated card ids, e.g. `cli_battle 3,1`
    let selection = std::env::args().nth(1).unwrap_or_default();

    let catalogue = Catalogue::bundled().context("Failed to load card catalogue")?;
    let owned: &[&str] = &[];
    let available = available_cards(&catalogue, owned);
    let cards = battle_cards(&select_loadout(&available, &selection));

    let config = SessionConfig::from_env()?;
    let (handle, mut receiver) = BattleClient::start(&cards, config)?;

    println!("Outlaw Battle");
    println!("=============");
    if let Some(state) = handle.snapshot() {
        for line in state.log.lines() {
            println!("  {}", line);
        }
        print_state(&state);
    }
    print_help();

    let input_handle = handle.clone();
    tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            if !handle_input(&line, &input_handle) {
                break;
            }
        }

        input_handle.shutdown();
    });
    drop(handle);

    receiver.run(&mut CliBattle).await
}
