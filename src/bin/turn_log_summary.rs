//! Prints a turn log saved by the game, one event per line, followed by a summary

use gridcrawl::turn_log::{summarize, LoggedEvent, Mover, TurnEvent, TurnLog};
use std::env;

fn describe(logged: &LoggedEvent) -> String {
    let who = |mover: &Mover| match mover {
        Mover::Player => "player".to_string(),
        Mover::Enemy(i) => format!("enemy #{}", i),
    };

    match &logged.event {
        TurnEvent::LevelStarted { level, food } => format!("day {} starts with {} food", level, food),
        TurnEvent::Moved { mover, from, to } => {
            format!("{} moves ({}, {}) -> ({}, {})", who(mover), from.x, from.y, to.x, to.y)
        }
        TurnEvent::Blocked { mover, at, by } => {
            format!("{} at ({}, {}) blocked by {:?}", who(mover), at.x, at.y, by)
        }
        TurnEvent::PickedUp { kind, food } => format!("picked up {:?}, food {}", kind, food),
        TurnEvent::Damaged { loss, food } => format!("hit for {}, food {}", loss, food),
        TurnEvent::GameOver { level, food } => format!("starved on day {} with {} food", level, food),
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <turn_log.json>", args[0]);
        eprintln!("Prints a saved turn log in human-readable form");
        std::process::exit(1);
    }

    let filename = &args[1];
    let events = match TurnLog::load_from_file(filename) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Failed to read {}: {}", filename, e);
            std::process::exit(1);
        }
    };

    println!("=== Turn Log: {} ({} events) ===", filename, events.len());
    for (i, logged) in events.iter().enumerate() {
        println!("[{:6}ms] turn {:3} #{:3} {}", logged.timestamp_ms, logged.turn, i + 1, describe(logged));
    }

    println!("\n=== Summary ===");
    println!("{}", summarize(&events));
}
