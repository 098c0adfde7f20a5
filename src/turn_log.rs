use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::collision::{BodyKind, PickupKind};
use crate::error::GameResult;
use crate::position::Position;

/// Who acted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mover {
    Player,
    /// Index into the level's enemy list
    Enemy(usize),
}

/// Things that happen during play
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A new level began
    LevelStarted { level: u32, food: i32 },
    /// Move accepted, slide started
    Moved { mover: Mover, from: Position, to: Position },
    /// Move refused by an obstacle
    Blocked { mover: Mover, at: Position, by: BodyKind },
    /// Player walked over a pickup
    PickedUp { kind: PickupKind, food: i32 },
    /// Player was hit by an enemy
    Damaged { loss: i32, food: i32 },
    GameOver { level: u32, food: i32 },
}

/// Logged event with timestamp and turn number
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    /// Player turns taken so far
    pub turn: u32,
    pub event: TurnEvent,
}

/// Turn event logger
#[derive(Debug)]
pub struct TurnLog {
    start_time: Instant,
    turn: u32,
    events: Vec<LoggedEvent>,
}

impl TurnLog {
    pub fn new() -> Self {
        TurnLog {
            start_time: Instant::now(),
            turn: 0,
            events: Vec::new(),
        }
    }

    /// Log an event with current timestamp and turn
    pub fn log(&mut self, event: TurnEvent) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.events.push(LoggedEvent {
            timestamp_ms,
            turn: self.turn,
            event,
        });
    }

    /// Count a new player turn
    pub fn next_turn(&mut self) {
        self.turn += 1;
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> GameResult<()> {
        let json = serde_json::to_string_pretty(&self.events)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read events written by `save_to_file`
    pub fn load_from_file(path: &str) -> GameResult<Vec<LoggedEvent>> {
        let json = std::fs::read_to_string(path)?;
        let events = serde_json::from_str(&json)?;
        Ok(events)
    }

    pub fn summary(&self) -> String {
        summarize(&self.events)
    }
}

impl Default for TurnLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics over a list of events
pub fn summarize(events: &[LoggedEvent]) -> String {
    let mut player_moves = 0;
    let mut player_blocked = 0;
    let mut enemy_moves = 0;
    let mut enemy_attacks = 0;
    let mut pickups = 0;
    let mut food_lost = 0;
    let mut levels = 0;
    let mut final_food = None;

    for logged in events {
        match &logged.event {
            TurnEvent::LevelStarted { food, .. } => {
                levels += 1;
                final_food = Some(*food);
            }
            TurnEvent::Moved { mover: Mover::Player, .. } => player_moves += 1,
            TurnEvent::Moved { mover: Mover::Enemy(_), .. } => enemy_moves += 1,
            TurnEvent::Blocked { mover: Mover::Player, .. } => player_blocked += 1,
            TurnEvent::Blocked { mover: Mover::Enemy(_), by, .. } => {
                if *by == BodyKind::Player {
                    enemy_attacks += 1;
                }
            }
            TurnEvent::PickedUp { kind, food } => {
                if *kind != PickupKind::Exit {
                    pickups += 1;
                }
                final_food = Some(*food);
            }
            TurnEvent::Damaged { loss, food } => {
                food_lost += loss;
                final_food = Some(*food);
            }
            TurnEvent::GameOver { food, .. } => final_food = Some(*food),
        }
    }

    let turns = events.last().map_or(0, |e| e.turn);
    let duration = events.last().map_or(0, |e| e.timestamp_ms);

    format!(
        "Session Duration: {}ms\n\
         Turns: {} over {} level(s)\n\
         Player: {} moves, {} blocked, {} pickups\n\
         Enemies: {} moves, {} attacks ({} food lost)\n\
         Final food: {}",
        duration,
        turns,
        levels,
        player_moves,
        player_blocked,
        pickups,
        enemy_moves,
        enemy_attacks,
        food_lost,
        final_food.map_or_else(|| "unknown".to_string(), |f| f.to_string())
    )
}
