//! Turn scheduler: alternates the player's turn with the enemies' turn,
//! advances slides every frame, feeds pickups to the player, and reloads
//! the level when the exit is reached.

use log::info;
use std::cell::Ref;

use crate::actor::Actor;
use crate::collision::{BodyKind, CollisionWorld, LayerMask};
use crate::config::Config;
use crate::enemy::{Enemy, EnemySettings};
use crate::error::GameResult;
use crate::game_state::GameState;
use crate::grid::Grid;
use crate::motion::{MotionController, MoveOutcome};
use crate::player::{AxisInput, Player, PlayerSettings};
use crate::position::Position;
use crate::services::{shared, AnimationCue, AudioService, DisplayText, PendingRestart, Services, Shared};
use crate::turn_log::{Mover, TurnEvent, TurnLog};

/// Collaborators supplied by whoever hosts the game
#[derive(Clone)]
pub struct HostHooks {
    pub audio: Shared<dyn AudioService>,
    pub food_text: Shared<dyn DisplayText>,
    pub player_animator: Shared<dyn AnimationCue>,
    pub enemy_animator: Shared<dyn AnimationCue>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// Waiting for player input
    PlayerTurn,
    /// Pause after the player's move before enemies act
    EnemyDelay { remaining: f32 },
    /// Enemies act one at a time, `wait` seconds apart
    EnemyMoving { next: usize, wait: f32 },
    /// Exit reached, reloading after `remaining` seconds
    Restarting { remaining: f32 },
    GameOver,
}

pub struct TurnScheduler {
    grid: Grid,
    config: Config,
    hooks: HostHooks,
    game: Shared<GameState>,
    restart: Shared<PendingRestart>,
    world: CollisionWorld,
    player: Player,
    enemies: Vec<Enemy>,
    phase: Phase,
    log: TurnLog,
}

impl TurnScheduler {
    pub fn new(grid: Grid, config: Config, hooks: HostHooks) -> GameResult<Self> {
        let game = shared(GameState::new(config.player.starting_food));
        let restart = shared(PendingRestart::default());
        let (world, player, enemies) = build_level(&grid, &config, &hooks, &game, &restart)?;

        let mut scheduler = TurnScheduler {
            grid,
            config,
            hooks,
            game,
            restart,
            world,
            player,
            enemies,
            phase: Phase::PlayerTurn,
            log: TurnLog::new(),
        };
        scheduler.log_level_start();
        Ok(scheduler)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn game_state(&self) -> Ref<'_, GameState> {
        self.game.borrow()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn turn_log(&self) -> &TurnLog {
        &self.log
    }

    /// Current board as a layout, including destroyed walls and eaten pickups
    pub fn snapshot(&self) -> Grid {
        Grid::from_world(&self.world, self.grid.rows, self.grid.cols)
    }

    /// Advance the game by one frame
    pub fn tick(&mut self, delta_time: f32, input: AxisInput) -> GameResult<()> {
        if self.phase == Phase::GameOver {
            return Ok(());
        }

        self.player.tick_motion(&mut self.world, delta_time);
        for enemy in &mut self.enemies {
            enemy.tick_motion(&mut self.world, delta_time);
        }
        self.collect_pickups();

        if let Some(delay) = self.restart.borrow_mut().take() {
            self.phase = Phase::Restarting { remaining: delay };
        }

        self.phase = match self.phase {
            Phase::PlayerTurn => self.player_phase(input)?,
            Phase::EnemyDelay { remaining } => {
                let remaining = remaining - delta_time;
                if remaining > 0.0 {
                    Phase::EnemyDelay { remaining }
                } else {
                    Phase::EnemyMoving { next: 0, wait: 0.0 }
                }
            }
            Phase::EnemyMoving { next, wait } => self.enemy_phase(next, wait - delta_time)?,
            Phase::Restarting { remaining } => {
                let remaining = remaining - delta_time;
                if remaining > 0.0 {
                    Phase::Restarting { remaining }
                } else {
                    self.load_next_level()?;
                    Phase::PlayerTurn
                }
            }
            Phase::GameOver => Phase::GameOver,
        };

        if self.game.borrow().is_game_over() {
            self.finish_game();
        }
        Ok(())
    }

    fn player_phase(&mut self, input: AxisInput) -> GameResult<Phase> {
        if self.game.borrow().players_turn {
            let from = self.player.position();
            let Some(outcome) = self.player.update(&mut self.world, input)? else {
                return Ok(Phase::PlayerTurn);
            };
            self.log.next_turn();
            self.log_move(Mover::Player, from, &outcome);
        }

        if self.game.borrow().players_turn {
            Ok(Phase::PlayerTurn)
        } else {
            Ok(Phase::EnemyDelay {
                remaining: self.config.turns.turn_delay,
            })
        }
    }

    fn enemy_phase(&mut self, next: usize, wait: f32) -> GameResult<Phase> {
        if wait > 0.0 {
            return Ok(Phase::EnemyMoving { next, wait });
        }

        let Some(enemy) = self.enemies.get_mut(next) else {
            self.game.borrow_mut().players_turn = true;
            return Ok(Phase::PlayerTurn);
        };
        if enemy.motion().is_sliding() {
            return Ok(Phase::EnemyMoving { next, wait: 0.0 });
        }

        let from = enemy.position();
        let outcome = enemy.take_turn(&mut self.world, self.player.position())?;
        let attack = enemy.take_attack();
        let wait = enemy.motion().move_duration();

        if let Some(outcome) = outcome {
            self.log_move(Mover::Enemy(next), from, &outcome);
        }
        if let Some(loss) = attack {
            self.player.apply_damage(loss);
            self.log.log(TurnEvent::Damaged {
                loss,
                food: self.player.food(),
            });
        }

        Ok(Phase::EnemyMoving { next: next + 1, wait })
    }

    fn collect_pickups(&mut self) {
        if !self.player.is_enabled() {
            return;
        }

        let touching = self.world.overlapping(self.player.collider(), LayerMask::ITEMS);
        for (handle, body) in touching {
            let BodyKind::Pickup(kind) = body else {
                continue;
            };
            let gained = self.player.on_pickup(&mut self.world, handle, kind);
            info!("picked up {:?} (+{}), food now {}", kind, gained, self.player.food());
            self.log.log(TurnEvent::PickedUp {
                kind,
                food: self.player.food(),
            });
            if !self.player.is_enabled() {
                break;
            }
        }
    }

    fn load_next_level(&mut self) -> GameResult<()> {
        self.player.disable();
        self.game.borrow_mut().advance_level();

        let (world, player, enemies) = build_level(&self.grid, &self.config, &self.hooks, &self.game, &self.restart)?;
        self.world = world;
        self.player = player;
        self.enemies = enemies;
        self.log_level_start();
        Ok(())
    }

    fn finish_game(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        self.phase = Phase::GameOver;
        let level = self.game.borrow().level;
        self.log.log(TurnEvent::GameOver {
            level,
            food: self.player.food(),
        });
    }

    fn log_level_start(&mut self) {
        let level = self.game.borrow().level;
        self.log.log(TurnEvent::LevelStarted {
            level,
            food: self.player.food(),
        });
    }

    fn log_move(&mut self, mover: Mover, from: Position, outcome: &MoveOutcome) {
        if outcome.moved {
            self.log.log(TurnEvent::Moved {
                mover,
                from,
                to: outcome.dest,
            });
        } else if let Some(hit) = outcome.hit {
            self.log.log(TurnEvent::Blocked {
                mover,
                at: from,
                by: hit.kind,
            });
        }
    }
}

/// Spawn a fresh world and its actors from `grid`
fn build_level(
    grid: &Grid,
    config: &Config,
    hooks: &HostHooks,
    game: &Shared<GameState>,
    restart: &Shared<PendingRestart>,
) -> GameResult<(CollisionWorld, Player, Vec<Enemy>)> {
    let mut world = CollisionWorld::new();
    let spawn = grid.populate(&mut world, config.walls.hit_points)?;
    let move_duration = config.motion.move_duration;

    let services = Services {
        game: game.clone(),
        audio: hooks.audio.clone(),
        food_text: hooks.food_text.clone(),
        level_loader: restart.clone(),
    };

    let (handle, position) = spawn.player;
    let player = Player::new(
        MotionController::new(handle, position, move_duration),
        PlayerSettings::from_config(config),
        &services,
        hooks.player_animator.clone(),
    );

    let enemy_settings = EnemySettings::from_config(config);
    let enemies = spawn
        .enemies
        .into_iter()
        .map(|(handle, position)| {
            Enemy::new(
                MotionController::new(handle, position, move_duration),
                enemy_settings.clone(),
                hooks.audio.clone(),
                hooks.enemy_animator.clone(),
            )
        })
        .collect();

    Ok((world, player, enemies))
}
