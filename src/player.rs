use log::{debug, info};
use std::fmt;

use crate::actor::{Actor, WallTarget};
use crate::collision::{ColliderHandle, CollisionWorld, PickupKind};
use crate::config::Config;
use crate::error::{GameError, GameResult};
use crate::game_state::GameState;
use crate::motion::{MotionController, MoveOutcome, SlideState};
use crate::services::{AnimationCue, AudioService, DisplayText, LevelLoader, Services, Shared};

pub const CHOP_TRIGGER: &str = "playerChop";
pub const HIT_TRIGGER: &str = "playerHit";

/// Raw axis readings for one frame, each in -1..=1
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxisInput {
    pub horizontal: i32,
    pub vertical: i32,
}

impl AxisInput {
    pub fn new(horizontal: i32, vertical: i32) -> Self {
        AxisInput { horizontal, vertical }
    }

    /// Step to take, if any. Horizontal wins: diagonal input moves sideways.
    pub fn direction(self) -> Option<(i32, i32)> {
        let vertical = if self.horizontal != 0 { 0 } else { self.vertical };
        if self.horizontal != 0 || vertical != 0 {
            Some((self.horizontal, vertical))
        } else {
            None
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlayerSettings {
    pub wall_damage: i32,
    pub points_per_food: i32,
    pub points_per_soda: i32,
    pub restart_level_delay: f32,
    pub move_sounds: [String; 2],
    pub eat_sounds: [String; 2],
    pub drink_sounds: [String; 2],
    pub chop_sounds: [String; 2],
    pub game_over_sound: String,
}

impl PlayerSettings {
    pub fn from_config(config: &Config) -> Self {
        PlayerSettings {
            wall_damage: config.player.wall_damage,
            points_per_food: config.player.points_per_food,
            points_per_soda: config.player.points_per_soda,
            restart_level_delay: config.player.restart_level_delay,
            move_sounds: config.audio.move_sounds.clone(),
            eat_sounds: config.audio.eat_sounds.clone(),
            drink_sounds: config.audio.drink_sounds.clone(),
            chop_sounds: config.audio.chop_sounds.clone(),
            game_over_sound: config.audio.game_over_sound.clone(),
        }
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// The player-controlled actor. Every step costs one food; walls in the
/// way get chopped; running out of food ends the game.
pub struct Player {
    motion: MotionController,
    /// Can dip below zero until the game over check runs
    food: i32,
    enabled: bool,
    settings: PlayerSettings,
    game: Shared<GameState>,
    audio: Shared<dyn AudioService>,
    food_text: Shared<dyn DisplayText>,
    level_loader: Shared<dyn LevelLoader>,
    animator: Shared<dyn AnimationCue>,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("motion", &self.motion)
            .field("food", &self.food)
            .field("enabled", &self.enabled)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Player {
    /// Picks up the food total stored in the game state
    pub fn new(
        motion: MotionController,
        settings: PlayerSettings,
        services: &Services,
        animator: Shared<dyn AnimationCue>,
    ) -> Self {
        let food = services.game.borrow().player_food_points;
        let player = Player {
            motion,
            food,
            enabled: true,
            settings,
            game: services.game.clone(),
            audio: services.audio.clone(),
            food_text: services.food_text.clone(),
            level_loader: services.level_loader.clone(),
            animator,
        };
        player.show_food(&format!("Food: {}", food));
        player
    }

    pub fn food(&self) -> i32 {
        self.food
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn collider(&self) -> ColliderHandle {
        self.motion.collider()
    }

    /// Per-frame input handling. Does nothing unless it is the player's
    /// turn, the player is enabled and the previous slide has finished.
    pub fn update(&mut self, world: &mut CollisionWorld, input: AxisInput) -> GameResult<Option<MoveOutcome>> {
        if !self.enabled || !self.game.borrow().players_turn || self.motion.is_sliding() {
            return Ok(None);
        }

        match input.direction() {
            Some((dx, dy)) => self.take_turn(world, dx, dy).map(Some),
            None => Ok(None),
        }
    }

    /// Spend the turn on a step of (dx, dy): pay one food, move or chop,
    /// check for game over and hand the turn away.
    pub fn take_turn(&mut self, world: &mut CollisionWorld, dx: i32, dy: i32) -> GameResult<MoveOutcome> {
        if let SlideState::Sliding { dest } = self.motion.state() {
            return Err(GameError::SlideInProgress {
                collider: self.motion.collider(),
                dest,
            });
        }

        self.food = self.food.saturating_sub(1);
        self.show_food(&format!("Food: {}", self.food));

        let outcome = self.attempt_move(world, dx, dy)?;
        if outcome.moved {
            let [a, b] = &self.settings.move_sounds;
            self.audio.borrow_mut().play_one_of(a, b);
        }

        self.check_if_game_over();
        self.game.borrow_mut().players_turn = false;

        Ok(outcome)
    }

    /// Trigger-volume contact with a pickup. Returns the food gained.
    pub fn on_pickup(&mut self, world: &mut CollisionWorld, handle: ColliderHandle, kind: PickupKind) -> i32 {
        match kind {
            PickupKind::Exit => {
                info!("reached the exit with {} food", self.food);
                self.level_loader
                    .borrow_mut()
                    .reload_current_after_delay(self.settings.restart_level_delay);
                self.disable();
                0
            }
            PickupKind::Food => {
                let points = self.settings.points_per_food;
                let [a, b] = self.settings.eat_sounds.clone();
                self.gain_food(world, handle, points, &a, &b);
                points
            }
            PickupKind::Soda => {
                let points = self.settings.points_per_soda;
                let [a, b] = self.settings.drink_sounds.clone();
                self.gain_food(world, handle, points, &a, &b);
                points
            }
        }
    }

    fn gain_food(&mut self, world: &mut CollisionWorld, handle: ColliderHandle, points: i32, clip_a: &str, clip_b: &str) {
        self.food = self.food.saturating_add(points);
        self.show_food(&format!("+{} Food: {}", points, self.food));
        self.audio.borrow_mut().play_one_of(clip_a, clip_b);
        world.deactivate(handle);
        debug!("picked up {} food, now {}", points, self.food);
    }

    /// Called when an enemy hits the player
    pub fn apply_damage(&mut self, loss: i32) {
        self.animator.borrow_mut().trigger(HIT_TRIGGER);
        self.food = self.food.saturating_sub(loss);
        self.show_food(&format!("-{} Food: {}", loss, self.food));
        self.check_if_game_over();
    }

    /// Stop taking input and hand the food total back to the game state
    /// for the next level.
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.game.borrow_mut().player_food_points = self.food;
    }

    /// True when food has run out. Plays the game over sound, stops the
    /// music and tells the game state.
    fn check_if_game_over(&mut self) -> bool {
        if self.food > 0 {
            return false;
        }
        {
            let mut audio = self.audio.borrow_mut();
            audio.play_single(&self.settings.game_over_sound);
            audio.stop_music();
        }
        self.game.borrow_mut().notify_game_over();
        true
    }

    fn show_food(&self, text: &str) {
        self.food_text.borrow_mut().set_text(text);
    }
}

impl Actor for Player {
    type Target = WallTarget;

    fn motion(&self) -> &MotionController {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut MotionController {
        &mut self.motion
    }

    fn on_blocked(&mut self, world: &mut CollisionWorld, wall: WallTarget) {
        let remaining = world.damage_wall(wall.handle, self.settings.wall_damage);
        debug!("chopped wall {}, {:?} hit points left", wall.handle.0, remaining);
        {
            let [a, b] = &self.settings.chop_sounds;
            self.audio.borrow_mut().play_one_of(a, b);
        }
        self.animator.borrow_mut().trigger(CHOP_TRIGGER);
    }
}
