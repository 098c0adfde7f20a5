use log::debug;

use crate::actor::{Actor, PlayerTarget};
use crate::collision::CollisionWorld;
use crate::config::Config;
use crate::error::GameResult;
use crate::motion::{MotionController, MoveOutcome};
use crate::position::Position;
use crate::services::{AnimationCue, AudioService, Shared};

pub const ATTACK_TRIGGER: &str = "enemyAttack";

#[derive(Clone, Debug)]
pub struct EnemySettings {
    /// Food the player loses per hit
    pub player_damage: i32,
    pub attack_sounds: [String; 2],
}

impl EnemySettings {
    pub fn from_config(config: &Config) -> Self {
        EnemySettings {
            player_damage: config.enemy.player_damage,
            attack_sounds: config.audio.enemy_attack_sounds.clone(),
        }
    }
}

/// Chases the player, acting on every other turn. Bumping into the player
/// is an attack.
pub struct Enemy {
    motion: MotionController,
    settings: EnemySettings,
    skip_move: bool,
    /// Damage dealt by the last attack, waiting to be applied to the player
    pending_attack: Option<i32>,
    audio: Shared<dyn AudioService>,
    animator: Shared<dyn AnimationCue>,
}

impl Enemy {
    pub fn new(
        motion: MotionController,
        settings: EnemySettings,
        audio: Shared<dyn AudioService>,
        animator: Shared<dyn AnimationCue>,
    ) -> Self {
        Enemy {
            motion,
            settings,
            skip_move: false,
            pending_attack: None,
            audio,
            animator,
        }
    }

    /// Step toward `target`, or sit this turn out if the last turn was a move.
    /// Returns None for a skipped turn.
    pub fn take_turn(&mut self, world: &mut CollisionWorld, target: Position) -> GameResult<Option<MoveOutcome>> {
        if self.skip_move {
            self.skip_move = false;
            return Ok(None);
        }

        let (dx, dy) = self.direction_toward(target);
        let outcome = self.attempt_move(world, dx, dy)?;
        self.skip_move = true;
        Ok(Some(outcome))
    }

    /// Same column: close in vertically. Otherwise close in horizontally.
    pub fn direction_toward(&self, target: Position) -> (i32, i32) {
        let here = self.motion.position();
        if (target.x - here.x).abs() < f32::EPSILON {
            (0, if target.y > here.y { 1 } else { -1 })
        } else {
            (if target.x > here.x { 1 } else { -1 }, 0)
        }
    }

    /// Hand over the damage from the last attack, if any
    pub fn take_attack(&mut self) -> Option<i32> {
        self.pending_attack.take()
    }
}

impl Actor for Enemy {
    type Target = PlayerTarget;

    fn motion(&self) -> &MotionController {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut MotionController {
        &mut self.motion
    }

    fn on_blocked(&mut self, _world: &mut CollisionWorld, player: PlayerTarget) {
        debug!("enemy {} attacks player {}", self.motion.collider().0, player.handle.0);
        self.pending_attack = Some(self.settings.player_damage);
        self.animator.borrow_mut().trigger(ATTACK_TRIGGER);
        let [a, b] = &self.settings.attack_sounds;
        self.audio.borrow_mut().play_one_of(a, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::BodyKind;
    use crate::services::{shared, CueLog, SoundManager};

    fn enemy_at(world: &mut CollisionWorld, x: i32, y: i32) -> (Enemy, Shared<CueLog>) {
        let handle = world.spawn(BodyKind::Enemy, Position::cell(x, y));
        let cues = shared(CueLog::default());
        let enemy = Enemy::new(
            MotionController::new(handle, Position::cell(x, y), 0.1),
            EnemySettings::from_config(&Config::default()),
            shared(SoundManager::seeded(0)),
            cues.clone(),
        );
        (enemy, cues)
    }

    #[test]
    fn test_direction_prefers_vertical_in_same_column() {
        let mut world = CollisionWorld::new();
        let (enemy, _) = enemy_at(&mut world, 2, 2);
        assert_eq!(enemy.direction_toward(Position::cell(2, 5)), (0, 1));
        assert_eq!(enemy.direction_toward(Position::cell(2, 0)), (0, -1));
        assert_eq!(enemy.direction_toward(Position::cell(0, 5)), (-1, 0));
        assert_eq!(enemy.direction_toward(Position::cell(4, 2)), (1, 0));
    }

    #[test]
    fn test_skips_every_other_turn() {
        let mut world = CollisionWorld::new();
        let (mut enemy, _) = enemy_at(&mut world, 0, 0);
        let target = Position::cell(5, 0);

        assert!(enemy.take_turn(&mut world, target).unwrap().is_some());
        enemy.tick_motion(&mut world, 0.1);
        assert!(enemy.take_turn(&mut world, target).unwrap().is_none());
        assert!(enemy.take_turn(&mut world, target).unwrap().is_some());
    }

    #[test]
    fn test_bumping_player_queues_attack() {
        let mut world = CollisionWorld::new();
        world.spawn(BodyKind::Player, Position::cell(1, 0));
        let (mut enemy, cues) = enemy_at(&mut world, 0, 0);

        let outcome = enemy.take_turn(&mut world, Position::cell(1, 0)).unwrap().unwrap();
        assert!(!outcome.moved);
        assert_eq!(enemy.take_attack(), Some(10));
        assert_eq!(enemy.take_attack(), None);
        assert_eq!(cues.borrow().last(), Some(ATTACK_TRIGGER));
    }

    #[test]
    fn test_walls_do_not_provoke_attacks() {
        let mut world = CollisionWorld::new();
        world.spawn_wall(Position::cell(1, 0), 3);
        let (mut enemy, cues) = enemy_at(&mut world, 0, 0);

        let outcome = enemy.take_turn(&mut world, Position::cell(4, 0)).unwrap().unwrap();
        assert!(!outcome.moved);
        assert_eq!(enemy.take_attack(), None);
        assert!(cues.borrow().cues.is_empty());
    }
}
