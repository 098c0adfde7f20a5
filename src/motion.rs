use log::{debug, warn};

use crate::collision::{ColliderHandle, CollisionQuery, Hit, LayerMask};
use crate::error::{GameError, GameResult};
use crate::position::Position;

/// Squared distance under which a slide counts as arrived
pub const ARRIVAL_SQR_EPSILON: f32 = 1e-6;

/// Shortest allowed time to cross one cell, in seconds
pub const MIN_MOVE_DURATION: f32 = 1e-3;

/// Slide progress of one actor
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlideState {
    Idle,
    Sliding { dest: Position },
}

/// What a call to `MotionController::tick` did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideStatus {
    /// Nothing to advance
    Idle,
    /// Moved this tick, destination not reached yet
    InProgress,
    /// Reached the destination this tick
    Arrived,
}

/// Result of a move request.
///
/// `moved == true` means the move was accepted and a slide started, not
/// that the actor has arrived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveOutcome {
    pub moved: bool,
    pub hit: Option<Hit>,
    /// Cell the move was aimed at
    pub dest: Position,
}

/// Grid stepping for a single actor: probe the path, then slide over
/// several ticks toward the next cell.
#[derive(Clone, Debug)]
pub struct MotionController {
    move_duration: f32,
    /// 1 / move_duration, so each tick multiplies instead of divides
    inverse_move_time: f32,
    collider: ColliderHandle,
    position: Position,
    state: SlideState,
}

impl MotionController {
    /// `move_duration` is the time in seconds to cross one cell. Values below
    /// `MIN_MOVE_DURATION` (or not finite) are raised to it so every slide ends.
    pub fn new(collider: ColliderHandle, position: Position, move_duration: f32) -> Self {
        let move_duration = if move_duration.is_finite() && move_duration >= MIN_MOVE_DURATION {
            move_duration
        } else {
            warn!(
                "move duration {} out of range, using {}",
                move_duration, MIN_MOVE_DURATION
            );
            MIN_MOVE_DURATION
        };
        MotionController {
            move_duration,
            inverse_move_time: 1.0 / move_duration,
            collider,
            position,
            state: SlideState::Idle,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }

    pub fn move_duration(&self) -> f32 {
        self.move_duration
    }

    /// Cells per second
    pub fn speed(&self) -> f32 {
        self.inverse_move_time
    }

    pub fn state(&self) -> SlideState {
        self.state
    }

    pub fn is_sliding(&self) -> bool {
        matches!(self.state, SlideState::Sliding { .. })
    }

    /// Cast from the current position one `direction` ahead on the blocking
    /// layer, ignoring this actor's own collider.
    pub fn probe<W: CollisionQuery + ?Sized>(&self, world: &mut W, direction: Position) -> Option<Hit> {
        let start = self.position;
        let end = start + direction;

        world.set_enabled(self.collider, false);
        let hit = world.linecast(start, end, LayerMask::BLOCKING);
        world.set_enabled(self.collider, true);

        hit
    }

    /// Probe and, if the way is clear, start sliding toward `position + direction`.
    ///
    /// Fails with `SlideInProgress` if the previous slide has not finished.
    pub fn try_move<W: CollisionQuery + ?Sized>(&mut self, world: &mut W, direction: Position) -> GameResult<MoveOutcome> {
        if let SlideState::Sliding { dest } = self.state {
            return Err(GameError::SlideInProgress {
                collider: self.collider,
                dest,
            });
        }

        let dest = self.position + direction;
        let hit = self.probe(world, direction);
        if let Some(hit) = hit {
            debug!(
                "collider {} blocked by {:?} ({}) moving to ({}, {})",
                self.collider.0, hit.kind, hit.handle.0, dest.x, dest.y
            );
            return Ok(MoveOutcome { moved: false, hit: Some(hit), dest });
        }

        self.state = SlideState::Sliding { dest };
        Ok(MoveOutcome { moved: true, hit: None, dest })
    }

    /// Advance an active slide by `delta_time` seconds (call once per frame)
    pub fn tick<W: CollisionQuery + ?Sized>(&mut self, world: &mut W, delta_time: f32) -> SlideStatus {
        let SlideState::Sliding { dest } = self.state else {
            return SlideStatus::Idle;
        };

        if self.position.sqr_distance(dest) > ARRIVAL_SQR_EPSILON {
            self.position = self
                .position
                .move_towards(dest, self.inverse_move_time * delta_time);
        }

        if self.position.sqr_distance(dest) <= ARRIVAL_SQR_EPSILON {
            self.position = dest;
            self.state = SlideState::Idle;
            world.set_position(self.collider, dest);
            debug!("collider {} arrived at ({}, {})", self.collider.0, dest.x, dest.y);
            return SlideStatus::Arrived;
        }

        world.set_position(self.collider, self.position);
        SlideStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{BodyKind, CollisionWorld};

    fn actor_at(world: &mut CollisionWorld, x: i32, y: i32, move_duration: f32) -> MotionController {
        let handle = world.spawn(BodyKind::Player, Position::cell(x, y));
        MotionController::new(handle, Position::cell(x, y), move_duration)
    }

    #[test]
    fn test_single_tick_slide() {
        let mut world = CollisionWorld::new();
        let mut motion = actor_at(&mut world, 0, 0, 0.1);

        let outcome = motion.try_move(&mut world, Position::new(1.0, 0.0)).unwrap();
        assert!(outcome.moved);
        assert!(outcome.hit.is_none());
        // Accepted but not there yet
        assert_eq!(motion.position(), Position::cell(0, 0));

        assert_eq!(motion.tick(&mut world, 0.1), SlideStatus::Arrived);
        assert_eq!(motion.position(), Position::cell(1, 0));
        assert_eq!(world.get(motion.collider()).unwrap().center, Position::cell(1, 0));
        assert_eq!(motion.tick(&mut world, 0.1), SlideStatus::Idle);
    }

    #[test]
    fn test_blocked_move_keeps_position() {
        let mut world = CollisionWorld::new();
        let wall = world.spawn_wall(Position::cell(0, 1), 3);
        let mut motion = actor_at(&mut world, 0, 0, 0.1);

        let outcome = motion.try_move(&mut world, Position::new(0.0, 1.0)).unwrap();
        assert!(!outcome.moved);
        assert_eq!(outcome.hit.map(|h| h.handle), Some(wall));
        assert_eq!(motion.state(), SlideState::Idle);
        assert_eq!(motion.tick(&mut world, 0.1), SlideStatus::Idle);
        assert_eq!(motion.position(), Position::cell(0, 0));
    }

    #[test]
    fn test_probe_restores_own_collider() {
        let mut world = CollisionWorld::new();
        let motion = actor_at(&mut world, 0, 0, 0.1);

        assert!(motion.probe(&mut world, Position::new(1.0, 0.0)).is_none());
        assert!(world.get(motion.collider()).unwrap().enabled);
    }

    #[test]
    fn test_second_move_while_sliding_is_rejected() {
        let mut world = CollisionWorld::new();
        let mut motion = actor_at(&mut world, 0, 0, 0.5);

        motion.try_move(&mut world, Position::new(1.0, 0.0)).unwrap();
        motion.tick(&mut world, 0.1);
        let before = motion.position();

        let err = motion.try_move(&mut world, Position::new(0.0, 1.0));
        assert!(matches!(err, Err(GameError::SlideInProgress { .. })));
        assert_eq!(motion.position(), before);
        assert_eq!(motion.state(), SlideState::Sliding { dest: Position::cell(1, 0) });
    }

    #[test]
    fn test_bad_durations_still_finish() {
        for duration in [0.0, -0.1, f32::NAN, f32::INFINITY] {
            let mut world = CollisionWorld::new();
            let mut motion = actor_at(&mut world, 1, 1, duration);
            assert_eq!(motion.move_duration(), MIN_MOVE_DURATION);

            motion.try_move(&mut world, Position::new(1.0, 0.0)).unwrap();
            // A zero-length first frame must not poison the position
            assert_eq!(motion.tick(&mut world, 0.0), SlideStatus::InProgress);
            assert_eq!(motion.position(), Position::cell(1, 1));
            assert_eq!(motion.tick(&mut world, 1.0 / 60.0), SlideStatus::Arrived);
            assert_eq!(motion.position(), Position::cell(2, 1));
        }
    }

    #[test]
    fn test_speed_is_reciprocal() {
        let mut world = CollisionWorld::new();
        let motion = actor_at(&mut world, 0, 0, 0.25);
        assert_eq!(motion.speed(), 4.0);
    }
}
