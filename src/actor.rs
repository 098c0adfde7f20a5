use crate::collision::{BodyKind, ColliderHandle, CollisionWorld, Hit};
use crate::error::GameResult;
use crate::motion::{MotionController, MoveOutcome, SlideStatus};
use crate::position::Position;

/// A kind of object an actor knows how to interact with when it bumps into it.
/// Hits on anything else resolve to `None`.
pub trait Capability: Sized {
    fn resolve(hit: &Hit) -> Option<Self>;
}

/// A breakable wall the player can chop at
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallTarget {
    pub handle: ColliderHandle,
}

impl Capability for WallTarget {
    fn resolve(hit: &Hit) -> Option<Self> {
        match hit.kind {
            BodyKind::Wall => Some(WallTarget { handle: hit.handle }),
            _ => None,
        }
    }
}

/// The player, as seen by enemies
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerTarget {
    pub handle: ColliderHandle,
}

impl Capability for PlayerTarget {
    fn resolve(hit: &Hit) -> Option<Self> {
        match hit.kind {
            BodyKind::Player => Some(PlayerTarget { handle: hit.handle }),
            _ => None,
        }
    }
}

/// Something that moves one cell at a time and reacts when it bumps into
/// its `Target`.
pub trait Actor {
    type Target: Capability;

    fn motion(&self) -> &MotionController;

    fn motion_mut(&mut self) -> &mut MotionController;

    /// Reaction to a failed move into a `Target`
    fn on_blocked(&mut self, world: &mut CollisionWorld, target: Self::Target);

    fn position(&self) -> Position {
        self.motion().position()
    }

    /// Try to step by (dx, dy). A blocked move into something that resolves
    /// to `Target` calls `on_blocked`; a successful move never does.
    fn attempt_move(&mut self, world: &mut CollisionWorld, dx: i32, dy: i32) -> GameResult<MoveOutcome> {
        let outcome = self
            .motion_mut()
            .try_move(world, Position::new(dx as f32, dy as f32))?;

        let Some(hit) = outcome.hit else {
            return Ok(outcome);
        };

        let target = Self::Target::resolve(&hit);
        if !outcome.moved {
            if let Some(target) = target {
                self.on_blocked(world, target);
            }
        }

        Ok(outcome)
    }

    /// Advance this actor's slide (call once per frame)
    fn tick_motion(&mut self, world: &mut CollisionWorld, delta_time: f32) -> SlideStatus {
        self.motion_mut().tick(world, delta_time)
    }
}
