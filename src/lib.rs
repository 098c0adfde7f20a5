pub mod actor;
pub mod collision;
pub mod config;
pub mod enemy;
pub mod error;
pub mod game;
pub mod game_state;
pub mod grid;
pub mod motion;
pub mod player;
pub mod position;
pub mod services;
pub mod turn_log;

pub use actor::{Actor, Capability, PlayerTarget, WallTarget};
pub use collision::{BodyKind, ColliderHandle, CollisionQuery, CollisionWorld, Hit, LayerMask, PickupKind};
pub use config::Config;
pub use enemy::Enemy;
pub use error::{GameError, GameResult};
pub use game::{HostHooks, Phase, TurnScheduler};
pub use game_state::GameState;
pub use grid::Grid;
pub use motion::{MotionController, MoveOutcome, SlideState, SlideStatus};
pub use player::{AxisInput, Player, PlayerSettings};
pub use position::Position;
