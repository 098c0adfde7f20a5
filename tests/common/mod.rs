#![allow(dead_code)]

use gridcrawl::services::{shared, CueLog, PendingRestart, Services, Shared, SoundManager, TextLabel};
use gridcrawl::{
    Actor, CollisionWorld, Config, GameState, Grid, HostHooks, MotionController, Phase, Player, PlayerSettings,
    Position, SlideStatus, TurnScheduler,
};

/// Seed for every sound manager in the tests
pub const AUDIO_SEED: u64 = 11;

/// The four axis-aligned unit steps: right, left, up, down
pub const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Recording collaborators handed to a player, kept so tests can look inside
pub struct Probes {
    pub game: Shared<GameState>,
    pub audio: Shared<SoundManager>,
    pub text: Shared<TextLabel>,
    pub cues: Shared<CueLog>,
    pub restart: Shared<PendingRestart>,
}

impl Probes {
    pub fn new(food: i32) -> Self {
        Probes {
            game: shared(GameState::new(food)),
            audio: shared(SoundManager::seeded(AUDIO_SEED)),
            text: shared(TextLabel::default()),
            cues: shared(CueLog::default()),
            restart: shared(PendingRestart::default()),
        }
    }

    pub fn services(&self) -> Services {
        Services {
            game: self.game.clone(),
            audio: self.audio.clone(),
            food_text: self.text.clone(),
            level_loader: self.restart.clone(),
        }
    }

    pub fn text(&self) -> String {
        self.text.borrow().text.clone()
    }

    /// How many times either clip of `pair` was played
    pub fn plays_of(&self, pair: &[String; 2]) -> usize {
        self.audio
            .borrow()
            .played()
            .iter()
            .filter(|p| p.clip == pair[0] || p.clip == pair[1])
            .count()
    }
}

/// Build a world from a text layout and put a player on its '@'
pub fn player_level(layout: &str, food: i32) -> (CollisionWorld, Player, Probes) {
    let grid = Grid::from_text(layout).expect("test layout parses");
    let mut world = CollisionWorld::new();
    let spawn = grid.populate(&mut world, 3).expect("test layout has a player");
    let probes = Probes::new(food);
    let (handle, position) = spawn.player;
    let player = Player::new(
        MotionController::new(handle, position, 0.1),
        PlayerSettings::default(),
        &probes.services(),
        probes.cues.clone(),
    );
    (world, player, probes)
}

/// Tick an actor until its slide ends. Returns the number of ticks taken.
pub fn finish_slide<A: Actor>(actor: &mut A, world: &mut CollisionWorld, delta_time: f32) -> usize {
    let mut ticks = 0;
    while actor.motion().is_sliding() {
        ticks += 1;
        assert!(ticks < 10_000, "slide never finished");
        if actor.tick_motion(world, delta_time) == SlideStatus::Arrived {
            break;
        }
    }
    ticks
}

pub fn assert_near(actual: Position, expected: Position) {
    assert!(
        actual.sqr_distance(expected) < 1e-6,
        "expected ({}, {}), got ({}, {})",
        expected.x,
        expected.y,
        actual.x,
        actual.y
    );
}

/// Recording collaborators handed to a scheduler
pub struct HostProbes {
    pub audio: Shared<SoundManager>,
    pub text: Shared<TextLabel>,
    pub player_cues: Shared<CueLog>,
    pub enemy_cues: Shared<CueLog>,
}

pub fn scheduler(layout: &str, config: Config) -> (TurnScheduler, HostProbes) {
    let probes = HostProbes {
        audio: shared(SoundManager::seeded(AUDIO_SEED)),
        text: shared(TextLabel::default()),
        player_cues: shared(CueLog::default()),
        enemy_cues: shared(CueLog::default()),
    };
    let hooks = HostHooks {
        audio: probes.audio.clone(),
        food_text: probes.text.clone(),
        player_animator: probes.player_cues.clone(),
        enemy_animator: probes.enemy_cues.clone(),
    };
    let grid = Grid::from_text(layout).expect("test layout parses");
    let game = TurnScheduler::new(grid, config, hooks).expect("scheduler starts");
    (game, probes)
}

/// Tick with no input until the player may act again (or the game ends)
pub fn run_until_player_turn(game: &mut TurnScheduler, delta_time: f32) -> usize {
    let mut ticks = 0;
    loop {
        game.tick(delta_time, Default::default()).expect("tick succeeds");
        ticks += 1;
        let ready = game.phase() == Phase::PlayerTurn && !game.player().motion().is_sliding();
        if ready || game.phase() == Phase::GameOver {
            return ticks;
        }
        assert!(ticks < 10_000, "player turn never came back");
    }
}
