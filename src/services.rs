//! Collaborators the actors talk to: audio, on-screen text, animation
//! cues and level reloads. Actors receive them at construction as shared
//! handles; the concrete types here are what the game host plugs in.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;

use crate::game_state::GameState;

/// Single-threaded shared handle
pub type Shared<T> = Rc<RefCell<T>>;

pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

pub trait AudioService {
    /// Play one of two clips, picked at random
    fn play_one_of(&mut self, clip_a: &str, clip_b: &str);
    fn play_single(&mut self, clip: &str);
    fn stop_music(&mut self);
}

pub trait DisplayText {
    fn set_text(&mut self, text: &str);
}

pub trait AnimationCue {
    fn trigger(&mut self, name: &str);
}

pub trait LevelLoader {
    fn reload_current_after_delay(&mut self, seconds: f32);
}

/// Everything a player needs besides its own animator
#[derive(Clone)]
pub struct Services {
    pub game: Shared<GameState>,
    pub audio: Shared<dyn AudioService>,
    pub food_text: Shared<dyn DisplayText>,
    pub level_loader: Shared<dyn LevelLoader>,
}

/// A clip that was started, with the pitch it was played at
#[derive(Clone, Debug, PartialEq)]
pub struct PlayedSound {
    pub clip: String,
    pub pitch: f32,
}

/// Sound effect picker. Randomizes both the clip and the pitch so repeated
/// effects do not sound identical. Keeps a history of what it played.
#[derive(Debug)]
pub struct SoundManager {
    rng: StdRng,
    low_pitch: f32,
    high_pitch: f32,
    music_playing: bool,
    played: Vec<PlayedSound>,
}

impl SoundManager {
    pub const LOW_PITCH: f32 = 0.95;
    pub const HIGH_PITCH: f32 = 1.05;

    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic picks, for replays and tests
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        SoundManager {
            rng,
            low_pitch: Self::LOW_PITCH,
            high_pitch: Self::HIGH_PITCH,
            music_playing: true,
            played: Vec::new(),
        }
    }

    pub fn played(&self) -> &[PlayedSound] {
        &self.played
    }

    pub fn last_clip(&self) -> Option<&str> {
        self.played.last().map(|p| p.clip.as_str())
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }
}

impl Default for SoundManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioService for SoundManager {
    fn play_one_of(&mut self, clip_a: &str, clip_b: &str) {
        let clip = if self.rng.gen_bool(0.5) { clip_a } else { clip_b };
        let pitch = self.rng.gen_range(self.low_pitch..self.high_pitch);
        debug!("sfx {} at pitch {:.3}", clip, pitch);
        self.played.push(PlayedSound {
            clip: clip.to_string(),
            pitch,
        });
    }

    fn play_single(&mut self, clip: &str) {
        debug!("sfx {}", clip);
        self.played.push(PlayedSound {
            clip: clip.to_string(),
            pitch: 1.0,
        });
    }

    fn stop_music(&mut self) {
        if self.music_playing {
            info!("music stopped");
        }
        self.music_playing = false;
    }
}

/// Label holding the last text it was given
#[derive(Debug, Default, Clone)]
pub struct TextLabel {
    pub text: String,
}

impl DisplayText for TextLabel {
    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }
}

/// Records animation triggers in order
#[derive(Debug, Default, Clone)]
pub struct CueLog {
    pub cues: Vec<String>,
}

impl CueLog {
    pub fn last(&self) -> Option<&str> {
        self.cues.last().map(String::as_str)
    }

    pub fn count(&self, name: &str) -> usize {
        self.cues.iter().filter(|c| c.as_str() == name).count()
    }
}

impl AnimationCue for CueLog {
    fn trigger(&mut self, name: &str) {
        debug!("animation trigger {}", name);
        self.cues.push(name.to_string());
    }
}

/// Holds a requested level reload until the turn scheduler picks it up
#[derive(Debug, Default, Clone)]
pub struct PendingRestart {
    delay: Option<f32>,
}

impl PendingRestart {
    pub fn is_pending(&self) -> bool {
        self.delay.is_some()
    }

    /// Take the requested delay, clearing the request
    pub fn take(&mut self) -> Option<f32> {
        self.delay.take()
    }
}

impl LevelLoader for PendingRestart {
    fn reload_current_after_delay(&mut self, seconds: f32) {
        info!("level reload requested in {:.2}s", seconds);
        self.delay = Some(seconds);
    }
}
