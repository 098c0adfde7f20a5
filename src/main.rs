use arboard::Clipboard;
use gridcrawl::collision::Collider;
use gridcrawl::config::{Config, DEFAULT_CONFIG_PATH};
use gridcrawl::grid::{Grid, DEFAULT_LAYOUT};
use gridcrawl::services::{shared, CueLog, Shared, SoundManager, TextLabel};
use gridcrawl::{AxisInput, BodyKind, GameResult, HostHooks, Phase, PickupKind, TurnScheduler};
use log::{error, info, warn};
use macroquad::prelude::{
    clear_background, draw_rectangle, draw_text, get_frame_time, is_key_down, is_key_pressed, next_frame, Color,
    Conf, KeyCode, WHITE,
};
use std::fs;

const MARGIN: f32 = 10.0;

/// Window host: owns the scheduler and the collaborators it draws from
struct Host {
    config: Config,
    game: TurnScheduler,
    food_text: Shared<TextLabel>,
    player_cues: Shared<CueLog>,
}

impl Host {
    fn new(config: Config) -> GameResult<Self> {
        let grid = load_level(&config.level.path)?;
        let food_text = shared(TextLabel::default());
        let player_cues = shared(CueLog::default());
        let hooks = HostHooks {
            audio: shared(SoundManager::new()),
            food_text: food_text.clone(),
            player_animator: player_cues.clone(),
            enemy_animator: shared(CueLog::default()),
        };
        let game = TurnScheduler::new(grid, config.clone(), hooks)?;

        Ok(Host {
            config,
            game,
            food_text,
            player_cues,
        })
    }

    fn copy_to_clipboard(&self) {
        let layout = self.game.snapshot().to_text();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(layout) {
                    warn!("failed to copy to clipboard: {}", e);
                } else {
                    info!("board layout copied to clipboard");
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => warn!("failed to access clipboard: {}", e),
        }
    }

    fn save_turn_log(&self) {
        if !self.config.logging.enable_turn_log {
            return;
        }
        let path = &self.config.logging.turn_log_path;
        match self.game.turn_log().save_to_file(path) {
            Ok(()) => info!("turn log saved to {}", path),
            Err(e) => warn!("could not save turn log: {}", e),
        }
    }

    fn draw(&self) {
        clear_background(Color::from_rgba(30, 30, 30, 255));

        let cell = self.config.visual.cell_size;
        let rows = self.game.grid().rows;
        let (actors, scenery): (Vec<&Collider>, Vec<&Collider>) = self
            .game
            .world()
            .colliders()
            .filter(|c| c.active)
            .partition(|c| matches!(c.kind, BodyKind::Player | BodyKind::Enemy));

        // Actors last so they draw over the pickups they cross
        for collider in scenery.into_iter().chain(actors) {
            let px = MARGIN + collider.center.x * cell;
            let py = MARGIN + ((rows - 1) as f32 - collider.center.y) * cell;
            draw_rectangle(px, py, cell - 1.0, cell - 1.0, body_color(collider));
        }

        let text_y = MARGIN + rows as f32 * cell + 24.0;
        let state = self.game.game_state();
        draw_text(&self.food_text.borrow().text, MARGIN, text_y, 24.0, WHITE);
        draw_text(state.level_text(), MARGIN, text_y + 26.0, 24.0, WHITE);

        let status = match self.game.phase() {
            Phase::PlayerTurn => "Your turn (arrows/WASD to move, C: copy board, Esc: quit)",
            Phase::EnemyDelay { .. } | Phase::EnemyMoving { .. } => "Enemies moving...",
            Phase::Restarting { .. } => "On to the next day...",
            Phase::GameOver => "Game over (Esc to quit)",
        };
        draw_text(status, MARGIN, text_y + 52.0, 20.0, WHITE);
        if let Some(cue) = self.player_cues.borrow().last() {
            draw_text(&format!("last action: {}", cue), MARGIN, text_y + 74.0, 18.0, WHITE);
        }
    }
}

fn body_color(collider: &Collider) -> Color {
    match collider.kind {
        BodyKind::OuterWall => Color::from_rgba(60, 60, 60, 255),
        // Walls fade as they are chopped down
        BodyKind::Wall => {
            let shade = (80 + 40 * collider.hit_points.clamp(0, 4)) as u8;
            Color::from_rgba(shade, shade / 2, 20, 255)
        }
        BodyKind::Player => Color::from_rgba(80, 140, 255, 255),
        BodyKind::Enemy => Color::from_rgba(220, 60, 60, 255),
        BodyKind::Pickup(PickupKind::Food) => Color::from_rgba(100, 200, 100, 255),
        BodyKind::Pickup(PickupKind::Soda) => Color::from_rgba(90, 200, 220, 255),
        BodyKind::Pickup(PickupKind::Exit) => Color::from_rgba(240, 220, 90, 255),
    }
}

fn load_level(path: &str) -> GameResult<Grid> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            info!("loaded level layout from {}", path);
            Grid::from_text(&contents)
        }
        Err(e) => {
            warn!("could not read {} ({}), using built-in layout", path, e);
            Grid::from_text(DEFAULT_LAYOUT)
        }
    }
}

fn held(a: KeyCode, b: KeyCode) -> i32 {
    (is_key_down(a) || is_key_down(b)) as i32
}

fn read_axes() -> AxisInput {
    AxisInput::new(
        held(KeyCode::Right, KeyCode::D) - held(KeyCode::Left, KeyCode::A),
        held(KeyCode::Up, KeyCode::W) - held(KeyCode::Down, KeyCode::S),
    )
}

fn window_conf() -> Conf {
    let config = Config::load(DEFAULT_CONFIG_PATH);
    Conf {
        window_title: config.visual.window_title,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let config = Config::load(DEFAULT_CONFIG_PATH);
    let mut host = match Host::new(config) {
        Ok(host) => host,
        Err(e) => {
            error!("failed to start: {}", e);
            return;
        }
    };

    loop {
        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        // Copy board to clipboard on C key
        if is_key_pressed(KeyCode::C) {
            host.copy_to_clipboard();
        }

        if let Err(e) = host.game.tick(get_frame_time(), read_axes()) {
            error!("{}", e);
            break;
        }

        host.draw();

        next_frame().await
    }

    host.save_turn_log();
}
