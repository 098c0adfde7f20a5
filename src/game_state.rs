use log::info;

/// State that outlives a single level: the food carried between levels,
/// the turn gate, and whether the run has ended.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Food handed from one level's player to the next
    pub player_food_points: i32,
    /// Turn gate: true while the player may act
    pub players_turn: bool,
    /// Day counter, starts at 1
    pub level: u32,
    game_over: bool,
    level_text: String,
}

impl GameState {
    pub fn new(starting_food: i32) -> Self {
        GameState {
            player_food_points: starting_food,
            players_turn: true,
            level: 1,
            game_over: false,
            level_text: day_text(1),
        }
    }

    pub fn notify_game_over(&mut self) {
        if !self.game_over {
            info!("game over on day {}", self.level);
        }
        self.game_over = true;
        self.players_turn = false;
        self.level_text = format!("After {} days, you starved.", self.level);
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Banner for the current day, or the game over message
    pub fn level_text(&self) -> &str {
        &self.level_text
    }

    /// Move on to the next day and hand the turn back to the player
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.players_turn = true;
        self.level_text = day_text(self.level);
        info!("starting day {} with {} food", self.level, self.player_food_points);
    }
}

fn day_text(level: u32) -> String {
    format!("Day {}", level)
}
