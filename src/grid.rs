use crate::collision::{BodyKind, ColliderHandle, CollisionWorld, PickupKind};
use crate::error::{GameError, GameResult};
use crate::position::Position;

/// Layout used when no level file is available
pub const DEFAULT_LAYOUT: &str = "\
##########
#...f..e.#
#.ww..w..#
#..s...w.#
#.w..w...#
#...ww.f.#
#.e....w.#
#@..s..wE#
##########
";

/// Contents of one cell in a level layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Floor,
    OuterWall,
    Wall,
    Food,
    Soda,
    Exit,
    Player,
    Enemy,
}

impl Tile {
    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '.' => Some(Tile::Floor),
            '#' => Some(Tile::OuterWall),
            'w' => Some(Tile::Wall),
            'f' => Some(Tile::Food),
            's' => Some(Tile::Soda),
            'E' => Some(Tile::Exit),
            '@' => Some(Tile::Player),
            'e' => Some(Tile::Enemy),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Tile::Floor => '.',
            Tile::OuterWall => '#',
            Tile::Wall => 'w',
            Tile::Food => 'f',
            Tile::Soda => 's',
            Tile::Exit => 'E',
            Tile::Player => '@',
            Tile::Enemy => 'e',
        }
    }

    fn from_body(kind: BodyKind) -> Tile {
        match kind {
            BodyKind::OuterWall => Tile::OuterWall,
            BodyKind::Wall => Tile::Wall,
            BodyKind::Player => Tile::Player,
            BodyKind::Enemy => Tile::Enemy,
            BodyKind::Pickup(PickupKind::Food) => Tile::Food,
            BodyKind::Pickup(PickupKind::Soda) => Tile::Soda,
            BodyKind::Pickup(PickupKind::Exit) => Tile::Exit,
        }
    }
}

/// Handles of the actors spawned from a layout
#[derive(Clone, Debug)]
pub struct LevelSpawn {
    pub player: (ColliderHandle, Position),
    pub enemies: Vec<(ColliderHandle, Position)>,
}

/// Level layout. Cell (0, 0) is the bottom-left corner and y grows upward;
/// text layouts list the top row first.
#[derive(Clone, Debug)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
    pub cells: Vec<Tile>,
}

impl Grid {
    /// Create a new grid with all cells set to floor
    pub fn new(rows: i32, cols: i32) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![Tile::Floor; (rows * cols) as usize],
        }
    }

    /// Parse a text layout, one character per cell.
    /// Blank lines are ignored; all other lines must have the same width.
    pub fn from_text(text: &str) -> GameResult<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            return Err(GameError::Layout("no rows found".to_string()));
        }

        let cols = lines[0].chars().count() as i32;
        let rows = lines.len() as i32;
        let mut grid = Grid::new(rows, cols);
        let mut players = 0;

        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() as i32 != cols {
                return Err(GameError::Layout(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.chars().count(),
                    cols
                )));
            }
            let y = rows - 1 - row as i32;
            for (x, ch) in line.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or_else(|| {
                    GameError::Layout(format!("unknown tile '{}' at row {}, column {}", ch, row, x))
                })?;
                if tile == Tile::Player {
                    players += 1;
                }
                let id = grid.get_id(x as i32, y);
                grid.cells[id as usize] = tile;
            }
        }

        if players != 1 {
            return Err(GameError::Layout(format!("expected exactly one player, found {}", players)));
        }

        Ok(grid)
    }

    /// Snapshot of the live objects in `world`
    pub fn from_world(world: &CollisionWorld, rows: i32, cols: i32) -> Self {
        let mut grid = Grid::new(rows, cols);
        // Pickups first so actors standing on them win the cell
        let mut live: Vec<_> = world.colliders().filter(|c| c.active).collect();
        live.sort_by_key(|c| !matches!(c.kind, BodyKind::Pickup(_)));
        for collider in live {
            let (x, y) = collider.center.to_cell();
            grid.set_tile(x, y, Tile::from_body(collider.kind));
        }
        grid
    }

    /// Convert (x, y) coordinates to cell ID
    pub fn get_id(&self, x: i32, y: i32) -> i32 {
        x + y * self.cols
    }

    /// Convert cell ID to (x, y) coordinates
    pub fn get_coords(&self, id: i32) -> (i32, i32) {
        (id % self.cols, id / self.cols)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.cols && y >= 0 && y < self.rows
    }

    /// Tile at (x, y); out of bounds reads as outer wall
    pub fn get_tile(&self, x: i32, y: i32) -> Tile {
        if !self.in_bounds(x, y) {
            return Tile::OuterWall;
        }
        self.cells[self.get_id(x, y) as usize]
    }

    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        if self.in_bounds(x, y) {
            let id = self.get_id(x, y) as usize;
            self.cells[id] = tile;
        }
    }

    /// Text form, top row first, as accepted by `from_text`
    pub fn to_text(&self) -> String {
        let mut result = String::new();
        for y in (0..self.rows).rev() {
            for x in 0..self.cols {
                result.push(self.get_tile(x, y).symbol());
            }
            result.push('\n');
        }
        result
    }

    /// Create a collider for every non-floor cell
    pub fn populate(&self, world: &mut CollisionWorld, wall_hit_points: i32) -> GameResult<LevelSpawn> {
        let mut player = None;
        let mut enemies = Vec::new();

        for id in 0..self.rows * self.cols {
            let (x, y) = self.get_coords(id);
            let center = Position::cell(x, y);
            match self.cells[id as usize] {
                Tile::Floor => {}
                Tile::OuterWall => {
                    world.spawn(BodyKind::OuterWall, center);
                }
                Tile::Wall => {
                    world.spawn_wall(center, wall_hit_points);
                }
                Tile::Food => {
                    world.spawn(BodyKind::Pickup(PickupKind::Food), center);
                }
                Tile::Soda => {
                    world.spawn(BodyKind::Pickup(PickupKind::Soda), center);
                }
                Tile::Exit => {
                    world.spawn(BodyKind::Pickup(PickupKind::Exit), center);
                }
                Tile::Player => {
                    player = Some((world.spawn(BodyKind::Player, center), center));
                }
                Tile::Enemy => {
                    enemies.push((world.spawn(BodyKind::Enemy, center), center));
                }
            }
        }

        let player = player.ok_or_else(|| GameError::Layout("layout has no player".to_string()))?;
        Ok(LevelSpawn { player, enemies })
    }
}
