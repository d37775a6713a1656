use serde::{Deserialize, Serialize};

use crate::config::MAX_NAME_LEN;

/// One grid square. Coordinates are compared exactly; the board is
/// `[0, grid_size)` in both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

impl Cell {
    pub fn new(x: u16, y: u16) -> Self {
        Cell { x, y }
    }

    pub fn in_grid(&self, grid_size: u16) -> bool {
        self.x < grid_size && self.y < grid_size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

/// A connected player's slice of room state. The server never moves the
/// snake itself; `snake` and `score` are whatever the client last reported.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: u64,
    pub name: String,
    pub snake: Vec<Cell>,
    pub score: i64,
    pub direction: Direction,
    /// Unix millis of the last admitted update, for throttling. Starts at
    /// zero so the first update always passes.
    pub last_move_at: u64,
    /// Unix millis of the join, used as the leaderboard tie-break.
    pub joined_at: u64,
    pub color_seed: u32,
}

impl Player {
    pub fn new(id: u64, name: &str, spawn: Cell, now: u64) -> Self {
        let name = display_name(name);
        let color_seed = color_seed(&name);
        Player {
            id,
            name,
            snake: vec![spawn],
            score: 0,
            direction: Direction::Right,
            last_move_at: 0,
            joined_at: now,
            color_seed,
        }
    }

    /// Back to the spawn cell with a zeroed score. The throttle clock and
    /// join time are untouched.
    pub fn respawn(&mut self, spawn: Cell) {
        self.snake = vec![spawn];
        self.score = 0;
        self.direction = Direction::Right;
    }

    /// Admits or rejects a move against the throttle window. Admission
    /// stamps the clock; a reject leaves it alone so a flood of updates
    /// cannot push the window forward.
    pub fn try_move(&mut self, now: u64, throttle_ms: u64) -> bool {
        if now.saturating_sub(self.last_move_at) < throttle_ms {
            return false;
        }
        self.last_move_at = now;
        true
    }
}

fn display_name(raw: &str) -> String {
    if raw.trim().is_empty() {
        "Unnamed".to_string()
    } else {
        raw.chars().take(MAX_NAME_LEN).collect()
    }
}

/// Stable fold of the name bytes so every client colors a given player the
/// same way without coordination.
fn color_seed(name: &str) -> u32 {
    name.bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(b as u32))
}
