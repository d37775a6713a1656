// Game tunables. Defaults match the classic 20x20 board with 7 foods.
pub const GRID_SIZE: u16 = 20;
pub const FOOD_COUNT: usize = 7;
pub const SPAWN_CELL: (u16, u16) = (2, 2);
pub const MOVE_THROTTLE_MS: u64 = 60;

// Input bounds
pub const MAX_ROOM_ID_LEN: usize = 32;
pub const MAX_NAME_LEN: usize = 20;

// Server
pub const DEFAULT_PORT: u16 = 3000;

/// Per-instance game settings. The historical server variants (grid size,
/// food count, spawn point, leaderboard/color features) collapse into one
/// configuration; the defaults are the full-featured variant.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub grid_size: u16,
    pub food_count: usize,
    pub spawn: (u16, u16),
    pub move_throttle_ms: u64,
    /// Derive a leader (top score, earliest join wins ties) per snapshot.
    pub leaderboard: bool,
    /// Expose a name-derived color seed per player in snapshots.
    pub color_seed: bool,
    /// Relay mode (false) stores reported snakes verbatim. Authoritative
    /// mode (true) rejects snakes with out-of-grid cells, keeping the
    /// previous body, but still does not simulate movement.
    pub authoritative: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_size: GRID_SIZE,
            food_count: FOOD_COUNT,
            spawn: SPAWN_CELL,
            move_throttle_ms: MOVE_THROTTLE_MS,
            leaderboard: true,
            color_seed: true,
            authoritative: false,
        }
    }
}

/// Listen port from the PORT env var, falling back to the default.
pub fn server_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}
