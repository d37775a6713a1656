use std::cmp::Reverse;
use std::collections::HashMap;

use crate::config::GameConfig;
use crate::game::food;
use crate::game::player::{Cell, Player};

/// One isolated game session: the players keyed by connection id and the
/// food cells currently on the board. Rooms own their players outright;
/// nothing here is shared across rooms.
#[derive(Debug, Default)]
pub struct Room {
    pub players: HashMap<u64, Player>,
    pub foods: Vec<Cell>,
}

impl Room {
    /// Upserts a player at the spawn cell and tops the food set back up.
    /// Joining twice with the same connection replaces the old entry.
    pub fn join(&mut self, conn_id: u64, name: &str, cfg: &GameConfig, now: u64) {
        let spawn = Cell::new(cfg.spawn.0, cfg.spawn.1);
        self.players.insert(conn_id, Player::new(conn_id, name, spawn, now));
        self.replenish_foods(cfg);
    }

    pub fn remove_player(&mut self, conn_id: u64) -> bool {
        self.players.remove(&conn_id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Every snake segment of every player. Food placement must stay
    /// clear of these cells.
    pub fn occupied_cells(&self) -> Vec<Cell> {
        self.players
            .values()
            .flat_map(|p| p.snake.iter().copied())
            .collect()
    }

    pub fn replenish_foods(&mut self, cfg: &GameConfig) {
        let occupied = self.occupied_cells();
        food::replenish(&mut self.foods, &occupied, cfg.grid_size, cfg.food_count);
    }

    /// Stores a client-reported snake/score pair. Returns false when the
    /// player is unknown or still inside the throttle window; in that case
    /// nothing changes and no broadcast is due. A field that failed shape
    /// validation arrives as `None` and the stored value is kept. The
    /// throttle clock is stamped on admission, before field validation,
    /// so a garbage payload still consumes the slot.
    pub fn update_player(
        &mut self,
        conn_id: u64,
        snake: Option<Vec<Cell>>,
        score: Option<i64>,
        cfg: &GameConfig,
        now: u64,
    ) -> bool {
        let Some(player) = self.players.get_mut(&conn_id) else {
            return false;
        };
        if !player.try_move(now, cfg.move_throttle_ms) {
            return false;
        }
        let snake = match snake {
            Some(s) if cfg.authoritative && !s.iter().all(|c| c.in_grid(cfg.grid_size)) => None,
            other => other,
        };
        if let Some(snake) = snake {
            player.snake = snake;
        }
        if let Some(score) = score {
            player.score = score;
        }
        true
    }

    /// Removes the first food exactly matching `cell` (no-op when absent)
    /// and tops the set back up. The replacement food is free to land on
    /// the just-eaten cell again; clients tolerate that.
    pub fn eat_food(&mut self, cell: Cell, cfg: &GameConfig) {
        if let Some(i) = self.foods.iter().position(|f| *f == cell) {
            self.foods.remove(i);
        }
        self.replenish_foods(cfg);
    }

    /// Resets the player to the spawn state. Returns false for an unknown
    /// player.
    pub fn restart_player(&mut self, conn_id: u64, cfg: &GameConfig) -> bool {
        let Some(player) = self.players.get_mut(&conn_id) else {
            return false;
        };
        player.respawn(Cell::new(cfg.spawn.0, cfg.spawn.1));
        true
    }

    /// Current leader: highest score, ties broken by earliest join, then
    /// lowest connection id. Recomputed from scratch on demand, never
    /// stored.
    pub fn leader(&self) -> Option<u64> {
        self.players
            .iter()
            .min_by_key(|(id, p)| (Reverse(p.score), p.joined_at, **id))
            .map(|(id, _)| *id)
    }
}
