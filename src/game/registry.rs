use std::collections::HashMap;

use crate::config::GameConfig;
use crate::game::room::Room;
use crate::protocol::messages::{PlayerView, ServerMessage};

/// Owns every live room. One instance lives for the process lifetime,
/// held by the server's top-level state and handed to the session layer
/// rather than sitting in a global.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing room, or a fresh empty one registered under `room_id`.
    pub fn get_or_create(&mut self, room_id: &str) -> &mut Room {
        self.rooms.entry(room_id.to_string()).or_default()
    }

    pub fn get(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn get_mut(&mut self, room_id: &str) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    /// Drops the player and tears the room down if that left it empty.
    /// Returns true when the room survives (so the caller still owes the
    /// remaining members a broadcast).
    pub fn remove_player(&mut self, room_id: &str, conn_id: u64) -> bool {
        let Some(room) = self.rooms.get_mut(room_id) else {
            return false;
        };
        room.remove_player(conn_id);
        if room.is_empty() {
            self.rooms.remove(room_id);
            return false;
        }
        true
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Broadcast payload for one room. An unknown id yields an empty shell
    /// instead of an error so callers racing a teardown need no special
    /// case.
    pub fn snapshot(&self, room_id: &str, cfg: &GameConfig) -> ServerMessage {
        let Some(room) = self.rooms.get(room_id) else {
            return ServerMessage::GameState {
                players: HashMap::new(),
                foods: Vec::new(),
            };
        };

        let leader = if cfg.leaderboard { room.leader() } else { None };
        let players = room
            .players
            .iter()
            .map(|(id, p)| {
                let view = PlayerView {
                    id: p.id,
                    name: p.name.clone(),
                    snake: p.snake.clone(),
                    score: p.score,
                    direction: p.direction,
                    last_move_at: p.last_move_at,
                    joined_at: cfg.leaderboard.then_some(p.joined_at),
                    color_seed: cfg.color_seed.then_some(p.color_seed),
                    leader: (leader == Some(*id)).then_some(true),
                };
                (*id, view)
            })
            .collect();

        ServerMessage::GameState {
            players,
            foods: room.foods.clone(),
        }
    }
}
