use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::{GameConfig, MAX_ROOM_ID_LEN};
use crate::game::player::Cell;
use crate::game::registry::RoomRegistry;
use crate::protocol::messages::ClientMessage;

pub type SharedHub = Arc<RwLock<Hub>>;

/// What the connection layer remembers about one socket: its id and the
/// room it currently belongs to, if any.
#[derive(Debug)]
pub struct Session {
    pub conn_id: u64,
    pub room_id: Option<String>,
}

/// Owns the room registry plus the outbound channel of every live
/// connection. All mutation happens under one write lock, so each event
/// runs to completion (validate, mutate, replenish, broadcast) before the
/// next one touches any room.
pub struct Hub {
    cfg: GameConfig,
    registry: RoomRegistry,
    conns: HashMap<u64, UnboundedSender<String>>,
    next_conn_id: u64,
}

impl Hub {
    pub fn new(cfg: GameConfig) -> Self {
        Hub {
            cfg,
            registry: RoomRegistry::new(),
            conns: HashMap::new(),
            next_conn_id: 1,
        }
    }

    /// Registers a connection's outbound channel and hands back its
    /// session record.
    pub fn connect(&mut self, tx: UnboundedSender<String>) -> Session {
        let conn_id = self.next_conn_id;
        self.next_conn_id += 1;
        self.conns.insert(conn_id, tx);
        Session {
            conn_id,
            room_id: None,
        }
    }

    pub fn room_count(&self) -> usize {
        self.registry.room_count()
    }

    /// Applies one client event. Invalid or out-of-place events are
    /// dropped without an error frame; the drop is only visible in the
    /// logs.
    pub fn handle_event(&mut self, session: &mut Session, msg: ClientMessage, now: u64) {
        match msg {
            ClientMessage::JoinRoom { room, name } => self.join(session, &room, &name, now),
            ClientMessage::Update { snake, score } => self.update(session, snake, score, now),
            ClientMessage::EatFood { x, y } => self.eat_food(session, Cell::new(x, y)),
            ClientMessage::Restart => self.restart(session),
        }
    }

    /// Removes the player and its channel; run when the transport closes.
    /// Tears the room down if this was its last member, otherwise tells
    /// the remaining members.
    pub fn disconnect(&mut self, session: &Session) {
        self.conns.remove(&session.conn_id);
        if let Some(room_id) = &session.room_id {
            self.leave(room_id, session.conn_id);
        }
        debug!(conn = session.conn_id, "connection closed");
    }

    fn join(&mut self, session: &mut Session, room: &str, name: &str, now: u64) {
        let room_key: String = room.chars().take(MAX_ROOM_ID_LEN).collect();

        // A connection holds one membership at a time; switching rooms
        // leaves the old one first.
        if let Some(old) = session.room_id.take() {
            if old != room_key {
                self.leave(&old, session.conn_id);
            }
        }

        self.registry
            .get_or_create(&room_key)
            .join(session.conn_id, name, &self.cfg, now);
        info!(room = %room_key, conn = session.conn_id, "player joined");

        session.room_id = Some(room_key.clone());
        self.broadcast(&room_key);
    }

    fn update(
        &mut self,
        session: &Session,
        snake: Option<Vec<Cell>>,
        score: Option<i64>,
        now: u64,
    ) {
        let Some(room_id) = &session.room_id else {
            debug!(conn = session.conn_id, "update ignored: not in a room");
            return;
        };
        let cfg = &self.cfg;
        let admitted = self
            .registry
            .get_mut(room_id)
            .map(|room| room.update_player(session.conn_id, snake, score, cfg, now))
            .unwrap_or(false);
        if admitted {
            self.broadcast(room_id);
        } else {
            debug!(conn = session.conn_id, room = %room_id, "update dropped");
        }
    }

    fn eat_food(&mut self, session: &Session, cell: Cell) {
        let Some(room_id) = &session.room_id else {
            debug!(conn = session.conn_id, "eatFood ignored: not in a room");
            return;
        };
        let cfg = &self.cfg;
        if let Some(room) = self.registry.get_mut(room_id) {
            room.eat_food(cell, cfg);
            self.broadcast(room_id);
        }
    }

    fn restart(&mut self, session: &Session) {
        let Some(room_id) = &session.room_id else {
            debug!(conn = session.conn_id, "restart ignored: not in a room");
            return;
        };
        let cfg = &self.cfg;
        let restarted = self
            .registry
            .get_mut(room_id)
            .map(|room| room.restart_player(session.conn_id, cfg))
            .unwrap_or(false);
        if restarted {
            self.broadcast(room_id);
        }
    }

    /// Drops the player from a room, deleting the room if it emptied and
    /// broadcasting to the survivors otherwise.
    fn leave(&mut self, room_id: &str, conn_id: u64) {
        let had_room = self.registry.get(room_id).is_some();
        if self.registry.remove_player(room_id, conn_id) {
            // The leaver's snake freed cells; a crowded board may owe food.
            let cfg = &self.cfg;
            if let Some(room) = self.registry.get_mut(room_id) {
                room.replenish_foods(cfg);
            }
            self.broadcast(room_id);
        } else if had_room {
            info!(room = %room_id, "room closed");
        }
    }

    /// Serializes the room snapshot once and pushes it into every member
    /// connection's channel. Sends are fire-and-forget; a connection that
    /// died mid-send gets cleaned up by its own disconnect path.
    fn broadcast(&self, room_id: &str) {
        let Some(room) = self.registry.get(room_id) else {
            return;
        };
        let msg = serde_json::to_string(&self.registry.snapshot(room_id, &self.cfg)).unwrap();
        for conn_id in room.players.keys() {
            if let Some(tx) = self.conns.get(conn_id) {
                let _ = tx.send(msg.clone());
            }
        }
    }
}

/// Wall-clock unix millis, the clock the move throttle runs on.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
