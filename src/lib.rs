//! Room-based relay server for a multiplayer grid snake game.
//!
//! The server keeps per-room state (players, snakes, food) in memory and
//! rebroadcasts a full room snapshot on every state-changing client event.
//! It deliberately does not simulate movement or collisions: clients report
//! their own snake and score, bounded by shape validation and a per-player
//! update throttle. `game` holds the pure state machine, `protocol` the
//! wire types, `server` the WebSocket session layer.

pub mod config;
pub mod game;
pub mod protocol;
pub mod server;
