use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::game::player::{Cell, Direction};

// ── Client → Server ──

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    JoinRoom {
        room: String,
        name: String,
    },
    Update {
        #[serde(default, deserialize_with = "shape_or_none")]
        snake: Option<Vec<Cell>>,
        #[serde(default, deserialize_with = "shape_or_none")]
        score: Option<i64>,
    },
    EatFood {
        x: u16,
        y: u16,
    },
    Restart,
}

/// A field with the wrong shape (a non-array snake, a string score)
/// deserializes to None instead of failing the whole message, so the
/// session layer can keep the stored value per field.
fn shape_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// ── Server → Client ──

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    GameState {
        players: HashMap<u64, PlayerView>,
        foods: Vec<Cell>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: u64,
    pub name: String,
    pub snake: Vec<Cell>,
    pub score: i64,
    pub direction: Direction,
    pub last_move_at: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader: Option<bool>,
}
