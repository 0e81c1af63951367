//! Room availability models.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One cell of the floor grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room code, e.g. `"A301"` or `"0507"`.
    pub room: String,
    pub available: bool,
}

/// Availability snapshot: floor label → grid slots. Empty slots are `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomSnapshot(pub BTreeMap<String, Vec<Option<Room>>>);

/// Building wing a room belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomSide {
    #[serde(rename = "Side A (Left)")]
    SideALeft,
    #[serde(rename = "Side A (Right)")]
    SideARight,
    #[serde(rename = "Side B")]
    SideB,
    #[serde(rename = "Front")]
    Front,
}

impl RoomSide {
    pub fn label(&self) -> &'static str {
        match self {
            RoomSide::SideALeft => "Side A (Left)",
            RoomSide::SideARight => "Side A (Right)",
            RoomSide::SideB => "Side B",
            RoomSide::Front => "Front",
        }
    }
}

impl fmt::Display for RoomSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Available rooms on one floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorRooms {
    pub floor: String,
    pub rooms: Vec<String>,
}

/// Alternatives offered for a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSuggestions {
    pub room: String,
    pub side: RoomSide,
    pub floors: Vec<FloorRooms>,
}
