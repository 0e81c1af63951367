// @awa-component: DOC-RoomAvailability
//
//! Room availability — floor labels, side classification, and suggestions
//! for occupied rooms.
//!
//! The snapshot is maintained outside this system; it is only read here
//! (or seeded from a JSON file for local runs).

use std::path::Path;

use tracing::{info, warn};

use crate::models::rooms::{FloorRooms, RoomSide, RoomSnapshot, RoomSuggestions};
use crate::store::{DocumentStore, StoreError};

pub const ROOMS_COLLECTION: &str = "roomAvailability";
pub const ROOMS_DOCUMENT: &str = "floors";

const LOWEST_FLOOR: u32 = 3;
const HIGHEST_FLOOR: u32 = 15;
const SKIPPED_FLOOR: u32 = 13;

/// `3rd Floor`, `4th Floor`, ... `15th Floor`, without the 13th.
pub fn floor_labels() -> Vec<String> {
    (LOWEST_FLOOR..=HIGHEST_FLOOR)
        .filter(|f| *f != SKIPPED_FLOOR)
        .map(floor_label)
        .collect()
}

pub fn floor_label(floor: u32) -> String {
    let suffix = match (floor % 10, floor % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{floor}{suffix} Floor")
}

/// Leading floor number of a label such as `"10th Floor"`.
pub fn floor_number(label: &str) -> Option<u32> {
    let digits: String = label.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

impl RoomSide {
    /// Classify a room code.
    ///
    /// Letter prefixes win (`A…`, `B…`, `F…`). Otherwise the last two of the
    /// trailing 2–3 digits pick the side: 01–05 left wing, 06–09 front,
    /// 10–13 right wing.
    pub fn of(code: &str) -> Option<RoomSide> {
        match code.chars().next()? {
            'A' => return Some(RoomSide::SideALeft),
            'B' => return Some(RoomSide::SideB),
            'F' => return Some(RoomSide::Front),
            _ => {}
        }

        let trailing = code
            .bytes()
            .rev()
            .take_while(u8::is_ascii_digit)
            .count();
        if trailing < 2 {
            return None;
        }
        let number: u32 = code[code.len() - 2..].parse().ok()?;
        match number {
            1..=5 => Some(RoomSide::SideALeft),
            6..=9 => Some(RoomSide::Front),
            10..=13 => Some(RoomSide::SideARight),
            _ => None,
        }
    }
}

/// Available rooms on `side`, grouped by floor, lowest floor first.
pub fn available_on_side(snapshot: &RoomSnapshot, side: RoomSide) -> Vec<FloorRooms> {
    let mut floors: Vec<FloorRooms> = snapshot
        .0
        .iter()
        .filter_map(|(floor, slots)| {
            let rooms: Vec<String> = slots
                .iter()
                .flatten()
                .filter(|r| r.available && RoomSide::of(&r.room) == Some(side))
                .map(|r| r.room.clone())
                .collect();
            (!rooms.is_empty()).then(|| FloorRooms {
                floor: floor.clone(),
                rooms,
            })
        })
        .collect();
    floors.sort_by_key(|f| floor_number(&f.floor).unwrap_or(u32::MAX));
    floors
}

/// Alternatives for `room`, or `None` when its side cannot be determined.
pub fn suggest_alternatives(snapshot: &RoomSnapshot, room: &str) -> Option<RoomSuggestions> {
    let side = RoomSide::of(room)?;
    Some(RoomSuggestions {
        room: room.to_string(),
        side,
        floors: available_on_side(snapshot, side),
    })
}

/// Read the current snapshot. A missing document reads as empty.
pub async fn load_snapshot(store: &dyn DocumentStore) -> Result<RoomSnapshot, StoreError> {
    match store.get_document(ROOMS_COLLECTION, ROOMS_DOCUMENT).await? {
        Some(doc) => Ok(serde_json::from_value(doc)?),
        None => {
            warn!("no room availability document stored");
            Ok(RoomSnapshot::default())
        }
    }
}

/// Snapshot keys that are not one of the building's floor labels.
pub fn unknown_floors(snapshot: &RoomSnapshot) -> Vec<String> {
    let labels = floor_labels();
    snapshot
        .0
        .keys()
        .filter(|floor| !labels.contains(floor))
        .cloned()
        .collect()
}

/// Replace the stored snapshot with the JSON file at `path`.
pub async fn seed_from_file(store: &dyn DocumentStore, path: &Path) -> Result<usize, StoreError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::Seed(format!("{}: {e}", path.display())))?;
    let snapshot: RoomSnapshot = serde_json::from_str(&raw)?;
    let floors = snapshot.0.len();
    let unknown = unknown_floors(&snapshot);
    if !unknown.is_empty() {
        warn!(?unknown, "room snapshot has unrecognised floor labels");
    }
    store
        .put_document(ROOMS_COLLECTION, ROOMS_DOCUMENT, serde_json::to_value(&snapshot)?)
        .await?;
    info!(path = %path.display(), floors, "room snapshot seeded");
    Ok(floors)
}
