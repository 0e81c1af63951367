// Document ids are UUIDv7 strings: time-sortable, so documents in a
// collection list in creation order without a separate timestamp column.

use uuid::Uuid;

/// Generate a new document id.
pub fn new_document_id() -> String {
    Uuid::now_v7().to_string()
}
