use serde::Serialize;

use kennel_core::DocumentId;

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: DocumentId,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub id: DocumentId,
    pub deleted: bool,
}
