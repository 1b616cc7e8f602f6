//! Small response bodies shared by several handlers.

use serde::Serialize;

/// `{ "message": "..." }` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
