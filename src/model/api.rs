use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The response when an error occurs with an API request.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Acknowledgement body for deletions and other effect-only operations.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct StatusDto {
    pub success: bool,
}

impl StatusDto {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
