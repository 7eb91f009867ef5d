//! DTOs for the completion service wire format.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CompletionRequestDto<'a> {
    pub(super) message: &'a str,
    pub(super) user_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct CompletionResponseDto {
    pub(super) response: Option<String>,
    #[serde(default)]
    pub(super) error: Option<String>,
}
