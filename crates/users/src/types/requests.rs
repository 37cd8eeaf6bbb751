//! Request bodies accepted by the user endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of the profile edit form. Absent or blank values leave the stored
/// value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// URL of an avatar already uploaded to the image host.
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub score: i64,
    #[serde(default)]
    pub boxes: Vec<String>,
}
