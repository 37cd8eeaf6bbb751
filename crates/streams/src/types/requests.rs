use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of the stream creation form. Every field is checked by the service,
/// so all of them may be missing here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateStreamRequest {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
}
