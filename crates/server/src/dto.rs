use serde::{Deserialize, Serialize};
use service::items::Item;

/// Body of `POST /item`. A missing `name` decodes as empty and is rejected by the service.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    pub status: String,
}

impl ItemResponse {
    pub fn with_item(item: Item, status: &str) -> Self {
        Self { item: Some(item), status: status.to_string() }
    }

    pub fn status_only(status: &str) -> Self {
        Self { item: None, status: status.to_string() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
