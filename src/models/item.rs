use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::db::dbitems::ItemRow;

/// Request body for creating an item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    #[schema(max_length = 50)]
    pub name: String,
    #[schema(max_length = 250)]
    pub description: String,
}

/// An item as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Item {
    pub name: String,
    pub description: String,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            name: row.name,
            description: row.description,
        }
    }
}

/// Response for listing items
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemsResponse {
    pub items: Vec<Item>,
}
