use axum::{http::StatusCode, Json};
use sqlx::Error as SqlxError;
use tracing::{error, info};
use crate::db::dbitems::{DbItems, DESCRIPTION_MAX_LEN, NAME_MAX_LEN};
use crate::models::{CreateItemRequest, ErrorResponse, Item};

/// Failures of the item create and list flows
#[derive(Debug)]
pub enum ItemError {
    /// The request body could not be turned into a valid item
    MalformedRequest(String),
    /// The content type of the request was not JSON
    UnsupportedMediaType(String),
    /// The body exceeded the request size limit
    PayloadTooLarge(String),
    /// The store was unreachable or rejected the operation
    Storage(SqlxError),
}

impl ItemError {
    pub fn status(&self) -> StatusCode {
        match self {
            ItemError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ItemError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ItemError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ItemError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert into the JSON error body returned by the API.
    /// Driver errors are logged here and never echoed to the client.
    pub fn into_response_parts(self) -> (StatusCode, Json<ErrorResponse>) {
        let status = self.status();
        let message = match self {
            ItemError::MalformedRequest(message)
            | ItemError::UnsupportedMediaType(message)
            | ItemError::PayloadTooLarge(message) => message,
            ItemError::Storage(e) => {
                error!("Item storage error: {}", e);
                "Item storage is unavailable".to_string()
            }
        };
        (status, Json(ErrorResponse::new(status, message)))
    }
}

impl std::fmt::Display for ItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemError::MalformedRequest(message) => write!(f, "Malformed request: {}", message),
            ItemError::UnsupportedMediaType(message) => write!(f, "Unsupported media type: {}", message),
            ItemError::PayloadTooLarge(message) => write!(f, "Payload too large: {}", message),
            ItemError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for ItemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ItemError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SqlxError> for ItemError {
    fn from(e: SqlxError) -> Self {
        ItemError::Storage(e)
    }
}

/// Check the length limits of a create request, counted in characters
pub fn validate_new_item(request: &CreateItemRequest) -> Result<(), ItemError> {
    check_length("name", &request.name, NAME_MAX_LEN)?;
    check_length("description", &request.description, DESCRIPTION_MAX_LEN)?;
    Ok(())
}

fn check_length(field: &str, value: &str, max_len: usize) -> Result<(), ItemError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(ItemError::MalformedRequest(format!(
            "Field '{}' is {} characters long, the maximum is {}",
            field, len, max_len
        )));
    }
    Ok(())
}

/// Validate and store a new item
pub async fn add_item(db: &DbItems, request: CreateItemRequest) -> Result<(), ItemError> {
    validate_new_item(&request)?;
    db.insert_item(&request.name, &request.description).await?;
    info!("Item '{}' created", request.name);
    Ok(())
}

/// All stored items, without their identifiers
pub async fn list_items(db: &DbItems) -> Result<Vec<Item>, ItemError> {
    let rows = db.list_items().await?;
    Ok(rows.into_iter().map(Item::from).collect())
}
