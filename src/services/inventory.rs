//! Inventory gateway: one operation per request kind against the `inventory`
//! table.

use serde::de::DeserializeOwned;

use crate::domain::item::{InventoryItem, InventoryItemPatch, NewInventoryItem};
use crate::domain::types::ItemId;
use crate::dto::inventory::{CreateItemRequest, MessageResponse, UpdateItemRequest};
use crate::repository::{InventoryReader, InventoryWriter};

use super::{ServiceError, ServiceResult};

pub const LIST_FAILED: &str = "Error fetching inventory";
pub const CREATE_FAILED: &str = "Error creating item";
pub const UPDATE_FAILED: &str = "Error updating item";
pub const DELETE_FAILED: &str = "Error deleting item";
pub const UPDATE_ID_REQUIRED: &str = "ID is required for update";
pub const DELETE_ID_REQUIRED: &str = "ID is required for deletion";
pub const ITEM_DELETED: &str = "Item deleted";

/// A decoded gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayRequest {
    List,
    Create(CreateItemRequest),
    Update {
        id: ItemId,
        request: UpdateItemRequest,
    },
    Delete {
        id: ItemId,
    },
}

impl GatewayRequest {
    /// Decode a raw HTTP call.
    ///
    /// The id of PUT and DELETE is checked before the body is looked at, so a
    /// missing id is always reported as such.
    pub fn parse(method: &str, id: Option<&str>, body: &[u8]) -> ServiceResult<Self> {
        match method {
            "GET" => Ok(Self::List),
            "POST" => Ok(Self::Create(decode_body(body, CREATE_FAILED)?)),
            "PUT" => {
                let id = require_id(id, UPDATE_ID_REQUIRED)?;
                Ok(Self::Update {
                    id,
                    request: decode_body(body, UPDATE_FAILED)?,
                })
            }
            "DELETE" => Ok(Self::Delete {
                id: require_id(id, DELETE_ID_REQUIRED)?,
            }),
            other => Err(ServiceError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Result of a successful gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayResponse {
    Items(Vec<InventoryItem>),
    Created(InventoryItem),
    Updated(InventoryItem),
    Deleted(MessageResponse),
}

impl GatewayResponse {
    /// HTTP status code that represents this response.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Created(_) => 201,
            _ => 200,
        }
    }
}

fn require_id(raw: Option<&str>, message: &str) -> ServiceResult<ItemId> {
    raw.and_then(|raw| raw.trim().parse::<i32>().ok())
        .and_then(|id| ItemId::new(id).ok())
        .ok_or_else(|| ServiceError::Validation(message.to_string()))
}

/// Bodies that cannot be decoded fail like the storage write they were meant
/// for; the decode error is only logged.
fn decode_body<T: DeserializeOwned>(body: &[u8], failure: &str) -> ServiceResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        log::error!("Invalid inventory request body: {e}");
        ServiceError::Persistence(failure.to_string())
    })
}

/// Run a decoded request against the repository.
pub fn handle_request<R>(request: GatewayRequest, repo: &R) -> ServiceResult<GatewayResponse>
where
    R: InventoryReader + InventoryWriter,
{
    match request {
        GatewayRequest::List => list_items(repo).map(GatewayResponse::Items),
        GatewayRequest::Create(request) => {
            create_item(request, repo).map(GatewayResponse::Created)
        }
        GatewayRequest::Update { id, request } => {
            update_item(id, request, repo).map(GatewayResponse::Updated)
        }
        GatewayRequest::Delete { id } => delete_item(id, repo).map(GatewayResponse::Deleted),
    }
}

/// Every item, most recently updated first.
pub fn list_items<R>(repo: &R) -> ServiceResult<Vec<InventoryItem>>
where
    R: InventoryReader,
{
    repo.list_items().map_err(|e| {
        log::error!("Failed to list inventory: {e}");
        ServiceError::Persistence(LIST_FAILED.to_string())
    })
}

pub fn create_item<R>(request: CreateItemRequest, repo: &R) -> ServiceResult<InventoryItem>
where
    R: InventoryWriter,
{
    let item = NewInventoryItem::try_from(request).map_err(|e| {
        log::error!("Rejected inventory item: {e}");
        ServiceError::Persistence(CREATE_FAILED.to_string())
    })?;

    match repo.create_item(&item) {
        Ok(created) => {
            log::info!("Created inventory item {}", created.id);
            Ok(created)
        }
        Err(e) => {
            log::error!("Failed to create inventory item: {e}");
            Err(ServiceError::Persistence(CREATE_FAILED.to_string()))
        }
    }
}

pub fn update_item<R>(
    id: ItemId,
    request: UpdateItemRequest,
    repo: &R,
) -> ServiceResult<InventoryItem>
where
    R: InventoryWriter,
{
    let patch = InventoryItemPatch::try_from(request).map_err(|e| {
        log::error!("Rejected patch for inventory item {id}: {e}");
        ServiceError::Persistence(UPDATE_FAILED.to_string())
    })?;

    match repo.update_item(id, &patch) {
        Ok(updated) => {
            log::info!("Updated inventory item {id}");
            Ok(updated)
        }
        Err(e) => {
            log::error!("Failed to update inventory item {id}: {e}");
            Err(ServiceError::Persistence(UPDATE_FAILED.to_string()))
        }
    }
}

pub fn delete_item<R>(id: ItemId, repo: &R) -> ServiceResult<MessageResponse>
where
    R: InventoryWriter,
{
    match repo.delete_item(id) {
        Ok(_) => {
            log::info!("Deleted inventory item {id}");
            Ok(MessageResponse::new(ITEM_DELETED))
        }
        Err(e) => {
            log::error!("Failed to delete inventory item {id}: {e}");
            Err(ServiceError::Persistence(DELETE_FAILED.to_string()))
        }
    }
}
