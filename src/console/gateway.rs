use thiserror::Error;

use crate::domain::item::InventoryItem;
use crate::domain::types::ItemId;
use crate::dto::inventory::{CreateItemRequest, UpdateItemRequest};
use crate::repository::{InventoryReader, InventoryWriter};
use crate::services::ServiceError;
use crate::services::inventory as service;

/// Failure of a gateway call made on behalf of the console.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    /// The gateway answered with a non-success status.
    #[error("gateway answered {status}: {message}")]
    Rejected { status: u16, message: String },
    /// The gateway could not be reached.
    #[error("gateway unreachable: {0}")]
    Transport(String),
    /// The gateway answered with a payload the console cannot read.
    #[error("unexpected gateway payload: {0}")]
    Decode(String),
}

impl From<ServiceError> for ConsoleError {
    fn from(value: ServiceError) -> Self {
        Self::Rejected {
            status: value.status_code(),
            message: value.to_string(),
        }
    }
}

/// The inventory store as seen by the console: the four gateway operations.
#[allow(async_fn_in_trait)]
pub trait ConsoleGateway {
    async fn list_items(&self) -> Result<Vec<InventoryItem>, ConsoleError>;
    async fn create_item(&self, request: CreateItemRequest)
    -> Result<InventoryItem, ConsoleError>;
    async fn update_item(
        &self,
        id: ItemId,
        request: UpdateItemRequest,
    ) -> Result<InventoryItem, ConsoleError>;
    async fn delete_item(&self, id: ItemId) -> Result<(), ConsoleError>;
}

/// Gateway that runs the service functions in-process against a repository.
pub struct LocalGateway<'a, R> {
    repo: &'a R,
}

impl<'a, R> LocalGateway<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }
}

impl<R> ConsoleGateway for LocalGateway<'_, R>
where
    R: InventoryReader + InventoryWriter,
{
    async fn list_items(&self) -> Result<Vec<InventoryItem>, ConsoleError> {
        Ok(service::list_items(self.repo)?)
    }

    async fn create_item(
        &self,
        request: CreateItemRequest,
    ) -> Result<InventoryItem, ConsoleError> {
        Ok(service::create_item(request, self.repo)?)
    }

    async fn update_item(
        &self,
        id: ItemId,
        request: UpdateItemRequest,
    ) -> Result<InventoryItem, ConsoleError> {
        Ok(service::update_item(id, request, self.repo)?)
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), ConsoleError> {
        service::delete_item(id, self.repo)?;
        Ok(())
    }
}
