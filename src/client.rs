//! HTTP implementation of [`ConsoleGateway`] for a remote inventory gateway.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::console::{ConsoleError, ConsoleGateway};
use crate::domain::item::InventoryItem;
use crate::domain::types::ItemId;
use crate::dto::inventory::{CreateItemRequest, MessageResponse, UpdateItemRequest};

/// Talks to `/api/inventory` on a running server.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    endpoint: String,
}

impl HttpGateway {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/inventory", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn transport(error: reqwest::Error) -> ConsoleError {
    ConsoleError::Transport(error.to_string())
}

/// Turn a non-success status into [`ConsoleError::Rejected`], keeping the
/// gateway's `message` when it sent one.
async fn ensure_success(response: Response) -> Result<Response, ConsoleError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<MessageResponse>().await {
        Ok(body) => body.message,
        Err(_) => status.to_string(),
    };
    Err(ConsoleError::Rejected {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ConsoleError> {
    ensure_success(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ConsoleError::Decode(e.to_string()))
}

impl ConsoleGateway for HttpGateway {
    async fn list_items(&self) -> Result<Vec<InventoryItem>, ConsoleError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn create_item(
        &self,
        request: CreateItemRequest,
    ) -> Result<InventoryItem, ConsoleError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn update_item(
        &self,
        id: ItemId,
        request: UpdateItemRequest,
    ) -> Result<InventoryItem, ConsoleError> {
        let response = self
            .client
            .put(&self.endpoint)
            .query(&[("id", id.get())])
            .json(&request)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), ConsoleError> {
        let response = self
            .client
            .delete(&self.endpoint)
            .query(&[("id", id.get())])
            .send()
            .await
            .map_err(transport)?;
        let _: MessageResponse = decode(response).await?;
        Ok(())
    }
}
