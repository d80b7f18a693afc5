//! HTTP client for the clinic inventory endpoints.

use reqwest::header::AUTHORIZATION;

use medistock_inventory::{InventoryItem, Restocked, StockUsed};

use crate::dto::{
    ApiResponse, InventoryItemDto, RestockRecordDto, SubmitRestockRequest, SubmitUsageRequest,
    UsageRecordDto,
};
use crate::error::RemoteOperationError;

/// Client for the remote clinic API.
///
/// The token, when present, is sent verbatim in the `Authorization` header
/// (the backend expects the raw access token, not a `Bearer` scheme).
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::new(base_url)
        }
    }

    /// Fetch all inventory items as domain snapshots.
    pub async fn fetch_items(&self) -> Result<Vec<InventoryItem>, RemoteOperationError> {
        let dtos: Vec<InventoryItemDto> = self.get("/inventory").await?;
        Ok(dtos.into_iter().map(InventoryItemDto::into_domain).collect())
    }

    /// Fetch the append-only usage history.
    pub async fn fetch_usage_history(&self) -> Result<Vec<StockUsed>, RemoteOperationError> {
        let dtos: Vec<UsageRecordDto> = self.get("/inventory/usage").await?;
        Ok(dtos.into_iter().map(UsageRecordDto::into_event).collect())
    }

    /// Fetch the append-only restock history.
    pub async fn fetch_restock_history(&self) -> Result<Vec<Restocked>, RemoteOperationError> {
        let dtos: Vec<RestockRecordDto> = self.get("/inventory/restocks").await?;
        Ok(dtos.into_iter().map(RestockRecordDto::into_event).collect())
    }

    /// Submit a usage; returns the updated item the server confirmed.
    pub async fn submit_usage(
        &self,
        request: SubmitUsageRequest,
    ) -> Result<InventoryItem, RemoteOperationError> {
        let dto: InventoryItemDto = self.post("/inventory/use", &request).await?;
        Ok(dto.into_domain())
    }

    /// Submit a restock; returns the updated item the server confirmed.
    pub async fn submit_restock(
        &self,
        request: SubmitRestockRequest,
    ) -> Result<InventoryItem, RemoteOperationError> {
        let dto: InventoryItemDto = self.post("/inventory/restock", &request).await?;
        Ok(dto.into_domain())
    }

    async fn get<T>(&self, path: &str) -> Result<T, RemoteOperationError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");

        let mut req = self.http.get(&url);
        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| RemoteOperationError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteOperationError>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "POST");

        let mut req = self.http.post(&url).json(body);
        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| RemoteOperationError::Network(e.to_string()))?;
        Self::decode(resp).await
    }

    async fn decode<T>(resp: reqwest::Response) -> Result<T, RemoteOperationError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteOperationError::Api {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let envelope: ApiResponse<T> = resp
            .json()
            .await
            .map_err(|e| RemoteOperationError::Parse(e.to_string()))?;
        unwrap_envelope(envelope)
    }
}

/// Apply the `{success, message, data}` contract to a decoded envelope.
pub(crate) fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<T, RemoteOperationError> {
    if !envelope.success {
        return Err(RemoteOperationError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "remote operation failed".to_string()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| RemoteOperationError::Parse("success response without data".to_string()))
}
