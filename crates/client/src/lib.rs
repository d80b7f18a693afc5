//! Typed client for the remote clinic REST API.
//!
//! The backend is an opaque external HTTP service; this crate models its
//! contract (response envelope, camelCase DTOs, token auth) and maps every
//! failure into [`RemoteOperationError`]. The authoritative stock check and
//! decrement happen server-side; the client never patches a local copy — it
//! only reports state the remote confirmed.

pub mod api;
pub mod dto;
pub mod error;

pub use api::ApiClient;
pub use dto::{
    ApiResponse, InventoryItemDto, RestockRecordDto, SubmitRestockRequest, SubmitUsageRequest,
    UsageRecordDto,
};
pub use error::RemoteOperationError;
