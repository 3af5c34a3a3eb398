//! Row Service Client
//!
//! Bindings to the remote row service, organized by transport.

mod row;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Row, RowId, RowRequest, RowResponse};

pub use row::HttpRowService;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures talking to the row service
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// Request never produced a response
    #[error("network error: {0}")]
    Network(String),
    #[error("server replied with status {0}")]
    Status(u16),
    #[error("unreadable response: {0}")]
    Decode(String),
    /// Create or update answered without a `current` row
    #[error("server did not return the saved row")]
    MissingRow,
}

/// The four operations of the row resource.
///
/// Futures are not `Send`: in the browser they run on the UI thread.
#[async_trait(?Send)]
pub trait RowService {
    /// Full tree
    async fn list(&self) -> ServiceResult<Vec<Row>>;

    async fn create(&self, request: &RowRequest) -> ServiceResult<RowResponse>;

    async fn update(&self, id: RowId, request: &RowRequest) -> ServiceResult<RowResponse>;

    async fn delete(&self, id: RowId) -> ServiceResult<RowResponse>;
}

impl RowResponse {
    /// Split a create/update reply into the saved row and its side effects
    pub fn into_saved(self) -> ServiceResult<(Row, Vec<Row>)> {
        match self.current {
            Some(current) => Ok((current, self.changed)),
            None => Err(ServiceError::MissingRow),
        }
    }
}
