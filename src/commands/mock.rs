//! Scripted row service for tests

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;

use super::{RowService, ServiceError, ServiceResult};
use crate::models::{Row, RowId, RowRequest, RowResponse};

/// A call the service received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Create(RowRequest),
    Update(RowId, RowRequest),
    Delete(RowId),
}

/// Replies are consumed in order; an empty script answers with a network error
#[derive(Default)]
pub struct MockRowService {
    lists: RefCell<VecDeque<ServiceResult<Vec<Row>>>>,
    replies: RefCell<VecDeque<ServiceResult<RowResponse>>>,
    calls: RefCell<Vec<Call>>,
}

impl MockRowService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_list(&self, reply: ServiceResult<Vec<Row>>) -> &Self {
        self.lists.borrow_mut().push_back(reply);
        self
    }

    pub fn push_reply(&self, reply: ServiceResult<RowResponse>) -> &Self {
        self.replies.borrow_mut().push_back(reply);
        self
    }

    /// Shorthand for a successful reply carrying `current`
    pub fn push_saved(&self, current: Row) -> &Self {
        self.push_reply(Ok(RowResponse { current: Some(current), changed: vec![] }))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn next_reply(&self, call: Call) -> ServiceResult<RowResponse> {
        self.calls.borrow_mut().push(call);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::Network("no scripted reply".into())))
    }
}

#[async_trait(?Send)]
impl RowService for MockRowService {
    async fn list(&self) -> ServiceResult<Vec<Row>> {
        self.calls.borrow_mut().push(Call::List);
        self.lists
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::Network("no scripted list".into())))
    }

    async fn create(&self, request: &RowRequest) -> ServiceResult<RowResponse> {
        self.next_reply(Call::Create(request.clone()))
    }

    async fn update(&self, id: RowId, request: &RowRequest) -> ServiceResult<RowResponse> {
        self.next_reply(Call::Update(id, request.clone()))
    }

    async fn delete(&self, id: RowId) -> ServiceResult<RowResponse> {
        self.next_reply(Call::Delete(id))
    }
}
