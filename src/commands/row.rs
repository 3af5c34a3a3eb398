//! HTTP Row Service
//!
//! `reqwest` client for the list/create/update/delete endpoints.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{RowService, ServiceError, ServiceResult};
use crate::config::ApiConfig;
use crate::models::{Row, RowId, RowRequest, RowResponse};

/// Endpoints of the row resource, relative to the base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    List,
    Create,
    Update(RowId),
    Delete(RowId),
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::List => "/list".to_string(),
            Endpoint::Create => "/create".to_string(),
            Endpoint::Update(id) => format!("/{}/update", id),
            Endpoint::Delete(id) => format!("/{}/delete", id),
        }
    }

    pub fn method(&self) -> reqwest::Method {
        match self {
            Endpoint::List => reqwest::Method::GET,
            Endpoint::Create | Endpoint::Update(_) => reqwest::Method::POST,
            Endpoint::Delete(_) => reqwest::Method::DELETE,
        }
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.path())
    }
}

#[derive(Debug, Clone)]
pub struct HttpRowService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRowService {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    fn request(&self, endpoint: Endpoint) -> reqwest::RequestBuilder {
        let url = endpoint.url(&self.base_url);
        log::debug!("{} {}", endpoint.method(), url);
        self.client.request(endpoint.method(), url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ServiceResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl RowService for HttpRowService {
    async fn list(&self) -> ServiceResult<Vec<Row>> {
        self.send(self.request(Endpoint::List)).await
    }

    async fn create(&self, request: &RowRequest) -> ServiceResult<RowResponse> {
        self.send(self.request(Endpoint::Create).json(request)).await
    }

    async fn update(&self, id: RowId, request: &RowRequest) -> ServiceResult<RowResponse> {
        self.send(self.request(Endpoint::Update(id)).json(request)).await
    }

    async fn delete(&self, id: RowId) -> ServiceResult<RowResponse> {
        self.send(self.request(Endpoint::Delete(id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let base = "http://rows.local/v1/outlay-rows/entity/3/row";
        assert_eq!(Endpoint::List.url(base), format!("{}/list", base));
        assert_eq!(Endpoint::Create.url(base), format!("{}/create", base));
        assert_eq!(Endpoint::Update(42).url(base), format!("{}/42/update", base));
        assert_eq!(Endpoint::Delete(42).url(base), format!("{}/42/delete", base));
    }

    #[test]
    fn test_endpoint_methods() {
        assert_eq!(Endpoint::List.method(), reqwest::Method::GET);
        assert_eq!(Endpoint::Create.method(), reqwest::Method::POST);
        assert_eq!(Endpoint::Update(1).method(), reqwest::Method::POST);
        assert_eq!(Endpoint::Delete(1).method(), reqwest::Method::DELETE);
    }

    #[test]
    fn test_service_uses_config_url() {
        let config = ApiConfig::from_sources(Some("http://rows.local/"), None, None);
        let service = HttpRowService::new(&config);
        assert_eq!(service.base_url, "http://rows.local");
    }
}
