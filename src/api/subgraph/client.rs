use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{GraphQLRequest, GraphQLResponse, SubgraphError};
use super::query::QueryDescriptor;

/// GraphQL client for a single subgraph endpoint
pub struct SubgraphClient {
    http_client: HttpClient,
    endpoint: String,
    api_key: Option<String>,
}

impl SubgraphClient {
    /// Create a client for `endpoint`; `api_key` is sent as a bearer token when present
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SubgraphError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubgraphError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Create default headers, with authorization when a key is configured
    fn create_headers(&self) -> Result<HeaderMap, SubgraphError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(key) = &self.api_key {
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| SubgraphError::RequestError(format!("Failed to create auth header: {}", e)))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    /// Map a non-success response to an error
    async fn handle_error_response(response: reqwest::Response) -> SubgraphError {
        let status_code = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            400 => {
                // Gateways usually answer with a JSON body carrying a message
                if let Ok(err_json) = serde_json::from_str::<serde_json::Value>(&body_text) {
                    let message = err_json
                        .get("message")
                        .or_else(|| err_json.get("error"))
                        .and_then(|v| v.as_str())
                        .unwrap_or(&body_text);
                    SubgraphError::BadRequest(message.to_string())
                } else {
                    SubgraphError::BadRequest(body_text)
                }
            }
            401 => SubgraphError::Unauthorized(body_text),
            403 => SubgraphError::Forbidden(body_text),
            404 => SubgraphError::NotFound(body_text),
            429 => {
                let retry_after = retry_after.unwrap_or(1);
                warn!("Subgraph rate limited, retry after {} s", retry_after);
                SubgraphError::RateLimited { retry_after }
            }
            500..=599 => {
                warn!("Subgraph server error {}: {}", status_code, body_text);
                SubgraphError::ServerError(status_code, body_text)
            }
            _ => SubgraphError::HttpError(status_code, body_text),
        }
    }

    /// POST the descriptor's document and return the JSON under its root field
    ///
    /// # Returns
    /// * `Ok(Value)` - The root field value, possibly `null`
    /// * `Err(SubgraphError)` - HTTP, transport, GraphQL or payload error
    pub async fn execute(&self, descriptor: &QueryDescriptor) -> Result<serde_json::Value, SubgraphError> {
        let document = descriptor.to_document();
        debug!("Subgraph query '{}': {}", descriptor.name, document);

        let headers = self.create_headers()?;
        let body = GraphQLRequest { query: &document };

        let response = self
            .http_client
            .post(&self.endpoint)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| SubgraphError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        let payload = response
            .json::<GraphQLResponse>()
            .await
            .map_err(|e| SubgraphError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        if let Some(errors) = payload.errors {
            if !errors.is_empty() {
                return Err(SubgraphError::GraphQL(errors.into_iter().map(|e| e.message).collect()));
            }
        }

        let mut data = payload
            .data
            .ok_or_else(|| SubgraphError::MissingEntity(format!("no data for '{}'", descriptor.name)))?;

        Ok(data
            .get_mut(descriptor.root_field)
            .map(serde_json::Value::take)
            .unwrap_or(serde_json::Value::Null))
    }

    /// Fetch a single entity; `null` is a `MissingEntity` error
    pub async fn fetch_one<T: DeserializeOwned>(&self, descriptor: &QueryDescriptor) -> Result<T, SubgraphError> {
        let value = self.execute(descriptor).await?;
        if value.is_null() {
            return Err(SubgraphError::MissingEntity(format!(
                "{} returned no {}",
                descriptor.name, descriptor.root_field
            )));
        }

        serde_json::from_value(value).map_err(|e| {
            SubgraphError::DeserializationError(format!("Failed to parse {}: {}", descriptor.name, e))
        })
    }

    /// Fetch a list of entities; an absent list is an error, an empty list is not
    pub async fn fetch_list<T: DeserializeOwned>(&self, descriptor: &QueryDescriptor) -> Result<Vec<T>, SubgraphError> {
        let value = self.execute(descriptor).await?;
        if value.is_null() {
            return Err(SubgraphError::MissingEntity(format!(
                "{} returned no {}",
                descriptor.name, descriptor.root_field
            )));
        }

        let rows: Vec<T> = serde_json::from_value(value).map_err(|e| {
            SubgraphError::DeserializationError(format!("Failed to parse {}: {}", descriptor.name, e))
        })?;
        debug!("Subgraph query '{}' returned {} rows", descriptor.name, rows.len());

        Ok(rows)
    }
}
