// file: src/remote/fdc.rs
// description: FoodData Central HTTP client
// reference: https://fdc.nal.usda.gov/api-guide.html

use crate::error::{NetworkError, NutritionError, Result};
use crate::models::raw::RawSearchResponse;
use crate::models::search_result::{DetailFormat, SearchOptions};
use crate::remote::client::RemoteNutrientClient;
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

pub struct FoodDataCentralClient {
    client: Client,
    base_url: String,
}

impl FoodDataCentralClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL with `segments` appended. Each segment is percent-encoded, so
    /// a caller-supplied id cannot reach another path or add a query.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            NutritionError::Validation(format!("Invalid base URL {}: {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                NutritionError::Validation(format!("Base URL cannot take a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, url: Url, params: &[(&str, String)]) -> Result<Response> {
        debug!("GET {} ({} params)", url, params.len());

        let response = self
            .client
            .get(url.clone())
            .query(params)
            .send()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Remote responded {} for {}", status, url);
            return Err(NetworkError::from_status(status.as_u16(), body).into());
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response
            .text()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;
        serde_json::from_str(&body)
            .map_err(|e| NutritionError::Parse(format!("Failed to decode response body: {}", e)))
    }
}

impl Default for FoodDataCentralClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl RemoteNutrientClient for FoodDataCentralClient {
    async fn search(
        &self,
        api_key: &str,
        query: &str,
        options: &SearchOptions,
    ) -> Result<RawSearchResponse> {
        let options = options.normalized();
        let url = self.endpoint(&["foods", "search"])?;

        let mut params: Vec<(&str, String)> = vec![
            ("api_key", api_key.to_string()),
            ("query", query.to_string()),
            ("pageSize", options.page_size.to_string()),
            ("pageNumber", options.page_number.to_string()),
        ];
        params.extend(
            options
                .data_types
                .iter()
                .map(|data_type| ("dataType", data_type.as_str().to_string())),
        );

        let response = self.send(url, &params).await?;
        Self::decode(response).await
    }

    async fn food_by_id(
        &self,
        api_key: &str,
        id: &str,
        format: DetailFormat,
    ) -> Result<serde_json::Value> {
        let url = self.endpoint(&["food", id.trim()])?;
        let params = [
            ("format", format.as_str().to_string()),
            ("api_key", api_key.to_string()),
        ];

        let response = self.send(url, &params).await?;
        Self::decode(response).await
    }
}
