// file: src/remote/client.rs
// description: outbound seam to a remote nutrient database
// reference: https://docs.rs/async-trait

use crate::error::Result;
use crate::models::raw::RawSearchResponse;
use crate::models::search_result::{DetailFormat, SearchOptions};
use async_trait::async_trait;

/// A remote source of raw food records.
///
/// Implementations are stateless with respect to credentials: the API key is
/// owned by the caller and passed on every request so it can be changed at
/// runtime. Non-success outcomes surface as `NutritionError::Network` or
/// `NutritionError::Parse`; implementations never retry.
#[async_trait]
pub trait RemoteNutrientClient: Send + Sync {
    async fn search(
        &self,
        api_key: &str,
        query: &str,
        options: &SearchOptions,
    ) -> Result<RawSearchResponse>;

    /// Raw JSON of a single food, left undecoded so the normalizer can
    /// degrade gracefully on unexpected documents.
    async fn food_by_id(
        &self,
        api_key: &str,
        id: &str,
        format: DetailFormat,
    ) -> Result<serde_json::Value>;
}
