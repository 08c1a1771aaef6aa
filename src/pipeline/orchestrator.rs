// file: src/pipeline/orchestrator.rs
// description: coordinates cache, remote database, local fallback and history
// reference: cache-aside lookup with remote-then-local fallback

use crate::cache::{CacheLayer, HistoryEntry, SearchHistoryTracker};
use crate::config::Config;
use crate::error::{NutritionError, Result};
use crate::models::food::{FoodSource, NormalizedFood};
use crate::models::search_result::{DetailFormat, SearchOptions, SearchResult};
use crate::normalizer::{NutrientNormalizer, NutrientSet};
use crate::pipeline::stats::{SearchPreference, ServiceStats};
use crate::remote::{FoodDataCentralClient, RemoteNutrientClient};
use crate::repository::LocalNutrientRepository;
use crate::utils::{OperationTimer, Validator};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

pub struct SearchOrchestrator {
    remote: Arc<dyn RemoteNutrientClient>,
    repository: LocalNutrientRepository,
    normalizer: NutrientNormalizer,
    search_cache: Mutex<CacheLayer<SearchResult>>,
    details_cache: Mutex<CacheLayer<NormalizedFood>>,
    history: Mutex<SearchHistoryTracker>,
    prefer_remote_first: AtomicBool,
    api_key: RwLock<Option<String>>,
    default_options: SearchOptions,
}

impl SearchOrchestrator {
    pub fn new(config: &Config, remote: Arc<dyn RemoteNutrientClient>) -> Self {
        let cache = &config.cache;
        let search_cache =
            CacheLayer::new(cache.search_ttl(), cache.max_entries).with_policy(cache.eviction);
        let details_cache =
            CacheLayer::new(cache.details_ttl(), cache.max_entries).with_policy(cache.eviction);

        Self {
            remote,
            repository: LocalNutrientRepository::new(),
            normalizer: NutrientNormalizer::new(),
            search_cache: Mutex::new(search_cache),
            details_cache: Mutex::new(details_cache),
            history: Mutex::new(SearchHistoryTracker::new(
                config.history.max_entries,
                config.history.recent_count,
            )),
            prefer_remote_first: AtomicBool::new(config.remote.prefer_remote_first),
            api_key: RwLock::new(Validator::sanitize_api_key(config.remote.api_key.clone())),
            default_options: SearchOptions::default()
                .page_size(config.search.default_page_size)
                .data_types(config.search.data_types.clone()),
        }
    }

    /// Orchestrator talking to FoodData Central at the configured base URL.
    pub fn from_config(config: &Config) -> Self {
        let remote = Arc::new(FoodDataCentralClient::new(config.remote.base_url.clone()));
        Self::new(config, remote)
    }

    /// Paging and data types from configuration, for callers that only
    /// override a few fields.
    pub fn default_options(&self) -> SearchOptions {
        self.default_options.clone()
    }

    pub fn repository(&self) -> &LocalNutrientRepository {
        &self.repository
    }

    /// Resolve one page of foods for `query`. Never fails: every failure is
    /// absorbed and reported through `source` and `error` on the result.
    pub async fn search_foods(&self, query: &str, options: &SearchOptions) -> SearchResult {
        let options = options.normalized();
        let display_query = query.trim();
        let timer = OperationTimer::new(display_query);
        let normalized_query = Validator::normalize_query(query);

        if normalized_query.is_empty() {
            debug!("Empty query, skipping lookup");
            return SearchResult::empty(display_query, options.page_number, FoodSource::None);
        }

        let key = Self::search_key(&normalized_query, &options);
        if let Some(mut cached) = self.search_cache.lock().await.get(&key) {
            debug!("Search cache hit: {}", key);
            cached.search_time_ms = timer.elapsed_ms();
            return cached;
        }

        let mut failure: Option<NutritionError> = None;

        if self.preference().is_remote_first() {
            match self.api_key().await {
                Some(api_key) => {
                    match self.search_remote(&api_key, display_query, &options).await {
                        Ok(result) if !result.is_empty() => {
                            return self.complete(key, &normalized_query, result, timer).await;
                        }
                        Ok(_) => debug!("Remote search for '{}' found nothing", display_query),
                        Err(e) => {
                            warn!("Remote search for '{}' failed: {}", display_query, e);
                            failure = Some(e);
                        }
                    }
                }
                None => debug!("No API key configured, searching locally"),
            }
        }

        let local = self.repository.search_local(display_query, &options);
        if !local.is_empty() {
            return self.complete(key, &normalized_query, local, timer).await;
        }

        // An empty page past the end keeps the local counts so callers can page back.
        let mut result = local;
        result.source = FoodSource::None;
        if let Some(e) = failure {
            result.source = FoodSource::Error;
            result.error = Some(e.to_string());
        }
        result.search_time_ms = timer.finish_with_count(0).as_millis() as u64;
        info!("No foods found for '{}' ({})", display_query, result.source);
        result
    }

    /// Detail view of a single food. `local_<n>` ids resolve against the local
    /// dataset; numeric ids need the remote database and an API key. Any other
    /// id is not found.
    pub async fn get_food_details(&self, id: &str, format: DetailFormat) -> Result<NormalizedFood> {
        let id = id.trim();
        if id.is_empty() {
            return Err(NutritionError::NotFound("empty food id".to_string()));
        }

        let key = format!("{}|{}", id, format.as_str());
        if let Some(cached) = self.details_cache.lock().await.get(&key) {
            debug!("Details cache hit: {}", key);
            return Ok(cached);
        }

        let food = if LocalNutrientRepository::is_local_id(id) {
            self.repository.find_by_id(id)
        } else if Validator::is_remote_food_id(id) {
            self.details_remote(id, format).await
        } else {
            debug!("'{}' is neither a local nor a FoodData Central id", id);
            None
        };

        match food {
            Some(food) => {
                self.details_cache.lock().await.set(key, food.clone());
                Ok(food)
            }
            None => Err(NutritionError::NotFound(id.to_string())),
        }
    }

    pub async fn get_search_suggestions(&self, partial: &str) -> Vec<String> {
        self.history.lock().await.suggest(partial, &self.repository)
    }

    pub fn set_search_preference(&self, preference: SearchPreference) {
        self.prefer_remote_first
            .store(preference.is_remote_first(), Ordering::SeqCst);
        info!("Search preference set to {}", preference);
    }

    pub fn preference(&self) -> SearchPreference {
        SearchPreference::from_remote_first(self.prefer_remote_first.load(Ordering::SeqCst))
    }

    /// Replace the API key. Blank keys count as removing it.
    pub async fn set_api_key(&self, api_key: Option<String>) {
        let api_key = Validator::sanitize_api_key(api_key);
        info!(
            "API key {}",
            if api_key.is_some() { "configured" } else { "cleared" }
        );
        *self.api_key.write().await = api_key;
    }

    pub async fn clear_cache(&self) {
        self.search_cache.lock().await.clear();
        self.details_cache.lock().await.clear();
        info!("Caches cleared");
    }

    pub async fn get_stats(&self) -> ServiceStats {
        let search_cache = self.search_cache.lock().await.stats();
        let details_cache = self.details_cache.lock().await.stats();
        let history_count = self.history.lock().await.len();

        ServiceStats {
            cache_size: search_cache.entries + details_cache.entries,
            history_count,
            has_api_key: self.api_key.read().await.is_some(),
            preference: self.preference(),
            search_cache,
            details_cache,
        }
    }

    pub async fn recent_searches(&self) -> Vec<HistoryEntry> {
        self.history.lock().await.recent().to_vec()
    }

    async fn api_key(&self) -> Option<String> {
        self.api_key.read().await.clone()
    }

    async fn search_remote(
        &self,
        api_key: &str,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResult> {
        let response = self.remote.search(api_key, query, options).await?;

        let foods: Vec<NormalizedFood> = response
            .foods
            .iter()
            .map(|raw| self.normalizer.normalize(raw, NutrientSet::Basic))
            .collect();
        let total_hits = response.total_hits.max(foods.len());

        Ok(SearchResult {
            source: FoodSource::Remote,
            current_page: response.current_page.unwrap_or(options.page_number),
            total_pages: response
                .total_pages
                .unwrap_or_else(|| SearchResult::total_pages_for(total_hits, options.page_size)),
            foods,
            total_hits,
            query: query.to_string(),
            search_time_ms: 0,
            error: None,
        })
    }

    async fn details_remote(&self, id: &str, format: DetailFormat) -> Option<NormalizedFood> {
        let Some(api_key) = self.api_key().await else {
            debug!("No API key configured, cannot fetch details for {}", id);
            return None;
        };

        let set = match format {
            DetailFormat::Abridged => NutrientSet::Basic,
            DetailFormat::Full => NutrientSet::Extended,
        };

        match self.remote.food_by_id(&api_key, id, format).await {
            Ok(raw) => Some(self.normalizer.normalize(&raw, set)),
            Err(e) => {
                warn!("Remote details for {} failed: {}", id, e);
                None
            }
        }
    }

    async fn complete(
        &self,
        key: String,
        normalized_query: &str,
        mut result: SearchResult,
        timer: OperationTimer,
    ) -> SearchResult {
        result.search_time_ms = timer.finish_with_count(result.foods.len()).as_millis() as u64;

        self.search_cache.lock().await.set(key, result.clone());
        self.history
            .lock()
            .await
            .record(normalized_query, result.total_hits);

        info!(
            "Found {} foods for '{}' from {} in {} ms",
            result.total_hits, result.query, result.source, result.search_time_ms
        );
        result
    }

    fn search_key(normalized_query: &str, options: &SearchOptions) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            normalized_query,
            options.page_size,
            options.page_number,
            options.data_type_key(),
            options.category_filter().unwrap_or("").to_lowercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use crate::models::raw::RawSearchResponse;
    use crate::normalizer::NutrientKey;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::sync::atomic::AtomicUsize;

    enum Behavior {
        Foods(Vec<Value>),
        Fail,
    }

    struct FakeRemote {
        behavior: Behavior,
        searches: AtomicUsize,
        details: AtomicUsize,
    }

    impl FakeRemote {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                searches: AtomicUsize::new(0),
                details: AtomicUsize::new(0),
            })
        }

        fn searches(&self) -> usize {
            self.searches.load(Ordering::SeqCst)
        }

        fn details(&self) -> usize {
            self.details.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RemoteNutrientClient for FakeRemote {
        async fn search(
            &self,
            _api_key: &str,
            _query: &str,
            _options: &SearchOptions,
        ) -> Result<RawSearchResponse> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Foods(foods) => Ok(RawSearchResponse {
                    foods: foods.clone(),
                    total_hits: foods.len(),
                    current_page: Some(1),
                    total_pages: Some(1),
                }),
                Behavior::Fail => Err(NetworkError::ServerError {
                    body: "upstream down".to_string(),
                }
                .into()),
            }
        }

        async fn food_by_id(
            &self,
            _api_key: &str,
            id: &str,
            _format: DetailFormat,
        ) -> Result<Value> {
            self.details.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Foods(foods) => foods
                    .iter()
                    .find(|food| food["fdcId"].to_string() == id)
                    .cloned()
                    .ok_or_else(|| NetworkError::from_status(404, String::new()).into()),
                Behavior::Fail => Err(NetworkError::Transport("connection refused".into()).into()),
            }
        }
    }

    fn remote_banana() -> Value {
        json!({
            "fdcId": 1105314,
            "description": "Bananas, raw",
            "dataType": "Foundation",
            "foodNutrients": [
                {"nutrientId": 1008, "nutrientName": "Energy", "unitName": "KCAL", "value": 89.0},
                {"nutrientId": 1003, "nutrientName": "Protein", "unitName": "G", "value": 1.09},
                {"nutrientId": 1092, "nutrientName": "Potassium, K", "unitName": "MG", "value": 358.0}
            ]
        })
    }

    fn orchestrator(remote: Arc<FakeRemote>, api_key: Option<&str>) -> SearchOrchestrator {
        let mut config = Config::default_config();
        config.remote.api_key = api_key.map(str::to_string);
        SearchOrchestrator::new(&config, remote)
    }

    #[tokio::test]
    async fn test_local_fallback_without_api_key() {
        let remote = FakeRemote::new(Behavior::Foods(vec![remote_banana()]));
        let service = orchestrator(remote.clone(), None);

        let result = service
            .search_foods("chicken breast", &SearchOptions::default())
            .await;

        assert_eq!(result.source, FoodSource::Local);
        assert_eq!(result.foods[0].description, "Chicken Breast");
        assert!(
            result
                .foods
                .iter()
                .all(|f| f.description.to_lowercase().contains("chicken breast"))
        );
        assert_eq!(remote.searches(), 0);
    }

    #[tokio::test]
    async fn test_banana_local_page() {
        let remote = FakeRemote::new(Behavior::Fail);
        let service = orchestrator(remote, None);

        let result = service
            .search_foods("banana", &SearchOptions::default().page_size(1))
            .await;

        assert_eq!(result.source, FoodSource::Local);
        assert_eq!(result.total_hits, 1);
        assert_eq!(result.total_pages, 1);
        let banana = &result.foods[0];
        assert_eq!(banana.description, "Banana (raw)");
        assert_eq!(banana.calories.as_ref().map(|n| n.value), Some(89.0));
        assert_eq!(banana.protein.as_ref().map(|n| n.value), Some(1.1));
    }

    #[tokio::test]
    async fn test_remote_results_are_cached() {
        let remote = FakeRemote::new(Behavior::Foods(vec![remote_banana()]));
        let service = orchestrator(remote.clone(), Some("KEY"));

        let first = service.search_foods("banana", &SearchOptions::default()).await;
        let second = service
            .search_foods("  BANANA ", &SearchOptions::default())
            .await;

        assert_eq!(remote.searches(), 1);
        assert_eq!(first.source, FoodSource::Remote);
        assert_eq!(second.source, FoodSource::Remote);
        assert_eq!(first.foods, second.foods);
        assert_eq!(
            second.foods[0].calories.as_ref().map(|n| n.unit.as_str()),
            Some("kcal")
        );

        // different paging is a different key
        service
            .search_foods("banana", &SearchOptions::default().page_number(2))
            .await;
        assert_eq!(remote.searches(), 2);
    }

    #[tokio::test]
    async fn test_failing_remote_falls_back_to_local() {
        let remote = FakeRemote::new(Behavior::Fail);
        let service = orchestrator(remote.clone(), Some("KEY"));

        let result = service.search_foods("banana", &SearchOptions::default()).await;

        assert_eq!(remote.searches(), 1);
        assert_eq!(result.source, FoodSource::Local);
        assert!(!result.is_empty());
        assert_eq!(result.error, None);
    }

    #[tokio::test]
    async fn test_total_miss_after_failure_reports_error() {
        let remote = FakeRemote::new(Behavior::Fail);
        let service = orchestrator(remote, Some("KEY"));

        let result = service
            .search_foods("zzzz unknown", &SearchOptions::default())
            .await;

        assert!(result.is_empty());
        assert_eq!(result.source, FoodSource::Error);
        assert!(result.error.as_deref().is_some_and(|e| e.contains("upstream down")));
    }

    #[tokio::test]
    async fn test_empty_remote_falls_through_to_local() {
        let remote = FakeRemote::new(Behavior::Foods(vec![]));
        let service = orchestrator(remote.clone(), Some("KEY"));

        let hit = service.search_foods("oatmeal", &SearchOptions::default()).await;
        assert_eq!(hit.source, FoodSource::Local);

        let miss = service.search_foods("zzzz", &SearchOptions::default()).await;
        assert_eq!(miss.source, FoodSource::None);
        assert_eq!(miss.error, None);
        assert_eq!(remote.searches(), 2);
    }

    #[tokio::test]
    async fn test_local_first_never_calls_remote() {
        let remote = FakeRemote::new(Behavior::Foods(vec![remote_banana()]));
        let service = orchestrator(remote.clone(), Some("KEY"));
        service.set_search_preference(SearchPreference::LocalFirst);

        let result = service
            .search_foods("bananas, raw", &SearchOptions::default())
            .await;

        assert_eq!(result.source, FoodSource::None);
        assert_eq!(remote.searches(), 0);
    }

    #[tokio::test]
    async fn test_blank_query_skips_lookup() {
        let remote = FakeRemote::new(Behavior::Foods(vec![remote_banana()]));
        let service = orchestrator(remote.clone(), Some("KEY"));

        let result = service.search_foods("   ", &SearchOptions::default()).await;

        assert!(result.is_empty());
        assert_eq!(result.source, FoodSource::None);
        assert_eq!(remote.searches(), 0);
        assert_eq!(service.get_stats().await.history_count, 0);
    }

    #[tokio::test]
    async fn test_local_details_skip_remote() {
        let remote = FakeRemote::new(Behavior::Foods(vec![remote_banana()]));
        let service = orchestrator(remote.clone(), Some("KEY"));

        let food = service
            .get_food_details("local_2", DetailFormat::Abridged)
            .await
            .unwrap();

        assert_eq!(food.description, "Banana (raw)");
        assert_eq!(food.source, FoodSource::Local);
        assert_eq!(remote.details(), 0);

        let missing = service
            .get_food_details("local_999", DetailFormat::Abridged)
            .await;
        assert!(matches!(missing, Err(NutritionError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remote_details_cached_per_format() {
        let remote = FakeRemote::new(Behavior::Foods(vec![remote_banana()]));
        let service = orchestrator(remote.clone(), Some("KEY"));

        let abridged = service
            .get_food_details("1105314", DetailFormat::Abridged)
            .await
            .unwrap();
        service
            .get_food_details("1105314", DetailFormat::Abridged)
            .await
            .unwrap();
        assert_eq!(remote.details(), 1);
        assert!(abridged.nutrient(NutrientKey::Potassium).is_none());

        let full = service
            .get_food_details("1105314", DetailFormat::Full)
            .await
            .unwrap();
        assert_eq!(remote.details(), 2);
        assert_eq!(
            full.nutrient(NutrientKey::Potassium).map(|n| n.value),
            Some(358.0)
        );
    }

    #[tokio::test]
    async fn test_remote_details_failures_are_not_found() {
        let failing = FakeRemote::new(Behavior::Fail);
        let service = orchestrator(failing.clone(), Some("KEY"));
        let result = service.get_food_details("12345", DetailFormat::Full).await;
        assert!(matches!(result, Err(NutritionError::NotFound(id)) if id == "12345"));
        assert_eq!(failing.details(), 1);

        let keyless = FakeRemote::new(Behavior::Foods(vec![remote_banana()]));
        let service = orchestrator(keyless.clone(), None);
        let result = service
            .get_food_details("1105314", DetailFormat::Abridged)
            .await;
        assert!(matches!(result, Err(NutritionError::NotFound(_))));
        assert_eq!(keyless.details(), 0);
    }

    #[tokio::test]
    async fn test_suggestions_include_history() {
        let remote = FakeRemote::new(Behavior::Fail);
        let service = orchestrator(remote, None);

        service.search_foods("Greek Yogurt", &SearchOptions::default()).await;

        let suggestions = service.get_search_suggestions("gre").await;
        assert_eq!(suggestions.first().map(String::as_str), Some("greek yogurt"));

        let recent = service.get_search_suggestions("g").await;
        assert_eq!(recent, vec!["greek yogurt".to_string()]);

        let entries = service.recent_searches().await;
        assert_eq!(entries.len(), 1);
        assert!(entries[0].result_count >= 1);
    }

    #[tokio::test]
    async fn test_stats_and_clear_cache() {
        let remote = FakeRemote::new(Behavior::Foods(vec![remote_banana()]));
        let service = orchestrator(remote.clone(), Some("KEY"));

        service.search_foods("banana", &SearchOptions::default()).await;
        service.search_foods("banana", &SearchOptions::default()).await;
        service
            .get_food_details("local_2", DetailFormat::Abridged)
            .await
            .unwrap();

        let stats = service.get_stats().await;
        assert_eq!(stats.cache_size, 2);
        assert_eq!(stats.history_count, 1);
        assert!(stats.has_api_key);
        assert_eq!(stats.preference, SearchPreference::RemoteFirst);
        assert_eq!(stats.search_cache.hits, 1);
        assert_eq!(stats.search_cache.misses, 1);

        service.clear_cache().await;
        assert_eq!(service.get_stats().await.cache_size, 0);

        service.search_foods("banana", &SearchOptions::default()).await;
        assert_eq!(remote.searches(), 2);
    }

    #[tokio::test]
    async fn test_set_api_key_enables_remote() {
        let remote = FakeRemote::new(Behavior::Foods(vec![remote_banana()]));
        let service = orchestrator(remote.clone(), None);

        service.set_api_key(Some("   ".to_string())).await;
        assert!(!service.get_stats().await.has_api_key);

        service.set_api_key(Some("KEY".to_string())).await;
        let result = service
            .search_foods("bananas", &SearchOptions::default())
            .await;

        assert_eq!(result.source, FoodSource::Remote);
        assert_eq!(remote.searches(), 1);
    }

    #[tokio::test]
    async fn test_category_is_part_of_cache_key() {
        let remote = FakeRemote::new(Behavior::Fail);
        let service = orchestrator(remote, None);

        let all = service
            .search_foods("chicken", &SearchOptions::default())
            .await;
        let fruits = service
            .search_foods("chicken", &SearchOptions::default().category("Fruits"))
            .await;

        assert!(!all.is_empty());
        assert_eq!(fruits.source, FoodSource::None);
    }

    #[tokio::test]
    async fn test_huge_page_number_never_panics() {
        let remote = FakeRemote::new(Behavior::Fail);
        let service = orchestrator(remote, None);

        let result = service
            .search_foods("chicken", &SearchOptions::default().page_number(usize::MAX))
            .await;

        assert!(result.is_empty());
        assert_eq!(result.source, FoodSource::None);
        assert_eq!(result.current_page, usize::MAX);
    }

    #[tokio::test]
    async fn test_page_past_end_keeps_counts() {
        let remote = FakeRemote::new(Behavior::Fail);
        let service = orchestrator(remote, None);

        let result = service
            .search_foods("chicken", &SearchOptions::default().page_number(9))
            .await;

        assert!(result.is_empty());
        assert_eq!(result.source, FoodSource::None);
        assert_eq!(result.total_hits, 4);
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.current_page, 9);
        assert_eq!(result.error, None);
    }

    #[tokio::test]
    async fn test_double_space_query_matches_regardless_of_order() {
        let remote = FakeRemote::new(Behavior::Fail);
        let fresh = orchestrator(remote.clone(), None);
        let spaced_first = fresh
            .search_foods("chicken  breast", &SearchOptions::default())
            .await;

        let warmed = orchestrator(remote, None);
        warmed
            .search_foods("chicken breast", &SearchOptions::default())
            .await;
        let spaced_after = warmed
            .search_foods("chicken  breast", &SearchOptions::default())
            .await;

        assert_eq!(spaced_first.source, FoodSource::Local);
        assert_eq!(spaced_first.total_hits, 3);
        let ids = |result: &SearchResult| -> Vec<String> {
            result.foods.iter().map(|f| f.id.clone()).collect()
        };
        assert_eq!(ids(&spaced_first), ids(&spaced_after));
        assert_eq!(warmed.get_stats().await.search_cache.hits, 1);
    }

    #[tokio::test]
    async fn test_malformed_remote_ids_are_not_found() {
        let remote = FakeRemote::new(Behavior::Foods(vec![remote_banana()]));
        let service = orchestrator(remote.clone(), Some("KEY"));

        for id in ["../foods/search", "1?format=full#", "banana"] {
            let result = service.get_food_details(id, DetailFormat::Abridged).await;
            assert!(matches!(result, Err(NutritionError::NotFound(_))), "{}", id);
        }
        assert_eq!(remote.details(), 0);
    }
}
