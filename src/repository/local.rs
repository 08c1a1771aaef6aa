// file: src/repository/local.rs
// description: substring search, ranking and paging over the local dataset
// reference: in-memory fallback for the remote nutrient database

use crate::models::food::{FoodSource, NormalizedFood};
use crate::models::search_result::{SearchOptions, SearchResult};
use crate::normalizer::NutrientNormalizer;
use crate::repository::dataset::{LOCAL_FOODS, LocalFood};
use crate::utils::Validator;
use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use tracing::debug;

lazy_static! {
    static ref LOCAL_ID: Regex = Regex::new(r"^local_\d+$").expect("LOCAL_ID regex is valid");
}

pub struct LocalNutrientRepository {
    foods: &'static [LocalFood],
    normalizer: NutrientNormalizer,
}

impl LocalNutrientRepository {
    pub fn new() -> Self {
        Self::with_foods(LOCAL_FOODS)
    }

    pub fn with_foods(foods: &'static [LocalFood]) -> Self {
        Self {
            foods,
            normalizer: NutrientNormalizer::new(),
        }
    }

    /// Whether `id` follows the local id convention (`local_<n>`).
    pub fn is_local_id(id: &str) -> bool {
        LOCAL_ID.is_match(id.trim())
    }

    pub fn find_by_id(&self, id: &str) -> Option<NormalizedFood> {
        let id = id.trim();
        self.foods
            .iter()
            .find(|food| food.id == id)
            .map(|food| self.normalizer.normalize_local(food))
    }

    /// Case-insensitive substring search over name, brand and category.
    /// Exact name matches rank first, then names starting with the query,
    /// then the rest alphabetically. An empty query matches every row.
    pub fn search_local(&self, query: &str, options: &SearchOptions) -> SearchResult {
        let options = options.normalized();
        let needle = Validator::normalize_query(query);
        let category = options.category_filter().map(str::to_lowercase);

        let mut matches: Vec<&LocalFood> = self
            .foods
            .iter()
            .filter(|food| Self::matches(food, &needle))
            .filter(|food| {
                category
                    .as_deref()
                    .is_none_or(|c| food.category.to_lowercase() == c)
            })
            .collect();

        matches.sort_by(|a, b| Self::rank(a, b, &needle));

        let total_hits = matches.len();
        let foods: Vec<NormalizedFood> = matches
            .into_iter()
            .skip(options.offset())
            .take(options.page_size)
            .map(|food| self.normalizer.normalize_local(food))
            .collect();

        debug!(
            "Local search '{}' matched {} rows, returning {}",
            needle,
            total_hits,
            foods.len()
        );

        SearchResult {
            source: if foods.is_empty() {
                FoodSource::None
            } else {
                FoodSource::Local
            },
            foods,
            total_hits,
            current_page: options.page_number,
            total_pages: SearchResult::total_pages_for(total_hits, options.page_size),
            query: query.trim().to_string(),
            search_time_ms: 0,
            error: None,
        }
    }

    /// Names containing `partial`, best ranked first.
    pub fn name_suggestions(&self, partial: &str, limit: usize) -> Vec<String> {
        let needle = partial.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut names: Vec<&LocalFood> = self
            .foods
            .iter()
            .filter(|food| food.name.to_lowercase().contains(&needle))
            .collect();
        names.sort_by(|a, b| Self::rank(a, b, &needle));
        names
            .into_iter()
            .take(limit)
            .map(|food| food.name.to_string())
            .collect()
    }

    /// Distinct categories in dataset order.
    pub fn categories(&self) -> Vec<&'static str> {
        let mut categories: Vec<&'static str> = Vec::new();
        for food in self.foods {
            if !categories.contains(&food.category) {
                categories.push(food.category);
            }
        }
        categories
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    fn matches(food: &LocalFood, needle: &str) -> bool {
        food.name.to_lowercase().contains(needle)
            || food
                .brand
                .is_some_and(|brand| brand.to_lowercase().contains(needle))
            || food.category.to_lowercase().contains(needle)
    }

    fn rank(a: &LocalFood, b: &LocalFood, needle: &str) -> Ordering {
        let a_name = a.name.to_lowercase();
        let b_name = b.name.to_lowercase();

        (b_name == needle)
            .cmp(&(a_name == needle))
            .then_with(|| b_name.starts_with(needle).cmp(&a_name.starts_with(needle)))
            .then_with(|| a_name.cmp(&b_name))
    }
}

impl Default for LocalNutrientRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(result: &SearchResult) -> Vec<&str> {
        result.foods.iter().map(|f| f.description.as_str()).collect()
    }

    #[test]
    fn test_banana_example() {
        let repo = LocalNutrientRepository::new();
        let result = repo.search_local("banana", &SearchOptions::default().page_size(1));

        assert_eq!(result.total_hits, 1);
        assert_eq!(result.source, FoodSource::Local);
        assert_eq!(names(&result), vec!["Banana (raw)"]);
        assert_eq!(result.foods[0].calories.as_ref().map(|n| n.value), Some(89.0));
        assert_eq!(result.foods[0].protein.as_ref().map(|n| n.value), Some(1.1));
    }

    #[test]
    fn test_ranking_exact_then_prefix_then_alpha() {
        let repo = LocalNutrientRepository::new();
        let result = repo.search_local("Chicken Breast", &SearchOptions::default());

        assert_eq!(
            names(&result),
            vec![
                "Chicken Breast",
                "Chicken Breast (grilled)",
                "Breaded Chicken Breast"
            ]
        );
    }

    #[test]
    fn test_matches_brand_and_category() {
        let repo = LocalNutrientRepository::new();

        let by_brand = repo.search_local("gatorade", &SearchOptions::default());
        assert_eq!(names(&by_brand), vec!["Sports Drink"]);

        let by_category = repo.search_local("dairy", &SearchOptions::default());
        assert_eq!(by_category.total_hits, 4);
    }

    #[test]
    fn test_category_filter() {
        let repo = LocalNutrientRepository::new();

        let filtered = repo.search_local("orange", &SearchOptions::default().category("Beverages"));
        assert_eq!(names(&filtered), vec!["Orange Juice"]);

        let all = repo.search_local("orange", &SearchOptions::default().category("All"));
        assert_eq!(all.total_hits, 2);
    }

    #[test]
    fn test_pagination_slice() {
        let repo = LocalNutrientRepository::new();
        let options = SearchOptions::default().page_size(2).page_number(2);
        let result = repo.search_local("chicken", &options);

        // chicken breast x3 + chicken thigh
        assert_eq!(result.total_hits, 4);
        assert_eq!(result.total_pages, 2);
        assert_eq!(result.current_page, 2);
        assert_eq!(result.foods.len(), 2);

        let past_end = repo.search_local("chicken", &SearchOptions::default().page_number(9));
        assert!(past_end.foods.is_empty());
        assert_eq!(past_end.total_hits, 4);
        assert_eq!(past_end.source, FoodSource::None);
    }

    #[test]
    fn test_huge_page_number_is_empty_page() {
        let repo = LocalNutrientRepository::new();
        let result =
            repo.search_local("chicken", &SearchOptions::default().page_number(usize::MAX));

        assert!(result.foods.is_empty());
        assert_eq!(result.total_hits, 4);
        assert_eq!(result.current_page, usize::MAX);
    }

    #[test]
    fn test_inner_whitespace_is_collapsed() {
        let repo = LocalNutrientRepository::new();
        let spaced = repo.search_local("  chicken   Breast ", &SearchOptions::default());
        let plain = repo.search_local("chicken breast", &SearchOptions::default());

        assert_eq!(spaced.total_hits, 3);
        assert_eq!(names(&spaced), names(&plain));
    }

    #[test]
    fn test_no_match() {
        let repo = LocalNutrientRepository::new();
        let result = repo.search_local("kohlrabi", &SearchOptions::default());
        assert!(result.is_empty());
        assert_eq!(result.total_hits, 0);
        assert_eq!(result.source, FoodSource::None);
    }

    #[test]
    fn test_local_ids() {
        assert!(LocalNutrientRepository::is_local_id("local_12"));
        assert!(!LocalNutrientRepository::is_local_id("173944"));
        assert!(!LocalNutrientRepository::is_local_id("local_"));

        let repo = LocalNutrientRepository::new();
        let food = repo.find_by_id("local_2").unwrap();
        assert_eq!(food.description, "Banana (raw)");
        assert!(repo.find_by_id("local_999").is_none());
    }

    #[test]
    fn test_name_suggestions() {
        let repo = LocalNutrientRepository::new();
        assert_eq!(
            repo.name_suggestions("chick", 3),
            vec![
                "Chicken Breast",
                "Chicken Breast (grilled)",
                "Chicken Thigh (roasted)"
            ]
        );
        assert!(repo.name_suggestions("  ", 3).is_empty());
    }

    #[test]
    fn test_categories() {
        let repo = LocalNutrientRepository::new();
        let categories = repo.categories();
        assert_eq!(categories.first(), Some(&"Fruits"));
        assert!(categories.contains(&"Nuts & Seeds"));
        assert_eq!(repo.len(), 44);
    }
}
