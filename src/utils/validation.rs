// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{NutritionError, Result};
use crate::models::search_result::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

pub struct Validator;

impl Validator {
    /// Trim and lowercase a query for cache keys and history.
    pub fn normalize_query(query: &str) -> String {
        query.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
    }

    /// FoodData Central ids are plain decimal numbers.
    pub fn is_remote_food_id(id: &str) -> bool {
        !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
    }

    /// Zero means "use the default"; anything above the API limit is capped.
    pub fn clamp_page_size(size: usize) -> usize {
        match size {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(MAX_PAGE_SIZE),
        }
    }

    pub fn clamp_page_number(page: usize) -> usize {
        page.max(1)
    }

    pub fn validate_page_size(size: usize) -> Result<()> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(NutritionError::Validation(format!(
                "Page size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(NutritionError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_capacity(name: &str, value: usize) -> Result<()> {
        if value == 0 {
            return Err(NutritionError::Validation(format!(
                "{} must be greater than 0",
                name
            )));
        }
        Ok(())
    }

    /// Blank keys count as no key.
    pub fn sanitize_api_key(key: Option<String>) -> Option<String> {
        key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let head: String = text.chars().take(max_chars).collect();
            format!("{}...", head)
        }
    }
}
