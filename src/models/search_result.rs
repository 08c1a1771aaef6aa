// file: src/models/search_result.rs
// description: search options, paging and result page models
// reference: https://fdc.nal.usda.gov/api-guide.html

use crate::models::food::{FoodSource, NormalizedFood};
use crate::utils::validation::Validator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const MAX_PAGE_SIZE: usize = 200;

/// FoodData Central data sets a search may be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "Foundation")]
    Foundation,
    #[serde(rename = "SR Legacy")]
    SrLegacy,
    #[serde(rename = "Survey (FNDDS)")]
    SurveyFndds,
    #[serde(rename = "Branded")]
    Branded,
    #[serde(rename = "Experimental")]
    Experimental,
}

impl DataType {
    pub const DEFAULTS: [DataType; 3] =
        [DataType::Foundation, DataType::SrLegacy, DataType::SurveyFndds];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Foundation => "Foundation",
            DataType::SrLegacy => "SR Legacy",
            DataType::SurveyFndds => "Survey (FNDDS)",
            DataType::Branded => "Branded",
            DataType::Experimental => "Experimental",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "foundation" => Ok(DataType::Foundation),
            "sr legacy" | "sr_legacy" | "legacy" => Ok(DataType::SrLegacy),
            "survey (fndds)" | "survey" | "fndds" => Ok(DataType::SurveyFndds),
            "branded" => Ok(DataType::Branded),
            "experimental" => Ok(DataType::Experimental),
            other => Err(format!("unknown data type: {}", other)),
        }
    }
}

/// Level of detail requested from the detail endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailFormat {
    #[default]
    Abridged,
    Full,
}

impl DetailFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailFormat::Abridged => "abridged",
            DetailFormat::Full => "full",
        }
    }
}

impl FromStr for DetailFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "abridged" => Ok(DetailFormat::Abridged),
            "full" => Ok(DetailFormat::Full),
            other => Err(format!("unknown detail format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub page_size: usize,
    pub page_number: usize,
    pub data_types: Vec<DataType>,
    pub category: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_number: 1,
            data_types: DataType::DEFAULTS.to_vec(),
            category: None,
        }
    }
}

impl SearchOptions {
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn page_number(mut self, page_number: usize) -> Self {
        self.page_number = page_number;
        self
    }

    pub fn data_types(mut self, data_types: Vec<DataType>) -> Self {
        self.data_types = data_types;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Clamp paging into range and drop duplicate data types.
    pub fn normalized(&self) -> Self {
        let mut data_types: Vec<DataType> = Vec::with_capacity(self.data_types.len());
        for data_type in &self.data_types {
            if !data_types.contains(data_type) {
                data_types.push(*data_type);
            }
        }

        Self {
            page_size: Validator::clamp_page_size(self.page_size),
            page_number: Validator::clamp_page_number(self.page_number),
            data_types,
            category: self
                .category
                .as_ref()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        }
    }

    /// Category filter in effect; `"All"` means no filter.
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.eq_ignore_ascii_case("all"))
    }

    pub fn data_type_key(&self) -> String {
        self.data_types
            .iter()
            .map(DataType::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Rows skipped before this page. Saturates for huge page numbers so the
    /// slice comes back empty.
    pub fn offset(&self) -> usize {
        self.page_number.saturating_sub(1).saturating_mul(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub foods: Vec<NormalizedFood>,

    /// Matches before pagination
    pub total_hits: usize,

    pub current_page: usize,
    pub total_pages: usize,
    pub query: String,
    pub search_time_ms: u64,
    pub source: FoodSource,

    /// Message of the failure that led to an empty `Error` result
    pub error: Option<String>,
}

impl SearchResult {
    pub fn empty(query: &str, current_page: usize, source: FoodSource) -> Self {
        Self {
            foods: Vec::new(),
            total_hits: 0,
            current_page,
            total_pages: 0,
            query: query.to_string(),
            search_time_ms: 0,
            source,
            error: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn total_pages_for(total_hits: usize, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        total_hits.div_ceil(page_size)
    }

    pub fn format_summary(&self) -> String {
        format!(
            "{} result(s) for \"{}\" from {} | page {}/{} | {} ms",
            self.total_hits,
            self.query,
            self.source,
            self.current_page,
            self.total_pages,
            self.search_time_ms
        )
    }
}
