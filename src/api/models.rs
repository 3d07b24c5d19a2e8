use std::collections::HashSet;

use serde::Deserialize;

use crate::form::SearchForm;

/// Parameters of one `/search` call, already resolved from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub q: String,
    pub domain: Option<String>,
    pub num_results: u8,
}

impl From<&SearchForm> for SearchRequest {
    fn from(form: &SearchForm) -> Self {
        SearchRequest {
            q: form.effective_query(),
            domain: form.domain_filter().map(str::to_string),
            num_results: form.results_wanted(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResult {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<SearchResult>>,
}

impl SearchResponse {
    /// Result list with repeated URLs dropped, first occurrence kept.
    pub fn into_results(self) -> Vec<SearchResult> {
        let mut seen = HashSet::new();
        self.results
            .unwrap_or_default()
            .into_iter()
            .filter(|result| seen.insert(result.url.clone()))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderStatus {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub results_count: Option<u64>,
}

impl ProviderStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "success"
    }
}
