//! The search panel: UI state plus the search and summarize flows.
//!
//! Every flow takes a generation number when it starts. A flow may only
//! write its result back if no newer flow has started since, so when two
//! requests overlap the most recently issued one wins regardless of which
//! response arrives first.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::api::client::BackendClient;
use crate::api::models::{SearchRequest, SearchResult};
use crate::error::AppError;
use crate::form::SearchForm;

pub const NO_RESULTS_MESSAGE: &str = "No results found. Try a different search.";
pub const SUMMARY_FAILED_MESSAGE: &str = "Failed to generate summary.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub form: SearchForm,
    pub results: Vec<SearchResult>,
    pub loading: bool,
    pub summary_text: String,
    pub error_message: String,
}

/// How a flow ended.
#[derive(Debug)]
pub enum FlowOutcome<T> {
    /// Precondition not met; nothing was sent and state is untouched.
    Skipped,
    Completed(T),
    /// The search succeeded but returned nothing.
    NoResults,
    Failed(AppError),
    /// A newer flow started before this one settled; its result was dropped.
    Superseded,
}

impl<T> FlowOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, FlowOutcome::Completed(_))
    }
}

struct Inner {
    state: SearchState,
    generation: u64,
}

#[derive(Clone)]
pub struct SearchPanel {
    client: BackendClient,
    inner: Arc<Mutex<Inner>>,
}

impl SearchPanel {
    pub fn new(client: BackendClient) -> Self {
        SearchPanel {
            client,
            inner: Arc::new(Mutex::new(Inner {
                state: SearchState::default(),
                generation: 0,
            })),
        }
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    pub fn snapshot(&self) -> SearchState {
        self.with_inner(|inner| inner.state.clone())
    }

    pub fn set_query(&self, query: &str) {
        self.with_inner(|inner| inner.state.form.query = query.to_string());
    }

    pub fn set_domain(&self, domain: &str) {
        self.with_inner(|inner| inner.state.form.domain = domain.to_string());
    }

    pub fn set_focus_term(&self, focus: &str) {
        self.with_inner(|inner| inner.state.form.focus_term = focus.to_string());
    }

    pub fn set_num_results_input(&self, raw: &str) {
        self.with_inner(|inner| inner.state.form.set_num_results_input(raw));
    }

    /// Runs the search flow: liveness check, then the search itself.
    pub async fn submit_search(&self, form: SearchForm) -> FlowOutcome<Vec<SearchResult>> {
        if !form.is_submittable() {
            debug!("Ignoring search with empty query");
            return FlowOutcome::Skipped;
        }

        let request = SearchRequest::from(&form);
        let generation = self.begin(|state| {
            state.form = form;
            state.results.clear();
            state.summary_text.clear();
            state.error_message.clear();
        });
        info!(generation, query = %request.q, "Starting search");

        if let Err(err) = self.client.health().await {
            return self.fail_search(generation, err);
        }

        if !self.is_current(generation) {
            info!(generation, "Search superseded before request was sent");
            return FlowOutcome::Superseded;
        }

        match self.client.search(&request).await {
            Ok(results) if results.is_empty() => {
                let applied = self.settle(generation, |state| {
                    state.error_message = NO_RESULTS_MESSAGE.to_string();
                });
                if applied {
                    info!(generation, "Search returned no results");
                    FlowOutcome::NoResults
                } else {
                    FlowOutcome::Superseded
                }
            }
            Ok(results) => {
                let count = results.len();
                let applied = self.settle(generation, |state| state.results = results.clone());
                if applied {
                    info!(generation, count, "Search successful");
                    FlowOutcome::Completed(results)
                } else {
                    FlowOutcome::Superseded
                }
            }
            Err(err) => self.fail_search(generation, err),
        }
    }

    /// Requests a summary for one of the currently listed results.
    pub async fn request_summary(&self, url: &str) -> FlowOutcome<String> {
        let listed = self.with_inner(|inner| inner.state.results.iter().any(|r| r.url == url));
        if url.is_empty() || !listed {
            debug!("Ignoring summary request for unlisted url: {}", url);
            return FlowOutcome::Skipped;
        }

        let generation = self.begin(|state| {
            state.summary_text.clear();
            state.error_message.clear();
        });
        info!(generation, url, "Requesting summary");

        match self.client.summarize(url).await {
            Ok(summary) => {
                if self.settle(generation, |state| state.summary_text = summary.clone()) {
                    FlowOutcome::Completed(summary)
                } else {
                    FlowOutcome::Superseded
                }
            }
            Err(err) => {
                warn!("Summarize error: {}", err);
                let applied = self.settle(generation, |state| {
                    state.error_message = SUMMARY_FAILED_MESSAGE.to_string();
                });
                if applied {
                    FlowOutcome::Failed(err)
                } else {
                    FlowOutcome::Superseded
                }
            }
        }
    }

    /// Summarizes the result at a 1-based position in the list.
    pub async fn summarize_result(&self, position: usize) -> FlowOutcome<String> {
        let url = self.with_inner(|inner| {
            position
                .checked_sub(1)
                .and_then(|i| inner.state.results.get(i))
                .map(|r| r.url.clone())
        });
        match url {
            Some(url) => self.request_summary(&url).await,
            None => FlowOutcome::Skipped,
        }
    }

    fn fail_search(&self, generation: u64, err: AppError) -> FlowOutcome<Vec<SearchResult>> {
        warn!("Search error: {}", err);
        let message = format!(
            "Search failed: {}. Make sure backend is running on {}",
            err,
            display_address(self.client.base_url())
        );
        if self.settle(generation, |state| state.error_message = message) {
            FlowOutcome::Failed(err)
        } else {
            FlowOutcome::Superseded
        }
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    fn begin(&self, reset: impl FnOnce(&mut SearchState)) -> u64 {
        self.with_inner(|inner| {
            inner.generation += 1;
            inner.state.loading = true;
            reset(&mut inner.state);
            inner.generation
        })
    }

    fn is_current(&self, generation: u64) -> bool {
        self.with_inner(|inner| inner.generation == generation)
    }

    /// Writes a flow's result and clears `loading`, unless a newer flow owns the state.
    fn settle(&self, generation: u64, apply: impl FnOnce(&mut SearchState)) -> bool {
        self.with_inner(|inner| {
            if inner.generation != generation {
                debug!(generation, latest = inner.generation, "Dropping stale result");
                return false;
            }
            apply(&mut inner.state);
            inner.state.loading = false;
            true
        })
    }
}

fn display_address(base_url: &str) -> &str {
    base_url
        .strip_prefix("http://")
        .or_else(|| base_url.strip_prefix("https://"))
        .unwrap_or(base_url)
}
