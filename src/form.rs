//! Search form input fields.

pub const MIN_RESULTS: u8 = 1;
pub const MAX_RESULTS: u8 = 10;
pub const DEFAULT_RESULTS: u8 = 10;

/// The four fields a user fills in before submitting a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub query: String,
    pub domain: String,
    pub focus_term: String,
    num_results: u8,
}

impl Default for SearchForm {
    fn default() -> Self {
        SearchForm {
            query: String::new(),
            domain: String::new(),
            focus_term: String::new(),
            num_results: DEFAULT_RESULTS,
        }
    }
}

impl SearchForm {
    pub fn new(query: impl Into<String>) -> Self {
        SearchForm {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn focus_term(mut self, focus: impl Into<String>) -> Self {
        self.focus_term = focus.into();
        self
    }

    pub fn num_results(mut self, n: u32) -> Self {
        self.set_num_results(n);
        self
    }

    pub fn results_wanted(&self) -> u8 {
        self.num_results
    }

    pub fn set_num_results(&mut self, n: u32) {
        self.num_results = n.clamp(MIN_RESULTS as u32, MAX_RESULTS as u32) as u8;
    }

    /// Accepts raw text from a number field. Anything that does not parse
    /// falls back to the default count.
    pub fn set_num_results_input(&mut self, raw: &str) {
        match raw.trim().parse::<i64>() {
            Ok(n) => self.num_results = n.clamp(MIN_RESULTS as i64, MAX_RESULTS as i64) as u8,
            Err(_) => self.num_results = DEFAULT_RESULTS,
        }
    }

    pub fn is_submittable(&self) -> bool {
        !self.query.is_empty()
    }

    /// Query text actually sent: the focus term is appended after a space.
    pub fn effective_query(&self) -> String {
        if self.focus_term.is_empty() {
            self.query.clone()
        } else {
            format!("{} {}", self.query, self.focus_term)
        }
    }

    pub fn domain_filter(&self) -> Option<&str> {
        (!self.domain.is_empty()).then_some(self.domain.as_str())
    }
}
