//! Text rendering of the panel state.

use std::fmt;

use crate::panel::SearchState;

const NO_TITLE: &str = "No title available";
const NO_PREVIEW: &str = "No preview text available. Click the title to view the content.";
const NOTHING_FOUND: &str = "No results found. Try a different search term.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub position: usize,
    pub title: String,
    pub preview: String,
    /// Where the title links to.
    pub link: String,
}

#[derive(Debug, Clone)]
pub struct PanelView {
    pub form_line: String,
    pub error: Option<String>,
    pub loading: bool,
    pub cards: Vec<ResultCard>,
    pub nothing_found: bool,
    pub summary: Option<String>,
}

impl PanelView {
    pub fn from_state(state: &SearchState) -> Self {
        let cards = state
            .results
            .iter()
            .enumerate()
            .map(|(i, result)| ResultCard {
                position: i + 1,
                title: non_empty(result.title.as_deref()).unwrap_or(NO_TITLE).to_string(),
                preview: non_empty(result.text.as_deref()).unwrap_or(NO_PREVIEW).to_string(),
                link: result.url.clone(),
            })
            .collect::<Vec<_>>();

        let error = non_empty(Some(state.error_message.as_str())).map(str::to_string);
        let nothing_found =
            !state.loading && cards.is_empty() && !state.form.query.is_empty() && error.is_none();

        PanelView {
            form_line: form_line(state),
            error,
            loading: state.loading,
            cards,
            nothing_found,
            summary: non_empty(Some(state.summary_text.as_str())).map(str::to_string),
        }
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Semantic Search")?;
        writeln!(f, "{}", self.form_line)?;

        if let Some(error) = &self.error {
            writeln!(f)?;
            writeln!(f, "Error: {}", error)?;
        }

        if self.loading {
            writeln!(f)?;
            writeln!(f, "Loading...")?;
        } else if !self.cards.is_empty() {
            writeln!(f)?;
            writeln!(f, "Found {} results:", self.cards.len())?;
        }

        for card in &self.cards {
            writeln!(f)?;
            writeln!(f, "[{}] {}", card.position, card.title)?;
            writeln!(f, "    {}", card.preview)?;
            writeln!(f, "    {}", card.link)?;
        }

        if self.nothing_found {
            writeln!(f)?;
            writeln!(f, "{}", NOTHING_FOUND)?;
        }

        if let Some(summary) = &self.summary {
            writeln!(f)?;
            writeln!(f, "Summary")?;
            writeln!(f, "-------")?;
            writeln!(f, "{}", summary)?;
        }

        Ok(())
    }
}

pub fn render(state: &SearchState) -> String {
    PanelView::from_state(state).to_string()
}

fn form_line(state: &SearchState) -> String {
    let form = &state.form;
    let mut line = format!("Query: {}", form.query);
    if let Some(domain) = form.domain_filter() {
        line.push_str(&format!(" | Domain: {}", domain));
    }
    if !form.focus_term.is_empty() {
        line.push_str(&format!(" | Focus: {}", form.focus_term));
    }
    line.push_str(&format!(" | Results: {}", form.results_wanted()));
    line
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
