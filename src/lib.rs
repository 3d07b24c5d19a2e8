pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod panel;
pub mod view;

pub use api::client::BackendClient;
pub use api::models::SearchResult;
pub use config::Config;
pub use error::{AppError, Result};
pub use form::SearchForm;
pub use panel::{FlowOutcome, SearchPanel, SearchState};
