use clap::{Parser, Subcommand};

use crate::panel::SUMMARY_FAILED_MESSAGE;

/// Terminal front end for a semantic search backend.
#[derive(Parser, Debug)]
#[command(name = "semsearch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base address (overrides SEARCH_BACKEND_URL)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Request timeout in seconds (overrides SEARCH_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one search and print the results
    Search {
        /// Search query
        query: String,

        /// Only return results from this domain
        #[arg(long)]
        domain: Option<String>,

        /// Extra term appended to the query
        #[arg(long)]
        focus: Option<String>,

        /// Number of results (1-10)
        #[arg(short = 'n', long, default_value = "10")]
        num_results: u32,

        /// Summarize the result at this position after searching
        #[arg(long)]
        summarize: Option<usize>,
    },
    /// Summarize a single URL
    Summarize {
        url: String,
    },
    /// Check backend liveness and search provider status
    Status,
    /// Interactive search session (default)
    Interactive,
}

impl Cli {
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "semantic_search_panel=warn",
            1 => "semantic_search_panel=info",
            _ => "semantic_search_panel=debug",
        }
    }
}

/// Outcome of the `summarize` subcommand: the summary, or the message shown
/// to the user when it could not be produced.
pub fn summary_output(result: crate::error::Result<String>) -> Result<String, &'static str> {
    result.map_err(|err| {
        tracing::warn!("Summarize error: {}", err);
        SUMMARY_FAILED_MESSAGE
    })
}

/// One line typed into the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Search(String),
    Domain(String),
    Focus(String),
    NumResults(String),
    Summarize(usize),
    Show,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub const SESSION_HELP: &str = "\
Type a query to search. Commands:
  :domain <d>   filter by domain (empty clears)
  :focus <f>    append a focus term (empty clears)
  :n <count>    number of results, 1-10
  :sum <i>      summarize result i
  :show         redraw the panel
  :help         this text
  :quit         exit";

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return SessionCommand::Empty;
        }
        let Some(command) = line.strip_prefix(':') else {
            return SessionCommand::Search(line.to_string());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name {
            "domain" | "d" => SessionCommand::Domain(arg.to_string()),
            "focus" | "f" => SessionCommand::Focus(arg.to_string()),
            "n" | "num" => SessionCommand::NumResults(arg.to_string()),
            "sum" | "summarize" => match arg.parse::<usize>() {
                Ok(position) => SessionCommand::Summarize(position),
                Err(_) => SessionCommand::Unknown(line.to_string()),
            },
            "show" => SessionCommand::Show,
            "help" | "h" | "?" => SessionCommand::Help,
            "quit" | "q" | "exit" => SessionCommand::Quit,
            _ => SessionCommand::Unknown(line.to_string()),
        }
    }
}
