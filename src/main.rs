use std::io::Write;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use semantic_search_panel::{
    cli::{summary_output, Cli, Commands, SessionCommand, SESSION_HELP},
    view::render,
    BackendClient, Config, FlowOutcome, SearchForm, SearchPanel,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(cli.log_directive().parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration, then apply command-line overrides
    let mut config = Config::load()?;
    if let Some(backend) = &cli.backend {
        config = config.with_backend_url(backend)?;
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout)?;
    }
    tracing::info!("Using backend at {}", config.backend_url);

    let client = BackendClient::new(&config)?;

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Search { query, domain, focus, num_results, summarize } => {
            let form = SearchForm::new(query)
                .domain(domain.unwrap_or_default())
                .focus_term(focus.unwrap_or_default())
                .num_results(num_results);

            let panel = SearchPanel::new(client);
            let outcome = panel.submit_search(form).await;
            print!("{}", render(&panel.snapshot()));

            if let FlowOutcome::Failed(_) = outcome {
                std::process::exit(1);
            }

            if let Some(position) = summarize {
                if let FlowOutcome::Skipped = panel.summarize_result(position).await {
                    eprintln!("No result at position {}", position);
                }
                println!();
                print!("{}", render(&panel.snapshot()));
            }
        }
        Commands::Summarize { url } => match summary_output(client.summarize(&url).await) {
            Ok(summary) => println!("{}", summary),
            Err(message) => {
                eprintln!("Error: {}", message);
                std::process::exit(1);
            }
        },
        Commands::Status => {
            match client.health().await {
                Ok(()) => println!("Backend: up ({})", client.base_url()),
                Err(err) => {
                    println!("Backend: {} ({})", err, client.base_url());
                    std::process::exit(1);
                }
            }
            match client.provider_status().await {
                Ok(status) => {
                    println!("Search provider: {} - {}", status.status, status.message);
                    if !status.is_ok() {
                        std::process::exit(1);
                    }
                }
                Err(err) => println!("Search provider: unknown ({})", err),
            }
        }
        Commands::Interactive => run_session(SearchPanel::new(client)).await?,
    }

    Ok(())
}

async fn run_session(panel: SearchPanel) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", SESSION_HELP);

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match SessionCommand::parse(&line) {
            SessionCommand::Search(query) => {
                panel.set_query(&query);
                let form = panel.snapshot().form;
                panel.submit_search(form).await;
            }
            SessionCommand::Domain(domain) => panel.set_domain(&domain),
            SessionCommand::Focus(focus) => panel.set_focus_term(&focus),
            SessionCommand::NumResults(raw) => panel.set_num_results_input(&raw),
            SessionCommand::Summarize(position) => {
                if let FlowOutcome::Skipped = panel.summarize_result(position).await {
                    println!("No result at position {}", position);
                    continue;
                }
            }
            SessionCommand::Show => {}
            SessionCommand::Help => {
                println!("{}", SESSION_HELP);
                continue;
            }
            SessionCommand::Quit => break,
            SessionCommand::Empty => continue,
            SessionCommand::Unknown(input) => {
                println!("Unknown command: {} (try :help)", input);
                continue;
            }
        }

        println!();
        print!("{}", render(&panel.snapshot()));
    }

    Ok(())
}
