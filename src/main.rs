//! Command-line entry point.
//!
//! Thin wrapper that wires configuration, logging, the HTTP Data API and the
//! [`ListRuntime`] together. All list behavior lives in the library.
//!
//! # Commands
//!
//! - `list <RESOURCE>`: print one page of a listing with filters applied
//! - `show <RESOURCE> <ID>`: print a single record as JSON
//! - `delete <RESOURCE> <ID>`: delete a record after confirmation

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;
use std::sync::Arc;
use wud_console::api::{DataApi, HttpDataApi};
use wud_console::app::{Event, FilterChange, Loader, Notification, NotificationLevel};
use wud_console::{initialize, AutoConfirm, Config, ConfirmationPrompt, ConsoleError, ListRuntime, ResourceKind};

#[derive(Parser)]
#[command(
    name = "wud-console",
    version,
    about = "Browse and manage the Wud' furniture shop listings"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data API base URL (overrides config and WUD_API_URL).
    #[arg(long = "api-url", value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Disable colored output.
    #[arg(long = "no-color", global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print one page of a listing.
    List(ListArgs),

    /// Print a single record as JSON.
    Show {
        /// products, categories, orders, users, custom-requests, blog-posts, catalog
        resource: ResourceKind,
        id: String,
    },

    /// Delete a record.
    Delete {
        resource: ResourceKind,
        id: String,

        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Parser)]
struct ListArgs {
    /// products, categories, orders, users, custom-requests, blog-posts, catalog
    resource: ResourceKind,

    #[arg(long, default_value_t = 1)]
    page: u32,

    /// 10, 20 or 50.
    #[arg(long = "page-size")]
    page_size: Option<u32>,

    /// Sort field, e.g. createdAt, price, name.
    #[arg(long)]
    sort: Option<String>,

    /// asc or desc.
    #[arg(long)]
    order: Option<String>,

    #[arg(long)]
    search: Option<String>,

    /// Discrete filter as KEY=VALUE, e.g. status=paid. Repeatable.
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Output width in columns.
    #[arg(long, default_value_t = 100)]
    width: usize,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

/// Asks on stderr and reads the answer from stdin.
struct StdinPrompt;

impl ConfirmationPrompt for StdinPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{message} [y/N] ");
        let _ = stderr.flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, ConsoleError> {
    let mut config = Config::load()?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    wud_console::observability::init_tracing(&config);

    let api: Arc<dyn DataApi> = Arc::new(HttpDataApi::new(config.api_url.clone(), config.auth_token.clone())?);
    let color = !cli.no_color && io::stdout().is_terminal();

    match cli.command {
        Command::List(args) => list(&config, api, args, color).await,
        Command::Show { resource, id } => {
            let record = Loader::new(resource, api).fetch_one(&id).await?;
            let json = serde_json::to_string_pretty(&record.fields).map_err(io::Error::other)?;
            println!("{json}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Delete { resource, id, yes } => {
            let prompt: Box<dyn ConfirmationPrompt> = if yes {
                Box::new(AutoConfirm(true))
            } else {
                Box::new(StdinPrompt)
            };
            let (console, _) = initialize(&config, resource);
            let mut runtime = ListRuntime::new(console, api, prompt);

            runtime.dispatch(Event::Open)?;
            runtime.settle().await?;
            runtime.dispatch(Event::RequestDelete { id })?;
            runtime.settle().await?;

            Ok(report(&runtime, runtime.state().notification.as_ref()))
        }
    }
}

async fn list(config: &Config, api: Arc<dyn DataApi>, args: ListArgs, color: bool) -> Result<ExitCode, ConsoleError> {
    let (mut console, theme) = initialize(config, args.resource);

    let state = console.active_mut();
    state.apply_filters(FilterChange {
        page: None,
        page_size: args.page_size,
        sort_by: args.sort,
        sort_order: args.order,
        search: args.search.clone(),
        filters: args.filters,
    });
    if let Some(search) = &args.search {
        state.sync_search(search);
    }
    if args.page > 1 {
        state.apply_filters(FilterChange::page(args.page));
    }

    let mut runtime = ListRuntime::new(console, api, Box::new(AutoConfirm(false)));
    runtime.dispatch(Event::Open)?;
    runtime.settle().await?;

    print!("{}", runtime.render(&theme, color, args.width));
    Ok(report(&runtime, None))
}

fn report(runtime: &ListRuntime, notification: Option<&Notification>) -> ExitCode {
    if let Some(notification) = notification {
        match notification.level {
            NotificationLevel::Info => println!("{}", notification.message),
            NotificationLevel::Error => eprintln!("error: {}", notification.message),
        }
    }

    if runtime.session_invalidated() {
        eprintln!("error: the session was rejected; set WUD_API_TOKEN and retry");
        return ExitCode::from(2);
    }
    match notification {
        Some(n) if n.level == NotificationLevel::Error => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}
