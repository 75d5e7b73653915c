//! ztv - a terminal viewer for Zendesk tickets.
//!
//! Tickets are shown in a virtualized table: only the rows on screen are
//! formatted, and tickets are pulled from the account as scrolling needs them.

mod api;
mod app;
mod cache;
mod cli;
mod config;
mod error;
mod events;
mod logging;
mod source;
mod tasks;
mod ui;

use std::io::{self, BufRead, Stdout};
use std::path::Path;

use anyhow::{anyhow, bail};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use crate::api::auth;
use crate::api::types::Ticket;
use crate::api::ZendeskClient;
use crate::app::App;
use crate::cli::{Cli, Commands};
use crate::config::{Config, Settings};
use crate::error::AppError;
use crate::events::EventHandler;
use crate::source::{DemoSource, RecordSource};
use crate::tasks::TaskSpawner;

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = run(cli);
    if let Err(e) = &result {
        error!(error = %e, "Exiting with error");
        if let Some(dir) = logging::log_directory() {
            eprintln!("Logs are in {}", dir.display());
        }
    }
    logging::shutdown();
    result
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref()).map_err(report)?;
    if let Some(speed) = cli.page_speed {
        config.settings.page_speed = speed;
        config.settings.validate().map_err(report)?;
    }

    match cli.command {
        Some(Commands::SetToken { profile }) => return set_token(&config, &profile),
        Some(Commands::DeleteToken { profile }) => {
            auth::delete_token(&profile).map_err(report)?;
            println!("Removed the API token for profile '{}'.", profile);
            return Ok(());
        }
        Some(Commands::Profiles) => {
            print_profiles(&config);
            return Ok(());
        }
        None => {}
    }

    match cli.demo {
        Some(total) => {
            info!(?total, "Starting in demo mode");
            run_viewer(DemoSource::new(total), &config.settings)
        }
        None => run_live(&config, cli.profile.as_deref()),
    }
}

/// Turn an application error into a message for the shell.
fn report(error: impl Into<AppError>) -> anyhow::Error {
    let error = error.into();
    match error.suggested_action() {
        Some(action) => anyhow!("{}\n{}", error.user_message(), action),
        None => anyhow!("{}", error.user_message()),
    }
}

fn load_config(path: Option<&Path>) -> config::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Read a token from stdin and store it for `profile_name`.
fn set_token(config: &Config, profile_name: &str) -> anyhow::Result<()> {
    config.resolve_profile(Some(profile_name)).map_err(report)?;

    eprintln!("Paste the API token for '{}' and press Enter:", profile_name);
    let mut token = String::new();
    io::stdin().lock().read_line(&mut token)?;
    let token = token.trim();
    if token.is_empty() {
        bail!("No token given; nothing stored.");
    }

    auth::store_token(profile_name, token).map_err(report)?;
    println!("Stored the API token for profile '{}'.", profile_name);
    Ok(())
}

fn print_profiles(config: &Config) {
    if config.profiles.is_empty() {
        println!("No profiles configured.");
        return;
    }

    let default = config.get_default_profile().map(|p| p.name.as_str());
    for profile in &config.profiles {
        let marker = if Some(profile.name.as_str()) == default { "*" } else { " " };
        println!(
            "{} {:<16} {:<40} {}",
            marker,
            profile.name,
            profile.base_url(),
            profile.email
        );
    }
}

/// Connect to Zendesk and browse the account's tickets.
fn run_live(config: &Config, profile_name: Option<&str>) -> anyhow::Result<()> {
    let profile = config.resolve_profile(profile_name).map_err(report)?;
    info!(profile = %profile.name, "Connecting to Zendesk");

    let runtime = tokio::runtime::Runtime::new()?;
    let client = runtime
        .block_on(ZendeskClient::new(profile))
        .map_err(report)?;

    let spawner = TaskSpawner::new(runtime.handle().clone());
    let feed = spawner.spawn_ticket_feed(
        &client,
        config.settings.page_size,
        config.settings.prefetch_pages,
    );

    run_viewer(feed, &config.settings)
}

/// Run the terminal UI over `source` until the user quits.
fn run_viewer<S>(source: S, settings: &Settings) -> anyhow::Result<()>
where
    S: RecordSource<Record = Ticket>,
    S::Error: Into<AppError>,
{
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, source, settings);
    restore_terminal(&mut terminal)?;
    result
}

fn event_loop<S>(terminal: &mut Tui, source: S, settings: &Settings) -> anyhow::Result<()>
where
    S: RecordSource<Record = Ticket>,
    S::Error: Into<AppError>,
{
    let events = EventHandler::with_tick_rate(settings.tick_rate_ms);
    let mut app = App::new(source, settings, terminal.size()?.height);

    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;
        app.update(events.next()?);
    }

    Ok(())
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Leave the alternate screen before a panic message is printed.
fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        hook(info);
    }));
}
