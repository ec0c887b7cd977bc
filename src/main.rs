//! data-table - a searchable, sortable, paginated table in the terminal
//!
//! Loads a dataset once, then redraws the filtered, sorted page after every
//! key press or click. Uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::model::DomainState;
use crate::tui::Tui;
use anyhow::Result;
use clap::Parser;
use crossterm::event::Event;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON or CSV file with the rows (defaults to the built-in sample)
    #[arg(long, short)]
    data: Option<PathBuf>,

    /// Event polling interval in milliseconds
    #[arg(long)]
    tick_rate: Option<u64>,

    /// Prefix shown before amounts
    #[arg(long)]
    currency: Option<String>,

    /// Where to write the log
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Save the resulting settings to the config file and continue
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    /// Command line values override the config file
    fn apply(&self, mut config: Config) -> Config {
        if let Some(data) = &self.data {
            config.data_path = Some(data.to_string_lossy().into_owned());
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate_ms = tick_rate;
        }
        if let Some(currency) = &self.currency {
            config.currency_symbol = currency.clone();
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = Some(log_file.to_string_lossy().into_owned());
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(Config::load().unwrap_or_default());

    logging::start_logging(&config.log_path());
    info!(?config, "starting data-table");

    if cli.save_config {
        let path = config.save()?;
        info!(path = %path.display(), "saved config");
    }

    // Load before touching the terminal so errors print normally
    let data_path = config.data_path.as_ref().map(PathBuf::from);
    let (rows, source) = services::load_rows(data_path.as_deref())?;

    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(config.tick_rate_ms));
    tui.enter()?;

    let mut app = App::new(config, DomainState::new(rows, source));
    let result = app.init().and_then(|_| run_app(&mut tui, &mut app));

    tui.exit()?;

    if let Err(err) = result {
        error!("{:?}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("exiting");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            let area = frame.area();
            if let Err(e) = app.draw(frame, area) {
                error!("draw error: {}", e);
            }
        })?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Mouse(mouse)) => app.handle_mouse_event(mouse)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            None => Some(Action::Tick),
        };

        // An action might produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            current_action = app.update(a)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "data-table",
            "--data",
            "rows.csv",
            "--tick-rate",
            "250",
            "--currency",
            "$",
        ]);
        let config = cli.apply(Config::default());

        assert_eq!(config.data_path.as_deref(), Some("rows.csv"));
        assert_eq!(config.tick_rate_ms, 250);
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_cli_without_flags_keeps_config() {
        let cli = Cli::parse_from(["data-table"]);
        let base = Config {
            data_path: Some("saved.json".to_string()),
            ..Default::default()
        };

        assert_eq!(cli.apply(base.clone()), base);
        assert!(!cli.save_config);
    }
}
