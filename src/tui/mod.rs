//! TUI module
//!
//! Terminal viewer for the IPAM and topology trees, built with ratatui.

pub mod app;
pub mod constants;
mod theme;
pub mod views;

pub use app::*;
pub use theme::*;

use crate::config::Config;
use crate::models::NodeKey;
use crate::services::InventoryService;
use crate::tree::spawn_fetch;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use std::time::Duration;

/// Run the TUI application
pub async fn run_tui(
    service: InventoryService,
    config: Config,
    theme: Theme,
    focus: Option<NodeKey>,
) -> Result<()> {
    tracing::debug!("Initializing TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.ui.enable_mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.clone(), theme, service.source_type());
    app.set_focus(focus);

    tracing::debug!("TUI initialized, entering main loop");
    let result = run_loop(&mut terminal, &mut app, &service).await;

    tracing::debug!("TUI shutting down");
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if config.ui.enable_mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    service: &InventoryService,
) -> Result<()> {
    let fetcher = service.fetcher();

    loop {
        terminal.draw(|f| app.render(f))?;

        // Start root loads
        for request in app.trigger_roots_loads() {
            tracing::debug!("Loading {} roots", request.kind);
            let service = service.clone();
            tokio::spawn(async move {
                let result = service.load(request.kind).await;
                let _ = request.tx.send(result);
            });
        }

        // Start child fetches
        for request in app.trigger_fetches() {
            tracing::debug!(
                "Spawning fetch of {} for {} view",
                request.ticket.key(),
                request.kind
            );
            spawn_fetch(fetcher.clone(), request.ticket, request.tx);
        }

        // Apply finished work
        for (kind, result) in app.try_get_roots_results() {
            app.apply_roots_result(kind, result);
        }
        app.poll_fetch_results();
        app.drain_selection_events();

        // Handle input events (non-blocking)
        if event::poll(Duration::from_millis(constants::EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) == Some(true) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }
}
