use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event;
use env_logger::Env;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use termfolio::app::App;
use termfolio::config::Config;
use termfolio::contact::HttpFormSender;
use termfolio::state::AppState;
use termfolio::surface::Surface;
use termfolio::terminal::{self, TerminalGuard};
use termfolio::theme::ThemeStore;
use termfolio::widget::Layout;

/// Logs go to a file; stdout and stderr belong to the UI while it runs.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Frame-paced loop: input is handled as it arrives, frames are delivered
/// and painted once per interval.
fn run(app: &mut App, term: &mut TerminalGuard, interval: Duration) -> Result<()> {
    let mut next_frame = Instant::now();
    while !app.state.quit {
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            if let Some(input) = terminal::translate(event::read()?) {
                app.handle_input(input);
            }
            continue;
        }

        let now = Instant::now();
        next_frame += interval;
        if next_frame < now {
            // fell behind; don't try to catch up
            next_frame = now + interval;
        }

        app.tick();
        if app.needs_paint() {
            let layout = app.layout();
            let theme = app.state.theme;
            let mut surface =
                Surface::new(layout.cols, layout.rows, theme.foreground(), theme.background());
            app.paint(&mut surface);
            term.draw(&surface)?;
        }
    }
    Ok(())
}

pub fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_file)?;
    log::info!("{} {} starting", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let themes = ThemeStore::load(config.theme_path());
    let sender = HttpFormSender::new(config.form_endpoint.clone(), config.form_timeout())
        .context("failed to build the contact form client")?;

    let (cols, rows) = terminal::initial_size();
    let layout = Layout::new(cols, rows, config.cell_width, config.cell_height);
    let state = AppState::new(themes.theme(), config.section, config.debug);
    let mut app = App::new(state, layout, themes, Arc::new(sender))?;

    let mut term = TerminalGuard::enter().context("failed to set up the terminal")?;
    let result = run(&mut app, &mut term, config.frame_interval());
    app.shutdown();
    drop(term);

    if let Err(err) = &result {
        log::error!("Exiting after error: {:#}", err);
    } else {
        log::info!("Bye");
    }
    result
}
