mod app;
mod config;
mod error;
mod models;
mod render;
mod resolver;
mod system;
mod tree;
mod ui;
mod validate;

use std::io;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing::info;

use crate::app::App;
use crate::config::Settings;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load();
    let logging = system::init_logging(&settings.log_filter);
    let mut app = App::new(settings);
    match logging {
        Ok(path) => info!(log = %path.display(), "netcfg started"),
        Err(err) => app.set_list_status(&err.to_string()),
    }

    let terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;

    let result = run_app(terminal, app);

    execute!(io::stdout(), DisableMouseCapture)?;
    ratatui::restore();
    info!("netcfg stopped");
    result
}

fn run_app(mut terminal: DefaultTerminal, mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    let tick_rate = Duration::from_millis(100);
    loop {
        terminal.draw(|frame| ui::render_app(frame, &mut app))?;

        if app.should_quit {
            break;
        }

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }
    }
    Ok(())
}
