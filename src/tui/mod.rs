use anyhow::Result;
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io;

mod app;
mod theme;
mod ui;

pub use app::App;
pub use theme::Theme;

/// Runs the tree view until the user quits. The terminal is restored even if the view fails or
/// panics.
pub fn run(mut app: App, theme: &Theme) -> Result<()> {
    install_panic_hook();
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    run_app(&mut terminal, &mut app, theme, event::read)
}

/// Leaves raw mode and the alternate screen when dropped, including while unwinding.
struct TerminalGuard {
    restore: fn() -> io::Result<()>,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self::new(restore_terminal);
        io::stdout().execute(EnterAlternateScreen)?;
        Ok(guard)
    }

    fn new(restore: fn() -> io::Result<()>) -> Self {
        Self { restore }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = (self.restore)() {
            log::warn!("Failed to restore terminal: {}", err);
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?.execute(Show)?;
    Ok(())
}

/// The panic message has to go to the normal screen, so restore before printing it.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    theme: &Theme,
    mut next_event: impl FnMut() -> io::Result<Event>,
) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| ui::render(frame, app, theme))?;
        if let Event::Key(key) = next_event()? {
            if key.kind == KeyEventKind::Press {
                app.on_key(key)?;
            }
        }
    }
    log::debug!("Tree view closed");
    Ok(())
}
