pub mod add_form;
pub mod app;
pub mod state;


pub use state::{AppSignal, AppState, DraftInput, Mode, State};

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use r3bl_tui::{InputEvent, Key, KeyPress, ModifierKeysMask, TerminalWindow};

use crate::cli::FormConfig;
use add_form::OnAdd;

/// Runs the full-screen capture UI and returns the entries the user
/// submitted, in order.
pub async fn run_tui(config: FormConfig) -> Result<Vec<String>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_event_loop(config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;
    stdout.flush()?;

    result
}

async fn run_event_loop(config: FormConfig) -> Result<Vec<String>> {
    // The on_add callback feeds this sink; it outlives the event loop so
    // the captured entries survive the TUI shutting down.
    let captured: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&captured);
    let on_add: OnAdd = Box::new(move |value: &str| {
        if let Ok(mut entries) = sink.lock() {
            entries.push(value.to_string());
        }
    });

    let state = State {
        button_label: config.label,
        ..Default::default()
    };
    let app = app::AppMain::new_boxed(Some(on_add), config.once);
    let exit_keys = vec![InputEvent::Keyboard(KeyPress::WithModifiers {
        key: Key::Character('q'),
        mask: ModifierKeysMask::new().with_ctrl(),
    })];

    let _ = TerminalWindow::main_event_loop(app, &exit_keys, state)
        .map_err(|e| anyhow::anyhow!("TUI error: {e}"))?
        .await
        .map_err(|e| anyhow::anyhow!("TUI error: {e}"))?;

    let entries = captured
        .lock()
        .map_err(|_| anyhow::anyhow!("capture sink poisoned"))?
        .clone();
    Ok(entries)
}
