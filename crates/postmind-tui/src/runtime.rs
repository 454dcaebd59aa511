use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use std::time::Duration;
use tracing::{debug, info};

use crate::input::{handle_key, handle_mouse, handle_paste};
use crate::render::render;
use crate::ui::{App, Tui};

pub(crate) async fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let mut event_stream = EventStream::new();

    // Drives animations and notification expiry
    let mut tick_interval = tokio::time::interval(Duration::from_millis(50));

    info!("Event loop started");
    while app.running {
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => handle_terminal_event(app, event),
                    Some(Err(e)) => debug!("Terminal event error: {}", e),
                    None => app.quit(),
                }
            }

            _ = tick_interval.tick() => {
                app.tick();
            }

            signal = app.next_chat_signal() => {
                app.handle_chat_signal(signal);
            }
        }
    }
    info!("Event loop stopped");
    Ok(())
}

fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                if app.pending_quit {
                    // Second Ctrl+C
                    app.quit();
                } else {
                    app.pending_quit = true;
                }
                return;
            }
            app.pending_quit = false;
            handle_key(app, key);
        }
        Event::Paste(text) => {
            app.pending_quit = false;
            handle_paste(app, &text);
        }
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        _ => {}
    }
}
