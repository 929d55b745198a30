//! Event handling for the TUI.

use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the application.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse button or movement
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize,
    /// A tick occurred (drives the pulse and entrance animations)
    Tick,
}

/// Handles events from the terminal and the tick timer.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler ticking every `tick_rate`.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut interval = tokio::time::interval(tick_rate);

            loop {
                let crossterm_event = reader.next().fuse();
                let tick = interval.tick();

                tokio::select! {
                    maybe_event = crossterm_event => {
                        let event = match maybe_event {
                            Some(Ok(crossterm::event::Event::Key(key)))
                                if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
                            Some(Ok(crossterm::event::Event::Mouse(mouse))) => {
                                Some(Event::Mouse(mouse))
                            }
                            Some(Ok(crossterm::event::Event::Resize(_, _))) => Some(Event::Resize),
                            Some(_) => None,
                            None => break,
                        };
                        if let Some(event) = event {
                            if event_tx.send(event).is_err() {
                                break;
                            }
                        }
                    }
                    _ = tick => {
                        if event_tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
