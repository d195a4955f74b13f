//! Input Actor: Dedicated thread for polling terminal events.
//!
//! The actor polls crossterm with a timeout so it can notice shutdown, and
//! forwards translated events to the engine over a bounded channel.

use super::messages::InputEvent;
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::warn;

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// `scroll_lines` is the number of rows moved per wheel notch or arrow
    /// key press.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(
        sender: Sender<InputEvent>,
        poll_timeout: Duration,
        scroll_lines: i32,
    ) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("xedit-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, poll_timeout, scroll_lines);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main input polling loop.
    fn run_loop(
        sender: &Sender<InputEvent>,
        shutdown: &AtomicBool,
        poll_timeout: Duration,
        scroll_lines: i32,
    ) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                let _ = sender.try_send(InputEvent::Shutdown);
                break;
            }

            let event = match event::poll(poll_timeout) {
                Ok(true) => event::read().map(|event| convert_event(event, scroll_lines)),
                Ok(false) => continue,
                Err(err) => Err(err),
            };

            let message = match event {
                Ok(Some(message)) => message,
                Ok(None) => continue,
                Err(err) => {
                    warn!(target: "session", error = %err, "input_error");
                    InputEvent::Error(err.to_string())
                }
            };
            if sender.send(message).is_err() {
                // Receiver dropped, exit
                break;
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Translate a crossterm event. Events the editor has no use for map to `None`.
pub fn convert_event(event: Event, scroll_lines: i32) -> Option<InputEvent> {
    match event {
        Event::Key(key) => {
            // Only process key press events (not release or repeat)
            if key.kind != KeyEventKind::Press {
                return None;
            }
            let control = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Esc => Some(InputEvent::Quit),
                KeyCode::Char('c') if control => Some(InputEvent::Quit),
                KeyCode::Char(_) if control => None,
                KeyCode::Char(c) => u8::try_from(c).ok().map(InputEvent::Char),
                KeyCode::Enter => Some(InputEvent::Enter),
                KeyCode::Tab => Some(InputEvent::Tab),
                KeyCode::Backspace => Some(InputEvent::Backspace),
                KeyCode::Up => Some(scroll(0, scroll_lines)),
                KeyCode::Down => Some(scroll(0, -scroll_lines)),
                KeyCode::Left => Some(scroll(scroll_lines, 0)),
                KeyCode::Right => Some(scroll(-scroll_lines, 0)),
                _ => None,
            }
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(scroll(0, scroll_lines)),
            MouseEventKind::ScrollDown => Some(scroll(0, -scroll_lines)),
            MouseEventKind::ScrollLeft => Some(scroll(scroll_lines, 0)),
            MouseEventKind::ScrollRight => Some(scroll(-scroll_lines, 0)),
            _ => None,
        },
        Event::Resize(columns, rows) => Some(InputEvent::Resize { columns, rows }),
        _ => None,
    }
}

#[inline]
const fn scroll(dx: i32, dy: i32) -> InputEvent {
    InputEvent::Scroll { dx, dy }
}
