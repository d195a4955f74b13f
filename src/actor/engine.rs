//! Engine: Runs an interactive session on the terminal.
//!
//! The engine owns the terminal (raw mode, alternate screen, mouse capture),
//! the [`Session`] and a [`TerminalPresenter`]. Input arrives from the
//! [`InputActor`] thread; each event is applied completely, then the session
//! is rendered and the frame presented, before the next event is read.

use super::messages::{apply, pixels_for_cells, Control, InputEvent};
use super::InputActor;
use crate::config::InputConfig;
use crate::error::Result;
use crate::present::Presenter;
use crate::session::Session;
use crate::terminal::TerminalPresenter;
use crossbeam_channel::{bounded, Receiver};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration for the Engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Rows per wheel notch or arrow key.
    pub scroll_lines: i32,
    /// Whether to enable mouse capture (needed for the wheel).
    pub enable_mouse: bool,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from(&InputConfig::default())
    }
}

impl From<&InputConfig> for EngineConfig {
    fn from(input: &InputConfig) -> Self {
        Self {
            input_poll_timeout: Duration::from_millis(input.poll_timeout_ms),
            scroll_lines: input.scroll_lines,
            enable_mouse: true,
            alternate_screen: true,
        }
    }
}

/// Interactive terminal host for one session.
pub struct Engine {
    /// Configuration.
    config: EngineConfig,
    /// Input event receiver.
    input_rx: Receiver<InputEvent>,
    /// Input actor handle.
    input_actor: Option<InputActor>,
    session: Session,
    presenter: TerminalPresenter<Stdout>,
    /// Frames presented so far.
    frame_count: u64,
}

impl Engine {
    /// Take over the terminal and size `session` to it.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn new(mut session: Session, config: EngineConfig) -> Result<Self> {
        let (columns, rows) = terminal::size()?;

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let spawned = enter_terminal(&mut stdout, &config).and_then(|()| {
            InputActor::spawn(input_tx, config.input_poll_timeout, config.scroll_lines)
        });
        let input_actor = match spawned {
            Ok(actor) => actor,
            Err(err) => {
                leave_terminal(&mut stdout, &config);
                return Err(err.into());
            }
        };

        let (width, height) = pixels_for_cells(columns, rows);
        session.on_resize(width, height);
        info!(target: "session", columns, rows, "engine_started");

        Ok(Self {
            config,
            input_rx,
            input_actor: Some(input_actor),
            session,
            presenter: TerminalPresenter::new(stdout),
            frame_count: 0,
        })
    }

    /// The session being edited.
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Get the current frame count.
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Render and present if anything changed.
    fn refresh(&mut self) -> Result<()> {
        let frame = self.session.render();
        if frame.is_empty() {
            return Ok(());
        }
        self.presenter.present(&frame)?;
        self.frame_count += 1;
        Ok(())
    }

    /// Run until the user quits or the input thread goes away.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn run(&mut self) -> Result<()> {
        self.refresh()?;

        while let Ok(event) = self.input_rx.recv() {
            if let InputEvent::Error(message) = &event {
                warn!(target: "session", %message, "input_thread_error");
            }
            match apply(&mut self.session, &event) {
                Control::Quit => break,
                Control::Resized => self.presenter.reset()?,
                Control::Continue => {}
            }
            self.refresh()?;
        }

        debug!(
            target: "session",
            frames = self.frame_count,
            bytes = self.presenter.bytes_written(),
            "engine_stopped"
        );
        Ok(())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Some(actor) = self.input_actor.take() {
            actor.shutdown();
            // A full channel would leave the input thread blocked in send
            while self.input_rx.try_recv().is_ok() {}
            actor.join();
        }

        leave_terminal(self.presenter.get_mut(), &self.config);
    }
}

/// Switch `out` to the engine's screen modes. Raw mode is handled separately.
fn enter_terminal<W: Write>(out: &mut W, config: &EngineConfig) -> io::Result<()> {
    if config.alternate_screen {
        execute!(out, EnterAlternateScreen)?;
    }
    if config.enable_mouse {
        execute!(out, EnableMouseCapture)?;
    }
    execute!(out, cursor::Hide)
}

/// Undo [`enter_terminal`] and raw mode. Best effort: every step is attempted.
fn leave_terminal<W: Write>(out: &mut W, config: &EngineConfig) {
    let _ = execute!(out, cursor::Show);
    if config.enable_mouse {
        let _ = execute!(out, DisableMouseCapture);
    }
    if config.alternate_screen {
        let _ = execute!(out, LeaveAlternateScreen);
    }
    let _ = terminal::disable_raw_mode();
}
