//! Actor Model: The interactive terminal host.
//!
//! - **Input Actor**: Polls terminal events on its own thread, forwards them
//!   over a bounded channel
//! - **Engine**: Owns the session and the terminal, applies one event at a
//!   time, then renders and presents
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐   Frame   ┌──────────┐
//! │ Input Thread │ ─────────────────▶  │    Engine    │ ────────▶ │ Terminal │
//! └──────────────┘                     │  (Session)   │           └──────────┘
//!                                      └──────────────┘
//! ```

mod engine;
mod input;
mod messages;

pub use engine::{Engine, EngineConfig};
pub use input::{convert_event, InputActor};
pub use messages::{apply, pixels_for_cells, Control, InputEvent};
