//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`board`]: pegs, landed disks and disks in flight, drawn on a canvas
//! - [`moves`]: the solver's move log with scrolling
//! - [`status`]: status bar with keybindings, settings and playback state
//!
//! Each pane module exports a stateless `render_*` function; scroll offsets
//! live in [`App`](crate::ui::App) and are passed in by reference.

pub mod board;
pub mod moves;
pub mod status;

pub use board::render_board_pane;
pub use moves::render_moves_pane;
pub use status::{render_status_bar, StatusRenderData};
