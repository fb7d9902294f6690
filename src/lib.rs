//! # Introduction
//!
//! hanoi-tty solves the Tower of Hanoi for any number of disks and replays the
//! solution as a terminal animation built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Playback pipeline
//!
//! ```text
//! Config → Solver → Ledger → Replay driver → Scheduler → Visual pegs → TUI
//! ```
//!
//! 1. [`solver`] — recursive optimal solver filling a [`model::MoveLedger`]
//!    and updating the logical [`model::PegState`] as it goes.
//! 2. [`replay`] — a tokio task handing out one move per delay interval.
//! 3. [`animation`] — per-frame scheduler moving each disk through its
//!    rise / translate / descend path and landing it on the
//!    [`model::VisualPegs`].
//! 4. [`session`] — the context object that owns all of the above and
//!    enforces a single running replay.
//! 5. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use hanoi_tty::solver::solve;
//!
//! let ledger = solve(3);
//! assert_eq!(ledger.len(), 7);
//! assert_eq!(ledger.moves()[0].to_string(), "1 -> 3");
//! ```

pub mod animation;
pub mod config;
pub mod errors;
pub mod model;
pub mod replay;
pub mod session;
pub mod solver;
pub mod ui;
