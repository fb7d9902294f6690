//! Paced move replay
//!
//! [`ReplayDriver`] walks a solved ledger on a tokio task, one move per
//! `delay`. It never touches peg state itself: each move is sent to the
//! [`Session`] as a [`ReplayEvent`], and the session hands it to the
//! animation scheduler on the next frame tick. Peg stacks therefore only
//! change on the frame loop.
//!
//! [`Session`]: crate::session::Session

use crate::model::Move;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(80);

/// Messages from the driver task to the frame loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayEvent {
    /// Animate `mv`; `number` counts from 1
    Step {
        number: usize,
        mv: Move,
        caption: String,
    },
    /// Every move has been handed out
    Finished { caption: String },
}

/// Progress caption shown while replaying
pub fn step_caption(number: usize, mv: Move) -> String {
    format!("#{}. {}", number, mv)
}

/// Caption shown once the last move has been handed out
pub fn finished_caption(moves: usize) -> String {
    format!("#{}. Solved", moves + 1)
}

/// Sequential iterator over a ledger's moves, paced by `delay`
#[derive(Debug)]
pub struct ReplayDriver {
    moves: Vec<Move>,
    delay: Duration,
    events: UnboundedSender<ReplayEvent>,
}

impl ReplayDriver {
    pub fn new(moves: Vec<Move>, delay: Duration, events: UnboundedSender<ReplayEvent>) -> Self {
        ReplayDriver {
            moves,
            delay,
            events,
        }
    }

    /// Hand out every move, sleeping `delay` after each one.
    ///
    /// Stops early if the receiving side has gone away. Returns the number
    /// of moves sent.
    pub async fn run(self) -> usize {
        info!(moves = self.moves.len(), delay_ms = self.delay.as_millis() as u64, "replay started");

        let mut shown = 0;
        for mv in &self.moves {
            shown += 1;
            let event = ReplayEvent::Step {
                number: shown,
                mv: *mv,
                caption: step_caption(shown, *mv),
            };
            if self.events.send(event).is_err() {
                debug!(shown, "replay receiver dropped");
                return shown - 1;
            }
            tokio::time::sleep(self.delay).await;
        }

        let _ = self.events.send(ReplayEvent::Finished {
            caption: finished_caption(shown),
        });
        info!(shown, "replay finished");
        shown
    }

    /// Run the driver on the tokio runtime
    pub fn spawn(self) -> JoinHandle<usize> {
        tokio::spawn(self.run())
    }
}

/// The receiving half of a running replay, held by the session
#[derive(Debug)]
pub struct ReplayHandle {
    events: UnboundedReceiver<ReplayEvent>,
    task: JoinHandle<usize>,
}

impl ReplayHandle {
    /// Spawn a driver for `moves` and keep its receiving end
    pub fn start(moves: Vec<Move>, delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = ReplayDriver::new(moves, delay, tx).spawn();
        ReplayHandle { events: rx, task }
    }

    /// Next event that is ready, without waiting
    pub fn try_next(&mut self) -> Option<ReplayEvent> {
        self.events.try_recv().ok()
    }

    /// Stop the driver; events not yet received are discarded
    pub fn abort(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
