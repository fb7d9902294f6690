//! Solve and playback session
//!
//! [`Session`] is the single owner of everything that changes while the
//! puzzle is solved and animated:
//!
//! - the [`MoveLedger`] and the logical [`PegState`] written by the solver
//! - the [`VisualPegs`] and the animation [`Scheduler`] driven by [`Session::tick`]
//! - the replay state, caption and notification log
//!
//! Logical and visual pegs are deliberately separate: the solver runs to
//! completion up front, while the visual pegs lag behind by whatever is in
//! flight.
//!
//! Only one replay may run at a time. While it runs, requests that would
//! touch the pegs (solve, reset, visualize, disk-count edits) fail with
//! [`HanoiError::ConcurrentOperationRejected`], which callers are expected to
//! ignore.

pub mod log;

use crate::animation::{AnimationRecord, Scheduler};
use crate::config::{parse_disk_count, Config};
use crate::errors::{HanoiError, HanoiResult};
use crate::model::{MoveLedger, PegState, VisualPegs};
use crate::replay::{ReplayEvent, ReplayHandle};
use crate::solver::Solver;
use std::time::Duration;
use tracing::{debug, info, warn};

pub use log::{LogKind, LogLine, MoveLog};

/// Whether a replay driver is currently attached
#[derive(Debug, Default)]
pub enum ReplayState {
    #[default]
    Idle,
    Running(ReplayHandle),
}

/// Outcome of a solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveReport {
    pub moves: usize,
    /// `moves × delay`
    pub estimated: Duration,
}

pub struct Session {
    config: Config,
    logical: PegState,
    visual: VisualPegs,
    ledger: MoveLedger,
    scheduler: Scheduler,
    replay: ReplayState,
    /// Progress caption, e.g. `"#4. 1 -> 3"`
    caption: String,
    /// Replay display counter
    shown: usize,
    log: MoveLog,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Session {
            logical: PegState::new(config.disks, config.start),
            visual: VisualPegs::new(config.disks, config.start),
            ledger: MoveLedger::new(),
            scheduler: Scheduler::new(config.speed),
            replay: ReplayState::Idle,
            caption: String::new(),
            shown: 0,
            log: MoveLog::default(),
            config,
        }
    }

    fn ensure_idle(&self, operation: &'static str) -> HanoiResult<()> {
        if self.is_replaying() {
            debug!(operation, "rejected while replaying");
            return Err(HanoiError::rejected(operation));
        }
        Ok(())
    }

    /// Put both peg models back to the canonical start
    pub fn reset(&mut self) -> HanoiResult<()> {
        self.ensure_idle("reset")?;
        self.reset_state();
        Ok(())
    }

    fn reset_state(&mut self) {
        self.caption.clear();
        self.shown = 0;
        self.scheduler.clear();
        self.visual.reset(self.config.disks, self.config.start);
        self.logical.reset(self.config.disks, self.config.start);
    }

    /// Apply a typed disk count; bad input leaves the current count in place
    pub fn set_disk_count(&mut self, input: &str) -> HanoiResult<u32> {
        self.ensure_idle("disk count change")?;

        let disks = parse_disk_count(input).map_err(|err| {
            warn!(%err, keeping = self.config.disks, "disk count reverted");
            err
        })?;

        self.config.disks = disks;
        self.ledger.clear();
        self.reset_state();
        info!(disks, "disk count changed");
        Ok(disks)
    }

    /// Step size for records started from now on
    pub fn set_speed(&mut self, speed: i32) {
        self.config.speed = speed.max(1);
        self.scheduler.set_speed(self.config.speed);
    }

    /// Delay used by the next replay
    pub fn set_delay(&mut self, delay: Duration) {
        self.config.delay = delay;
    }

    /// Rebuild the ledger from scratch
    pub fn solve(&mut self) -> HanoiResult<SolveReport> {
        self.ensure_idle("solve")?;

        let Config {
            disks,
            start,
            target,
            ..
        } = self.config;

        self.logical.reset(disks, start);
        self.ledger.clear();
        Solver::new(&mut self.logical, &mut self.ledger).run(disks, start, target);

        for mv in &self.ledger {
            self.log.push(LogKind::Move, mv.to_string());
        }

        let report = SolveReport {
            moves: self.ledger.counter(),
            estimated: self.config.estimated_replay_time(self.ledger.counter()),
        };
        self.log
            .push(LogKind::Summary, format!("Total Moves: {}", report.moves));
        self.log.push(
            LogKind::Summary,
            format!("Visualization Time: ~{}ms", report.estimated.as_millis()),
        );
        info!(
            disks,
            moves = report.moves,
            estimated_ms = report.estimated.as_millis() as u64,
            "solved"
        );
        Ok(report)
    }

    /// Reset, solve if needed, and start replaying.
    ///
    /// Must be called from inside a tokio runtime; the driver runs as a task.
    pub fn visualize(&mut self) -> HanoiResult<()> {
        self.ensure_idle("visualize")?;

        self.reset_state();
        if self.ledger.is_empty() {
            self.solve()?;
        }

        let handle = ReplayHandle::start(self.ledger.moves().to_vec(), self.config.delay);
        self.replay = ReplayState::Running(handle);
        Ok(())
    }

    /// Stop a running replay. Disks already in flight still land.
    ///
    /// Returns `false` if nothing was running.
    pub fn cancel(&mut self) -> bool {
        match std::mem::take(&mut self.replay) {
            ReplayState::Idle => false,
            ReplayState::Running(handle) => {
                handle.abort();
                let dropped = self.scheduler.discard_pending();
                self.caption = String::from("Cancelled");
                info!(shown = self.shown, dropped, "replay cancelled");
                true
            }
        }
    }

    /// One frame: take in replayed moves, then advance every animation.
    ///
    /// Returns the number of disks that landed.
    pub fn tick(&mut self) -> usize {
        let mut finished = false;

        if let ReplayState::Running(handle) = &mut self.replay {
            // Checked before draining so no event sent before completion is missed
            let task_done = handle.is_finished();

            while let Some(event) = handle.try_next() {
                match event {
                    ReplayEvent::Step {
                        number,
                        mv,
                        caption,
                    } => {
                        self.shown = number;
                        self.caption = caption;
                        self.scheduler.enqueue(mv);
                    }
                    ReplayEvent::Finished { caption } => {
                        self.caption = caption;
                        finished = true;
                    }
                }
            }
            finished |= task_done;
        }

        if finished {
            self.replay = ReplayState::Idle;
        }

        self.scheduler.advance(&mut self.visual)
    }

    pub fn is_replaying(&self) -> bool {
        matches!(self.replay, ReplayState::Running(_))
    }

    /// No replay running and no disk moving or waiting to move
    pub fn is_settled(&self) -> bool {
        !self.is_replaying() && self.scheduler.is_idle()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ledger(&self) -> &MoveLedger {
        &self.ledger
    }

    pub fn logical(&self) -> &PegState {
        &self.logical
    }

    pub fn visual(&self) -> &VisualPegs {
        &self.visual
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Disks in flight, in start order
    pub fn records(&self) -> Vec<&AnimationRecord> {
        self.scheduler.records()
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// How many moves the current replay has handed out
    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn log(&self) -> &MoveLog {
        &self.log
    }
}
