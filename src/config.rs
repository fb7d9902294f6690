//! Playback configuration
//!
//! Values come from command-line flags or `HANOI_*` environment variables.
//! Disk-count edits made at runtime go through [`parse_disk_count`], which
//! rejects bad input so the caller can keep the previous value.

use crate::animation::DEFAULT_SPEED;
use crate::errors::{HanoiError, HanoiResult};
use crate::model::Peg;
use crate::replay::DEFAULT_DELAY;
use clap::Args;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_DISKS: u32 = 3;
/// 2^20 - 1 moves is about a day of replay at the default delay
pub const MAX_DISKS: u32 = 20;
pub const DEFAULT_FPS: u32 = 60;

/// Flags shared by every subcommand
#[derive(Debug, Clone, Args)]
pub struct PlaybackArgs {
    /// Number of disks
    #[arg(short, long, global = true, env = "HANOI_DISKS", default_value_t = DEFAULT_DISKS)]
    pub disks: u32,

    /// Distance a disk travels per frame, in scene units
    #[arg(short, long, global = true, env = "HANOI_SPEED", default_value_t = DEFAULT_SPEED)]
    pub speed: i32,

    /// Pause between moves, in milliseconds
    #[arg(long = "delay", global = true, env = "HANOI_DELAY_MS", default_value_t = DEFAULT_DELAY.as_millis() as u64)]
    pub delay_ms: u64,

    /// Destination peg (2 or 3)
    #[arg(short, long, global = true, default_value_t = 3)]
    pub to: u8,

    /// Frames per second of the animation clock
    #[arg(long, global = true, default_value_t = DEFAULT_FPS)]
    pub fps: u32,
}

/// Validated playback settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub disks: u32,
    pub speed: i32,
    pub delay: Duration,
    pub start: Peg,
    pub target: Peg,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            disks: DEFAULT_DISKS,
            speed: DEFAULT_SPEED,
            delay: DEFAULT_DELAY,
            start: Peg::Left,
            target: Peg::Right,
            fps: DEFAULT_FPS,
        }
    }
}

impl Config {
    /// Build from flags, falling back to defaults for values that don't validate
    pub fn from_args(args: &PlaybackArgs) -> Self {
        let defaults = Config::default();

        let disks = match check_disk_count(args.disks) {
            Ok(disks) => disks,
            Err(err) => {
                warn!(%err, fallback = defaults.disks, "ignoring disk count");
                defaults.disks
            }
        };

        let target = match Peg::from_number(args.to) {
            Some(peg) if peg != defaults.start => peg,
            _ => {
                warn!(to = args.to, "destination must be peg 2 or 3, using 3");
                defaults.target
            }
        };

        Config {
            disks,
            speed: args.speed.max(1),
            delay: Duration::from_millis(args.delay_ms),
            start: defaults.start,
            target,
            fps: args.fps.clamp(1, 240),
        }
    }

    /// Time between frame ticks
    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps.max(1)))
    }

    /// Rough wall time of a full replay (`moves × delay`)
    pub fn estimated_replay_time(&self, moves: usize) -> Duration {
        self.delay.saturating_mul(moves.min(u32::MAX as usize) as u32)
    }
}

fn check_disk_count(disks: u32) -> HanoiResult<u32> {
    if (1..=MAX_DISKS).contains(&disks) {
        Ok(disks)
    } else {
        Err(HanoiError::invalid_config(
            disks.to_string(),
            format!("disk count must be between 1 and {}", MAX_DISKS),
        ))
    }
}

/// Parse a disk count typed by the user
pub fn parse_disk_count(input: &str) -> HanoiResult<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(HanoiError::invalid_config(input, "empty input"));
    }
    let disks: u32 = trimmed
        .parse()
        .map_err(|_| HanoiError::invalid_config(input, "not a whole number"))?;
    check_disk_count(disks)
}
