//! A single disk in flight

use crate::model::Peg;

/// A point in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Where a record is along its lift / translate / descend path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Rising,
    Translating,
    Descending,
    Landed,
}

/// Motion state of one disk travelling between pegs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationRecord {
    pub disk: u32,
    pub from: Peg,
    pub to: Peg,
    pub start: Point,
    pub end: Point,
    pub current: Point,
    /// Height the disk clears before moving sideways
    pub lift_y: i32,
    /// Distance covered per tick
    pub speed: i32,
    phase: Phase,
}

impl AnimationRecord {
    pub fn new(
        disk: u32,
        from: Peg,
        to: Peg,
        start: Point,
        end: Point,
        lift_y: i32,
        speed: i32,
    ) -> Self {
        AnimationRecord {
            disk,
            from,
            to,
            start,
            end,
            current: start,
            lift_y,
            speed: speed.max(1),
            phase: Phase::Rising,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Landed
    }

    /// Advance by one frame.
    ///
    /// Each call moves the disk by at most one step; boundaries are clamped
    /// so any positive speed ends exactly on `end`. Returns `true` on the
    /// tick the record lands (the tick after it reached `end`).
    pub fn step(&mut self) -> bool {
        loop {
            match self.phase {
                Phase::Rising => {
                    if self.current.y > self.lift_y {
                        self.current.y = (self.current.y - self.speed).max(self.lift_y);
                        return false;
                    }
                    self.phase = Phase::Translating;
                }
                Phase::Translating => {
                    if self.current.x != self.end.x {
                        self.current.x = if self.end.x > self.current.x {
                            (self.current.x + self.speed).min(self.end.x)
                        } else {
                            (self.current.x - self.speed).max(self.end.x)
                        };
                        return false;
                    }
                    self.phase = Phase::Descending;
                }
                Phase::Descending => {
                    if self.current.y < self.end.y {
                        self.current.y = (self.current.y + self.speed).min(self.end.y);
                        return false;
                    }
                    self.phase = Phase::Landed;
                    return true;
                }
                Phase::Landed => return false,
            }
        }
    }
}
