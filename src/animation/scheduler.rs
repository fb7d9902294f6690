//! Per-frame animation scheduler
//!
//! Owns the set of in-flight [`AnimationRecord`]s and the FIFO of moves
//! waiting to start. Each frame tick:
//!
//! 1. starts pending moves whose pegs are not the target of a disk still in
//!    flight (popping the disk off the visual peg)
//! 2. advances every active record by one step
//! 3. retires landed records by pushing their disk onto the destination peg

use super::record::{AnimationRecord, Point};
use crate::errors::{HanoiError, HanoiResult};
use crate::model::{Move, Peg, VisualPegs};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use tracing::{debug, error};

/// Identifier handed out to each started record
pub type RecordId = u64;

pub const DEFAULT_SPEED: i32 = 25;

#[derive(Debug)]
pub struct Scheduler {
    speed: i32,
    pending: VecDeque<Move>,
    active: FxHashMap<RecordId, AnimationRecord>,
    next_id: RecordId,
    landed: usize,
}

impl Scheduler {
    pub fn new(speed: i32) -> Self {
        Scheduler {
            speed: speed.max(1),
            pending: VecDeque::new(),
            active: FxHashMap::default(),
            next_id: 0,
            landed: 0,
        }
    }

    /// Step size given to records started from now on
    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: i32) {
        self.speed = speed.max(1);
    }

    /// Queue a move; it starts on a later tick once its pegs are settled
    pub fn enqueue(&mut self, mv: Move) {
        self.pending.push_back(mv);
    }

    /// Create a record for `mv` from the current visual state, popping the disk
    pub fn start(&mut self, mv: Move, visual: &mut VisualPegs) -> HanoiResult<RecordId> {
        let start_x = visual.anchor(mv.from).x;
        let lift_y = visual.anchor(mv.from).top_y - visual.layout().rise_height;

        let disk = visual
            .pop(mv.from)
            .ok_or(HanoiError::EmptyPeg { peg: mv.from })?;

        // The popped disk's old slot is the new "next free" slot
        let start = Point::new(start_x, visual.next_slot_y(mv.from));
        let end = Point::new(visual.anchor(mv.to).x, visual.next_slot_y(mv.to));

        let record = AnimationRecord::new(disk, mv.from, mv.to, start, end, lift_y, self.speed);
        Ok(self.insert(record))
    }

    /// Add an already-built record to the active set
    pub fn insert(&mut self, record: AnimationRecord) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;
        debug!(id, disk = record.disk, from = %record.from, to = %record.to, "animation started");
        self.active.insert(id, record);
        id
    }

    /// Run one frame. Returns how many records landed during it.
    pub fn advance(&mut self, visual: &mut VisualPegs) -> usize {
        self.start_pending(visual);

        let mut landed: Vec<RecordId> = self
            .active
            .iter_mut()
            .filter_map(|(id, record)| record.step().then_some(*id))
            .collect();
        landed.sort_unstable();

        for id in &landed {
            if let Some(record) = self.active.remove(id) {
                visual.push(record.to, record.disk);
                debug!(id, disk = record.disk, to = %record.to, "animation landed");
            }
        }

        self.landed += landed.len();
        landed.len()
    }

    fn start_pending(&mut self, visual: &mut VisualPegs) {
        while let Some(&mv) = self.pending.front() {
            if self.is_inbound(mv.from) || self.is_inbound(mv.to) {
                break;
            }
            self.pending.pop_front();

            if let Err(err) = self.start(mv, visual) {
                error!(%err, %mv, "dropping move that cannot start");
                debug_assert!(!err.is_invariant_violation(), "{err}");
            }
        }
    }

    /// Whether some active record is still travelling to `peg`
    fn is_inbound(&self, peg: Peg) -> bool {
        self.active.values().any(|record| record.to == peg)
    }

    /// Active records in start order
    pub fn records(&self) -> Vec<&AnimationRecord> {
        let mut records: Vec<(&RecordId, &AnimationRecord)> = self.active.iter().collect();
        records.sort_unstable_by_key(|(id, _)| **id);
        records.into_iter().map(|(_, record)| record).collect()
    }

    pub fn get(&self, id: RecordId) -> Option<&AnimationRecord> {
        self.active.get(&id)
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Records retired since the last [`Scheduler::clear`]
    pub fn landed_total(&self) -> usize {
        self.landed
    }

    /// Nothing in flight and nothing waiting
    pub fn is_idle(&self) -> bool {
        self.active.is_empty() && self.pending.is_empty()
    }

    /// Forget moves that have not started yet; in-flight records keep going
    pub fn discard_pending(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Drop everything, used together with a visual reset
    pub fn clear(&mut self) {
        self.pending.clear();
        self.active.clear();
        self.landed = 0;
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Phase;

    fn run_until_idle(scheduler: &mut Scheduler, visual: &mut VisualPegs) -> usize {
        let mut ticks = 0;
        while !scheduler.is_idle() {
            scheduler.advance(visual);
            ticks += 1;
            assert!(ticks < 10_000, "scheduler never went idle");
        }
        ticks
    }

    #[test]
    fn test_single_record_lands_exactly() {
        let mut visual = VisualPegs::new(0, Peg::Left);
        let mut scheduler = Scheduler::new(10);
        let record = AnimationRecord::new(
            4,
            Peg::Left,
            Peg::Middle,
            Point::new(200, 100),
            Point::new(500, 180),
            100 - 30,
            10,
        );
        let id = scheduler.insert(record);

        let mut last = None;
        while scheduler.active_len() > 0 {
            last = scheduler.get(id).map(|rec| rec.current);
            scheduler.advance(&mut visual);
        }

        assert_eq!(last, Some(Point::new(500, 180)));
        assert_eq!(visual.disks(Peg::Middle), &[4]);
        assert_eq!(scheduler.landed_total(), 1);
    }

    #[test]
    fn test_start_pops_disk_and_targets_slots() {
        let mut visual = VisualPegs::new(3, Peg::Left);
        let mut scheduler = Scheduler::new(10);
        let id = scheduler
            .start(Move::new(Peg::Left, Peg::Right), &mut visual)
            .unwrap();

        let record = scheduler.get(id).unwrap();
        assert_eq!(record.disk, 1);
        assert_eq!(visual.disks(Peg::Left), &[3, 2]);
        // Disk 1 sat at level 2 of peg 1; it lands on level 0 of peg 3
        assert_eq!(record.start, Point::new(200, 330 - 3 * 20));
        assert_eq!(record.end, Point::new(800, 330 - 20));
        assert_eq!(record.lift_y, 100);
        assert_eq!(record.phase(), Phase::Rising);
    }

    #[test]
    fn test_start_from_empty_peg() {
        let mut visual = VisualPegs::new(1, Peg::Left);
        let mut scheduler = Scheduler::new(10);
        let err = scheduler
            .start(Move::new(Peg::Middle, Peg::Right), &mut visual)
            .unwrap_err();
        assert!(err.is_invariant_violation());
        assert_eq!(scheduler.active_len(), 0);
    }

    #[test]
    fn test_moves_wait_for_inbound_disks() {
        let mut visual = VisualPegs::new(2, Peg::Left);
        let mut scheduler = Scheduler::new(10);

        // (1,2) then (1,3) then (2,3): the third must wait for disk 1 to land on peg 2
        scheduler.enqueue(Move::new(Peg::Left, Peg::Middle));
        scheduler.enqueue(Move::new(Peg::Left, Peg::Right));
        scheduler.enqueue(Move::new(Peg::Middle, Peg::Right));

        scheduler.advance(&mut visual);
        assert_eq!(scheduler.active_len(), 2);
        assert_eq!(scheduler.pending_len(), 1);

        run_until_idle(&mut scheduler, &mut visual);
        assert_eq!(visual.disks(Peg::Right), &[2, 1]);
        assert!(visual.disks(Peg::Left).is_empty());
        assert!(visual.disks(Peg::Middle).is_empty());
    }

    #[test]
    fn test_discard_pending_keeps_in_flight() {
        let mut visual = VisualPegs::new(2, Peg::Left);
        let mut scheduler = Scheduler::new(10);
        scheduler.enqueue(Move::new(Peg::Left, Peg::Middle));
        scheduler.enqueue(Move::new(Peg::Left, Peg::Right));
        scheduler.enqueue(Move::new(Peg::Middle, Peg::Right));
        scheduler.advance(&mut visual);

        assert_eq!(scheduler.discard_pending(), 1);
        run_until_idle(&mut scheduler, &mut visual);

        assert_eq!(visual.disks(Peg::Middle), &[1]);
        assert_eq!(visual.disks(Peg::Right), &[2]);
    }

    #[test]
    fn test_records_in_start_order() {
        let mut visual = VisualPegs::new(3, Peg::Left);
        let mut scheduler = Scheduler::new(1);
        scheduler
            .start(Move::new(Peg::Left, Peg::Right), &mut visual)
            .unwrap();
        scheduler
            .start(Move::new(Peg::Left, Peg::Middle), &mut visual)
            .unwrap();

        let disks: Vec<u32> = scheduler.records().iter().map(|rec| rec.disk).collect();
        assert_eq!(disks, vec![1, 2]);
    }
}
