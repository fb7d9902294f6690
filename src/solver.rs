//! Recursive optimal solver
//!
//! Moving `k` disks from `source` to `dest`:
//!
//! 1. move `k - 1` disks from `source` to the spare peg
//! 2. move the largest disk from `source` to `dest`
//! 3. move `k - 1` disks from the spare peg back onto `dest`
//!
//! This yields the unique optimal sequence of `2^N - 1` moves. Every move is
//! applied to the logical [`PegState`] as soon as it is recorded, so the
//! ledger and the logical stacks never disagree.

use crate::model::{Move, MoveLedger, Peg, PegState};
use tracing::{debug, error};

/// Destination used when none is configured
pub const DEFAULT_TARGET: Peg = Peg::Right;

/// Walks the recursion, writing into a ledger and a logical peg state
pub struct Solver<'a> {
    pegs: &'a mut PegState,
    ledger: &'a mut MoveLedger,
}

impl<'a> Solver<'a> {
    pub fn new(pegs: &'a mut PegState, ledger: &'a mut MoveLedger) -> Self {
        Solver { pegs, ledger }
    }

    /// Move a tower of `disks` from `source` to `dest`
    pub fn run(&mut self, disks: u32, source: Peg, dest: Peg) {
        if disks == 0 || source == dest {
            return;
        }
        if disks == 1 {
            self.emit(Move::new(source, dest));
            return;
        }

        let spare = source.spare(dest);
        self.run(disks - 1, source, spare);
        self.emit(Move::new(source, dest));
        self.run(disks - 1, spare, dest);
    }

    fn emit(&mut self, mv: Move) {
        self.ledger.record(mv);
        debug!(number = self.ledger.counter(), %mv, "move");

        let applied = self.pegs.apply(mv);
        if let Err(err) = &applied {
            error!(%err, %mv, "solver emitted an illegal move");
        }
        debug_assert!(applied.is_ok(), "solver emitted an illegal move {mv}");
    }
}

/// Solve `disk_count` disks from peg 1 to peg 3
pub fn solve(disk_count: u32) -> MoveLedger {
    solve_between(disk_count, Peg::Left, DEFAULT_TARGET)
}

/// Solve `disk_count` disks between any two pegs
pub fn solve_between(disk_count: u32, start: Peg, target: Peg) -> MoveLedger {
    let mut pegs = PegState::new(disk_count, start);
    let mut ledger = MoveLedger::new();
    Solver::new(&mut pegs, &mut ledger).run(disk_count, start, target);
    ledger
}

/// Number of moves an optimal solution takes (`2^N - 1`), saturating
pub fn optimal_move_count(disk_count: u32) -> u64 {
    if disk_count >= 64 {
        u64::MAX
    } else {
        (1u64 << disk_count) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(ledger: &MoveLedger) -> Vec<(u8, u8)> {
        ledger
            .iter()
            .map(|mv| (mv.from.number(), mv.to.number()))
            .collect()
    }

    #[test]
    fn test_three_disks() {
        let ledger = solve(3);
        assert_eq!(
            pairs(&ledger),
            vec![(1, 3), (1, 2), (3, 2), (1, 3), (2, 1), (2, 3), (1, 3)]
        );
        assert_eq!(ledger.counter(), 7);
    }

    #[test]
    fn test_single_disk() {
        assert_eq!(pairs(&solve(1)), vec![(1, 3)]);
    }

    #[test]
    fn test_zero_disks() {
        let ledger = solve(0);
        assert!(ledger.is_empty());
        assert_eq!(ledger.counter(), 0);
    }

    #[test]
    fn test_move_counts() {
        for n in 1..=12 {
            assert_eq!(solve(n).len() as u64, optimal_move_count(n), "n = {}", n);
        }
    }

    #[test]
    fn test_solver_updates_logical_pegs() {
        let mut pegs = PegState::new(5, Peg::Left);
        let mut ledger = MoveLedger::new();
        Solver::new(&mut pegs, &mut ledger).run(5, Peg::Left, Peg::Middle);

        assert_eq!(pegs.peg(Peg::Middle), &[5, 4, 3, 2, 1]);
        assert!(pegs.peg(Peg::Left).is_empty());
        assert!(pegs.peg(Peg::Right).is_empty());
        assert_eq!(ledger.len(), 31);
    }
}
