//! Logical peg state
//!
//! The authoritative stacks the solver mutates. Each stack is stored
//! bottom-to-top, so the top disk is the last element.

use super::{Move, Peg};
use crate::errors::{HanoiError, HanoiResult};

/// Logical contents of the three pegs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PegState {
    pegs: [Vec<u32>; 3],
    disk_count: u32,
}

impl PegState {
    /// Canonical start: all disks on `start`, largest at the bottom
    pub fn new(disk_count: u32, start: Peg) -> Self {
        let mut state = PegState {
            pegs: [Vec::new(), Vec::new(), Vec::new()],
            disk_count: 0,
        };
        state.reset(disk_count, start);
        state
    }

    pub fn reset(&mut self, disk_count: u32, start: Peg) {
        for peg in &mut self.pegs {
            peg.clear();
        }
        self.pegs[start.index()].extend((1..=disk_count).rev());
        self.disk_count = disk_count;
    }

    /// Move the top disk of `mv.from` onto `mv.to`, returning the disk size.
    ///
    /// The state is left untouched when the move is illegal.
    pub fn apply(&mut self, mv: Move) -> HanoiResult<u32> {
        let disk = *self.pegs[mv.from.index()]
            .last()
            .ok_or(HanoiError::EmptyPeg { peg: mv.from })?;

        if let Some(&below) = self.pegs[mv.to.index()].last() {
            if below <= disk && mv.from != mv.to {
                return Err(HanoiError::OrderViolation {
                    disk,
                    below,
                    peg: mv.to,
                });
            }
        }

        self.pegs[mv.from.index()].pop();
        self.pegs[mv.to.index()].push(disk);
        Ok(disk)
    }

    /// Disks on `peg`, bottom to top
    pub fn peg(&self, peg: Peg) -> &[u32] {
        &self.pegs[peg.index()]
    }

    pub fn top(&self, peg: Peg) -> Option<u32> {
        self.pegs[peg.index()].last().copied()
    }

    pub fn disk_count(&self) -> u32 {
        self.disk_count
    }

    /// Every disk 1..=N appears exactly once and each peg strictly decreases upward
    pub fn is_well_formed(&self) -> bool {
        let ordered = self
            .pegs
            .iter()
            .all(|peg| peg.windows(2).all(|pair| pair[0] > pair[1]));

        let mut seen: Vec<u32> = self.pegs.iter().flatten().copied().collect();
        seen.sort_unstable();
        let complete = seen.iter().copied().eq(1..=self.disk_count);

        ordered && complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_start() {
        let state = PegState::new(4, Peg::Left);
        assert_eq!(state.peg(Peg::Left), &[4, 3, 2, 1]);
        assert!(state.peg(Peg::Middle).is_empty());
        assert!(state.peg(Peg::Right).is_empty());
        assert!(state.is_well_formed());
    }

    #[test]
    fn test_apply_moves_top_disk() {
        let mut state = PegState::new(2, Peg::Left);
        let disk = state.apply(Move::new(Peg::Left, Peg::Middle)).unwrap();
        assert_eq!(disk, 1);
        assert_eq!(state.peg(Peg::Left), &[2]);
        assert_eq!(state.peg(Peg::Middle), &[1]);
    }

    #[test]
    fn test_apply_from_empty_peg() {
        let mut state = PegState::new(2, Peg::Left);
        let err = state.apply(Move::new(Peg::Right, Peg::Left)).unwrap_err();
        assert_eq!(err, HanoiError::EmptyPeg { peg: Peg::Right });
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_apply_larger_on_smaller() {
        let mut state = PegState::new(2, Peg::Left);
        state.apply(Move::new(Peg::Left, Peg::Right)).unwrap();
        let err = state.apply(Move::new(Peg::Left, Peg::Right)).unwrap_err();
        assert!(matches!(
            err,
            HanoiError::OrderViolation {
                disk: 2,
                below: 1,
                peg: Peg::Right
            }
        ));
        // Rejected moves leave the state alone
        assert_eq!(state.peg(Peg::Left), &[2]);
        assert_eq!(state.peg(Peg::Right), &[1]);
    }

    #[test]
    fn test_zero_disks() {
        let state = PegState::new(0, Peg::Left);
        assert!(state.peg(Peg::Left).is_empty());
        assert!(state.is_well_formed());
    }
}
