//! Visual peg state
//!
//! A second set of stacks used only for drawing. It lags behind the logical
//! state while disks are in flight: a disk popped here lives inside exactly
//! one [`AnimationRecord`] until it lands.
//!
//! Coordinates are top-down scene units (y grows downward).
//!
//! [`AnimationRecord`]: crate::animation::AnimationRecord

use super::Peg;

/// Horizontal peg positions
pub const PEG_XS: [i32; 3] = [200, 500, 800];
pub const SCENE_WIDTH: i32 = 1000;
pub const DISK_HEIGHT: i32 = 20;
pub const MIN_PEG_HEIGHT: i32 = 200;
pub const MIN_SCENE_HEIGHT: i32 = 500;
pub const RISE_HEIGHT: i32 = 30;

/// Where a peg sits on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PegAnchor {
    pub x: i32,
    pub top_y: i32,
    pub height: i32,
}

impl PegAnchor {
    /// y of the disk resting at `level` (0 = bottom)
    pub fn slot_y(&self, level: usize, disk_height: i32) -> i32 {
        self.top_y + self.height - (level as i32 + 1) * disk_height
    }

    pub fn base_y(&self) -> i32 {
        self.top_y + self.height
    }
}

/// Scene geometry for a given disk count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneLayout {
    pub width: i32,
    pub height: i32,
    pub peg_top: i32,
    pub peg_height: i32,
    pub disk_height: i32,
    pub rise_height: i32,
}

impl SceneLayout {
    /// Pegs grow to fit tall towers; the default scene holds 9 disks
    pub fn for_disks(disk_count: u32) -> Self {
        let peg_height = MIN_PEG_HEIGHT.max((disk_count as i32 + 1) * DISK_HEIGHT);
        let height = MIN_SCENE_HEIGHT.max(peg_height + 300);
        SceneLayout {
            width: SCENE_WIDTH,
            height,
            peg_top: height / 2 - peg_height / 2 - 20,
            peg_height,
            disk_height: DISK_HEIGHT,
            rise_height: RISE_HEIGHT,
        }
    }

    pub fn anchor(&self, peg: Peg) -> PegAnchor {
        PegAnchor {
            x: PEG_XS[peg.index()],
            top_y: self.peg_top,
            height: self.peg_height,
        }
    }
}

/// One rendered peg
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualPeg {
    pub anchor: PegAnchor,
    /// Landed disks, bottom to top
    pub disks: Vec<u32>,
}

/// The three rendered pegs plus the scene they live in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualPegs {
    pegs: [VisualPeg; 3],
    layout: SceneLayout,
}

impl VisualPegs {
    pub fn new(disk_count: u32, start: Peg) -> Self {
        let layout = SceneLayout::for_disks(disk_count);
        let pegs = Peg::ALL.map(|peg| VisualPeg {
            anchor: layout.anchor(peg),
            disks: if peg == start {
                (1..=disk_count).rev().collect()
            } else {
                Vec::new()
            },
        });
        VisualPegs { pegs, layout }
    }

    pub fn reset(&mut self, disk_count: u32, start: Peg) {
        *self = VisualPegs::new(disk_count, start);
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn peg(&self, peg: Peg) -> &VisualPeg {
        &self.pegs[peg.index()]
    }

    pub fn anchor(&self, peg: Peg) -> PegAnchor {
        self.pegs[peg.index()].anchor
    }

    pub fn disks(&self, peg: Peg) -> &[u32] {
        &self.pegs[peg.index()].disks
    }

    /// Lift the top disk off a peg; it now belongs to an animation record
    pub fn pop(&mut self, peg: Peg) -> Option<u32> {
        self.pegs[peg.index()].disks.pop()
    }

    /// Land a disk on a peg
    pub fn push(&mut self, peg: Peg, disk: u32) {
        self.pegs[peg.index()].disks.push(disk);
    }

    /// y of the next free slot on `peg`
    pub fn next_slot_y(&self, peg: Peg) -> i32 {
        let visual = &self.pegs[peg.index()];
        visual
            .anchor
            .slot_y(visual.disks.len(), self.layout.disk_height)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Peg, &VisualPeg)> {
        Peg::ALL.into_iter().zip(self.pegs.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_matches_canvas() {
        let layout = SceneLayout::for_disks(3);
        assert_eq!(layout.height, 500);
        assert_eq!(layout.peg_top, 130);
        assert_eq!(layout.peg_height, 200);
    }

    #[test]
    fn test_tall_tower_grows_pegs() {
        let layout = SceneLayout::for_disks(15);
        assert_eq!(layout.peg_height, 320);
        assert!(layout.peg_top > layout.rise_height);
    }

    #[test]
    fn test_slot_positions() {
        let pegs = VisualPegs::new(3, Peg::Left);
        // Bottom of the pegs is 130 + 200 = 330
        assert_eq!(pegs.next_slot_y(Peg::Left), 330 - 4 * DISK_HEIGHT);
        assert_eq!(pegs.next_slot_y(Peg::Right), 330 - DISK_HEIGHT);
    }

    #[test]
    fn test_pop_push() {
        let mut pegs = VisualPegs::new(2, Peg::Left);
        let disk = pegs.pop(Peg::Left).unwrap();
        assert_eq!(disk, 1);
        pegs.push(Peg::Middle, disk);
        assert_eq!(pegs.disks(Peg::Left), &[2]);
        assert_eq!(pegs.disks(Peg::Middle), &[1]);
        assert_eq!(pegs.pop(Peg::Right), None);
    }
}
