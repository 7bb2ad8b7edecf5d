//! Collision resolution between simultaneous destination requests.
//!
//! A cell requested by more than one agent is a collision, and *every*
//! agent that asked for it goes back to its pre-tick cell; nobody wins.
//! Sending agents back can make a pre-tick cell contested again (someone
//! else was moving into it), so the check repeats until no cell is claimed
//! twice, sending back each agent that was moving into a reclaimed cell.
//! Pre-tick cells are unique, so the loop ends after at most one pass per
//! agent with every final cell unique.
//!
//! Two agents trading places request distinct cells and both move.

use df_core::GridCoord;

#[cfg(feature = "fx-hash")]
type CellCounts = rustc_hash::FxHashMap<GridCoord, u32>;
#[cfg(not(feature = "fx-hash"))]
type CellCounts = std::collections::HashMap<GridCoord, u32>;

/// Final positions after resolution, indexed by `AgentId`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub positions: Vec<GridCoord>,
    /// `true` for every agent sent back to its pre-tick cell.
    pub reverted:  Vec<bool>,
}

impl Resolution {
    pub fn reverted_count(&self) -> usize {
        self.reverted.iter().filter(|&&r| r).count()
    }
}

/// Stateless arbiter; holds only a reusable scratch map.
#[derive(Default)]
pub struct CollisionResolver {
    counts: CellCounts,
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `requested` destinations against pre-tick `current` cells.
    ///
    /// Both slices are indexed by `AgentId` and must have equal length.
    pub fn resolve(&mut self, current: &[GridCoord], requested: &[GridCoord]) -> Resolution {
        debug_assert_eq!(current.len(), requested.len());
        let mut positions = requested.to_vec();
        let mut reverted = vec![false; positions.len()];

        // First pass: every requester of a contested cell reverts, including
        // agents that asked to stay where they are.
        self.count(&positions);
        for i in 0..positions.len() {
            if self.counts[&requested[i]] > 1 {
                positions[i] = current[i];
                reverted[i] = true;
            }
        }

        // Knock-on passes: a reverted agent may now sit where a mover landed.
        loop {
            self.count(&positions);
            let mut changed = false;
            for i in 0..positions.len() {
                if positions[i] != current[i] && self.counts[&positions[i]] > 1 {
                    positions[i] = current[i];
                    reverted[i] = true;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        Resolution { positions, reverted }
    }

    fn count(&mut self, cells: &[GridCoord]) {
        self.counts.clear();
        for &cell in cells {
            *self.counts.entry(cell).or_insert(0) += 1;
        }
    }
}
