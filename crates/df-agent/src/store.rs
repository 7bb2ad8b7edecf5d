//! Core agent storage.

use df_core::{AgentId, GridCoord, GridGeometry, OrderId, SimRng};

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let pos = store.positions[agent.index()];
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Current cell.  Unique per agent once collision resolution completes.
    pub positions: Vec<GridCoord>,

    /// Order currently carried, if any.  At most one per agent.
    pub carrying: Vec<Option<OrderId>>,
}

impl AgentStore {
    /// Allocate `count` agents, all at the origin and carrying nothing.
    ///
    /// Positions are meaningless until [`scatter`](Self::scatter) runs.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            positions: vec![GridCoord::default(); count],
            carrying:  vec![None; count],
        }
    }

    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    #[inline]
    pub fn position(&self, agent: AgentId) -> GridCoord {
        self.positions[agent.index()]
    }

    #[inline]
    pub fn carried(&self, agent: AgentId) -> Option<OrderId> {
        self.carrying[agent.index()]
    }

    /// Clear every agent's cargo and place agents on distinct random cells.
    ///
    /// Positions are drawn uniformly per agent in ascending id order and
    /// redrawn on collision with an earlier agent.  The caller guarantees
    /// `count <= grid.cell_count()`; otherwise this never returns.
    pub fn scatter(&mut self, grid: GridGeometry, rng: &mut SimRng) {
        debug_assert!(self.count <= grid.cell_count(), "more agents than cells");
        let mut taken = vec![false; grid.cell_count()];
        for i in 0..self.count {
            let pos = loop {
                let candidate = grid.random_cell(rng);
                let cell = grid.cell_index(candidate);
                if !taken[cell] {
                    taken[cell] = true;
                    break candidate;
                }
            };
            self.positions[i] = pos;
            self.carrying[i] = None;
        }
    }
}
