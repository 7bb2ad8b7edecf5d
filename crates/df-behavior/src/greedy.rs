//! Scripted greedy policies.
//!
//! Both policies read only the [`WorldSnapshot`].  An agent carrying an order
//! heads for that order's dropoff; otherwise it heads for the nearest waiting
//! pickup (Manhattan distance, ties to the lower order id).  On arrival it
//! issues `Pickup`/`Dropoff`.  No path-planning: every step closes the larger
//! of the two axis gaps, and collisions are left to the engine.

use df_core::{Action, AgentId, GridCoord, SimRng};
use df_orders::Order;

use crate::{DecisionMaker, WorldSnapshot};

/// One step from `src` toward `dst`, larger axis gap first (ties go to the
/// vertical axis).  `Stay` when already there.
pub fn move_towards(src: GridCoord, dst: GridCoord) -> Action {
    let dx = dst.x as i64 - src.x as i64;
    let dy = dst.y as i64 - src.y as i64;
    let vertical = if dy > 0 { Action::Down } else { Action::Up };
    let horizontal = if dx > 0 { Action::Right } else { Action::Left };
    match (dx, dy) {
        (0, 0) => Action::Stay,
        _ if dy.abs() >= dx.abs() => vertical,
        _ => horizontal,
    }
}

/// Nearest order to `from` by its pickup cell.  Ties go to the lower id
/// because `orders` is in ascending id order and `min_by_key` keeps the first.
fn nearest_pickup<'a, I>(from: GridCoord, orders: I) -> Option<&'a Order>
where
    I: IntoIterator<Item = &'a Order>,
{
    orders.into_iter().min_by_key(|o| o.pickup.manhattan(from))
}

/// Act on `target`: the intent when standing on it, a step toward it otherwise.
fn approach(pos: GridCoord, target: GridCoord, intent: Action, world: &WorldSnapshot) -> Action {
    if pos != target {
        move_towards(pos, target)
    } else if world.pickup_dropoff {
        intent
    } else {
        Action::Stay
    }
}

// ── GreedyPolicy ──────────────────────────────────────────────────────────────

/// Independent greedy agents.  Idle agents (nothing carried, nothing
/// waiting) wander randomly.
pub struct GreedyPolicy;

impl DecisionMaker for GreedyPolicy {
    fn decide(&mut self, agent: AgentId, world: &WorldSnapshot, rng: &mut SimRng) -> Action {
        let Some(me) = world.agent(agent) else {
            return Action::Stay;
        };
        if let Some(order) = world.carried_order(agent) {
            return approach(me.position, order.dropoff, Action::Dropoff, world);
        }
        match nearest_pickup(me.position, world.waiting_orders()) {
            Some(order) => approach(me.position, order.pickup, Action::Pickup, world),
            None => rng.choose(&Action::MOVES).copied().unwrap_or_default(),
        }
    }
}

// ── CoordinatedGreedy ─────────────────────────────────────────────────────────

/// Greedy agents split into column zones.
///
/// The grid's columns are divided into contiguous bands, one per agent (the
/// last agent takes any remainder).  Agents prefer waiting pickups inside
/// their own band and fall back to the nearest anywhere.  With nothing to
/// fetch, each agent sweeps its band row by row in a boustrophedon pattern.
pub struct CoordinatedGreedy {
    /// Inclusive column range per agent.
    zones:    Vec<(u32, u32)>,
    /// Sweep waypoints per agent.
    paths:    Vec<Vec<GridCoord>>,
    /// Current waypoint index per agent.
    path_idx: Vec<usize>,
}

impl CoordinatedGreedy {
    pub fn new(grid_size: u32, agent_count: usize) -> Self {
        let last_col = grid_size.saturating_sub(1);
        let bands = agent_count.max(1) as u32;
        let cols_per = (grid_size / bands).max(1);

        let zones: Vec<(u32, u32)> = (0..agent_count as u32)
            .map(|i| {
                let c0 = (i * cols_per).min(last_col);
                let c1 = if i + 1 == agent_count as u32 {
                    last_col
                } else {
                    (c0 + cols_per - 1).min(last_col)
                };
                (c0, c1)
            })
            .collect();

        let paths = zones
            .iter()
            .map(|&(c0, c1)| {
                let mut path = Vec::new();
                for y in 0..grid_size {
                    if y % 2 == 0 {
                        path.extend((c0..=c1).map(|x| GridCoord::new(x, y)));
                    } else {
                        path.extend((c0..=c1).rev().map(|x| GridCoord::new(x, y)));
                    }
                }
                path
            })
            .collect();

        Self { zones, paths, path_idx: vec![0; agent_count] }
    }

    /// Inclusive column band assigned to `agent`.
    pub fn zone(&self, agent: AgentId) -> Option<(u32, u32)> {
        self.zones.get(agent.index()).copied()
    }

    fn sweep(&mut self, agent: AgentId, pos: GridCoord) -> Action {
        let i = agent.index();
        let path = &self.paths[i];
        if path.is_empty() {
            return Action::Stay;
        }
        if path[self.path_idx[i]] == pos {
            self.path_idx[i] = (self.path_idx[i] + 1) % path.len();
        }
        move_towards(pos, path[self.path_idx[i]])
    }
}

impl DecisionMaker for CoordinatedGreedy {
    fn decide(&mut self, agent: AgentId, world: &WorldSnapshot, _rng: &mut SimRng) -> Action {
        let (Some(me), Some((c0, c1))) = (world.agent(agent), self.zone(agent)) else {
            return Action::Stay;
        };
        if let Some(order) = world.carried_order(agent) {
            return approach(me.position, order.dropoff, Action::Dropoff, world);
        }

        let in_zone = nearest_pickup(
            me.position,
            world.waiting_orders().filter(|o| (c0..=c1).contains(&o.pickup.x)),
        );
        let target = in_zone.or_else(|| nearest_pickup(me.position, world.waiting_orders()));
        match target {
            Some(order) => approach(me.position, order.pickup, Action::Pickup, world),
            None => self.sweep(agent, me.position),
        }
    }
}
