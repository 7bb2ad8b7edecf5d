//! Unit tests for df-behavior.

use df_agent::AgentStore;
use df_core::{Action, AgentId, GridCoord, SimRng, Tick};
use df_orders::OrderRegistry;

use crate::{DecisionMaker, WorldSnapshot};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn c(x: u32, y: u32) -> GridCoord {
    GridCoord::new(x, y)
}

/// Snapshot of a 5×5 world with agents at `positions` and the given orders.
fn world(positions: &[GridCoord], orders: &OrderRegistry) -> WorldSnapshot {
    let mut store = AgentStore::new(positions.len());
    store.positions = positions.to_vec();
    WorldSnapshot::capture(Tick(0), 5, true, &store, orders)
}

// ── WorldSnapshot ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot_tests {
    use super::*;

    #[test]
    fn capture_copies_agents_and_orders() {
        let mut orders = OrderRegistry::new();
        let o = orders.spawn_at(c(1, 1), c(3, 3)).unwrap();
        let snap = world(&[c(0, 0), c(4, 4)], &orders);
        assert_eq!(snap.agents.len(), 2);
        assert_eq!(snap.agent(AgentId(1)).unwrap().position, c(4, 4));
        assert!(snap.agent(AgentId(2)).is_none());
        assert_eq!(snap.order(o.id).unwrap().pickup, c(1, 1));
        assert_eq!(snap.waiting_orders().count(), 1);
    }

    #[test]
    fn carried_order_follows_agent_cargo() {
        let mut orders = OrderRegistry::new();
        let o = orders.spawn_at(c(0, 0), c(3, 3)).unwrap();
        orders.try_pickup(AgentId(0), c(0, 0)).unwrap();
        let mut store = AgentStore::new(1);
        store.carrying[0] = Some(o.id);
        let snap = WorldSnapshot::capture(Tick(4), 5, true, &store, &orders);
        assert_eq!(snap.carried_order(AgentId(0)).map(|o| o.id), Some(o.id));
        assert_eq!(snap.waiting_orders().count(), 0);
    }

    #[test]
    fn text_projection() {
        let mut orders = OrderRegistry::new();
        orders.spawn_at(c(2, 0), c(0, 2)).unwrap();
        let in_transit = orders.spawn_at(c(1, 1), c(2, 2)).unwrap();
        orders.try_pickup(AgentId(1), c(1, 1)).unwrap();
        let mut store = AgentStore::new(2);
        store.positions = vec![c(0, 0), c(1, 1)];
        store.carrying[1] = Some(in_transit.id);
        let snap = WorldSnapshot::capture(Tick(0), 3, true, &store, &orders);
        assert_eq!(snap.to_string(), "0 . P\n. 1 .\n. . D\n");
    }
}

// ── Simple policies ───────────────────────────────────────────────────────────

#[cfg(test)]
mod simple_policy_tests {
    use super::*;
    use crate::{RandomPolicy, StayPolicy};

    #[test]
    fn stay_policy_stays() {
        let snap = world(&[c(0, 0), c(1, 0)], &OrderRegistry::new());
        let actions = StayPolicy.decide_all(&snap, &mut SimRng::new(0));
        assert_eq!(actions.len(), 2);
        assert!(actions.values().all(|&a| a == Action::Stay));
    }

    #[test]
    fn random_policy_respects_capability_flag() {
        let store = AgentStore::new(1);
        let snap = WorldSnapshot::capture(Tick(0), 5, false, &store, &OrderRegistry::new());
        let mut rng = SimRng::new(8);
        for _ in 0..200 {
            assert!(!RandomPolicy.decide(AgentId(0), &snap, &mut rng).is_intent());
        }
    }

    #[test]
    fn random_policy_covers_intents_when_enabled() {
        let snap = world(&[c(0, 0)], &OrderRegistry::new());
        let mut rng = SimRng::new(8);
        let saw_intent = (0..500).any(|_| RandomPolicy.decide(AgentId(0), &snap, &mut rng).is_intent());
        assert!(saw_intent);
    }
}

// ── Greedy policies ───────────────────────────────────────────────────────────

#[cfg(test)]
mod greedy_tests {
    use super::*;
    use crate::greedy::move_towards;
    use crate::{CoordinatedGreedy, GreedyPolicy};

    #[test]
    fn move_towards_prefers_larger_gap() {
        assert_eq!(move_towards(c(0, 0), c(3, 1)), Action::Right);
        assert_eq!(move_towards(c(3, 0), c(0, 1)), Action::Left);
        assert_eq!(move_towards(c(0, 0), c(1, 3)), Action::Down);
        assert_eq!(move_towards(c(0, 3), c(1, 0)), Action::Up);
        assert_eq!(move_towards(c(0, 0), c(2, 2)), Action::Down);
        assert_eq!(move_towards(c(2, 2), c(2, 2)), Action::Stay);
    }

    #[test]
    fn greedy_heads_to_nearest_waiting_pickup() {
        let mut orders = OrderRegistry::new();
        orders.spawn_at(c(4, 4), c(0, 4)).unwrap();
        orders.spawn_at(c(2, 0), c(0, 4)).unwrap();
        let snap = world(&[c(0, 0)], &orders);
        assert_eq!(GreedyPolicy.decide(AgentId(0), &snap, &mut SimRng::new(0)), Action::Right);
    }

    #[test]
    fn greedy_picks_up_on_target() {
        let mut orders = OrderRegistry::new();
        orders.spawn_at(c(1, 1), c(3, 3)).unwrap();
        let snap = world(&[c(1, 1)], &orders);
        assert_eq!(GreedyPolicy.decide(AgentId(0), &snap, &mut SimRng::new(0)), Action::Pickup);
    }

    #[test]
    fn greedy_delivers_carried_order() {
        let mut orders = OrderRegistry::new();
        let o = orders.spawn_at(c(1, 1), c(1, 3)).unwrap();
        orders.try_pickup(AgentId(0), c(1, 1)).unwrap();
        let mut store = AgentStore::new(1);
        store.positions[0] = c(1, 1);
        store.carrying[0] = Some(o.id);
        let mut snap = WorldSnapshot::capture(Tick(0), 5, true, &store, &orders);
        let mut rng = SimRng::new(0);
        assert_eq!(GreedyPolicy.decide(AgentId(0), &snap, &mut rng), Action::Down);
        snap.agents[0].position = c(1, 3);
        assert_eq!(GreedyPolicy.decide(AgentId(0), &snap, &mut rng), Action::Dropoff);
    }

    #[test]
    fn greedy_idles_with_moves_only() {
        let snap = world(&[c(2, 2)], &OrderRegistry::new());
        let mut rng = SimRng::new(4);
        for _ in 0..100 {
            assert!(!GreedyPolicy.decide(AgentId(0), &snap, &mut rng).is_intent());
        }
    }

    #[test]
    fn zones_partition_columns() {
        let policy = CoordinatedGreedy::new(8, 3);
        assert_eq!(policy.zone(AgentId(0)), Some((0, 1)));
        assert_eq!(policy.zone(AgentId(1)), Some((2, 3)));
        assert_eq!(policy.zone(AgentId(2)), Some((4, 7)));
        assert_eq!(policy.zone(AgentId(3)), None);
    }

    #[test]
    fn zones_clamp_when_agents_outnumber_columns() {
        let policy = CoordinatedGreedy::new(2, 4);
        for i in 0..4 {
            let (c0, c1) = policy.zone(AgentId(i)).unwrap();
            assert!(c0 <= c1 && c1 <= 1);
        }
    }

    #[test]
    fn coordinated_prefers_in_zone_pickup() {
        let mut orders = OrderRegistry::new();
        // Closer, but in agent 1's band.
        orders.spawn_at(c(2, 0), c(0, 4)).unwrap();
        // Farther, in agent 0's band (columns 0–1 on a 5-wide grid with 2 agents).
        orders.spawn_at(c(0, 4), c(4, 4)).unwrap();
        let snap = world(&[c(1, 0), c(4, 4)], &orders);
        let mut policy = CoordinatedGreedy::new(5, 2);
        assert_eq!(policy.decide(AgentId(0), &snap, &mut SimRng::new(0)), Action::Down);
    }

    #[test]
    fn coordinated_falls_back_to_any_pickup() {
        let mut orders = OrderRegistry::new();
        orders.spawn_at(c(4, 0), c(0, 4)).unwrap();
        let snap = world(&[c(0, 0), c(4, 4)], &orders);
        let mut policy = CoordinatedGreedy::new(5, 2);
        assert_eq!(policy.decide(AgentId(0), &snap, &mut SimRng::new(0)), Action::Right);
    }

    #[test]
    fn coordinated_sweeps_own_zone_when_idle() {
        let mut policy = CoordinatedGreedy::new(4, 2);
        let orders = OrderRegistry::new();
        let mut rng = SimRng::new(0);
        // Agent 0 owns columns 0–1; first waypoint is (0,0), second (1,0).
        let snap = world(&[c(0, 0), c(3, 3)], &orders);
        assert_eq!(policy.decide(AgentId(0), &snap, &mut rng), Action::Right);
        let snap = world(&[c(1, 0), c(3, 3)], &orders);
        // Row 1 is swept right-to-left, so (1,1) follows (1,0).
        assert_eq!(policy.decide(AgentId(0), &snap, &mut rng), Action::Down);
    }
}
