//! Unit tests for df-orders.

use df_core::{AgentId, GridCoord, GridGeometry, SimRng, Tick};

use crate::{OrderRegistry, OrderStatus};

fn c(x: u32, y: u32) -> GridCoord {
    GridCoord::new(x, y)
}

#[cfg(test)]
mod status {
    use super::*;

    #[test]
    fn successors_only_move_forward() {
        assert_eq!(OrderStatus::Waiting.successor(), Some(OrderStatus::Picked));
        assert_eq!(OrderStatus::Picked.successor(), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::Delivered.successor(), None);
    }
}

#[cfg(test)]
mod spawn {
    use super::*;

    #[test]
    fn spawns_only_on_interval_boundaries() {
        let grid = GridGeometry::new(5);
        let mut rng = SimRng::new(1);
        let mut reg = OrderRegistry::new();
        assert!(reg.maybe_spawn(Tick(1), 3, 10, grid, &mut rng).is_none());
        assert!(reg.maybe_spawn(Tick(2), 3, 10, grid, &mut rng).is_none());
        assert!(reg.maybe_spawn(Tick(3), 3, 10, grid, &mut rng).is_some());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn respects_capacity() {
        let grid = GridGeometry::new(5);
        let mut rng = SimRng::new(1);
        let mut reg = OrderRegistry::new();
        for t in 1..=50 {
            reg.maybe_spawn(Tick(t), 1, 4, grid, &mut rng);
            assert!(reg.len() <= 4);
        }
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.next_id().0, 4);
    }

    #[test]
    fn zero_capacity_never_spawns() {
        let grid = GridGeometry::new(5);
        let mut rng = SimRng::new(1);
        let mut reg = OrderRegistry::new();
        assert!(reg.maybe_spawn(Tick(3), 1, 0, grid, &mut rng).is_none());
    }

    #[test]
    fn pickup_differs_from_dropoff_even_on_tiny_grid() {
        let grid = GridGeometry::new(2);
        let mut rng = SimRng::new(5);
        let mut reg = OrderRegistry::new();
        for t in 1..=200 {
            if let Some(order) = reg.maybe_spawn(Tick(t), 1, 1, grid, &mut rng) {
                assert_ne!(order.pickup, order.dropoff);
                assert!(grid.contains(order.pickup) && grid.contains(order.dropoff));
                assert_eq!(order.status, OrderStatus::Waiting);
            }
            reg.clear();
        }
    }

    #[test]
    fn ids_strictly_increase_across_prunes() {
        let grid = GridGeometry::new(6);
        let mut rng = SimRng::new(2);
        let mut reg = OrderRegistry::new();
        let mut seen = Vec::new();
        for t in 1..=30 {
            if let Some(o) = reg.maybe_spawn(Tick(t), 1, 2, grid, &mut rng) {
                seen.push(o.id);
                let p = o.pickup;
                let d = o.dropoff;
                let id = reg.try_pickup(AgentId(0), p).unwrap();
                assert!(reg.try_dropoff(AgentId(0), id, d));
                reg.prune_delivered();
            }
        }
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn clear_resets_ids() {
        let mut reg = OrderRegistry::new();
        reg.spawn_at(c(0, 0), c(1, 1)).unwrap();
        reg.clear();
        assert!(reg.is_empty());
        assert_eq!(reg.next_id().0, 0);
    }

    #[test]
    fn spawn_at_rejects_identical_cells() {
        let mut reg = OrderRegistry::new();
        assert!(reg.spawn_at(c(2, 2), c(2, 2)).is_none());
        assert_eq!(reg.next_id().0, 0);
    }
}

#[cfg(test)]
mod pickup {
    use super::*;

    #[test]
    fn picks_waiting_order_at_cell() {
        let mut reg = OrderRegistry::new();
        let o = reg.spawn_at(c(1, 1), c(3, 3)).unwrap();
        assert_eq!(reg.try_pickup(AgentId(2), c(1, 1)), Some(o.id));
        let stored = reg.get(o.id).unwrap();
        assert_eq!(stored.status, OrderStatus::Picked);
        assert_eq!(stored.carrier, Some(AgentId(2)));
    }

    #[test]
    fn wrong_cell_is_noop() {
        let mut reg = OrderRegistry::new();
        let o = reg.spawn_at(c(1, 1), c(3, 3)).unwrap();
        assert_eq!(reg.try_pickup(AgentId(0), c(0, 1)), None);
        assert_eq!(reg.get(o.id).unwrap().status, OrderStatus::Waiting);
    }

    #[test]
    fn first_match_wins_and_only_one_is_picked() {
        let mut reg = OrderRegistry::new();
        let first = reg.spawn_at(c(2, 0), c(0, 0)).unwrap();
        let second = reg.spawn_at(c(2, 0), c(4, 4)).unwrap();
        assert_eq!(reg.try_pickup(AgentId(0), c(2, 0)), Some(first.id));
        assert_eq!(reg.get(second.id).unwrap().status, OrderStatus::Waiting);
        // A second pickup on the same cell takes the next waiting order.
        assert_eq!(reg.try_pickup(AgentId(1), c(2, 0)), Some(second.id));
        assert_eq!(reg.try_pickup(AgentId(2), c(2, 0)), None);
    }

    #[test]
    fn picked_order_cannot_be_picked_again() {
        let mut reg = OrderRegistry::new();
        reg.spawn_at(c(1, 0), c(0, 1)).unwrap();
        assert!(reg.try_pickup(AgentId(0), c(1, 0)).is_some());
        assert!(reg.try_pickup(AgentId(1), c(1, 0)).is_none());
    }
}

#[cfg(test)]
mod dropoff {
    use super::*;

    #[test]
    fn carrier_at_dropoff_delivers() {
        let mut reg = OrderRegistry::new();
        let o = reg.spawn_at(c(0, 0), c(2, 2)).unwrap();
        reg.try_pickup(AgentId(0), c(0, 0)).unwrap();
        assert!(reg.try_dropoff(AgentId(0), o.id, c(2, 2)));
        assert_eq!(reg.get(o.id).unwrap().status, OrderStatus::Delivered);
    }

    #[test]
    fn wrong_cell_or_wrong_agent_is_noop() {
        let mut reg = OrderRegistry::new();
        let o = reg.spawn_at(c(0, 0), c(2, 2)).unwrap();
        reg.try_pickup(AgentId(0), c(0, 0)).unwrap();
        assert!(!reg.try_dropoff(AgentId(0), o.id, c(2, 1)));
        assert!(!reg.try_dropoff(AgentId(1), o.id, c(2, 2)));
        assert_eq!(reg.get(o.id).unwrap().status, OrderStatus::Picked);
    }

    #[test]
    fn waiting_order_cannot_skip_to_delivered() {
        let mut reg = OrderRegistry::new();
        let o = reg.spawn_at(c(0, 0), c(2, 2)).unwrap();
        assert!(!reg.try_dropoff(AgentId(0), o.id, c(2, 2)));
        assert_eq!(reg.get(o.id).unwrap().status, OrderStatus::Waiting);
    }

    #[test]
    fn unknown_order_is_noop() {
        let mut reg = OrderRegistry::new();
        assert!(!reg.try_dropoff(AgentId(0), df_core::OrderId(9), c(0, 0)));
    }

    #[test]
    fn prune_removes_only_delivered() {
        let mut reg = OrderRegistry::new();
        let a = reg.spawn_at(c(0, 0), c(1, 0)).unwrap();
        let b = reg.spawn_at(c(3, 3), c(1, 0)).unwrap();
        reg.try_pickup(AgentId(0), c(0, 0)).unwrap();
        reg.try_dropoff(AgentId(0), a.id, c(1, 0));
        assert_eq!(reg.prune_delivered(), 1);
        assert!(reg.get(a.id).is_none());
        assert!(reg.get(b.id).is_some());
        assert_eq!(reg.prune_delivered(), 0);
    }

    #[test]
    fn delivered_order_is_not_picked_again_before_prune() {
        let mut reg = OrderRegistry::new();
        let a = reg.spawn_at(c(0, 0), c(1, 0)).unwrap();
        reg.try_pickup(AgentId(0), c(0, 0)).unwrap();
        reg.try_dropoff(AgentId(0), a.id, c(1, 0));
        assert!(reg.try_pickup(AgentId(1), c(0, 0)).is_none());
    }
}
