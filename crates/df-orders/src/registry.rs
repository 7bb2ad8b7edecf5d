//! The `OrderRegistry`: owner of the active-order set.

use df_core::{AgentId, GridCoord, GridGeometry, OrderId, SimRng, Tick};

use crate::{Order, OrderStatus};

/// Active orders in ascending id order, plus the id counter.
///
/// Iteration order is spawn order (= ascending `OrderId`); it is the
/// tie-break for [`try_pickup`](Self::try_pickup) when several waiting orders
/// share a pickup cell.
#[derive(Clone, Debug, Default)]
pub struct OrderRegistry {
    orders:  Vec<Order>,
    next_id: u64,
}

impl OrderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every order and restart ids at zero.
    pub fn clear(&mut self) {
        self.orders.clear();
        self.next_id = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// The id the next spawned order will get.  Also the number of orders
    /// spawned since the last [`clear`](Self::clear).
    #[inline]
    pub fn next_id(&self) -> OrderId {
        OrderId(self.next_id)
    }

    /// Active orders, ascending id.
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.iter()
    }

    pub fn as_slice(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.position_of(id).map(|i| &self.orders[i])
    }

    /// Spawn one order if `tick` is on a spawn boundary and the active set is
    /// below `max_orders`.
    ///
    /// Pickup and dropoff are drawn independently and uniformly; the dropoff
    /// is redrawn until it differs from the pickup.  The grid must have at
    /// least two cells.
    pub fn maybe_spawn(
        &mut self,
        tick:           Tick,
        spawn_interval: u64,
        max_orders:     usize,
        grid:           GridGeometry,
        rng:            &mut SimRng,
    ) -> Option<Order> {
        if !tick.is_multiple_of(spawn_interval) || self.orders.len() >= max_orders {
            return None;
        }
        debug_assert!(grid.cell_count() >= 2, "cannot place distinct pickup and dropoff");

        let pickup = grid.random_cell(rng);
        let dropoff = loop {
            let candidate = grid.random_cell(rng);
            if candidate != pickup {
                break candidate;
            }
        };

        let order = Order::new(OrderId(self.next_id), pickup, dropoff);
        self.next_id += 1;
        self.orders.push(order);
        Some(order)
    }

    /// Spawn a waiting order at fixed cells, bypassing the interval and the
    /// RNG (scripted scenarios).  Returns `None` if `pickup == dropoff`.
    pub fn spawn_at(&mut self, pickup: GridCoord, dropoff: GridCoord) -> Option<Order> {
        if pickup == dropoff {
            return None;
        }
        let order = Order::new(OrderId(self.next_id), pickup, dropoff);
        self.next_id += 1;
        self.orders.push(order);
        Some(order)
    }

    /// Bind the first waiting order whose pickup is `position` to `agent`.
    ///
    /// At most one order is picked per call even if several wait on the same
    /// cell.  Returns `None` (and changes nothing) when no order matches.
    pub fn try_pickup(&mut self, agent: AgentId, position: GridCoord) -> Option<OrderId> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.status == OrderStatus::Waiting && o.pickup == position)?;
        order.status = OrderStatus::Picked;
        order.carrier = Some(agent);
        Some(order.id)
    }

    /// Deliver `order` if `agent` carries it and stands on its dropoff.
    ///
    /// Returns `false` (and changes nothing) otherwise.
    pub fn try_dropoff(&mut self, agent: AgentId, order: OrderId, position: GridCoord) -> bool {
        let Some(i) = self.position_of(order) else {
            return false;
        };
        let o = &mut self.orders[i];
        if o.status != OrderStatus::Picked || o.carrier != Some(agent) || o.dropoff != position {
            return false;
        }
        o.status = OrderStatus::Delivered;
        true
    }

    /// Remove every delivered order.  Returns how many were removed.
    pub fn prune_delivered(&mut self) -> usize {
        let before = self.orders.len();
        self.orders.retain(|o| o.status != OrderStatus::Delivered);
        before - self.orders.len()
    }

    fn position_of(&self, id: OrderId) -> Option<usize> {
        // Ids are appended in ascending order and never reordered.
        self.orders.binary_search_by_key(&id, |o| o.id).ok()
    }
}
