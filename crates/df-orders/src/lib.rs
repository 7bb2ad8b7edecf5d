//! `df-orders`: delivery orders and their lifecycle.
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`order`]    | `Order`, `OrderStatus`                                 |
//! | [`registry`] | `OrderRegistry`: spawn, pickup, dropoff, prune        |
//!
//! # Lifecycle
//!
//! ```text
//! spawn ──► Waiting ──pickup──► Picked ──dropoff──► Delivered ──prune──► (gone)
//! ```
//!
//! No other transition exists.  None of the registry operations fail: an
//! attempt that matches nothing is a silent no-op.

pub mod order;
pub mod registry;

#[cfg(test)]
mod tests;

pub use order::{Order, OrderStatus};
pub use registry::OrderRegistry;
