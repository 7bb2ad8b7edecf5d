//! `df-agent`: Structure-of-Arrays agent storage for the delivery fleet.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`store`]   | `AgentStore` (SoA arrays: position, carried order)        |
//!
//! The agent population is fixed when the store is created; agents are never
//! added or removed during a run, so `AgentId` is a stable index into every
//! array.

pub mod store;


pub use store::AgentStore;
