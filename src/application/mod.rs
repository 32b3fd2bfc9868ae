//! Application Layer - Simulation coordination
//!
//! - `store`: the single shared token collection
//! - `ticker`: cancelable periodic tasks
//! - `session`: token detail view state and trade feed
//! - `launchpad`: top-level coordinator used by the CLI

pub mod store;
pub mod ticker;
pub mod session;
pub mod launchpad;

pub use store::{StoreError, TokenStore};
pub use ticker::{spawn_periodic, PeriodicTask, TickError, TickerHandle};
pub use session::TokenDetailSession;
pub use launchpad::{seeded_rng, Launchpad};
