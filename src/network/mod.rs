//! Network layer - user lookups and timers running on the Tokio runtime
//!
//! The Effect actor receives effects from the App actor and sends back the
//! actions they resolve to.

pub mod actor;
pub mod client;

pub use actor::EffectActor;
pub use client::{LookupError, UserClient};
