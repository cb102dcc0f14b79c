//! Store layer - the state tree, pure reducers and the dispatch loop
//!
//! State is owned by a [`Store`] and only ever replaced through
//! [`reducer::reduce`]; nothing else writes to it.

pub mod state;
pub mod reducer;
#[allow(clippy::module_inception)]
pub mod store;

pub use state::{AppState, PingState, UsersState};
pub use store::{JournalEntry, Store};
