//! App layer - owns the store and view state, processes events
//!
//! The App actor receives UI events and effect outcomes, dispatches actions
//! to the store, forwards effects to the Effect actor and emits render state.

pub mod actor;
pub mod view;

pub use actor::AppActor;
pub use view::ViewState;
