//! # Trio TUI
//!
//! A terminal rendition of the classic store demo: a ping/pong toggle,
//! a counter and a GitHub user lookup, driven by a unidirectional store.
//!
//! ## Features
//! - Pure reducers over an owned state tree
//! - Epics turning actions into delays, HTTP lookups and follow-up actions
//! - Client-side router with back/forward history
//! - Action log with time travel (undo/redo through dispatched actions)
//! - Optional route rotation ticker
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (Store + view state)
//! - Effect Layer (Tokio runtime)

pub mod constants;
pub mod config;
pub mod models;
pub mod router;
pub mod messages;
pub mod store;
pub mod effects;
pub mod network;
pub mod app;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use models::User;
pub use router::{Navigation, Route, RouterState};
pub use messages::{Action, EffectCommand, RenderState, UiEvent};
pub use store::{AppState, Store};
pub use effects::{Effect, Epics};
pub use app::AppActor;
pub use network::{EffectActor, LookupError, UserClient};
