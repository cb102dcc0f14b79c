//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and Effect layers.

pub mod action;
pub mod effects;
pub mod ui_events;
pub mod render;

pub use action::Action;
pub use effects::EffectCommand;
pub use ui_events::UiEvent;
pub use render::RenderState;
