//! Effect messages - communication between App and Effect layers

use crate::effects::Effect;

/// Commands sent from App layer to Effect layer
#[derive(Debug, Clone)]
pub enum EffectCommand {
    /// Schedule an asynchronous effect; its outcome comes back as an action
    Run(Effect),
    /// Stop timers and exit the effect actor
    Shutdown,
}
