//! Effect table - what each dispatched action sets in motion
//!
//! Epics look at an action after it has been reduced, together with the new
//! state, and describe follow-up work. They do no I/O themselves: the store
//! drains [`Effect::Dispatch`] immediately and hands everything else to the
//! effect actor.

use std::time::Duration;

use crate::messages::Action;
use crate::store::AppState;

/// Follow-up work requested by an epic
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Dispatch an action right away, before `dispatch` returns
    Dispatch(Action),
    /// Dispatch `then` once `after` has elapsed
    Delay { after: Duration, then: Action },
    /// Look up a user; completes with `FetchUserFulfilled` or `FetchUserFailed`
    FetchUser { request_id: u64, username: String },
}

/// The set of epics, with their tunables
#[derive(Debug, Clone)]
pub struct Epics {
    pub ping_delay: Duration,
}

impl Default for Epics {
    fn default() -> Self {
        Epics {
            ping_delay: Duration::from_millis(crate::constants::DEFAULT_PING_DELAY_MS),
        }
    }
}

impl Epics {
    pub fn new(ping_delay: Duration) -> Self {
        Epics { ping_delay }
    }

    /// Effects triggered by `action`, given the state right after reducing it
    pub fn run(&self, action: &Action, state: &AppState) -> Vec<Effect> {
        match action {
            Action::Ping => vec![Effect::Delay {
                after: self.ping_delay,
                then: Action::Pong,
            }],
            Action::FetchUser { request_id, username } => vec![Effect::FetchUser {
                request_id: *request_id,
                username: username.clone(),
            }],
            Action::IncrementIfOdd if state.counter % 2 != 0 => {
                vec![Effect::Dispatch(Action::Increment)]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_schedules_pong() {
        let epics = Epics::new(Duration::from_millis(1000));
        let effects = epics.run(&Action::Ping, &AppState::default());
        assert_eq!(
            effects,
            vec![Effect::Delay { after: Duration::from_millis(1000), then: Action::Pong }]
        );
    }

    #[test]
    fn test_increment_if_odd_gate() {
        let epics = Epics::default();
        let mut state = AppState::default();
        assert!(epics.run(&Action::IncrementIfOdd, &state).is_empty());

        state.counter = 3;
        assert_eq!(epics.run(&Action::IncrementIfOdd, &state), vec![Effect::Dispatch(Action::Increment)]);

        state.counter = -1;
        assert_eq!(epics.run(&Action::IncrementIfOdd, &state), vec![Effect::Dispatch(Action::Increment)]);
    }

    #[test]
    fn test_fetch_user_requests_lookup() {
        let action = Action::FetchUser { request_id: 9, username: String::from("octocat") };
        let effects = Epics::default().run(&action, &AppState::default());
        assert_eq!(effects, vec![Effect::FetchUser { request_id: 9, username: String::from("octocat") }]);
    }

    #[test]
    fn test_other_actions_have_no_effects() {
        let epics = Epics::default();
        let state = AppState::default();
        assert!(epics.run(&Action::Pong, &state).is_empty());
        assert!(epics.run(&Action::Increment, &state).is_empty());
    }
}
