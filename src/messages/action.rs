//! Store actions - immutable records of something that happened

use crate::models::User;
use crate::router::Navigation;

/// Everything the store can react to
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Start pinging; a `Pong` follows after the configured delay
    Ping,
    Pong,

    /// A lookup was started for `username`
    FetchUser {
        request_id: u64,
        username: String,
    },
    /// The lookup with `request_id` returned a user record
    FetchUserFulfilled {
        request_id: u64,
        user: User,
    },
    /// The lookup with `request_id` failed
    FetchUserFailed {
        request_id: u64,
        error: String,
    },

    Increment,
    /// Re-emits `Increment` when the counter is odd
    IncrementIfOdd,

    Navigate(Navigation),
}

impl Action {
    /// Type tag, as shown in the action log
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Ping => "PING",
            Action::Pong => "PONG",
            Action::FetchUser { .. } => "FETCH_USER",
            Action::FetchUserFulfilled { .. } => "FETCH_USER_FULFILLED",
            Action::FetchUserFailed { .. } => "ERROR_FETCH_USER",
            Action::Increment => "INCREMENT",
            Action::IncrementIfOdd => "INCREMENT_IF_ODD",
            Action::Navigate(_) => "NAVIGATE",
        }
    }

    /// One-line description including the payload
    pub fn describe(&self) -> String {
        match self {
            Action::FetchUser { request_id, username } => {
                format!("{} #{} {}", self.kind(), request_id, username)
            }
            Action::FetchUserFulfilled { request_id, user } => {
                format!("{} #{} {}", self.kind(), request_id, user.login())
            }
            Action::FetchUserFailed { request_id, error } => {
                format!("{} #{} {}", self.kind(), request_id, error)
            }
            Action::Navigate(nav) => format!("{} {:?}", self.kind(), nav),
            _ => self.kind().to_string(),
        }
    }
}
