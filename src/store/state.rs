//! State slices - plain data, cloned on every transition

use std::collections::BTreeMap;

use crate::models::User;
use crate::router::RouterState;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PingState {
    pub is_pinging: bool,
}

/// Cached user records plus the state of the latest lookup
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsersState {
    /// Records keyed by `login`
    pub users: BTreeMap<String, User>,
    /// Username of the latest lookup; kept after it completes
    pub current: Option<String>,
    /// Request id of the latest lookup; completions with another id are stale
    pub current_request: Option<u64>,
    pub pending: bool,
    pub error: Option<String>,
}

impl UsersState {
    /// Look up a cached record. Logins are case-insensitive upstream, so an
    /// exact miss falls back to a case-insensitive match.
    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.get(username).or_else(|| {
            self.users
                .iter()
                .find(|(login, _)| login.eq_ignore_ascii_case(username))
                .map(|(_, user)| user)
        })
    }

    /// Record for the latest lookup, if it has been fetched
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_deref().and_then(|name| self.get(name))
    }
}

/// The whole state tree
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub ping: PingState,
    pub users: UsersState,
    pub counter: i64,
    pub router: RouterState,
}
