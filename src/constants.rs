//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Base URL of the user lookup API
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Delay between a ping and its automatic pong
pub const DEFAULT_PING_DELAY_MS: u64 = 1000;

/// HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Initial value of the lookup form
pub const DEFAULT_USERNAME: &str = "redux-observable";

/// Interval of the route rotation ticker
pub const DEFAULT_ROTATION_INTERVAL_MS: u64 = 3000;

/// Paths visited by the route rotation ticker, in order
pub const DEFAULT_ROTATION_URLS: [&str; 4] = ["/", "/counter", "/user/uzimith", "/user/facebook"];

/// Usernames offered as quick links on the user view
pub const QUICK_LINKS: [&str; 2] = ["uzimith", "uzimith2"];

/// Log file written next to the working directory
pub const DEFAULT_LOG_FILE: &str = "trio.log";

/// Maximum number of journal entries kept by the store
pub const MAX_JOURNAL: usize = 50;

/// User-Agent sent with API requests (GitHub rejects requests without one)
pub const USER_AGENT: &str = concat!("trio-tui/", env!("CARGO_PKG_VERSION"));

/// Application name
pub const APP_NAME: &str = "Trio TUI";
