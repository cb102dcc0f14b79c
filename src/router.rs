//! Client-side router - maps paths to views and keeps a navigation history
//!
//! Matching follows the usual declarative-router rules: `/` matches only
//! exactly, `/counter` and `/user/:id` also match deeper paths.

/// Top-level views addressable by path
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Ping,
    Counter,
    /// User lookup, optionally with the username taken from the path
    User(Option<String>),
    NotFound(String),
}

impl Route {
    /// Resolve a location to a route. A leading `#` (hash history) and any
    /// query string are ignored.
    pub fn parse(location: &str) -> Route {
        let path = normalize(location);
        let mut segments = path.split('/').filter(|s| !s.is_empty());

        match segments.next() {
            None => Route::Ping,
            Some(s) if s.eq_ignore_ascii_case("counter") => Route::Counter,
            Some(s) if s.eq_ignore_ascii_case("user") => Route::User(segments.next().map(str::to_string)),
            Some(_) => Route::NotFound(path),
        }
    }

    /// Canonical path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Ping => String::from("/"),
            Route::Counter => String::from("/counter"),
            Route::User(Some(id)) => format!("/user/{}", id),
            Route::User(None) => String::from("/user"),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Heading shown on the view's block
    pub fn title(&self) -> &'static str {
        match self {
            Route::Ping => "Ping",
            Route::Counter => "Counter",
            Route::User(_) => "User",
            Route::NotFound(_) => "Not Found",
        }
    }

    /// Username carried by a `/user/:id` route
    pub fn user_param(&self) -> Option<&str> {
        match self {
            Route::User(Some(id)) => Some(id),
            _ => None,
        }
    }
}

fn normalize(location: &str) -> String {
    let location = location.trim().trim_start_matches('#');
    let path = location.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        String::from("/")
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// A request to move through history
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Push(String),
    Replace(String),
    Back,
    Forward,
}

/// Current location plus back/forward stacks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouterState {
    pub location: String,
    pub back: Vec<String>,
    pub forward: Vec<String>,
}

impl Default for RouterState {
    fn default() -> Self {
        RouterState::at("/")
    }
}

impl RouterState {
    pub fn at(location: &str) -> Self {
        RouterState {
            location: normalize(location),
            back: Vec::new(),
            forward: Vec::new(),
        }
    }

    pub fn route(&self) -> Route {
        Route::parse(&self.location)
    }

    /// Apply a navigation, returning the new history. `self` is left untouched.
    pub fn navigate(&self, nav: &Navigation) -> RouterState {
        let mut next = self.clone();
        match nav {
            Navigation::Push(to) => {
                let to = normalize(to);
                if to != next.location {
                    let prev = std::mem::replace(&mut next.location, to);
                    next.back.push(prev);
                    next.forward.clear();
                }
            }
            Navigation::Replace(to) => {
                next.location = normalize(to);
            }
            Navigation::Back => {
                if let Some(prev) = next.back.pop() {
                    let cur = std::mem::replace(&mut next.location, prev);
                    next.forward.push(cur);
                }
            }
            Navigation::Forward => {
                if let Some(fwd) = next.forward.pop() {
                    let cur = std::mem::replace(&mut next.location, fwd);
                    next.back.push(cur);
                }
            }
        }
        next
    }
}
