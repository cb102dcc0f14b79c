use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user record as returned by the lookup API
///
/// The full JSON document is kept so the user view can show every field;
/// only `login` is interpreted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(Value);

impl User {
    /// Wrap a JSON document, which must be an object with a string `login`
    pub fn from_json(value: Value) -> Option<Self> {
        match value.get("login") {
            Some(Value::String(_)) => Some(User(value)),
            _ => None,
        }
    }

    /// The username this record is filed under
    pub fn login(&self) -> &str {
        self.0.get("login").and_then(Value::as_str).unwrap_or_default()
    }

    /// Pretty-printed JSON for display
    pub fn to_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_requires_login() {
        assert!(User::from_json(json!({"id": 1})).is_none());
        assert!(User::from_json(json!({"login": 42})).is_none());
        assert!(User::from_json(json!("octocat")).is_none());

        let user = User::from_json(json!({"login": "octocat", "name": "The Octocat"})).unwrap();
        assert_eq!(user.login(), "octocat");
        assert!(user.to_pretty().contains("\"name\": \"The Octocat\""));
    }
}
