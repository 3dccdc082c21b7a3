//! Sessions

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Identity provider user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap an identifier issued by the identity provider.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The signed-in user, mirrored from the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    /// User identifier
    pub id: UserId,

    /// Email address
    pub email: String,

    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl UserSession {
    /// Display name when set, otherwise the email address.
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_falls_back_to_email() {
        let mut session = UserSession {
            id: UserId::new("u1"),
            email: "ada@example.com".to_string(),
            display_name: None,
        };

        assert_eq!(session.name(), "ada@example.com");

        session.display_name = Some(String::new());
        assert_eq!(session.name(), "ada@example.com");

        session.display_name = Some("Ada".to_string());
        assert_eq!(session.name(), "Ada");
    }
}
