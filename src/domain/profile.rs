//! User identity and the admin gate.

use serde::{Deserialize, Serialize};

/// Identity handed in whole by the auth collaborator. Never mutated here;
/// only read for admin-gate checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Accounts allowed into the catalog editing flow.
pub const ADMIN_EMAILS: [&str; 2] = [
    "gibsoncollections1@gmail.com",
    "gibsoncollections2@gmail.com",
];

/// The one authorization predicate, shared by every gated call site.
/// Email comparison is case-insensitive.
pub fn is_admin(user: Option<&UserProfile>) -> bool {
    user.is_some_and(|u| {
        ADMIN_EMAILS
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&u.email))
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn user(email: &str) -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            email: email.to_string(),
            full_name: None,
            avatar_url: None,
        }
    }

    #[test]
    fn test_no_user_is_not_admin() {
        assert!(!is_admin(None));
    }

    #[test]
    fn test_unlisted_email_is_not_admin() {
        assert!(!is_admin(Some(&user("shopper@example.com"))));
    }

    #[test]
    fn test_allow_list_match_is_case_insensitive() {
        assert!(is_admin(Some(&user("gibsoncollections1@gmail.com"))));
        assert!(is_admin(Some(&user("GibsonCollections2@Gmail.com"))));
    }
}
