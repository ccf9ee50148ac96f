//! Who is looking at the catalog.

use catalog::Role;

/// Session context handed over by the auth collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
    pub role: Role,
    pub username: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self {
            logged_in: false,
            role: Role::Anonymous,
            username: None,
        }
    }

    pub fn signed_in(username: impl Into<String>, role: Role) -> Self {
        Self {
            logged_in: true,
            role,
            username: Some(username.into()),
        }
    }

    pub fn guest(username: impl Into<String>) -> Self {
        Self::signed_in(username, Role::Guest)
    }

    /// Signed-in consumers with the guest role get recommendations
    pub fn is_guest(&self) -> bool {
        self.logged_in && self.role == Role::Guest
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_detection() {
        assert!(Session::guest("ana").is_guest());
        assert!(!Session::signed_in("marie", Role::Host).is_guest());
        assert!(!Session::anonymous().is_guest());

        let logged_out_guest = Session {
            logged_in: false,
            role: Role::Guest,
            username: Some("ana".to_string()),
        };
        assert!(!logged_out_guest.is_guest());
    }
}
