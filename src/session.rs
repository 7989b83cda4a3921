use serde::{Deserialize, Serialize};

/// The signed-in user, as far as the client knows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Authentication state handed to every API call.
///
/// There is no process-wide "current user": whoever makes a request passes
/// the session in, and the recipe core never sees it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    access_token: Option<String>,
    user: Option<SessionUser>,
}

impl Session {
    /// A guest session; the API serves it an unpersonalized feed.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session carrying a bearer token. Blank tokens are ignored.
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            access_token: Some(token).filter(|t| !t.trim().is_empty()),
            user: None,
        }
    }

    pub fn with_user(mut self, user: SessionUser) -> Self {
        self.user = Some(user);
        self
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Forget the token and the user.
    pub fn sign_out(&mut self) {
        self.access_token = None;
        self.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_anonymous() {
        assert!(!Session::with_token("  ").is_authenticated());
        assert!(Session::with_token("abc").is_authenticated());
    }

    #[test]
    fn test_sign_out_clears_everything() {
        let mut session = Session::with_token("abc").with_user(SessionUser {
            id: Some(1),
            name: Some("Sam".to_string()),
            email: None,
        });
        assert_eq!(session.user().and_then(|u| u.id), Some(1));
        session.sign_out();
        assert_eq!(session, Session::anonymous());
    }
}
