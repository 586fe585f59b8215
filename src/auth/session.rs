/// Account credentials supplied once at startup.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

/// Bearer tokens obtained from the Delta API. Both are short-lived and are
/// re-derived together on every refresh; neither is persisted across runs.
#[derive(Debug, Clone, Default)]
pub struct TokenSet {
    pub client_token: Option<String>,
    pub user_token: Option<String>,
}

/// Per-process authentication state: credentials plus the current tokens.
///
/// A `Session` is owned by the caller and passed `&mut` into the auth and
/// fetch routines, so the borrow checker enforces the one-operation-at-a-time
/// model the API requires. It must not be shared across threads without
/// external synchronization.
#[derive(Debug, Clone)]
pub struct Session {
    pub credentials: Credentials,
    pub tokens: TokenSet,
}

impl Session {
    pub fn new(client_secret: String, username: String, password: String) -> Self {
        Self {
            credentials: Credentials {
                client_secret,
                username,
                password,
            },
            tokens: TokenSet::default(),
        }
    }

    /// Inject an already-known user token, skipping the login flow.
    pub fn set_token(&mut self, user_token: String) {
        self.tokens.user_token = Some(user_token);
    }

    /// Replace the account credentials. Existing tokens are dropped since
    /// they were derived from the old login.
    pub fn set_credentials(&mut self, username: String, password: String) {
        self.credentials.username = username;
        self.credentials.password = password;
        self.tokens = TokenSet::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new("secret".into(), "user@example.com".into(), "hunter2".into())
    }

    #[test]
    fn new_session_has_no_tokens() {
        let s = session();
        assert!(s.tokens.client_token.is_none());
        assert!(s.tokens.user_token.is_none());
    }

    #[test]
    fn set_token_injects_user_token_only() {
        let mut s = session();
        s.set_token("T".into());
        assert_eq!(s.tokens.user_token.as_deref(), Some("T"));
        assert!(s.tokens.client_token.is_none());
    }

    #[test]
    fn set_credentials_clears_tokens() {
        let mut s = session();
        s.set_token("T".into());
        s.tokens.client_token = Some("C".into());
        s.set_credentials("other@example.com".into(), "pw".into());
        assert_eq!(s.credentials.username, "other@example.com");
        assert!(s.tokens.user_token.is_none());
        assert!(s.tokens.client_token.is_none());
    }
}
