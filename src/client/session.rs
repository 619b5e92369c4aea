/// Client session store
///
/// The single source of truth for the active session, replacing the
/// pair of divergent ad hoc auth contexts the app previously kept.
/// A session past its expiry is treated as absent.
use chrono::{DateTime, Utc};

/// What kind of principal the session belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Admin,
    Owner,
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub kind: SessionKind,
    /// Admin username or owner email
    pub subject: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Holds at most one active session
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    current: Option<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active session, or None if absent or expired
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref().filter(|s| !s.is_expired())
    }

    /// Bearer token for API calls, while the session is live
    pub fn bearer_token(&self) -> Option<&str> {
        self.current().map(|s| s.token.as_str())
    }

    /// Replace the active session (login)
    pub fn replace(&mut self, session: Session) {
        self.current = Some(session);
    }

    /// Drop the active session (logout)
    pub fn clear(&mut self) {
        self.current = None;
    }
}
