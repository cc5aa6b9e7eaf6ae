use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
    time::Duration,
};

use chrono::Utc;

use crate::{
    error::{PodcastError, Result},
    spotify::{SpotifyAuth, auth::is_expired},
    types::{PendingLogin, Principal, Token},
    utils,
};

/// How long a started login waits for its callback, in seconds.
const PENDING_LOGIN_TTL_SECS: u64 = 600;

/// Idle time after which a session is dropped, in seconds.
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 1800;

#[derive(Debug, Clone)]
pub struct Session {
    pub token: Token,
    pub principal: Principal,
    /// Unix time of the last request made with this session.
    pub last_seen: u64,
}

/// In-memory store of signed-in users and of logins waiting for their
/// callback. Everything is lost on restart.
///
/// A session unused for longer than the idle timeout is gone: lookups
/// ignore it and every new session prunes the stale ones.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    pending: Arc<RwLock<HashMap<String, PendingLogin>>>,
    idle_timeout_secs: u64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(Duration::from_secs(DEFAULT_SESSION_IDLE_SECS))
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            pending: Arc::default(),
            idle_timeout_secs: idle_timeout.as_secs(),
        }
    }

    /// Registers a new login attempt and returns its `state` value together
    /// with the PKCE code verifier.
    pub fn begin_login(&self) -> (String, String) {
        let state = utils::generate_opaque_id();
        let code_verifier = utils::generate_code_verifier();
        let now = now();

        if let Ok(mut pending) = self.pending.write() {
            pending.retain(|_, login| login.started_at + PENDING_LOGIN_TTL_SECS > now);
            pending.insert(
                state.clone(),
                PendingLogin {
                    code_verifier: code_verifier.clone(),
                    started_at: now,
                },
            );
        }

        (state, code_verifier)
    }

    /// Removes and returns the login attempt identified by `state`, unless it
    /// is unknown or too old.
    pub fn complete_login(&self, state: &str) -> Option<PendingLogin> {
        let now = now();
        let login = self.pending.write().ok()?.remove(state)?;
        (login.started_at + PENDING_LOGIN_TTL_SECS > now).then_some(login)
    }

    /// Stores a signed-in user and returns the new session id.
    pub fn create(&self, token: Token, principal: Principal) -> String {
        self.create_at(token, principal, now())
    }

    /// Returns the session and marks it as used, unless it is unknown or has
    /// been idle for too long.
    pub fn get(&self, id: &str) -> Option<Session> {
        self.get_at(id, now())
    }

    fn create_at(&self, token: Token, principal: Principal, now: u64) -> String {
        let id = utils::generate_opaque_id();
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.retain(|_, session| self.is_alive(session, now));
            sessions.insert(
                id.clone(),
                Session {
                    token,
                    principal,
                    last_seen: now,
                },
            );
        }
        id
    }

    fn get_at(&self, id: &str, now: u64) -> Option<Session> {
        let mut sessions = self.sessions.write().ok()?;
        if !self.is_alive(sessions.get(id)?, now) {
            sessions.remove(id);
            return None;
        }

        let session = sessions.get_mut(id)?;
        session.last_seen = now;
        Some(session.clone())
    }

    fn is_alive(&self, session: &Session, now: u64) -> bool {
        session.last_seen + self.idle_timeout_secs > now
    }

    /// Ends a session. Returns whether it existed.
    pub fn remove(&self, id: &str) -> bool {
        self.sessions
            .write()
            .map(|mut sessions| sessions.remove(id).is_some())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map_or(0, |sessions| sessions.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an access token of the session that is valid for a few more
    /// minutes, refreshing it first when needed.
    ///
    /// A session whose token cannot be refreshed is dropped.
    pub async fn valid_access_token(&self, id: &str, auth: &SpotifyAuth) -> Result<String> {
        let session = self.get(id).ok_or(PodcastError::Unauthenticated)?;
        if !is_expired(&session.token) {
            return Ok(session.token.access_token);
        }

        match auth.refresh(&session.token.refresh_token).await {
            Ok(token) => {
                let access_token = token.access_token.clone();
                if let Ok(mut sessions) = self.sessions.write() {
                    if let Some(stored) = sessions.get_mut(id) {
                        stored.token = token;
                    }
                }
                Ok(access_token)
            }
            Err(PodcastError::Unauthenticated) => {
                self.remove(id);
                Err(PodcastError::Unauthenticated)
            }
            Err(e) => Err(e),
        }
    }
}

fn now() -> u64 {
    Utc::now().timestamp() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> Token {
        Token {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            scope: "user-library-read".to_string(),
            expires_in: 3600,
            obtained_at: Utc::now().timestamp() as u64,
        }
    }

    fn principal() -> Principal {
        Principal {
            id: "listener".to_string(),
            display_name: Some("Listener".to_string()),
        }
    }

    #[test]
    fn test_session_lifecycle() {
        let store = SessionStore::new();
        let id = store.create(token(), principal());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).map(|s| s.principal), Some(principal()));

        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_login_state_is_single_use() {
        let store = SessionStore::new();
        let (state, verifier) = store.begin_login();

        let login = store.complete_login(&state).map(|l| l.code_verifier);
        assert_eq!(login, Some(verifier));
        assert!(store.complete_login(&state).is_none());
        assert!(store.complete_login("unknown").is_none());
    }

    #[test]
    fn test_idle_session_expires() {
        let store = SessionStore::with_idle_timeout(Duration::from_secs(1800));
        let id = store.create_at(token(), principal(), 1_000);

        assert!(store.get_at(&id, 2_799).is_some());
        // the lookup above counts as activity
        assert!(store.get_at(&id, 4_598).is_some());
        assert!(store.get_at(&id, 6_398).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_new_session_prunes_idle_ones() {
        let store = SessionStore::with_idle_timeout(Duration::from_secs(60));
        let stale = store.create_at(token(), principal(), 1_000);
        let active = store.create_at(token(), principal(), 1_050);
        assert_eq!(store.len(), 2);

        let fresh = store.create_at(token(), principal(), 1_070);

        assert_eq!(store.len(), 2);
        assert!(store.get_at(&stale, 1_070).is_none());
        assert!(store.get_at(&active, 1_070).is_some());
        assert!(store.get_at(&fresh, 1_070).is_some());
    }

    #[test]
    fn test_default_idle_timeout() {
        let store = SessionStore::new();
        let id = store.create(token(), principal());
        let session = store.get(&id).expect("session");
        assert!(store.is_alive(&session, session.last_seen + DEFAULT_SESSION_IDLE_SECS - 1));
        assert!(!store.is_alive(&session, session.last_seen + DEFAULT_SESSION_IDLE_SECS));
    }

    #[test]
    fn test_session_ids_are_unique() {
        let store = SessionStore::new();
        let a = store.create(token(), principal());
        let b = store.create(token(), principal());
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }
}
