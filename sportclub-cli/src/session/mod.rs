// Session controller: the single source of truth for "who is logged in"

mod store;

use anyhow::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use store::{Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore, TOKEN_KEY};

/// Authentication state of the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(Credential),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Owns the session state and keeps the credential store in step with it
pub struct Session {
    state: SessionState,
    store: Box<dyn CredentialStore>,
}

/// The one session instance, shared between the API client and the views
pub type SharedSession = Arc<Mutex<Session>>;

impl Session {
    /// Restore the session from the store. An unreadable store starts anonymous.
    pub fn open(store: Box<dyn CredentialStore>) -> Self {
        let state = match store.get() {
            Ok(Some(credential)) => SessionState::Authenticated(credential),
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                tracing::warn!("Could not read stored credential, starting anonymous: {:#}", e);
                SessionState::Anonymous
            }
        };

        Self { state, store }
    }

    pub fn shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn credential(&self) -> Option<&Credential> {
        match &self.state {
            SessionState::Authenticated(credential) => Some(credential),
            SessionState::Anonymous => None,
        }
    }

    /// Anonymous | Authenticated -> Authenticated(credential). The state only
    /// changes once the credential is persisted.
    pub fn login(&mut self, credential: Credential) -> Result<()> {
        self.store.set(&credential)?;
        self.state = SessionState::Authenticated(credential);
        tracing::info!("Session authenticated");
        Ok(())
    }

    /// Authenticated -> Anonymous. Calling it again is a no-op.
    pub fn logout(&mut self) -> Result<()> {
        let was_authenticated = self.state.is_authenticated();
        self.state = SessionState::Anonymous;
        self.store.clear()?;
        if was_authenticated {
            tracing::info!("Session cleared");
        }
        Ok(())
    }
}

/// Lock the shared session, recovering the state if a holder panicked
pub fn lock(session: &SharedSession) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}
