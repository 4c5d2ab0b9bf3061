pub mod error;
mod login;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use std::sync::Arc;

use crate::primitives::Identity;
pub use login::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub identity: Identity,
    pub provider: LoginProvider,
}

/// Session state shared by every surface of the app.
///
/// Created empty, filled by [`AuthContext::sign_in`] at session start and emptied by
/// [`AuthContext::sign_out`]. Consumers only read from it.
#[derive(Clone)]
pub struct AuthContext {
    session: Arc<watch::Sender<Option<Session>>>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            session: Arc::new(sender),
        }
    }

    pub fn with_session(session: Session) -> Self {
        let ctx = Self::new();
        ctx.sign_in(session);
        ctx
    }

    pub fn sign_in(&self, session: Session) {
        self.session.send_replace(Some(session));
    }

    pub fn sign_out(&self) {
        self.session.send_replace(None);
    }

    pub fn session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.session
            .borrow()
            .as_ref()
            .map(|session| session.identity.clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}
