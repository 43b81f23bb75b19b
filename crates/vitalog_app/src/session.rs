//! Session gate: authentication state derivation and the routing table.
//!
//! The gate is the single writer of the process-wide session state. Every
//! login, logout, and profile save is followed by a full `evaluate()` —
//! a fresh derivation from the collaborators, never an incremental patch,
//! so profile existence is re-checked across the login/logout boundary.

use std::sync::{Arc, RwLock};
use vitalog_client::{HealthStore, SessionStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Before the first evaluation after process start.
    Unknown,
    LoggedOut,
    LoggedInNoProfile,
    LoggedInWithProfile,
}

/// Application areas the presentation layer can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Area {
    Login,
    Onboarding,
    Dashboard,
    Tracker,
    AskAi,
    Profile,
    History,
    Analytics,
}

impl Area {
    fn is_public(self) -> bool {
        matches!(self, Area::Login)
    }

    fn is_onboarding(self) -> bool {
        matches!(self, Area::Onboarding)
    }
}

/// Routing decision for a requested area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Granted,
    RedirectToLogin,
    RedirectToOnboarding,
    RedirectToMain,
    /// State not derived yet; the caller renders its loading surface.
    Pending,
}

/// The routing decision table. Pure; the gate's `route` method applies it
/// to the current state.
pub fn route(state: SessionState, area: Area) -> Access {
    match state {
        SessionState::Unknown => Access::Pending,
        SessionState::LoggedOut => {
            if area.is_public() {
                Access::Granted
            } else {
                Access::RedirectToLogin
            }
        }
        SessionState::LoggedInNoProfile => {
            if area.is_public() {
                Access::RedirectToMain
            } else if area.is_onboarding() {
                Access::Granted
            } else {
                Access::RedirectToOnboarding
            }
        }
        SessionState::LoggedInWithProfile => {
            if area.is_public() {
                Access::RedirectToMain
            } else {
                Access::Granted
            }
        }
    }
}

pub struct SessionGate {
    sessions: Arc<dyn SessionStore>,
    store: Arc<dyn HealthStore>,
    state: RwLock<SessionState>,
}

impl SessionGate {
    pub fn new(sessions: Arc<dyn SessionStore>, store: Arc<dyn HealthStore>) -> Self {
        Self {
            sessions,
            store,
            state: RwLock::new(SessionState::Unknown),
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.read().expect("gate lock")
    }

    /// Derive the state from scratch. No session wins regardless of store
    /// contents; a store read failure is treated as "no profile yet"
    /// (fail-closed) rather than a crash.
    pub async fn evaluate(&self) -> SessionState {
        let next = match self.sessions.current() {
            None => SessionState::LoggedOut,
            Some(session) => match self.store.get_profile(&session.uid).await {
                Ok(Some(_)) => SessionState::LoggedInWithProfile,
                Ok(None) => SessionState::LoggedInNoProfile,
                Err(e) => {
                    tracing::warn!(uid = %session.uid, error = %e, "profile lookup failed; assuming absent");
                    SessionState::LoggedInNoProfile
                }
            },
        };
        *self.state.write().expect("gate lock") = next;
        next
    }

    pub fn route(&self, area: Area) -> Access {
        route(self.state(), area)
    }
}
