//! Vitalog application core: derived-indicator calculators, the daily
//! record model, the session gate with its routing table, and the
//! services that tie the collaborators together.

use std::sync::Arc;

use vitalog_client::{HealthStore, IdentityProvider, SessionStore, WellnessAssistant};

pub mod domains;
pub mod error;
pub mod prompts;
pub mod services;
pub mod session;
pub mod test_utils;

pub use error::{AppError, AppResult};
pub use services::{AccountService, ChatService, TrackerService};
pub use session::{Access, Area, SessionGate, SessionState};

/// Fully wired application: one gate, one service per concern, shared
/// collaborator handles.
pub struct VitalogApp {
    pub gate: Arc<SessionGate>,
    pub account: AccountService,
    pub tracker: TrackerService,
    pub chat: ChatService,
}

impl VitalogApp {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn HealthStore>,
        sessions: Arc<dyn SessionStore>,
        assistant: Arc<dyn WellnessAssistant>,
    ) -> Self {
        let gate = Arc::new(SessionGate::new(sessions.clone(), store.clone()));
        Self {
            account: AccountService::new(identity, sessions.clone(), store.clone(), gate.clone()),
            tracker: TrackerService::new(sessions, store),
            chat: ChatService::new(assistant),
            gate,
        }
    }
}
