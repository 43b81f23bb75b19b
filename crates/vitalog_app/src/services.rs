//! Application services orchestrating the collaborators.
//!
//! Reads degrade to defaults when unauthenticated or when the store is
//! unreachable, so display surfaces always have something to render.
//! Writes propagate their errors for a user-initiated retry.

use std::sync::Arc;

use crate::domains::record::{Metric, apply_delta, empty_record, today_iso, validate_profile};
use crate::domains::trends::recent_window;
use crate::error::{AppError, AppResult};
use crate::prompts;
use crate::session::SessionGate;
use vitalog_client::{
    DailyRecord, HealthStore, IdentityProvider, Session, SessionStore, UserProfile,
    WellnessAssistant,
};

/// Default history depth, matching the store listing used by the history
/// and analytics screens.
pub const HISTORY_LIMIT: u32 = 30;

/// Login, logout, and profile lifecycle.
#[derive(Clone)]
pub struct AccountService {
    identity: Arc<dyn IdentityProvider>,
    sessions: Arc<dyn SessionStore>,
    store: Arc<dyn HealthStore>,
    gate: Arc<SessionGate>,
}

impl AccountService {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        sessions: Arc<dyn SessionStore>,
        store: Arc<dyn HealthStore>,
        gate: Arc<SessionGate>,
    ) -> Self {
        Self {
            identity,
            sessions,
            store,
            gate,
        }
    }

    /// Request an OTP. Returns the verification handle to confirm against.
    pub async fn send_otp(&self, phone_number: &str) -> AppResult<String> {
        Ok(self.identity.send_verification(phone_number).await?)
    }

    /// Confirm an OTP. On success the session is written and the gate
    /// re-derived; a wrong code is `Ok(false)`, not an error.
    pub async fn verify_otp(
        &self,
        handle: &str,
        code: &str,
        phone_number: &str,
    ) -> AppResult<bool> {
        let verified = self.identity.confirm_verification(handle, code).await?;
        if verified {
            self.sessions.set(Session::for_phone(phone_number))?;
            tracing::info!("phone verified; session created");
        }
        self.gate.evaluate().await;
        Ok(verified)
    }

    pub async fn logout(&self) -> AppResult<()> {
        self.sessions.clear()?;
        self.gate.evaluate().await;
        Ok(())
    }

    /// Validate and persist the full profile, then re-derive the gate so
    /// onboarding completion is observed immediately.
    pub async fn save_profile(&self, profile: &UserProfile) -> AppResult<()> {
        validate_profile(profile)?;
        let session = self.sessions.current().ok_or(AppError::NotAuthenticated)?;
        self.store.put_profile(&session.uid, profile).await?;
        self.gate.evaluate().await;
        Ok(())
    }

    /// The stored profile, or `None` when logged out or unreachable.
    pub async fn profile(&self) -> Option<UserProfile> {
        let session = self.sessions.current()?;
        match self.store.get_profile(&session.uid).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, "profile read failed; showing none");
                None
            }
        }
    }
}

/// Daily metric logging and history.
#[derive(Clone)]
pub struct TrackerService {
    sessions: Arc<dyn SessionStore>,
    store: Arc<dyn HealthStore>,
}

impl TrackerService {
    pub fn new(sessions: Arc<dyn SessionStore>, store: Arc<dyn HealthStore>) -> Self {
        Self { sessions, store }
    }

    fn user_id(&self) -> Option<String> {
        self.sessions.current().map(|s| s.uid)
    }

    /// Today's record, created lazily with all-zero defaults. Store
    /// failures and missing sessions both degrade to the default.
    pub async fn today(&self) -> DailyRecord {
        let date = today_iso();
        let Some(uid) = self.user_id() else {
            return empty_record(&date);
        };
        match self.store.get_daily_record(&uid, &date).await {
            Ok(Some(record)) => record,
            Ok(None) => empty_record(&date),
            Err(e) => {
                tracing::warn!(error = %e, "daily record read failed; showing defaults");
                empty_record(&date)
            }
        }
    }

    /// Apply a signed delta to today's record and persist it. Without a
    /// session the updated record is returned but not persisted.
    pub async fn log_delta(&self, metric: Metric, delta: f64) -> AppResult<DailyRecord> {
        let updated = apply_delta(&self.today().await, metric, delta);
        match self.user_id() {
            Some(uid) => self.store.put_daily_record(&uid, &updated).await?,
            None => tracing::warn!(metric = metric.name(), "no session; change not persisted"),
        }
        Ok(updated)
    }

    /// Most recent records first. Degrades to empty.
    pub async fn history(&self, limit: u32) -> Vec<DailyRecord> {
        let Some(uid) = self.user_id() else {
            return Vec::new();
        };
        match self.store.list_recent_records(&uid, limit).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "history read failed; showing empty");
                Vec::new()
            }
        }
    }

    /// The last `n` logged days, oldest first, for chart rendering.
    pub async fn trend_window(&self, n: usize) -> Vec<DailyRecord> {
        recent_window(&self.history(HISTORY_LIMIT).await, n)
    }
}

/// Best-effort wellness chat with the fixed topic boundary.
#[derive(Clone)]
pub struct ChatService {
    assistant: Arc<dyn WellnessAssistant>,
}

impl ChatService {
    pub fn new(assistant: Arc<dyn WellnessAssistant>) -> Self {
        Self { assistant }
    }

    pub async fn ask(&self, question: &str) -> String {
        self.assistant
            .ask(prompts::WELLNESS_SYSTEM_INSTRUCTION, question)
            .await
    }
}
