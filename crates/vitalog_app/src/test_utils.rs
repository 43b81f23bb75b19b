//! In-memory collaborator fakes shared by unit and integration tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};
use vitalog_client::{
    ClientError, DailyRecord, HealthStore, IdentityProvider, Session, SessionStore, UserProfile,
    WellnessAssistant,
};

/// Identity provider that accepts a single fixed code.
pub struct FixedCodeIdentity {
    pub handle: String,
    pub code: String,
}

impl FixedCodeIdentity {
    pub fn new(handle: &str, code: &str) -> Self {
        Self {
            handle: handle.into(),
            code: code.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for FixedCodeIdentity {
    async fn send_verification(&self, _phone_number: &str) -> Result<String, ClientError> {
        Ok(self.handle.clone())
    }

    async fn confirm_verification(&self, handle: &str, code: &str) -> Result<bool, ClientError> {
        Ok(handle == self.handle && code == self.code)
    }
}

/// Session store without a backing file.
#[derive(Default)]
pub struct MemorySessionStore {
    current: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn with_session(session: Session) -> Self {
        Self {
            current: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn current(&self) -> Option<Session> {
        self.current.read().expect("lock").clone()
    }

    fn set(&self, session: Session) -> Result<(), ClientError> {
        *self.current.write().expect("lock") = Some(session);
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.current.write().expect("lock") = None;
        Ok(())
    }
}

/// Health store over hash maps. Daily puts merge by (user, date) key and
/// listings come back descending by date, like the real document API.
/// Flip `fail_reads` to simulate an unreachable backend.
#[derive(Default)]
pub struct MemoryHealthStore {
    profiles: Mutex<HashMap<String, UserProfile>>,
    days: Mutex<HashMap<(String, String), DailyRecord>>,
    pub fail_reads: AtomicBool,
}

impl MemoryHealthStore {
    fn check_reads(&self) -> Result<(), ClientError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                status: 503,
                body: "unavailable".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl HealthStore for MemoryHealthStore {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, ClientError> {
        self.check_reads()?;
        Ok(self.profiles.lock().expect("lock").get(user_id).cloned())
    }

    async fn put_profile(&self, user_id: &str, profile: &UserProfile) -> Result<(), ClientError> {
        self.profiles
            .lock()
            .expect("lock")
            .insert(user_id.to_string(), profile.clone());
        Ok(())
    }

    async fn get_daily_record(
        &self,
        user_id: &str,
        date: &str,
    ) -> Result<Option<DailyRecord>, ClientError> {
        self.check_reads()?;
        Ok(self
            .days
            .lock()
            .expect("lock")
            .get(&(user_id.to_string(), date.to_string()))
            .cloned())
    }

    async fn put_daily_record(
        &self,
        user_id: &str,
        record: &DailyRecord,
    ) -> Result<(), ClientError> {
        self.days
            .lock()
            .expect("lock")
            .insert((user_id.to_string(), record.date.clone()), record.clone());
        Ok(())
    }

    async fn list_recent_records(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<DailyRecord>, ClientError> {
        self.check_reads()?;
        let mut records: Vec<DailyRecord> = self
            .days
            .lock()
            .expect("lock")
            .iter()
            .filter(|((uid, _), _)| uid == user_id)
            .map(|(_, record)| record.clone())
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records.truncate(limit as usize);
        Ok(records)
    }
}

/// Assistant that echoes the question, prefixed, so tests can assert the
/// system instruction was attached.
pub struct EchoAssistant;

#[async_trait]
impl WellnessAssistant for EchoAssistant {
    async fn ask(&self, system_instruction: &str, question: &str) -> String {
        format!("[{}] {}", system_instruction.len(), question)
    }
}
