use std::sync::Arc;
use std::sync::atomic::Ordering;

use vitalog_app::session::{Access, Area, SessionGate, SessionState};
use vitalog_app::test_utils::{MemoryHealthStore, MemorySessionStore};
use vitalog_client::{Gender, HealthStore, Session, SessionStore, UserProfile};

fn profile() -> UserProfile {
    UserProfile {
        name: None,
        age: 30,
        height: 165.0,
        weight: 60.0,
        blood_group: "B+".into(),
        gender: Gender::Female,
    }
}

#[tokio::test]
async fn no_session_resolves_logged_out_regardless_of_store() {
    let store = Arc::new(MemoryHealthStore::default());
    store
        .put_profile("user_1", &profile())
        .await
        .expect("seed profile");

    let gate = SessionGate::new(Arc::new(MemorySessionStore::default()), store);
    assert_eq!(gate.state(), SessionState::Unknown);
    assert_eq!(gate.evaluate().await, SessionState::LoggedOut);
}

#[tokio::test]
async fn session_without_profile_needs_onboarding() {
    let sessions = Arc::new(MemorySessionStore::with_session(Session::for_phone("1")));
    let gate = SessionGate::new(sessions, Arc::new(MemoryHealthStore::default()));
    assert_eq!(gate.evaluate().await, SessionState::LoggedInNoProfile);
    assert_eq!(gate.route(Area::Dashboard), Access::RedirectToOnboarding);
    assert_eq!(gate.route(Area::Onboarding), Access::Granted);
}

#[tokio::test]
async fn session_with_profile_unlocks_the_app() {
    let session = Session::for_phone("9876543210");
    let store = Arc::new(MemoryHealthStore::default());
    store
        .put_profile(&session.uid, &profile())
        .await
        .expect("seed profile");

    let gate = SessionGate::new(Arc::new(MemorySessionStore::with_session(session)), store);
    assert_eq!(gate.evaluate().await, SessionState::LoggedInWithProfile);
    assert_eq!(gate.route(Area::Dashboard), Access::Granted);
    assert_eq!(gate.route(Area::Login), Access::RedirectToMain);
}

#[tokio::test]
async fn store_failure_fails_closed_to_no_profile() {
    let session = Session::for_phone("9876543210");
    let store = Arc::new(MemoryHealthStore::default());
    store
        .put_profile(&session.uid, &profile())
        .await
        .expect("seed profile");
    store.fail_reads.store(true, Ordering::SeqCst);

    let gate = SessionGate::new(Arc::new(MemorySessionStore::with_session(session)), store);
    assert_eq!(gate.evaluate().await, SessionState::LoggedInNoProfile);
}

#[tokio::test]
async fn logout_is_observed_on_the_next_evaluation() {
    let sessions = Arc::new(MemorySessionStore::with_session(Session::for_phone("1")));
    let gate = SessionGate::new(sessions.clone(), Arc::new(MemoryHealthStore::default()));
    assert_eq!(gate.evaluate().await, SessionState::LoggedInNoProfile);

    sessions.clear().expect("clear");
    assert_eq!(gate.evaluate().await, SessionState::LoggedOut);
    assert_eq!(gate.route(Area::History), Access::RedirectToLogin);
}
