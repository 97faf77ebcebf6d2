//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::dev::ServiceResponse;
use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ProjectService;
use crate::domain::fixtures::FixtureData;
use crate::domain::ports::{FixtureCallerResolver, FixtureLoginService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryProjectRepository;

/// Session middleware with a throwaway key, a cookie named `session` and the
/// `Secure` flag off for plain HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set on `res`.
pub fn session_cookie(res: &ServiceResponse) -> actix_web::cookie::Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(actix_web::cookie::Cookie::into_owned)
        .expect("session cookie set")
}

/// Clock pinned to a fixed instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(
            Utc.with_ymd_and_hms(2026, 3, 2, 9, 15, 0)
                .single()
                .expect("valid timestamp"),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<chrono::Local> {
        self.0.with_timezone(&chrono::Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Handler state backed by fixture accounts and an in-memory project store.
pub fn fixture_state() -> HttpState {
    let clock = FixedClock::default();
    let fixtures = FixtureData::build(clock.utc()).expect("fixture data");
    let repository = Arc::new(InMemoryProjectRepository::with_projects(fixtures.projects));
    let service = Arc::new(ProjectService::new(repository, Arc::new(clock)));
    HttpState::new(
        Arc::new(FixtureLoginService),
        Arc::new(FixtureCallerResolver),
        service.clone(),
        service,
    )
}
