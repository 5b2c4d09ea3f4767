// File: src/session.rs
// Purpose: Per-visitor form state keyed by a session cookie, with idle eviction

use crate::signup::Signup;
use axum::http::HeaderMap;
use chrono::{DateTime, Duration, Utc};
use headless_form::Form;
use maud::Markup;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "form_session";

/// Which part of the signup flow a visitor is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Account,
    Schedule,
    Done,
}

pub struct Session {
    pub form: Form<Markup>,
    pub step: Step,
    last_seen: DateTime<Utc>,
}

impl Session {
    fn new(form: Form<Markup>) -> Self {
        Self {
            form,
            step: Step::Account,
            last_seen: Utc::now(),
        }
    }

    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }
}

/// Sessions share one signup schema; each owns its own form state.
///
/// Only [`SessionStore::with_session`] creates sessions. Sessions idle for
/// longer than the configured timeout are dropped by
/// [`SessionStore::evict_idle`] and whenever a new session is created.
#[derive(Clone)]
pub struct SessionStore {
    signup: Arc<Signup>,
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(signup: Arc<Signup>, idle_timeout: Duration) -> Self {
        Self {
            signup,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    pub fn signup(&self) -> &Signup {
        &self.signup
    }

    /// Session id from the request cookie, or a fresh one.
    ///
    /// Returns `true` alongside the id when the id was newly issued.
    pub async fn resolve(&self, headers: &HeaderMap) -> (Uuid, bool) {
        if let Some(id) = session_cookie(headers) {
            if self.sessions.read().await.contains_key(&id) {
                return (id, false);
            }
        }
        (Uuid::new_v4(), true)
    }

    /// Run `f` against the session, creating it on first use.
    ///
    /// The write lock is held for the whole call, so mutations of one
    /// session are serialized.
    pub async fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&Signup, &mut Session) -> R) -> R {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(&id) {
            evict(&mut sessions, now, self.idle_timeout);
            debug!(session = %id, "new form session");
        }
        let session = sessions
            .entry(id)
            .or_insert_with(|| Session::new(self.signup.new_form()));
        session.last_seen = now;
        f(&self.signup, session)
    }

    /// Run `f` against the caller's session without creating or touching it.
    ///
    /// Callers without a live session see a blank form on the first step.
    pub async fn peek<R>(&self, headers: &HeaderMap, f: impl FnOnce(&Signup, &Session) -> R) -> R {
        let sessions = self.sessions.read().await;
        match session_cookie(headers).and_then(|id| sessions.get(&id)) {
            Some(session) => f(&self.signup, session),
            None => f(&self.signup, &Session::new(self.signup.new_form())),
        }
    }

    /// Drop sessions idle longer than the timeout; returns how many went
    pub async fn evict_idle(&self) -> usize {
        self.evict_idle_at(Utc::now()).await
    }

    /// Spawn a task running [`SessionStore::evict_idle`] every `interval`
    pub fn start_auto_eviction(&self, interval: std::time::Duration) {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval_timer = tokio::time::interval(interval);
            loop {
                interval_timer.tick().await;
                store.evict_idle().await;
            }
        });
    }

    pub async fn evict_idle_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        evict(&mut sessions, now, self.idle_timeout)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn evict(sessions: &mut HashMap<Uuid, Session>, now: DateTime<Utc>, idle_timeout: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, session| now - session.last_seen <= idle_timeout);
    let evicted = before - sessions.len();
    if evicted > 0 {
        debug!(evicted, remaining = sessions.len(), "evicted idle form sessions");
    }
    evicted
}

/// Parse the session id out of the Cookie header
fn session_cookie(headers: &HeaderMap) -> Option<Uuid> {
    let cookie_str = headers.get("cookie")?.to_str().ok()?;
    cookie_str
        .split(';')
        .filter_map(|cookie| cookie.trim().split_once('='))
        .find(|(key, _)| *key == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

pub fn session_cookie_header(id: Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}
