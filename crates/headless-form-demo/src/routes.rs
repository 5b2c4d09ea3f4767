// File: src/routes.rs
// Purpose: HTTP handlers driving the signup form through htmx requests

use crate::error::AppError;
use crate::session::{session_cookie_header, Session, SessionStore, Step};
use crate::signup::{Signup, SignupSnapshot};
use crate::views;
use axum::{
    extract::{Path, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form as FormBody, Json, Router,
};
use maud::Markup;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/fields/:name", post(field_handler))
        .route("/next", post(next_handler))
        .route("/prev", post(prev_handler))
        .route("/submit", post(submit_handler))
        .route("/reset", post(reset_handler))
        .route("/status", get(status_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Body of an input's htmx request
#[derive(Debug, Deserialize)]
pub struct FieldInput {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub step: Step,
    pub satisfied: bool,
    pub account_ready: bool,
    pub fields: Vec<FieldStatus>,
}

#[derive(Debug, Serialize)]
pub struct FieldStatus {
    pub name: String,
    pub source: String,
    pub satisfied: bool,
    pub errors: Vec<String>,
}

async fn index_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    in_session(&state.sessions, &headers, |signup, session| {
        let snapshot = snapshot(signup, session)?;
        Ok(html(views::page(views::signup(session.step, &snapshot))))
    })
    .await
}

async fn field_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
    FormBody(input): FormBody<FieldInput>,
) -> Response {
    in_session(&state.sessions, &headers, move |signup, session| {
        session.form.set_by_name(&name, input.value)?;
        let snapshot = snapshot(signup, session)?;
        Ok(html(views::field_updates(session.step, &snapshot)))
    })
    .await
}

async fn next_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    in_session(&state.sessions, &headers, |signup, session| {
        let snapshot = snapshot(signup, session)?;
        if snapshot.account_ready {
            move_to(session, Step::Schedule);
        }
        Ok(html(views::signup(session.step, &snapshot)))
    })
    .await
}

async fn prev_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    in_session(&state.sessions, &headers, |signup, session| {
        if session.step == Step::Schedule {
            move_to(session, Step::Account);
        }
        let snapshot = snapshot(signup, session)?;
        Ok(html(views::signup(session.step, &snapshot)))
    })
    .await
}

/// Enter on the first step acts as "Next"; the form only completes from
/// the second step once every field is satisfied
async fn submit_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    in_session(&state.sessions, &headers, |signup, session| {
        let snapshot = snapshot(signup, session)?;
        let step = session.step;
        match step {
            Step::Account if snapshot.account_ready => move_to(session, Step::Schedule),
            Step::Schedule if snapshot.satisfied => move_to(session, Step::Done),
            _ => {}
        }
        Ok(html(views::signup(session.step, &snapshot)))
    })
    .await
}

async fn reset_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    in_session(&state.sessions, &headers, |signup, session| {
        session.form.reset_fields();
        move_to(session, Step::Account);
        let snapshot = snapshot(signup, session)?;
        Ok(html(views::signup(session.step, &snapshot)))
    })
    .await
}

/// Read-only: a visitor without a live session gets the blank form's status
/// and no session is created
async fn status_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let reply = state.sessions.peek(&headers, |signup, session| -> Result<Response, AppError> {
        let snapshot = snapshot(signup, session)?;
        let fields = snapshot
            .fields()
            .into_iter()
            .map(|field| FieldStatus {
                name: field.name.clone(),
                source: field.source.clone(),
                satisfied: field.satisfied(),
                errors: field.error_html(),
            })
            .collect();
        Ok(Json(StatusBody {
            step: session.step,
            satisfied: snapshot.satisfied,
            account_ready: snapshot.account_ready,
            fields,
        })
        .into_response())
    });
    reply.await.unwrap_or_else(IntoResponse::into_response)
}

/// Run `action` against the caller's session, creating it and issuing a
/// cookie when the session is new
async fn in_session<F>(store: &SessionStore, headers: &HeaderMap, action: F) -> Response
where
    F: FnOnce(&Signup, &mut Session) -> Result<Response, AppError>,
{
    let (id, fresh) = store.resolve(headers).await;
    let mut response = store
        .with_session(id, action)
        .await
        .unwrap_or_else(IntoResponse::into_response);

    if fresh {
        if let Ok(cookie) = HeaderValue::from_str(&session_cookie_header(id)) {
            response.headers_mut().append(SET_COOKIE, cookie);
        }
    }
    response
}

fn snapshot(signup: &Signup, session: &Session) -> Result<SignupSnapshot, AppError> {
    Ok(signup.snapshot(&session.form.result())?)
}

fn move_to(session: &mut Session, step: Step) {
    debug!(from = ?session.step, to = ?step, "step change");
    session.step = step;
}

fn html(markup: Markup) -> Response {
    Html(markup.into_string()).into_response()
}
