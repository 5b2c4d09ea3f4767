// File: src/views.rs
// Purpose: Maud templates for the signup flow

use crate::session::Step;
use crate::signup::{FieldSnapshot, SignupSnapshot};
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { background: #000; color: #fff; font-family: system-ui, sans-serif; }
#signup { max-width: 28rem; margin: 8rem auto 0; border: 1px solid #171717; padding: 1rem; border-radius: .375rem; }
.field { border: 1px solid #171717; border-radius: .375rem; overflow: hidden; margin-bottom: 1rem; }
.field input { width: 100%; padding: .5rem .75rem; background: #000; color: #fff; border: 0; outline: none; }
.errors { padding: .5rem; background: #171717; }
.bg-red-500 { background: #ef4444; }
.actions { text-align: right; }
button { background: #1d4ed8; color: #fff; border: 0; padding: .5rem .75rem; border-radius: .375rem; }
button:disabled { background: #737373; }
button.link { background: none; }
.secret { color: #000; }
.secret:hover { color: #fff; }
"#;

/// Full HTML document
pub fn page(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "headless-form demo" }
                script src="https://unpkg.com/htmx.org@1.9.12" {}
                style { (PreEscaped(STYLE)) }
            }
            body { (body) }
        }
    }
}

/// The form container for the visitor's current step
pub fn signup(step: Step, snapshot: &SignupSnapshot) -> Markup {
    html! {
        form id="signup" hx-post="/submit" hx-target="this" hx-swap="outerHTML" {
            h1 { "📝 Form" }
            @match step {
                Step::Account => (account_step(snapshot)),
                Step::Schedule => (schedule_step(snapshot)),
                Step::Done => (done(snapshot)),
            }
        }
    }
}

fn account_step(snapshot: &SignupSnapshot) -> Markup {
    html! {
        (text_input("Username", "text", "username", &snapshot.username))
        (text_input("Password", "password", "password", &snapshot.password))
        (text_input("Confirm password", "password", "confirm password", &snapshot.password_again))
        (actions(Step::Account, snapshot, false))
    }
}

fn schedule_step(snapshot: &SignupSnapshot) -> Markup {
    html! {
        (text_input("Choose starting date", "date", "", &snapshot.starting_date))
        (actions(Step::Schedule, snapshot, false))
    }
}

fn done(snapshot: &SignupSnapshot) -> Markup {
    html! {
        p { "Username: " (snapshot.username_value) }
        p { "Password (hover): [" span.secret { (snapshot.password_value) } "]" }
        p {
            "Starting date: "
            @match snapshot.start {
                Some(date) => (date.format("%Y-%m-%dT00:00:00.000Z")),
                None => "-",
            }
        }
        div.actions {
            button type="button" hx-post="/reset" hx-target="#signup" hx-swap="outerHTML" { "Start again" }
        }
    }
}

fn text_input(label: &str, input_type: &str, placeholder: &str, field: &FieldSnapshot) -> Markup {
    html! {
        h5 { (label) }
        div.field {
            input
                type=(input_type)
                name="value"
                placeholder=(placeholder)
                value=(field.source)
                hx-post={ "/fields/" (field.name) }
                hx-trigger="input changed delay:150ms"
                hx-swap="none";
            (errors(field, false))
        }
    }
}

/// Error box for one field; out-of-band when sent as an update
pub fn errors(field: &FieldSnapshot, out_of_band: bool) -> Markup {
    html! {
        div.errors id={ "errors-" (field.name) } hx-swap-oob=[out_of_band.then_some("true")] {
            @for error in &field.errors {
                div { "❗" (error) }
            }
            @if field.errors.is_empty() {
                "✅"
            }
        }
    }
}

/// Navigation buttons for a step
pub fn actions(step: Step, snapshot: &SignupSnapshot, out_of_band: bool) -> Markup {
    html! {
        div.actions id="actions" hx-swap-oob=[out_of_band.then_some("true")] {
            @match step {
                Step::Account => {
                    button type="button" hx-post="/next" hx-target="#signup" hx-swap="outerHTML"
                        disabled[!snapshot.account_ready] { "Next" }
                }
                Step::Schedule => {
                    button.link type="button" hx-post="/prev" hx-target="#signup" hx-swap="outerHTML" { "Prev" }
                    " "
                    button type="submit" disabled[!snapshot.satisfied] { "Submit" }
                }
                Step::Done => {}
            }
        }
    }
}

/// Out-of-band fragment sent after a field edit: every error box plus the
/// step's buttons, since cross-field rules can change any of them
pub fn field_updates(step: Step, snapshot: &SignupSnapshot) -> Markup {
    html! {
        @for field in snapshot.fields() {
            (errors(field, true))
        }
        (actions(step, snapshot, true))
    }
}
