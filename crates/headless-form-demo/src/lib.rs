//! # headless-form-demo
//!
//! A two-step signup form served with axum and rendered with maud. The
//! browser side is plain htmx: each input posts its value, and the server
//! answers with out-of-band swaps of every error box and the step buttons.
//!
//! - [`signup`] - the form's descriptors and a render-ready snapshot
//! - [`session`] - one [`headless_form::Form`] per visitor cookie
//! - [`routes`] / [`views`] - handlers and templates
//! - [`config`] - `form-demo.toml` plus environment overrides

pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod signup;
pub mod views;

pub use config::Config;
pub use routes::{router, AppState};
