// File: src/main.rs
// Purpose: Entry point for the signup form demo server

use anyhow::{Context, Result};
use chrono::Local;
use headless_form_demo::session::SessionStore;
use headless_form_demo::signup::Signup;
use headless_form_demo::{router, AppState, Config};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let (config, config_error) = match Config::load_default() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    let config = config.with_env_overrides()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .context("Invalid logging filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(err) = config_error {
        warn!("Failed to load form-demo.toml, using defaults: {:#}", err);
    }

    let signup = Signup::build(&config.form, Local::now().date_naive())?;
    let sessions = SessionStore::new(Arc::new(signup), config.session.idle_timeout());
    sessions.start_auto_eviction(config.session.sweep_interval());
    let state = AppState { sessions };
    let app = router(state);

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Form demo running at http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
