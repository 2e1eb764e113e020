use axum::{
    Router,
    extract::FromRef,
    routing::get,
};
use axum_extra::extract::cookie::Key;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::DeskStorage;
use crate::error::DeskError;
use crate::handlers::{accounts, attendees, dashboard, pages};
use crate::middleware::session::CookieSettings;
use crate::service::{Accounts, ArtifactStore, Ledger, Registry};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct DeskState {
    pub accounts: Accounts,
    pub registry: Registry,
    pub ledger: Ledger,
    key: Key,
    cookies: CookieSettings,
}

impl DeskState {
    pub fn new(storage: DeskStorage, cfg: &Config) -> Result<Self, DeskError> {
        let key = cookie_key(&cfg.secret_key)?;
        let artifacts = ArtifactStore::new(cfg.artifact_dir.clone());
        Ok(Self {
            accounts: Accounts::new(storage.clone()),
            registry: Registry::new(storage.clone(), artifacts, cfg.public_url.clone()),
            ledger: Ledger::new(storage),
            key,
            cookies: cookie_settings(cfg),
        })
    }

    pub fn cookies(&self) -> CookieSettings {
        self.cookies
    }
}

impl FromRef<DeskState> for Key {
    fn from_ref(state: &DeskState) -> Self {
        state.key.clone()
    }
}

impl FromRef<DeskState> for CookieSettings {
    fn from_ref(state: &DeskState) -> Self {
        state.cookies
    }
}

/// Shortest secret accepted for key derivation.
pub const MIN_SECRET_LEN: usize = 32;

fn cookie_key(secret: &str) -> Result<Key, DeskError> {
    if secret.is_empty() {
        warn!("QUEUEDESK_SECRET_KEY not set; sessions will not survive a restart");
        return Ok(Key::generate());
    }
    if secret.len() < MIN_SECRET_LEN {
        return Err(DeskError::Config(format!(
            "secret_key must be at least {MIN_SECRET_LEN} bytes long"
        )));
    }
    Ok(Key::derive_from(secret.as_bytes()))
}

// Browsers drop `Secure` cookies sent over plain HTTP, so the flag follows
// the scheme of the public URL.
fn cookie_settings(cfg: &Config) -> CookieSettings {
    let https = cfg.public_url.scheme() == "https";
    if !https && !cfg.insecure_cookie {
        info!(
            public_url = %cfg.public_url,
            "public_url is not https; session cookies are sent without the Secure flag"
        );
    }
    CookieSettings {
        secure: https && !cfg.insecure_cookie,
    }
}

pub fn desk_router(state: DeskState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/how-it-works", get(pages::how_it_works))
        .route("/healthz", get(pages::healthz))
        .route(
            "/register",
            get(accounts::register_page).post(accounts::register_submit),
        )
        .route("/login", get(accounts::login_page).post(accounts::login_submit))
        .route("/logout", get(accounts::logout))
        .route(
            "/dashboard",
            get(dashboard::dashboard).post(dashboard::dashboard_action),
        )
        .route(
            "/add_queue",
            get(dashboard::add_queue_page).post(dashboard::add_queue_submit),
        )
        .route("/join_details/{queue_id}", get(dashboard::join_details))
        .route("/artifacts/{queue_id}/qr.svg", get(dashboard::join_artifact))
        .route(
            "/join_queue/{queue_id}",
            get(attendees::join_page).post(attendees::join_submit),
        )
        .route(
            "/queue_status/{queue_id}/{attendee_id}",
            get(attendees::queue_status),
        )
        .route(
            "/api/queue_status/{queue_id}/{attendee_id}",
            get(attendees::queue_status_json),
        )
        .with_state(state)
}
