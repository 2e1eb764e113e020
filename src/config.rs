use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;
use url::Url;

/// Runtime settings, layered as: built-in defaults < `QUEUEDESK_*` env vars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    /// Secret the cookie key is derived from; at least 32 bytes, ideally
    /// random. Left empty, a random key is generated on every start.
    pub secret_key: String,
    pub listen_addr: String,
    /// Base URL printed into join links and QR codes.
    pub public_url: Url,
    /// Where per-queue QR images are written.
    pub artifact_dir: PathBuf,
    pub loglevel: String,
    /// Drop the `Secure` flag on cookies. It is only set when `public_url`
    /// is https, so this matters for TLS-terminating proxy setups.
    pub insecure_cookie: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:queuedesk.sqlite".to_string(),
            secret_key: String::new(),
            listen_addr: "0.0.0.0:8000".to_string(),
            public_url: Url::parse("http://localhost:8000/").expect("static default url"),
            artifact_dir: PathBuf::from("artifacts"),
            loglevel: "info".to_string(),
            insecure_cookie: false,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed("QUEUEDESK_"))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::load().unwrap_or_else(|e| panic!("FATAL: invalid configuration: {e}"))
});
