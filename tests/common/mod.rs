#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use std::{
    collections::BTreeMap,
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

use queuedesk::config::Config;
use queuedesk::db::DeskStorage;

/// A router over a throwaway SQLite file and artifact directory.
pub struct TestApp {
    pub app: Router,
    pub storage: DeskStorage,
    pub cfg: Config,
    db_path: PathBuf,
}

impl TestApp {
    pub async fn spawn(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let stem = format!("queuedesk-{tag}-{}-{nanos}", std::process::id());

        let mut db_path = std::env::temp_dir();
        db_path.push(format!("{stem}.sqlite"));
        let mut artifact_dir = std::env::temp_dir();
        artifact_dir.push(format!("{stem}-artifacts"));

        let cfg = Config {
            database_url: format!("sqlite:{}", db_path.display()),
            secret_key: "k".repeat(64),
            artifact_dir,
            insecure_cookie: true,
            ..Config::default()
        };

        let storage = queuedesk::db::connect(&cfg.database_url)
            .await
            .expect("failed to open test database");
        let state = queuedesk::DeskState::new(storage.clone(), &cfg).expect("state");
        let app = queuedesk::desk_router(state);

        Self {
            app,
            storage,
            cfg,
            db_path,
        }
    }

    pub fn browser(&self) -> Browser {
        Browser {
            app: self.app.clone(),
            cookies: BTreeMap::new(),
        }
    }

    pub fn artifact_path(&self, queue_id: i64) -> PathBuf {
        self.cfg.artifact_dir.join(format!("queue_{queue_id}.svg"))
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
        let _ = fs::remove_dir_all(&self.cfg.artifact_dir);
    }
}

/// Minimal cookie-keeping client; one per simulated browser.
pub struct Browser {
    app: Router,
    cookies: BTreeMap<String, String>,
}

pub struct Reply {
    pub status: StatusCode,
    pub location: Option<String>,
    pub set_cookies: Vec<String>,
    pub body: String,
}

impl Reply {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body was not json")
    }
}

impl Browser {
    /// Keep the cookies but talk to another router, e.g. after a restart.
    pub fn rebind(&mut self, app: Router) {
        self.app = app;
    }

    pub async fn get(&mut self, uri: &str) -> Reply {
        let req = self
            .request("GET", uri)
            .body(Body::empty())
            .expect("failed to build request");
        self.send(req).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> Reply {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let req = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("failed to build request");
        self.send(req).await
    }

    /// Follow a redirect reply with a GET, as a browser would.
    pub async fn follow(&mut self, reply: &Reply) -> Reply {
        let location = reply.location.clone().expect("reply is not a redirect");
        self.get(&location).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if !self.cookies.is_empty() {
            let header_value = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, header_value);
        }
        builder
    }

    async fn send(&mut self, req: Request<Body>) -> Reply {
        let resp = self.app.clone().oneshot(req).await.expect("request failed");
        self.store_cookies(&resp);

        let status = resp.status();
        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let set_cookies = resp
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let body = String::from_utf8(bytes.to_vec()).expect("response body was not utf-8");
        Reply {
            status,
            location,
            set_cookies,
            body,
        }
    }

    fn store_cookies(&mut self, resp: &Response<Body>) {
        for value in resp.headers().get_all(header::SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            let pair = raw.split(';').next().unwrap_or_default();
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            if value.is_empty() {
                self.cookies.remove(name.trim());
            } else {
                self.cookies
                    .insert(name.trim().to_string(), value.trim().to_string());
            }
        }
    }
}

pub async fn register(browser: &mut Browser, business: &str, email: &str, password: &str) -> Reply {
    browser
        .post_form(
            "/register",
            &[
                ("business_name", business),
                ("email", email),
                ("phone_number", "555-0100"),
                ("password", password),
                ("confirm", password),
            ],
        )
        .await
}

pub async fn login(browser: &mut Browser, email: &str, password: &str) -> Reply {
    browser
        .post_form(
            "/login",
            &[("user_email", email), ("user_password", password)],
        )
        .await
}

/// Register, log in and create one queue. Returns the queue id.
pub async fn client_with_queue(browser: &mut Browser, email: &str, queue_name: &str) -> i64 {
    let reply = register(browser, "Acme", email, "pw123").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    let reply = login(browser, email, "pw123").await;
    assert_eq!(reply.location.as_deref(), Some("/dashboard"));

    let reply = browser
        .post_form(
            "/add_queue",
            &[
                ("queue_name", queue_name),
                ("purpose", "Walk-ins"),
                ("instructions", "Wait near the door"),
            ],
        )
        .await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    let location = reply.location.expect("redirect after add_queue");
    location
        .strip_prefix("/join_details/")
        .and_then(|id| id.parse().ok())
        .expect("join_details location")
}

/// Join as a fresh attendee. Returns the attendee id.
pub async fn join(browser: &mut Browser, queue_id: i64, first: &str, last: &str) -> i64 {
    let reply = browser
        .post_form(
            &format!("/join_queue/{queue_id}"),
            &[
                ("first_name", first),
                ("last_name", last),
                ("account_number", "12345"),
                ("service_requested", "Deposit"),
            ],
        )
        .await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER, "join failed: {}", reply.body);
    let location = reply.location.expect("redirect after join");
    let prefix = format!("/queue_status/{queue_id}/");
    location
        .strip_prefix(&prefix)
        .and_then(|id| id.parse().ok())
        .expect("queue_status location")
}

pub async fn position(browser: &mut Browser, queue_id: i64, attendee_id: i64) -> serde_json::Value {
    browser
        .get(&format!("/api/queue_status/{queue_id}/{attendee_id}"))
        .await
        .json()
}
