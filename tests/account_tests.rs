mod common;

use axum::http::StatusCode;
use common::{TestApp, login, register};
use queuedesk::config::Config;
use queuedesk::{DeskError, DeskState, desk_router};
use url::Url;

#[tokio::test]
async fn registration_stores_a_verifiable_hash() {
    let app = TestApp::spawn("register").await;
    let mut browser = app.browser();

    let reply = register(&mut browser, "Acme", "A@A.com", "pw123").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/"));
    let home = browser.follow(&reply).await;
    assert!(home.body.contains("Registration successful"));

    let client = app
        .storage
        .find_client_by_email("a@a.com")
        .await
        .unwrap()
        .expect("client stored under lower-cased email");
    assert_eq!(client.business_name, "Acme");
    assert_ne!(client.password_hash, "pw123");
    assert!(
        queuedesk::service::accounts::verify_password("pw123".to_string(), client.password_hash)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn registration_errors_redisplay_the_form() {
    let app = TestApp::spawn("register-invalid").await;
    let mut browser = app.browser();

    let reply = browser
        .post_form(
            "/register",
            &[
                ("business_name", "Acme"),
                ("email", "a@a.com"),
                ("phone_number", "555"),
                ("password", "pw123"),
                ("confirm", "pw999"),
            ],
        )
        .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(reply.body.contains("Passwords do not match"));
    assert!(reply.body.contains("value=\"Acme\""));
    assert!(app.storage.find_client_by_email("a@a.com").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = TestApp::spawn("register-dup").await;
    let mut browser = app.browser();

    register(&mut browser, "Acme", "a@a.com", "pw123").await;
    let reply = register(&mut browser, "Acme Two", "A@a.com ", "pw456").await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(reply.body.contains("already exists"));
}

#[tokio::test]
async fn login_failures_have_distinct_messages() {
    let app = TestApp::spawn("login-fail").await;
    let mut browser = app.browser();
    register(&mut browser, "Acme", "a@a.com", "pw123").await;

    let unknown = login(&mut browser, "nobody@a.com", "pw123").await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert!(unknown.body.contains("Client with this Login details does not exist"));

    let wrong = login(&mut browser, "a@a.com", "nope").await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert!(wrong.body.contains("Invalid Login Credentials"));

    let dashboard = browser.get("/dashboard").await;
    assert_eq!(dashboard.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn login_then_logout_round_trip() {
    let app = TestApp::spawn("login-logout").await;
    let mut browser = app.browser();
    register(&mut browser, "Acme", "a@a.com", "pw123").await;

    let reply = login(&mut browser, "a@a.com", "pw123").await;
    assert_eq!(reply.location.as_deref(), Some("/dashboard"));
    let dashboard = browser.follow(&reply).await;
    assert_eq!(dashboard.status, StatusCode::OK);
    assert!(dashboard.body.contains("Successfully logged in"));
    assert!(dashboard.body.contains("No queues yet"));

    let reply = browser.get("/logout").await;
    assert_eq!(reply.location.as_deref(), Some("/"));
    let home = browser.follow(&reply).await;
    assert!(home.body.contains("You are now logged out"));

    let dashboard = browser.get("/dashboard").await;
    assert_eq!(dashboard.status, StatusCode::SEE_OTHER);
    assert_eq!(dashboard.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn protected_pages_redirect_to_login_with_notice() {
    let app = TestApp::spawn("protected").await;
    let mut browser = app.browser();

    for uri in ["/dashboard", "/add_queue", "/join_details/1", "/artifacts/1/qr.svg"] {
        let reply = browser.get(uri).await;
        assert_eq!(reply.status, StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(reply.location.as_deref(), Some("/login"), "{uri}");
    }

    let reply = browser
        .post_form("/add_queue", &[("queue_name", "Sneaky")])
        .await;
    assert_eq!(reply.location.as_deref(), Some("/login"));

    let page = browser.get("/login").await;
    assert!(page.body.contains("Unauthorized, please login"));
}

#[tokio::test]
async fn static_pages_render() {
    let app = TestApp::spawn("static").await;
    let mut browser = app.browser();

    let home = browser.get("/").await;
    assert_eq!(home.status, StatusCode::OK);
    let how = browser.get("/how-it-works").await;
    assert_eq!(how.status, StatusCode::OK);
    assert!(how.body.contains("How it works"));
    let health = browser.get("/healthz").await;
    assert_eq!(health.body, "ok");
}

#[tokio::test]
async fn passphrase_secret_keeps_sessions_across_restarts() {
    let mut app = TestApp::spawn("restart").await;
    app.cfg.secret_key = "correct horse battery staple on the front desk".to_string();
    let state = DeskState::new(app.storage.clone(), &app.cfg).unwrap();
    let mut browser = app.browser();
    browser.rebind(desk_router(state));

    register(&mut browser, "Acme", "a@a.com", "pw123").await;
    let reply = login(&mut browser, "a@a.com", "pw123").await;
    assert_eq!(reply.location.as_deref(), Some("/dashboard"));

    // A fresh process derives the same key from the same secret.
    let restarted = DeskState::new(app.storage.clone(), &app.cfg).unwrap();
    browser.rebind(desk_router(restarted));
    let dashboard = browser.get("/dashboard").await;
    assert_eq!(dashboard.status, StatusCode::OK);
    assert!(dashboard.body.contains("Acme"));
}

#[tokio::test]
async fn short_secret_is_a_config_error() {
    let app = TestApp::spawn("short-secret").await;
    let cfg = Config {
        secret_key: "hunter2".to_string(),
        ..app.cfg.clone()
    };
    let err = DeskState::new(app.storage.clone(), &cfg).err().unwrap();
    assert!(matches!(err, DeskError::Config(_)));
}

#[tokio::test]
async fn secure_cookie_flag_follows_public_url_scheme() {
    let app = TestApp::spawn("cookie-scheme").await;
    let plain = Config {
        insecure_cookie: false,
        ..app.cfg.clone()
    };
    let tls = Config {
        public_url: Url::parse("https://queue.example/").unwrap(),
        ..plain.clone()
    };
    let tls_opt_out = Config {
        insecure_cookie: true,
        ..tls.clone()
    };

    let state = DeskState::new(app.storage.clone(), &plain).unwrap();
    assert!(!state.cookies().secure);
    assert!(DeskState::new(app.storage.clone(), &tls).unwrap().cookies().secure);
    assert!(!DeskState::new(app.storage.clone(), &tls_opt_out).unwrap().cookies().secure);

    // Default http setup: the session cookie must be usable without TLS.
    let mut browser = app.browser();
    browser.rebind(desk_router(state));
    register(&mut browser, "Acme", "a@a.com", "pw123").await;
    let reply = login(&mut browser, "a@a.com", "pw123").await;
    let session = reply
        .set_cookies
        .iter()
        .find(|c| c.starts_with("queuedesk_session="))
        .expect("session cookie");
    assert!(!session.contains("; Secure"));
    assert_eq!(browser.get("/dashboard").await.status, StatusCode::OK);
}
