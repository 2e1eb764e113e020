use axum::response::{Html, IntoResponse};
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::middleware::Flash;
use crate::middleware::session::current_client;
use crate::views;

/// GET / -> landing page.
pub async fn index(jar: PrivateCookieJar) -> impl IntoResponse {
    let signed_in = current_client(&jar).is_some();
    let (jar, flash) = Flash::take(jar);
    (jar, Html(views::home_page(signed_in, flash.as_ref())))
}

/// GET /how-it-works -> static explainer.
pub async fn how_it_works(jar: PrivateCookieJar) -> Html<String> {
    Html(views::how_it_works_page(current_client(&jar).is_some()))
}

/// GET /healthz -> liveness check.
pub async fn healthz() -> &'static str {
    "ok"
}
