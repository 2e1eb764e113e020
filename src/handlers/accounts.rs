use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::error::DeskError;
use crate::middleware::{Flash, sign_in, sign_out};
use crate::router::DeskState;
use crate::types::{LoginForm, RegistrationForm};
use crate::views;

/// GET /register -> empty signup form.
pub async fn register_page(jar: PrivateCookieJar) -> impl IntoResponse {
    let (jar, flash) = Flash::take(jar);
    (
        jar,
        Html(views::register_page(
            &RegistrationForm::default(),
            None,
            flash.as_ref(),
        )),
    )
}

/// POST /register -> create the client, or redisplay the form with the error.
pub async fn register_submit(
    State(state): State<DeskState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegistrationForm>,
) -> Response {
    match state.accounts.register(form.clone()).await {
        Ok(_) => {
            let jar = Flash::success(
                "Registration successful, you can login to create your first queue!",
            )
            .push(jar, state.cookies());
            (jar, Redirect::to("/")).into_response()
        }
        Err(DeskError::Validation(msg)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::register_page(&form, Some(&msg), None)),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

/// GET /login
pub async fn login_page(jar: PrivateCookieJar) -> impl IntoResponse {
    let (jar, flash) = Flash::take(jar);
    (jar, Html(views::login_page("", None, flash.as_ref())))
}

/// POST /login -> set the session cookie on success.
pub async fn login_submit(
    State(state): State<DeskState>,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match state
        .accounts
        .authenticate(&form.user_email, &form.user_password)
        .await
    {
        Ok(session) => {
            let jar = sign_in(jar, &session, state.cookies());
            let jar = Flash::success("Successfully logged in").push(jar, state.cookies());
            (jar, Redirect::to("/dashboard")).into_response()
        }
        Err(err @ (DeskError::UnknownEmail | DeskError::InvalidCredentials)) => (
            StatusCode::UNAUTHORIZED,
            Html(views::login_page(&form.user_email, Some(&err.to_string()), None)),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

/// GET /logout
pub async fn logout(State(state): State<DeskState>, jar: PrivateCookieJar) -> impl IntoResponse {
    let jar = sign_out(jar);
    let jar = Flash::info("You are now logged out").push(jar, state.cookies());
    (jar, Redirect::to("/"))
}
