//! HTTP handlers for the password gate.
//!
//! Translates requests into `LoginRequest`s, runs the Authenticator, and turns
//! the resulting `Action` into an axum response.

use std::sync::Arc;

use askama::Template;
use axum::Form;
use axum::Router;
use axum::extract::rejection::FormRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use log::debug;
use serde::Deserialize;

use super::cookie::SessionCookies;
use crate::config::GateConfig;
use crate::error::GateError;
use crate::login::page::url_escape;
use crate::login::{Action, Authenticator, LoginRequest};

/// Shared, immutable per-process state
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    pub cookies: Arc<SessionCookies>,
}

impl AppState {
    pub fn from_config(config: &GateConfig) -> Result<Self, GateError> {
        Ok(Self {
            authenticator: Arc::new(Authenticator::from_config(config)),
            cookies: Arc::new(SessionCookies::from_config(config)?),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub password: Option<String>,
    pub next: Option<String>,
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate<'a> {
    base_url: &'a str,
    auth_required: bool,
}

/// Builds the router, with every route under the configured base path.
pub fn router(state: AppState) -> Router {
    let base = state.authenticator.base_url().to_string();

    Router::new()
        .route(&base, get(home))
        .route(&format!("{}login", base), get(login_page).post(login_submit))
        .route(&format!("{}logout", base), get(logout))
        .with_state(state)
}

/// `GET {base}login`
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    headers: HeaderMap,
) -> Result<Response, GateError> {
    let request = LoginRequest {
        next: query.next,
        password: None,
    };
    let current_user = state.cookies.session_from(&headers);
    let action = state.authenticator.handle_get(&request, current_user.as_ref());
    respond(&state, action)
}

/// `POST {base}login`. A `next` in the form body wins over the query string.
///
/// A missing or unreadable body counts as an empty form.
pub async fn login_submit(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, GateError> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!("Treating login body as empty: {}", rejection);
            LoginForm::default()
        }
    };
    let request = LoginRequest {
        next: form.next.or(query.next),
        password: form.password,
    };
    let action = state.authenticator.handle_post(&request);
    respond(&state, action)
}

/// `GET {base}logout`
pub async fn logout(State(state): State<AppState>) -> Response {
    let login = format!("{}login", state.authenticator.base_url());
    ([(SET_COOKIE, state.cookies.clear())], Redirect::to(&login)).into_response()
}

/// `GET {base}`, the page the gate protects
pub async fn home(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, GateError> {
    let authenticator = &state.authenticator;
    let base_url = authenticator.base_url();

    if authenticator.is_auth_required() && state.cookies.session_from(&headers).is_none() {
        let login = format!("{}login?next={}", base_url, url_escape(base_url));
        return Ok(Redirect::to(&login).into_response());
    }

    let html = HomeTemplate {
        base_url,
        auth_required: authenticator.is_auth_required(),
    }
    .render()?;
    Ok(Html(html).into_response())
}

/// Carries out an Authenticator decision
fn respond(state: &AppState, action: Action) -> Result<Response, GateError> {
    match action {
        Action::Redirect { target } => Ok(Redirect::to(&target).into_response()),
        Action::RenderPage { next, message } => {
            let page = state
                .authenticator
                .render_login_page(&next, message.as_ref())?;
            Ok(Html(page.html).into_response())
        }
        Action::SetCookieAndRedirect { token, target } => {
            let cookie = state.cookies.issue(&token);
            Ok(([(SET_COOKIE, cookie)], Redirect::to(&target)).into_response())
        }
    }
}
