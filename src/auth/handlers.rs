use askama::Template;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::auth::session;
use crate::db;
use crate::error::AppResult;
use crate::extractors::CurrentSession;
use crate::routes::home::Html;
use crate::session::{Page, Session};
use crate::state::AppState;

// -- Templates --

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate {
    pub department: String,
    pub username: String,
    pub error: Option<String>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

// -- Cookie helpers --

fn session_cookie(name: &str, token: &str, max_age_hours: u64) -> String {
    let max_age_secs = max_age_hours * 3600;
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        name, token, max_age_secs
    )
}

fn clear_session_cookie(name: &str) -> String {
    format!("{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0", name)
}

// -- Handlers --

pub fn login_template(state: &AppState, username: &str, error: Option<&str>) -> LoginTemplate {
    LoginTemplate {
        department: state.config.portal.department.clone(),
        username: username.to_string(),
        error: error.map(str::to_string),
    }
}

/// GET /auth/login — the login page, or home if already signed in
pub async fn login_page(
    State(state): State<AppState>,
    current: CurrentSession,
) -> AppResult<Response> {
    if current.session.current_page() == Page::Home {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(Html(login_template(&state, "", None)).into_response())
}

/// POST /auth/login — check credentials and start a session
pub async fn login(
    State(state): State<AppState>,
    current: CurrentSession,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let CurrentSession { session, token } = current;
    let username = form.username.trim();

    if username.is_empty() || form.password.is_empty() {
        let page = login_template(&state, username, Some("Enter your username and password."));
        return Ok((StatusCode::BAD_REQUEST, Html(page)).into_response());
    }

    let record = {
        let conn = state.db.get()?;
        db::find_user(&conn, username)?
    };

    let user = match record {
        Some(record) if bcrypt::verify(&form.password, &record.password_hash)? => record.user,
        _ => {
            tracing::warn!("Failed login attempt for {:?}", username);
            let page = login_template(&state, username, Some("Invalid username or password."));
            return Ok((StatusCode::UNAUTHORIZED, Html(page)).into_response());
        }
    };

    tracing::info!("{} {} signed in", user.role, user.username);
    commit_session(&state, &session.login(user), token.as_deref())
}

/// POST /auth/logout — end the session and return to the login page
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentSession,
) -> AppResult<Response> {
    let CurrentSession { session, token } = current;

    if let Some(user) = session.user() {
        tracing::info!("{} signed out", user.username);
    }
    commit_session(&state, &session.logout(), token.as_deref())
}

/// Persist `next` and answer with its cookie. Any token the browser
/// already holds is retired first, so each browser keeps at most one row.
fn commit_session(
    state: &AppState,
    next: &Session,
    previous_token: Option<&str>,
) -> AppResult<Response> {
    if let Some(token) = previous_token {
        session::delete_session(&state.db, token)?;
    }

    let auth = &state.config.auth;
    let cookie = match next {
        Session::Home(user) => {
            let token = session::create_session(&state.db, &user.username, auth.session_hours)?;
            session_cookie(&auth.cookie_name, &token, auth.session_hours)
        }
        Session::Login => clear_session_cookie(&auth.cookie_name),
    };

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_is_http_only_with_max_age() {
        let cookie = session_cookie("deptportal_session", "abc", 2);
        assert_eq!(
            cookie,
            "deptportal_session=abc; HttpOnly; SameSite=Strict; Path=/; Max-Age=7200"
        );
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie("deptportal_session");
        assert!(cookie.starts_with("deptportal_session=;"));
        assert!(cookie.ends_with("Max-Age=0"));
    }
}
