use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::auth::session::lookup_session;
use crate::db::models::User;
use crate::error::AppError;
use crate::session::Session;
use crate::state::AppState;

/// The session for this request, resumed from the session cookie.
/// Never rejects: a missing or stale cookie yields `Session::Login`.
pub struct CurrentSession {
    pub session: Session,
    pub token: Option<String>,
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = cookie_value(parts, &state.config.auth.cookie_name).map(str::to_string);

        let user = match token.as_deref() {
            Some(token) => lookup_session(&state.db, token)?,
            None => None,
        };

        Ok(CurrentSession {
            session: Session::resume(user),
            token,
        })
    }
}

/// Extractor that requires a signed-in user. Returns 401 otherwise.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = CurrentSession::from_request_parts(parts, state).await?;
        current
            .session
            .into_user()
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}

pub fn cookie_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|cookie| {
            let mut split = cookie.splitn(2, '=');
            let key = split.next()?.trim();
            let val = split.next()?.trim();
            if key == name && !val.is_empty() {
                Some(val)
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_cookie(cookie: &str) -> Parts {
        let (parts, _) = Request::builder()
            .header(header::COOKIE, cookie)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn finds_named_cookie_among_others() {
        let parts = parts_with_cookie("theme=dark; deptportal_session=abc123; lang=en");
        assert_eq!(cookie_value(&parts, "deptportal_session"), Some("abc123"));
    }

    #[test]
    fn missing_cookie_is_none() {
        let parts = parts_with_cookie("theme=dark");
        assert_eq!(cookie_value(&parts, "deptportal_session"), None);
    }

    #[test]
    fn cleared_cookie_is_none() {
        let parts = parts_with_cookie("deptportal_session=");
        assert_eq!(cookie_value(&parts, "deptportal_session"), None);
    }
}
