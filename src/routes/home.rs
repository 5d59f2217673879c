use askama::Template;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::auth::handlers::login_template;
use crate::config::PortalConfig;
use crate::dashboard::{academic_cards, quick_actions, InfoCard, QuickAction};
use crate::error::AppResult;
use crate::extractors::CurrentSession;
use crate::profile::{Notice, ProfileView};
use crate::session::Session;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub department: String,
    pub name: String,
    pub username: String,
    pub role: String,
    pub portal_title: String,
    pub roll_no: Option<String>,
    pub user_department: String,
    pub photo: String,
    pub cards: Vec<InfoCard>,
    pub actions: &'static [QuickAction],
    pub notice: Option<String>,
}

impl HomeTemplate {
    pub fn new(view: &ProfileView, portal: &PortalConfig, notice: Option<Notice>) -> Self {
        let user = view.user();
        Self {
            department: portal.department.clone(),
            name: user.name.clone(),
            username: user.username.clone(),
            role: user.role.to_string(),
            portal_title: user.role.portal_title().to_string(),
            roll_no: user.roll_no().map(str::to_string),
            user_department: user.department.clone(),
            photo: view.displayed_photo().to_string(),
            cards: academic_cards(user, &portal.program),
            actions: quick_actions(user.role),
            notice: notice.map(|n| n.message().to_string()),
        }
    }
}

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

#[derive(Deserialize)]
pub struct HomeQuery {
    pub notice: Option<String>,
}

/// GET / — the login page until someone signs in, their dashboard after
pub async fn index(
    State(state): State<AppState>,
    current: CurrentSession,
    Query(query): Query<HomeQuery>,
) -> AppResult<Response> {
    match current.session {
        Session::Login => Ok(Html(login_template(&state, "", None)).into_response()),
        Session::Home(user) => {
            let view = ProfileView::load(user, state.photos.clone())?;
            let notice = query.notice.as_deref().and_then(Notice::from_code);
            Ok(Html(HomeTemplate::new(&view, &state.config.portal, notice)).into_response())
        }
    }
}
