//! Which screen is showing and who is signed in.
//!
//! The home screen always carries its user and the login screen never
//! does, so there is no way to hold a user while on the login page or
//! to reach the home page without one.

use crate::db::models::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Home,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Login,
    Home(User),
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session for a user that is already authenticated.
    pub fn resume(user: Option<User>) -> Self {
        match user {
            Some(user) => Session::Home(user),
            None => Session::Login,
        }
    }

    /// Enter the home page as `user`. Credentials are checked by whoever
    /// supplies the record.
    #[must_use]
    pub fn login(self, user: User) -> Session {
        tracing::debug!("Session login: {}", user.username);
        Session::Home(user)
    }

    #[must_use]
    pub fn logout(self) -> Session {
        if let Session::Home(user) = &self {
            tracing::debug!("Session logout: {}", user.username);
        }
        Session::Login
    }

    pub fn current_page(&self) -> Page {
        match self {
            Session::Login => Page::Login,
            Session::Home(_) => Page::Home,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Login => None,
            Session::Home(user) => Some(user),
        }
    }

    pub fn into_user(self) -> Option<User> {
        match self {
            Session::Login => None,
            Session::Home(user) => Some(user),
        }
    }
}
