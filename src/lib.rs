// Library exports for the department portal.
// Integration tests drive the router through these modules.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod extractors;
pub mod profile;
pub mod routes;
pub mod session;
pub mod state;
