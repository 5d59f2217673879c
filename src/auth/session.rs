use rand::Rng;
use rusqlite::{params, OptionalExtension};

use crate::db::{self, models::User};
use crate::error::AppResult;
use crate::state::DbPool;

/// Create a new session for a user. Returns the session token.
/// Expired sessions are swept on the way.
pub fn create_session(pool: &DbPool, username: &str, hours: u64) -> AppResult<String> {
    let conn = pool.get()?;

    let purged = conn.execute("DELETE FROM sessions WHERE expires_at <= datetime('now')", [])?;
    if purged > 0 {
        tracing::debug!("Purged {} expired sessions", purged);
    }

    let token = generate_token();
    let id = uuid::Uuid::now_v7().to_string();

    conn.execute(
        "INSERT INTO sessions (id, username, token, expires_at) VALUES (?1, ?2, ?3, datetime('now', ?4))",
        params![id, username, token, format!("+{} hours", hours)],
    )?;

    Ok(token)
}

/// Delete a session by token.
pub fn delete_session(pool: &DbPool, token: &str) -> AppResult<()> {
    let conn = pool.get()?;
    conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
    Ok(())
}

/// The user behind an unexpired session token.
pub fn lookup_session(pool: &DbPool, token: &str) -> AppResult<Option<User>> {
    let conn = pool.get()?;
    let username: Option<String> = conn
        .query_row(
            "SELECT username FROM sessions WHERE token = ?1 AND expires_at > datetime('now')",
            params![token],
            |row| row.get(0),
        )
        .optional()?;

    match username {
        Some(username) => Ok(db::find_user(&conn, &username)?.map(|record| record.user)),
        None => Ok(None),
    }
}

/// Generate a cryptographically random 32-byte hex token.
fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
