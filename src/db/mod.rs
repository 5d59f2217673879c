pub mod models;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};
use std::path::Path;

use crate::db::models::{Role, User};
use crate::state::DbPool;

pub const MIGRATIONS: &[(&str, &str)] = &[(
    "001_initial",
    include_str!("../../migrations/001_initial.sql"),
)];

pub fn create_pool(db_path: &Path) -> anyhow::Result<DbPool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let manager = SqliteConnectionManager::file(db_path);
    let pool = Pool::builder().max_size(8).build(manager)?;

    let conn = pool.get()?;
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        ",
    )?;

    Ok(pool)
}

/// Single-connection in-memory pool. Every connection of a `:memory:`
/// manager is its own database, so the pool must never grow past one.
pub fn memory_pool() -> anyhow::Result<DbPool> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
    let pool = Pool::builder().max_size(1).build(manager)?;
    Ok(pool)
}

pub fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    let conn = pool.get()?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    for (name, sql) in MIGRATIONS {
        let already_applied: bool = conn.query_row(
            "SELECT COUNT(*) > 0 FROM schema_version WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;

        if !already_applied {
            tracing::info!("Applying migration: {}", name);
            conn.execute_batch(sql)?;
            conn.execute(
                "INSERT INTO schema_version (name) VALUES (?1)",
                params![name],
            )?;
        }
    }

    tracing::info!("Database migrations complete");
    Ok(())
}

/// A user record together with its stored password hash.
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRecord> {
    let role: String = row.get(2)?;
    let role = role.parse::<Role>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, e.into())
    })?;

    Ok(UserRecord {
        user: User {
            username: row.get(0)?,
            role,
            name: row.get(3)?,
            roll_no: row.get(4)?,
            department: row.get(5)?,
            sem: row.get(6)?,
            year: row.get(7)?,
            photo: row.get(8)?,
        },
        password_hash: row.get(1)?,
    })
}

pub fn find_user(
    conn: &rusqlite::Connection,
    username: &str,
) -> Result<Option<UserRecord>, rusqlite::Error> {
    conn.query_row(
        "SELECT username, password_hash, role, name, roll_no, department, sem, year, photo
         FROM users WHERE username = ?1",
        params![username],
        user_from_row,
    )
    .optional()
}

pub fn insert_user(
    conn: &rusqlite::Connection,
    user: &User,
    password_hash: &str,
) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT INTO users (username, password_hash, role, name, roll_no, department, sem, year, photo)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            user.username,
            password_hash,
            user.role.as_str(),
            user.name,
            user.roll_no,
            user.department,
            user.sem,
            user.year,
            user.photo,
        ],
    )?;
    Ok(())
}

/// Demo accounts created on first start: `stu1` and `prof1`, both with
/// the password `password`.
pub fn demo_users(department: &str, default_photo: &str) -> Vec<User> {
    vec![
        User {
            username: "stu1".to_string(),
            role: Role::Student,
            name: "Asha Verma".to_string(),
            roll_no: "2021EE01".to_string(),
            department: department.to_string(),
            sem: "3".to_string(),
            year: "2024-25".to_string(),
            photo: default_photo.to_string(),
        },
        User {
            username: "prof1".to_string(),
            role: Role::Teacher,
            name: "Dr. Rajesh Iyer".to_string(),
            roll_no: models::NOT_APPLICABLE.to_string(),
            department: department.to_string(),
            sem: models::NOT_APPLICABLE.to_string(),
            year: "2024-25".to_string(),
            photo: default_photo.to_string(),
        },
    ]
}

pub const DEMO_PASSWORD: &str = "password";

/// Insert the demo accounts if the users table is empty.
pub fn seed_demo_users(
    pool: &DbPool,
    department: &str,
    default_photo: &str,
    bcrypt_cost: u32,
) -> anyhow::Result<usize> {
    let conn = pool.get()?;
    let user_count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    if user_count > 0 {
        return Ok(0);
    }

    let users = demo_users(department, default_photo);
    for user in &users {
        let hash = bcrypt::hash(DEMO_PASSWORD, bcrypt_cost)?;
        insert_user(&conn, user, &hash)?;
        tracing::info!("Seeded demo {} account: {}", user.role, user.username);
    }

    Ok(users.len())
}
