use rusqlite::{params, Connection};

use crate::error::CommunityResult;

pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const ROLE_KEY: &str = "tipoUsuario";

pub fn get(conn: &Connection, key: &str) -> CommunityResult<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM local_storage WHERE key = ?1")?;

    match stmt.query_row(params![key], |row| row.get::<_, String>(0)) {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn set(conn: &Connection, key: &str, value: &str) -> CommunityResult<()> {
    conn.execute(
        "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

pub fn remove(conn: &Connection, key: &str) -> CommunityResult<()> {
    conn.execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
    Ok(())
}

/// Removes every session key in one transaction.
pub fn clear_session(conn: &Connection) -> CommunityResult<()> {
    let tx = conn.unchecked_transaction()?;
    for key in [TOKEN_KEY, REFRESH_TOKEN_KEY, ROLE_KEY] {
        tx.execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
    }
    tx.commit()?;
    Ok(())
}
