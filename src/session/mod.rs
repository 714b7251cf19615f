pub mod jwt;

use chrono::{DateTime, Duration, Utc};
use rusqlite::Connection;

use crate::db::storage_repo::{self, REFRESH_TOKEN_KEY, ROLE_KEY, TOKEN_KEY};
use crate::error::CommunityResult;
use crate::model::{Id, Person, Role};
use jwt::Claims;

/// How often a held token is re-checked for expiry.
pub const EXPIRY_CHECK_INTERVAL_MINUTES: i64 = 5;

/// Outcome of a passive expiry check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCheck {
    /// No token held.
    Anonymous,
    /// Checked recently; nothing done.
    Skipped,
    Valid,
    Refreshed,
    /// Refresh failed and the session was cleared.
    LoggedOut,
}

/// Bearer and refresh tokens, mirrored between memory and the local store.
pub struct Session {
    conn: Connection,
    token: Option<String>,
    refresh_token: Option<String>,
    claims: Option<Claims>,
    role: Option<Role>,
    last_check: Option<DateTime<Utc>>,
}

impl Session {
    /// Restores whatever session the local store holds. A stored token that no
    /// longer decodes is discarded.
    pub fn load(conn: Connection) -> CommunityResult<Self> {
        let token = storage_repo::get(&conn, TOKEN_KEY)?;
        let refresh_token = storage_repo::get(&conn, REFRESH_TOKEN_KEY)?;
        let stored_role = storage_repo::get(&conn, ROLE_KEY)?;

        let mut session = Self {
            conn,
            token: None,
            refresh_token,
            claims: None,
            role: stored_role.as_deref().map(Role::from_claim),
            last_check: None,
        };

        if let Some(token) = token {
            match jwt::decode(&token) {
                Ok(claims) => {
                    session.claims = Some(claims);
                    session.token = Some(token);
                }
                Err(e) => {
                    log::warn!("Discarding stored token: {}", e);
                    session.logout()?;
                }
            }
        }

        Ok(session)
    }

    /// Persists both tokens and the role claim.
    pub fn login(&mut self, token: &str, refresh_token: Option<&str>) -> CommunityResult<()> {
        let claims = jwt::decode(token)?;
        let role = claims.role.as_deref().map(Role::from_claim).unwrap_or(Role::Usuario);

        storage_repo::set(&self.conn, TOKEN_KEY, token)?;
        storage_repo::set(&self.conn, ROLE_KEY, role.as_str())?;
        match refresh_token {
            Some(refresh) => storage_repo::set(&self.conn, REFRESH_TOKEN_KEY, refresh)?,
            None => storage_repo::remove(&self.conn, REFRESH_TOKEN_KEY)?,
        }

        self.token = Some(token.to_string());
        self.refresh_token = refresh_token.map(str::to_string);
        self.claims = Some(claims);
        self.role = Some(role);
        self.last_check = None;
        log::info!("Session started as {}", role.as_str());
        Ok(())
    }

    /// Stores a token obtained through refresh. The refresh token is only
    /// replaced when the server rotated it.
    pub fn store_refreshed(&mut self, token: &str, refresh_token: Option<&str>) -> CommunityResult<()> {
        let claims = jwt::decode(token)?;
        storage_repo::set(&self.conn, TOKEN_KEY, token)?;
        if let Some(role) = claims.role.as_deref().map(Role::from_claim) {
            storage_repo::set(&self.conn, ROLE_KEY, role.as_str())?;
            self.role = Some(role);
        }
        if let Some(refresh) = refresh_token {
            storage_repo::set(&self.conn, REFRESH_TOKEN_KEY, refresh)?;
            self.refresh_token = Some(refresh.to_string());
        }
        self.token = Some(token.to_string());
        self.claims = Some(claims);
        log::info!("Session refreshed");
        Ok(())
    }

    /// Clears every session key.
    pub fn logout(&mut self) -> CommunityResult<()> {
        storage_repo::clear_session(&self.conn)?;
        self.token = None;
        self.refresh_token = None;
        self.claims = None;
        self.role = None;
        self.last_check = None;
        log::info!("Session cleared");
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// A held token whose `exp` has passed. No token is not "expired".
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.claims
            .as_ref()
            .map(|c| c.is_expired_at(now.timestamp()))
            .unwrap_or(false)
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role.map(|r| r.is_admin()).unwrap_or(false)
    }

    /// The person the logged-in account belongs to, if the token says so.
    pub fn person_id(&self) -> Option<Id<Person>> {
        self.claims.as_ref().and_then(|c| c.person_id).map(Id::new)
    }

    pub fn username(&self) -> Option<String> {
        let claims = self.claims.as_ref()?;
        claims.username.clone().or_else(|| match &claims.sub {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        })
    }

    /// True when a token is held and the last check is older than the interval.
    pub fn due_for_check(&self, now: DateTime<Utc>) -> bool {
        if self.token.is_none() {
            return false;
        }
        match self.last_check {
            None => true,
            Some(last) => now - last >= Duration::minutes(EXPIRY_CHECK_INTERVAL_MINUTES),
        }
    }

    pub fn mark_checked(&mut self, now: DateTime<Utc>) {
        self.last_check = Some(now);
    }
}
