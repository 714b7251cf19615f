use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommunityError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} must be {expected}")]
    InvalidFormat { field: String, expected: String },

    #[error("{0}")]
    InvalidRange(String),

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Cannot {action} a meeting with status {status}")]
    ActionUnavailable { action: String, status: String },

    #[error("This action requires an administrator")]
    Forbidden,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Session expired, please log in again")]
    SessionExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Could not refresh session: {0}")]
    RefreshFailed(String),

    /// Non-2xx response; the message is already normalized from the body.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// 401 on a request that carried the bearer token.
    #[error("{0}")]
    Unauthorized(String),

    #[error("Could not reach server: {0}")]
    Transport(String),

    #[error("QR error: {0}")]
    Qr(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl CommunityError {
    /// Errors after which the stored session can no longer be used.
    pub fn ends_session(&self) -> bool {
        matches!(
            self,
            CommunityError::SessionExpired
                | CommunityError::RefreshFailed(_)
                | CommunityError::Unauthorized(_)
        )
    }
}

pub type CommunityResult<T> = Result<T, CommunityError>;
