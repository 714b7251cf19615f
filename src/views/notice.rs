use std::fmt;

use crate::error::CommunityResult;

/// A one-line outcome shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn from_result<T>(result: &CommunityResult<T>, success: &str) -> Self {
        match result {
            Ok(_) => Notice::Success(success.to_string()),
            Err(e) => Notice::Error(e.to_string()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Notice::Success(s) | Notice::Error(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommunityError;

    #[test]
    fn error_notice_shows_server_text_unchanged() {
        let result: CommunityResult<()> = Err(CommunityError::Api {
            status: 422,
            message: "Documento inválido".into(),
        });
        let notice = Notice::from_result(&result, "Guardado");
        assert_eq!(notice.to_string(), "Documento inválido");
    }
}
