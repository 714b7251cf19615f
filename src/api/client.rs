use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::multipart::{generate_boundary, MultipartForm};
use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::error::{CommunityError, CommunityResult};
use crate::session::{Session, SessionCheck};

pub const REFRESH_PATH: &str = "/refresh";

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    None,
    Json(Vec<u8>),
    Multipart(MultipartForm),
}

/// Per-call options: method, body, query string, and whether the bearer token
/// is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Body,
    pub query: Vec<(String, String)>,
    pub authenticated: bool,
}

impl RequestOptions {
    fn with_method(method: Method) -> Self {
        Self {
            method,
            body: Body::None,
            query: Vec::new(),
            authenticated: true,
        }
    }

    pub fn get() -> Self {
        Self::with_method(Method::Get)
    }

    pub fn post() -> Self {
        Self::with_method(Method::Post)
    }

    pub fn put() -> Self {
        Self::with_method(Method::Put)
    }

    pub fn patch() -> Self {
        Self::with_method(Method::Patch)
    }

    pub fn delete() -> Self {
        Self::with_method(Method::Delete)
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> CommunityResult<Self> {
        self.body = Body::Json(serde_json::to_vec(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Body::Multipart(form);
        self
    }

    pub fn query<K: Into<String>, V: Into<String>>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sends without the bearer token and skips the local expiry check.
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

/// A downloaded binary body.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenPair {
    #[serde(alias = "access_token", alias = "accessToken", alias = "jwt")]
    token: String,
    #[serde(default, alias = "refreshToken")]
    refresh_token: Option<String>,
}

/// The one place HTTP calls go through.
pub struct ApiClient {
    base_url: String,
    transport: Box<dyn Transport>,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Box<dyn Transport>, session: Session) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Sends a request and returns the raw 2xx response. Fails before sending
    /// when the held token has already expired.
    pub fn execute(&self, path: &str, options: RequestOptions) -> CommunityResult<HttpResponse> {
        let mut headers = vec![("Accept".to_string(), "application/json, */*".to_string())];
        let mut bearer_sent = false;

        if options.authenticated {
            if let Some(token) = self.session.token() {
                if self.session.is_expired_at(Utc::now()) {
                    log::debug!("Refusing {} {}: token expired", options.method.as_str(), path);
                    return Err(CommunityError::SessionExpired);
                }
                headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
                bearer_sent = true;
            }
        }

        let body = match options.body {
            Body::None => None,
            Body::Json(bytes) => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                Some(bytes)
            }
            Body::Multipart(form) => {
                let boundary = generate_boundary();
                headers.push((
                    "Content-Type".to_string(),
                    format!("multipart/form-data; boundary={}", boundary),
                ));
                Some(form.encode(&boundary))
            }
        };

        let request = HttpRequest {
            method: options.method,
            url: self.url(path),
            query: options.query,
            headers,
            body,
        };

        log::debug!("{} {}", request.method.as_str(), request.url);
        let response = self.transport.send(&request)?;

        if !response.is_success() {
            let mut error = error_from_response(&response);
            if bearer_sent && response.status == 401 {
                error = CommunityError::Unauthorized(error.to_string());
            }
            log::debug!(
                "{} {} failed with {}: {}",
                request.method.as_str(),
                request.url,
                response.status,
                error
            );
            return Err(error);
        }

        Ok(response)
    }

    /// JSON response, deserialized into the caller's type. An empty body reads
    /// as `null`.
    pub fn json<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> CommunityResult<T> {
        let response = self.execute(path, options)?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_slice(b"null")?);
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    pub fn text(&self, path: &str, options: RequestOptions) -> CommunityResult<String> {
        let response = self.execute(path, options)?;
        Ok(String::from_utf8_lossy(&response.body).into_owned())
    }

    pub fn blob(&self, path: &str, options: RequestOptions) -> CommunityResult<Blob> {
        let response = self.execute(path, options)?;
        Ok(Blob {
            content_type: response.header("Content-Type").map(str::to_string),
            content_disposition: response.header("Content-Disposition").map(str::to_string),
            bytes: response.body,
        })
    }

    /// Trades the stored refresh token for a new bearer token. One attempt;
    /// any failure is returned and the caller is expected to log out.
    pub fn refresh_session(&mut self) -> CommunityResult<()> {
        let refresh_token = self
            .session
            .refresh_token()
            .map(str::to_string)
            .ok_or_else(|| CommunityError::RefreshFailed("no refresh token stored".into()))?;

        let options = RequestOptions::post()
            .anonymous()
            .json(&serde_json::json!({ "refresh_token": refresh_token }))?;

        let pair: TokenPair = self
            .json(REFRESH_PATH, options)
            .map_err(|e| CommunityError::RefreshFailed(e.to_string()))?;

        self.session
            .store_refreshed(&pair.token, pair.refresh_token.as_deref())
            .map_err(|e| CommunityError::RefreshFailed(e.to_string()))
    }

    /// Passive expiry check: runs when due (or as soon as the token is known
    /// to be expired), refreshes an expired token once, and clears the session
    /// when that fails.
    pub fn check_session(&mut self, now: DateTime<Utc>) -> CommunityResult<SessionCheck> {
        if !self.session.is_authenticated() {
            return Ok(SessionCheck::Anonymous);
        }
        if !self.session.due_for_check(now) && !self.session.is_expired_at(now) {
            return Ok(SessionCheck::Skipped);
        }
        self.session.mark_checked(now);

        if !self.session.is_expired_at(now) {
            return Ok(SessionCheck::Valid);
        }

        match self.refresh_session() {
            Ok(()) => Ok(SessionCheck::Refreshed),
            Err(e) => {
                log::warn!("Session refresh failed, logging out: {}", e);
                self.session.logout()?;
                Ok(SessionCheck::LoggedOut)
            }
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

/// Turns a non-2xx response into an error: a `mensaje`/`message`/`detail`
/// field from a JSON body, else the raw text, else the status line.
pub fn error_from_response(response: &HttpResponse) -> CommunityError {
    CommunityError::Api {
        status: response.status,
        message: error_message(response),
    }
}

fn error_message(response: &HttpResponse) -> String {
    let text = String::from_utf8_lossy(&response.body).trim().to_string();
    let fallback = format!("Error {}: {}", response.status, response.status_text);

    if text.is_empty() {
        return fallback;
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(map)) => ["mensaje", "message", "detail"]
            .iter()
            .find_map(|key| map.get(*key).and_then(message_from_value))
            .unwrap_or(fallback),
        Ok(_) | Err(_) => text,
    }
}

fn message_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        // Validation errors arrive as `[{"msg": ...}, ...]`.
        Value::Array(items) => items.iter().find_map(|item| match item {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Object(obj) => obj.get("msg").and_then(|m| m.as_str()).map(str::to_string),
            _ => None,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(status: u16, body: &str) -> String {
        match error_from_response(&HttpResponse::new(status, body)) {
            CommunityError::Api { message, .. } => message,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn prefers_mensaje_field() {
        assert_eq!(
            message_of(422, r#"{"mensaje":"Documento inválido","message":"ignored"}"#),
            "Documento inválido"
        );
    }

    #[test]
    fn falls_back_to_message_then_detail() {
        assert_eq!(message_of(400, r#"{"message":"bad"}"#), "bad");
        assert_eq!(message_of(400, r#"{"detail":"worse"}"#), "worse");
    }

    #[test]
    fn reads_validation_detail_arrays() {
        assert_eq!(
            message_of(422, r#"{"detail":[{"loc":["body"],"msg":"field required"}]}"#),
            "field required"
        );
    }

    #[test]
    fn uses_raw_text_when_not_json() {
        assert_eq!(message_of(500, "upstream exploded"), "upstream exploded");
    }

    #[test]
    fn uses_status_line_for_empty_body_or_unknown_object() {
        assert_eq!(message_of(404, ""), "Error 404: Not Found");
        assert_eq!(message_of(500, r#"{"ok":false}"#), "Error 500: Internal Server Error");
    }
}
