//! In-process stand-ins for the gateway, used by the test suites.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::{CommunityError, CommunityResult};

#[derive(Default)]
struct Script {
    responses: VecDeque<CommunityResult<HttpResponse>>,
    requests: Vec<HttpRequest>,
}

/// Answers requests from a queue and records every request it receives.
/// Clones share the same script.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, response: HttpResponse) -> &Self {
        self.script.borrow_mut().responses.push_back(Ok(response));
        self
    }

    pub fn respond_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.respond(HttpResponse::json(status, &body))
    }

    pub fn respond_empty(&self, status: u16) -> &Self {
        self.respond(HttpResponse::new(status, Vec::new()))
    }

    pub fn fail_transport(&self, message: &str) -> &Self {
        self.script
            .borrow_mut()
            .responses
            .push_back(Err(CommunityError::Transport(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.script.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.script.borrow().requests.len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.script.borrow().requests.last().cloned()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> CommunityResult<HttpResponse> {
        let mut script = self.script.borrow_mut();
        script.requests.push(request.clone());
        script
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(CommunityError::Transport("no scripted response".into())))
    }
}

/// Builds an unsigned token carrying the given claims.
pub fn unsigned_jwt(claims: &serde_json::Value) -> String {
    format!(
        "{}.{}.unsigned",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes())
    )
}
