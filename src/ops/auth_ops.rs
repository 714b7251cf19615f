use serde::Deserialize;

use crate::api::{ApiClient, RequestOptions};
use crate::error::CommunityResult;
use crate::model::Role;
use crate::validation;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(alias = "access_token", alias = "accessToken", alias = "jwt")]
    token: String,
    #[serde(default, alias = "refreshToken")]
    refresh_token: Option<String>,
}

/// Exchanges credentials for tokens and starts a session. Returns the role
/// read from the token.
pub fn login(client: &mut ApiClient, username: &str, password: &str) -> CommunityResult<Role> {
    let username = validation::non_blank(username, "username")?;
    let password = validation::password(password)?;

    let options = RequestOptions::post()
        .anonymous()
        .json(&serde_json::json!({ "username": username, "password": password }))?;
    let response: LoginResponse = client.json("/login", options)?;

    client
        .session_mut()
        .login(&response.token, response.refresh_token.as_deref())?;
    Ok(client.session().role().unwrap_or(Role::Usuario))
}

pub fn logout(client: &mut ApiClient) -> CommunityResult<()> {
    client.session_mut().logout()
}

/// Asks the gateway to email a password reset link.
pub fn request_password_recovery(client: &ApiClient, email: &str) -> CommunityResult<()> {
    let email = validation::non_blank(email, "email")?;
    let options = RequestOptions::post()
        .anonymous()
        .json(&serde_json::json!({ "email": email }))?;
    client.execute("/password/recovery", options)?;
    Ok(())
}

pub fn reset_password(client: &ApiClient, token: &str, new_password: &str) -> CommunityResult<()> {
    let token = validation::non_blank(token, "reset token")?;
    let password = validation::password(new_password)?;
    let options = RequestOptions::post()
        .anonymous()
        .json(&serde_json::json!({ "token": token, "password": password }))?;
    client.execute("/password/reset", options)?;
    Ok(())
}
