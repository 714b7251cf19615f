use crate::api::{ApiClient, RequestOptions};
use crate::error::{CommunityError, CommunityResult};
use crate::model::{Id, SystemUser, SystemUserForm};
use crate::validation;

const BASE: &str = "/usuarios";

fn user_path(id: Id<SystemUser>) -> String {
    format!("{}/{}", BASE, id)
}

pub fn list_users(client: &ApiClient) -> CommunityResult<Vec<SystemUser>> {
    client.json(BASE, RequestOptions::get())
}

fn clean(form: &SystemUserForm) -> CommunityResult<SystemUserForm> {
    let email = validation::non_blank(&form.email, "email")?;
    if !email.contains('@') {
        return Err(CommunityError::InvalidFormat {
            field: "email".into(),
            expected: "an email address".into(),
        });
    }
    Ok(SystemUserForm {
        username: validation::non_blank(&form.username, "username")?,
        email,
        role: form.role,
        password: form.password.clone().filter(|p| !p.is_empty()),
        person_id: form.person_id,
    })
}

/// New accounts need a password; updates may leave it out.
pub fn add_user(client: &ApiClient, form: &SystemUserForm) -> CommunityResult<()> {
    let form = clean(form)?;
    if form.password.is_none() {
        return Err(CommunityError::BlankField {
            field: "password".into(),
        });
    }
    client.execute(BASE, RequestOptions::post().json(&form)?)?;
    Ok(())
}

pub fn update_user(client: &ApiClient, id: Id<SystemUser>, form: &SystemUserForm) -> CommunityResult<()> {
    client.execute(&user_path(id), RequestOptions::put().json(&clean(form)?)?)?;
    Ok(())
}

pub fn delete_user(client: &ApiClient, id: Id<SystemUser>) -> CommunityResult<()> {
    client.execute(&user_path(id), RequestOptions::delete())?;
    Ok(())
}
