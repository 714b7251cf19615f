use crate::cli::context::CliContext;
use crate::cli::person_commands::optional_id;
use crate::error::{CommunityError, CommunityResult};
use crate::model::{Id, Meeting, Role, SystemUser, SystemUserForm};
use crate::ops::report_ops::{self, ReportKind};
use crate::ops::user_ops;
use crate::views::Notice;

pub fn list_users(ctx: &CliContext) -> CommunityResult<()> {
    let users = user_ops::list_users(&ctx.client)?;
    if users.is_empty() {
        println!("No users.");
        return Ok(());
    }
    println!("Users ({}):", users.len());
    for u in &users {
        let inactive = if u.active { "" } else { " (inactive)" };
        println!("  #{} {} <{}> [{}]{}", u.id, u.username, u.email, u.role.as_str(), inactive);
    }
    Ok(())
}

fn find_user(ctx: &CliContext, id: Id<SystemUser>) -> CommunityResult<SystemUser> {
    user_ops::list_users(&ctx.client)?
        .into_iter()
        .find(|u| u.id == id)
        .ok_or_else(|| CommunityError::NotFound {
            entity_type: "User".into(),
            id: id.to_string(),
        })
}

fn prompt_role(ctx: &CliContext, current: Role) -> Option<Role> {
    let input = ctx.prompt_with_default("Role (admin/usuario)", current.as_str())?;
    Some(Role::from_claim(&input))
}

/// Shared prompts; `password_label` differs between create and edit.
fn fill_form(ctx: &CliContext, form: &mut SystemUserForm, password_label: &str) -> CommunityResult<bool> {
    form.username = match ctx.prompt_with_default("Username", &form.username) {
        Some(s) => s,
        None => return Ok(false),
    };
    form.email = match ctx.prompt_with_default("Email", &form.email) {
        Some(s) => s,
        None => return Ok(false),
    };
    form.role = match prompt_role(ctx, form.role) {
        Some(role) => role,
        None => return Ok(false),
    };
    let person = form.person_id.map(|id| id.to_string());
    form.person_id = match ctx.prompt_optional("Person id", person.as_deref()) {
        Some(v) => optional_id(v, "person id")?,
        None => return Ok(false),
    };
    form.password = ctx.read_line(password_label).filter(|s| !s.trim().is_empty());
    Ok(true)
}

pub fn add_user(ctx: &CliContext) -> CommunityResult<()> {
    println!("New user");
    let mut form = SystemUserForm {
        username: String::new(),
        email: String::new(),
        role: Role::Usuario,
        password: None,
        person_id: None,
    };
    if !fill_form(ctx, &mut form, "Password: ")? {
        return Ok(());
    }
    user_ops::add_user(&ctx.client, &form)?;
    ctx.print_notice(&Notice::Success(format!("Created user {}.", form.username.trim())));
    Ok(())
}

pub fn edit_user(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id: Id<SystemUser> = match ctx.parse_id(args, "edit-user <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let user = find_user(ctx, id)?;
    let mut form = SystemUserForm {
        username: user.username,
        email: user.email,
        role: user.role,
        password: None,
        person_id: user.person_id,
    };
    if !fill_form(ctx, &mut form, "New password (Enter keeps it): ")? {
        return Ok(());
    }
    user_ops::update_user(&ctx.client, id, &form)?;
    ctx.print_notice(&Notice::Success("User updated.".into()));
    Ok(())
}

pub fn delete_user(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id: Id<SystemUser> = match ctx.parse_id(args, "delete-user <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let user = find_user(ctx, id)?;
    if !ctx.confirm(&format!("Delete user {}?", user.username)) {
        return Ok(());
    }
    user_ops::delete_user(&ctx.client, id)?;
    println!("User deleted.");
    Ok(())
}

/// `report <personas|familias|asistencia> [meeting-id]`
pub fn report(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let usage = "report <personas|familias|asistencia> [meeting-id]";
    let mut parts = args.split_whitespace();
    let name = parts.next().unwrap_or("");
    let meeting_id = parts.next().and_then(|s| Id::<Meeting>::parse(s).ok());

    let kind = match ReportKind::parse(name, meeting_id) {
        Some(kind) => kind,
        None => {
            println!("Usage: {}", usage);
            return Ok(());
        }
    };

    let path = report_ops::download_report(&ctx.client, kind, &ctx.config.downloads_dir())?;
    ctx.print_notice(&Notice::Success(format!("Report saved to {}", path.display())));
    Ok(())
}
