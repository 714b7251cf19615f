use crate::cli::context::CliContext;
use crate::error::CommunityResult;
use crate::ops::auth_ops;
use crate::views::navigation;

pub fn login(ctx: &mut CliContext, args: &str) -> CommunityResult<()> {
    let username = if args.is_empty() {
        match ctx.prompt("Username: ") {
            Some(s) => s,
            None => return Ok(()),
        }
    } else {
        args.to_string()
    };
    let password = match ctx.read_line("Password: ") {
        Some(s) => s,
        None => return Ok(()),
    };

    let role = auth_ops::login(&mut ctx.client, &username, &password)?;
    println!("Logged in as {} ({}).", username.trim(), role.as_str());
    println!();
    print_menu(ctx);
    Ok(())
}

pub fn logout(ctx: &mut CliContext) -> CommunityResult<()> {
    auth_ops::logout(&mut ctx.client)?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(ctx: &CliContext) {
    let session = ctx.client.session();
    if !session.is_authenticated() {
        println!("Not logged in. Use 'login'.");
        return;
    }
    println!("User: {}", session.username().unwrap_or_else(|| "(unknown)".into()));
    println!("Role: {}", session.role().map(|r| r.as_str()).unwrap_or("(unknown)"));
    match session.person_id() {
        Some(id) => println!("Person: {}", id),
        None => println!("Person: (none)"),
    }
    if let Some(claims) = session.claims() {
        let expires = chrono::DateTime::from_timestamp(claims.exp, 0)
            .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| claims.exp.to_string());
        println!("Token expires: {}", expires);
    }
}

pub fn recover_password(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let email = if args.is_empty() {
        match ctx.prompt("Email: ") {
            Some(s) => s,
            None => return Ok(()),
        }
    } else {
        args.to_string()
    };
    auth_ops::request_password_recovery(&ctx.client, &email)?;
    println!("If the address is registered, a recovery email is on its way.");
    Ok(())
}

pub fn reset_password(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let token = if args.is_empty() {
        match ctx.prompt("Reset token (from the email): ") {
            Some(s) => s,
            None => return Ok(()),
        }
    } else {
        args.to_string()
    };
    let password = match ctx.read_line("New password: ") {
        Some(s) => s,
        None => return Ok(()),
    };
    let again = match ctx.read_line("Repeat new password: ") {
        Some(s) => s,
        None => return Ok(()),
    };
    if password != again {
        println!("Passwords do not match.");
        return Ok(());
    }
    auth_ops::reset_password(&ctx.client, &token, &password)?;
    println!("Password updated. You can log in now.");
    Ok(())
}

/// The sidebar for the current role.
pub fn print_menu(ctx: &CliContext) {
    match ctx.role() {
        Some(role) => {
            println!("Sections:");
            for section in navigation::sidebar(role) {
                println!("  {}", section.label());
            }
        }
        None => println!("Not logged in. Use 'login'."),
    }
}
