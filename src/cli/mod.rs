pub mod context;
pub mod auth_commands;
pub mod meeting_commands;
pub mod attendance_commands;
pub mod person_commands;
pub mod family_commands;
pub mod publication_commands;
pub mod admin_commands;

use chrono::Utc;
use rusqlite::Connection;

use crate::api::{ApiClient, UreqTransport};
use crate::config::Config;
use crate::db::schema;
use crate::error::{CommunityError, CommunityResult};
use crate::session::{Session, SessionCheck};
use crate::views::navigation::{self, Section};
use context::CliContext;

/// Who may run a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Public,
    /// Any logged-in role whose sidebar has the section.
    Section(Section),
    /// Write actions inside a section; administrators only.
    Admin(Section),
}

/// Run the interactive REPL.
pub fn run(config: Config) -> CommunityResult<()> {
    std::fs::create_dir_all(&config.data_dir)?;
    let conn = Connection::open(config.store_path())?;
    schema::initialize(&conn)?;
    let session = Session::load(conn)?;

    let client = ApiClient::new(&config.api_url, Box::new(UreqTransport::new()), session);
    let mut ctx = CliContext::new(client, config);

    println!("Comunidad");
    println!("Server: {}", ctx.client.base_url());
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    check_session(&mut ctx);
    if ctx.is_logged_in() {
        auth_commands::whoami(&ctx);
        println!();
        auth_commands::print_menu(&ctx);
    } else {
        println!("Not logged in. Use 'login'.");
    }

    repl_loop(&mut ctx);
    Ok(())
}

fn check_session(ctx: &mut CliContext) {
    match ctx.client.check_session(Utc::now()) {
        Ok(SessionCheck::LoggedOut) => println!("Session expired. Please log in again."),
        Ok(SessionCheck::Refreshed) => log::debug!("Token refreshed"),
        Ok(_) => {}
        Err(e) => log::warn!("Session check failed: {}", e),
    }
}

fn repl_loop(ctx: &mut CliContext) {
    loop {
        let input = match ctx.read_line("> ") {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);
        if matches!(command, "quit" | "exit" | "q") {
            break;
        }

        check_session(ctx);
        if !allowed(ctx, access(command)) {
            continue;
        }

        if let Err(e) = dispatch(ctx, command, args) {
            ctx.print_error(&e);
            if e.ends_session() && ctx.is_logged_in() {
                if let Err(e) = ctx.client.session_mut().logout() {
                    log::warn!("Could not clear session: {}", e);
                }
                println!("Please log in again.");
            }
        }
    }
}

fn access(command: &str) -> Access {
    match command {
        "meetings" | "upcoming" | "show-meeting" => Access::Section(Section::Reuniones),
        "add-meeting" | "edit-meeting" | "open-meeting" | "close-meeting" | "delete-meeting" => {
            Access::Admin(Section::Reuniones)
        }
        "meeting-code" | "meeting-qr" | "attendees" | "toggle-attendance" | "take-attendance" => {
            Access::Admin(Section::Asistencia)
        }
        "register" | "register-link" => Access::Section(Section::RegistrarAsistencia),

        "people" | "show-person" | "add-person" | "edit-person" | "delete-person" => {
            Access::Admin(Section::Personas)
        }
        "families" | "show-family" | "add-family" | "edit-family" | "delete-family" => {
            Access::Admin(Section::Familias)
        }
        "parcialidades" | "add-parcialidad" | "edit-parcialidad" | "delete-parcialidad" => {
            Access::Admin(Section::Parcialidades)
        }

        "publications" | "show-publication" => Access::Section(Section::Publicaciones),
        "add-publication" | "edit-publication" | "delete-publication" | "add-photos" | "delete-photo" => {
            Access::Admin(Section::Publicaciones)
        }

        "report" => Access::Admin(Section::Reportes),
        "users" | "add-user" | "edit-user" | "delete-user" => Access::Admin(Section::Usuarios),

        "logout" => Access::Section(Section::Inicio),
        _ => Access::Public,
    }
}

fn allowed(ctx: &CliContext, access: Access) -> bool {
    let section = match access {
        Access::Public => return true,
        Access::Section(section) | Access::Admin(section) => section,
    };
    let role = match ctx.role() {
        Some(role) => role,
        None => {
            ctx.print_error(&CommunityError::NotAuthenticated);
            return false;
        }
    };
    if matches!(access, Access::Admin(_)) && !role.is_admin() {
        ctx.print_error(&CommunityError::Forbidden);
        return false;
    }
    if !navigation::can_access(role, section) {
        println!("{} is not available for {} accounts.", section.label(), role.as_str());
        return false;
    }
    true
}

fn dispatch(ctx: &mut CliContext, command: &str, args: &str) -> CommunityResult<()> {
    match command {
        "help" | "?" => print_help(),
        "menu" => auth_commands::print_menu(ctx),
        "whoami" => auth_commands::whoami(ctx),

        // Session
        "login" => return auth_commands::login(ctx, args),
        "logout" => return auth_commands::logout(ctx),
        "recover-password" => return auth_commands::recover_password(ctx, args),
        "reset-password" => return auth_commands::reset_password(ctx, args),

        // Meetings
        "meetings" => return meeting_commands::list(ctx, args),
        "upcoming" => return meeting_commands::upcoming(ctx),
        "show-meeting" => return meeting_commands::show(ctx, args),
        "add-meeting" => return meeting_commands::add(ctx),
        "edit-meeting" => return meeting_commands::edit(ctx, args),
        "open-meeting" => return meeting_commands::open(ctx, args),
        "close-meeting" => return meeting_commands::close(ctx, args),
        "delete-meeting" => return meeting_commands::delete(ctx, args),
        "meeting-code" => return meeting_commands::code(ctx, args),
        "meeting-qr" => return meeting_commands::qr(ctx, args),

        // Attendance
        "attendees" => return attendance_commands::list(ctx, args),
        "toggle-attendance" => return attendance_commands::toggle(ctx, args),
        "take-attendance" => return attendance_commands::take(ctx, args),
        "register" => return attendance_commands::register(ctx, args),
        "register-link" => return attendance_commands::register_link(ctx, args),

        // People
        "people" => return person_commands::list(ctx, args),
        "show-person" => return person_commands::show(ctx, args),
        "add-person" => return person_commands::add(ctx),
        "edit-person" => return person_commands::edit(ctx, args),
        "delete-person" => return person_commands::delete(ctx, args),

        // Families and parcialidades
        "families" => return family_commands::list(ctx, args),
        "show-family" => return family_commands::show(ctx, args),
        "add-family" => return family_commands::add(ctx),
        "edit-family" => return family_commands::edit(ctx, args),
        "delete-family" => return family_commands::delete(ctx, args),
        "parcialidades" => return family_commands::list_parcialidades(ctx),
        "add-parcialidad" => return family_commands::add_parcialidad(ctx),
        "edit-parcialidad" => return family_commands::edit_parcialidad(ctx, args),
        "delete-parcialidad" => return family_commands::delete_parcialidad(ctx, args),

        // Publications
        "publications" => return publication_commands::list(ctx),
        "show-publication" => return publication_commands::show(ctx, args),
        "add-publication" => return publication_commands::add(ctx),
        "edit-publication" => return publication_commands::edit(ctx, args),
        "delete-publication" => return publication_commands::delete(ctx, args),
        "add-photos" => return publication_commands::add_photos(ctx, args),
        "delete-photo" => return publication_commands::delete_photo(ctx, args),

        // Administration
        "users" => return admin_commands::list_users(ctx),
        "add-user" => return admin_commands::add_user(ctx),
        "edit-user" => return admin_commands::edit_user(ctx, args),
        "delete-user" => return admin_commands::delete_user(ctx, args),
        "report" => return admin_commands::report(ctx, args),

        _ => println!("Unknown command: {}. Type 'help' for commands.", command),
    }
    Ok(())
}

/// Split input into command and args.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(r#"
COMMANDS:

  Session:
    login [username]              Log in
    logout                        Log out
    whoami                        Show the current session
    menu                          Show the sections for your role
    recover-password [email]      Request a password recovery email
    reset-password [token]        Set a new password with a recovery token

  Meetings:
    meetings [page] [search|STATUS] List meetings
    upcoming                      Scheduled and running meetings
    show-meeting <id>             Show a meeting and its actions
    add-meeting                   Schedule a meeting (admin)
    edit-meeting <id>             Edit a meeting (admin)
    open-meeting <id>             Start a scheduled meeting (admin)
    close-meeting <id>            Close a running meeting (admin)
    delete-meeting <id>           Delete a scheduled meeting (admin)
    meeting-code <id>             Issue an attendance code (admin)
    meeting-qr <id> [file.svg]    Show or save the check-in QR (admin)

  Attendance:
    attendees <id> [search]       Attendance roll for a meeting (admin)
    toggle-attendance <id> <pid>  Flip one person's attendance (admin)
    take-attendance <id>          Interactive roll call (admin)
    register [code] [meeting-id]  Register your own attendance
    register-link <link> [code]   Register from a QR link

  Community (admin):
    people [page] [search]        List people
    show-person | add-person | edit-person | delete-person
    families [page] [search]      List families
    show-family | add-family | edit-family | delete-family
    parcialidades                 List parcialidades
    add-parcialidad | edit-parcialidad | delete-parcialidad

  Publications:
    publications                  List publications
    show-publication <id>         Show a publication
    add-publication               Create a publication with photos (admin)
    edit-publication <id>         Edit a publication (admin)
    delete-publication <id>       Delete a publication (admin)
    add-photos <id> <file>...     Upload photos (admin)
    delete-photo <photo-id>       Remove a photo (admin)

  Administration:
    users                         List system users
    add-user | edit-user <id> | delete-user <id>
    report <personas|familias|asistencia> [meeting-id]
                                  Download a spreadsheet report

  Other:
    help                          Show this help
    exit / quit / q               Exit
"#);
}
