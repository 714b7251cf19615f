use crate::cli::context::CliContext;
use crate::error::CommunityResult;
use crate::model::{Attendee, Id, Meeting, Person};
use crate::queries::person_queries;
use crate::views::attendance_registry::{self, AttendanceRegistry};
use crate::views::Notice;

fn print_roll(entries: &[&Attendee]) {
    for a in entries {
        let mark = if a.present { "[x]" } else { "[ ]" };
        let document = a.document.as_deref().map(|d| format!(" ({})", d)).unwrap_or_default();
        println!("  {} #{} {}{}", mark, a.person_id, a.full_name, document);
    }
}

fn print_summary(registry: &AttendanceRegistry) {
    let summary = registry.summary();
    println!(
        "Present: {}/{} ({}%)",
        summary.present,
        summary.total,
        summary.percent()
    );
}

/// `attendees <meeting-id> [search]`
pub fn list(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let meeting_id: Id<Meeting> = match ctx.parse_id(args, "attendees <meeting-id> [search]") {
        Some(id) => id,
        None => return Ok(()),
    };
    let search = args.split_once(char::is_whitespace).map(|(_, rest)| rest).unwrap_or("");

    let registry = AttendanceRegistry::load(&ctx.client, meeting_id)?;
    let entries = person_queries::matching_attendees(registry.entries(), search);
    if entries.is_empty() {
        println!("No attendees found.");
        return Ok(());
    }
    println!("Attendance for meeting #{}:", meeting_id);
    print_roll(&entries);
    print_summary(&registry);
    Ok(())
}

/// `toggle-attendance <meeting-id> <person-id>`
pub fn toggle(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let usage = "toggle-attendance <meeting-id> <person-id>";
    let mut parts = args.split_whitespace();
    let (meeting_id, person_id) = match (
        parts.next().and_then(|s| Id::<Meeting>::parse(s).ok()),
        parts.next().and_then(|s| Id::<Person>::parse(s).ok()),
    ) {
        (Some(m), Some(p)) => (m, p),
        _ => {
            println!("Usage: {}", usage);
            return Ok(());
        }
    };

    let mut registry = AttendanceRegistry::load(&ctx.client, meeting_id)?;
    let present = registry.toggle(&ctx.client, person_id)?;
    let name = registry
        .entry(person_id)
        .map(|a| a.full_name.clone())
        .unwrap_or_else(|| person_id.to_string());
    println!("{} marked {}.", name, if present { "present" } else { "absent" });
    Ok(())
}

/// Interactive roll call: type a person id (or part of a name) to flip it.
pub fn take(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let meeting_id: Id<Meeting> = match ctx.parse_id(args, "take-attendance <meeting-id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let mut registry = AttendanceRegistry::load(&ctx.client, meeting_id)?;

    println!("Roll call for meeting #{}. Enter an id or name to toggle, empty line to finish.", meeting_id);
    loop {
        let all: Vec<&Attendee> = registry.entries().iter().collect();
        print_roll(&all);
        print_summary(&registry);

        let input = match ctx.prompt("> ") {
            Some(s) if !s.is_empty() => s,
            _ => break,
        };

        let person_id = match Id::<Person>::parse(&input) {
            Ok(id) => id,
            Err(_) => {
                let matches = person_queries::matching_attendees(registry.entries(), &input);
                match matches.as_slice() {
                    [only] => only.person_id,
                    [] => {
                        println!("No attendee matches '{}'", input);
                        continue;
                    }
                    _ => {
                        println!("Multiple matches found, use the id:");
                        print_roll(&matches);
                        continue;
                    }
                }
            }
        };

        // A failed call leaves the flag as it was.
        if let Err(e) = registry.toggle(&ctx.client, person_id) {
            ctx.print_error(&e);
        }
    }
    Ok(())
}

/// `register <code> [meeting-id]`: self-service check-in.
pub fn register(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let mut parts = args.split_whitespace();
    let code = match parts.next() {
        Some(code) => code.to_string(),
        None => match ctx.prompt("Attendance code: ") {
            Some(s) => s,
            None => return Ok(()),
        },
    };
    let meeting_id = parts.next().and_then(|s| Id::<Meeting>::parse(s).ok());

    let result = attendance_registry::register_self(&ctx.client, &code, meeting_id);
    ctx.print_notice(&Notice::from_result(&result, result.as_ref().copied().unwrap_or_default()));
    Ok(())
}

/// `register-link <link> [code]`: check-in from a scanned QR link.
pub fn register_link(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let mut parts = args.split_whitespace();
    let link = match parts.next() {
        Some(link) => link.to_string(),
        None => {
            println!("Usage: register-link <link> [code]");
            return Ok(());
        }
    };
    let code = match parts.next() {
        Some(code) => code.to_string(),
        None => match ctx.prompt("Attendance code: ") {
            Some(s) => s,
            None => return Ok(()),
        },
    };

    let result = attendance_registry::register_from_link(&ctx.client, &link, &code);
    ctx.print_notice(&Notice::from_result(&result, result.as_ref().copied().unwrap_or_default()));
    Ok(())
}
