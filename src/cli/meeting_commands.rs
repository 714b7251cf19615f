use std::path::PathBuf;

use crate::attendance_code;
use crate::cli::context::CliContext;
use crate::error::CommunityResult;
use crate::model::{ListQuery, Meeting, MeetingAction, MeetingStatus};
use crate::ops::meeting_ops;
use crate::queries::meeting_queries;
use crate::validation;
use crate::views::{MeetingView, Notice};

fn print_row(meeting: &Meeting) {
    println!(
        "  #{} {} - {} {}-{} @ {} [{}]",
        meeting.id,
        meeting.title,
        meeting.date,
        meeting.start_time.format("%H:%M"),
        meeting.end_time.format("%H:%M"),
        meeting.location,
        meeting.status.display_name()
    );
}

/// `meetings [page] [search | status]`. A status name filters the page
/// instead of searching.
pub fn list(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let (page, search) = split_page_and_search(args);
    let status = search.as_deref().and_then(MeetingStatus::from_api_str);
    let query = ListQuery {
        page,
        search: if status.is_some() { None } else { search },
        ..ListQuery::default()
    };
    let result = meeting_ops::list_meetings(&ctx.client, &query)?;

    let rows: Vec<&Meeting> = match status {
        Some(status) => meeting_queries::with_status(&result.data, status),
        None => result.data.iter().collect(),
    };
    if rows.is_empty() {
        println!("No meetings found.");
        return Ok(());
    }
    println!("Meetings (page {}/{}, {} total):", result.page, result.page_count(), result.total);
    for meeting in rows {
        print_row(meeting);
    }
    if result.has_next() {
        println!("More: meetings {}", result.page + 1);
    }
    Ok(())
}

pub fn upcoming(ctx: &CliContext) -> CommunityResult<()> {
    let all = meeting_ops::list_meetings(&ctx.client, &ListQuery { limit: 100, ..ListQuery::default() })?;
    let upcoming = meeting_queries::upcoming(&all.data, CliContext::today());
    if upcoming.is_empty() {
        println!("No upcoming meetings.");
        return Ok(());
    }
    println!("Upcoming meetings ({}):", upcoming.len());
    for meeting in upcoming {
        print_row(meeting);
    }
    Ok(())
}

pub fn show(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id = match ctx.parse_id(args, "show-meeting <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let view = MeetingView::load(&ctx.client, id)?;
    print_meeting(ctx, &view);
    Ok(())
}

fn print_meeting(ctx: &CliContext, view: &MeetingView) {
    let m = view.meeting();
    println!();
    println!("Meeting #{}: {}", m.id, m.title);
    println!("Date: {}", m.date);
    println!("Time: {} - {}", m.start_time.format("%H:%M"), m.end_time.format("%H:%M"));
    println!("Location: {}", m.location);
    println!("Status: {}", m.status.display_name());
    if let Some(description) = &m.description {
        println!("Description: {}", description);
    }
    if let Some(code) = &m.attendance_code {
        println!("Attendance code: {}", code);
    }
    if let Some(count) = m.attendee_count {
        println!("Attendees: {}", count);
    }

    if ctx.client.session().is_admin() {
        let actions: Vec<&str> = view.actions().iter().map(|a| action_command(*a)).collect();
        if actions.is_empty() {
            println!("Actions: (none)");
        } else {
            println!("Actions: {}", actions.join(", "));
        }
    }
}

fn action_command(action: MeetingAction) -> &'static str {
    match action {
        MeetingAction::Open => "open-meeting",
        MeetingAction::Close => "close-meeting",
        MeetingAction::Edit => "edit-meeting",
        MeetingAction::Delete => "delete-meeting",
        MeetingAction::GenerateCode => "meeting-code",
    }
}

pub fn add(ctx: &CliContext) -> CommunityResult<()> {
    println!("New meeting");
    let title = match ctx.prompt("Title: ") {
        Some(s) => s,
        None => return Ok(()),
    };
    let date = match ctx.prompt("Date (YYYY-MM-DD): ") {
        Some(s) => validation::date(&s, "date")?,
        None => return Ok(()),
    };
    let start = match ctx.prompt("Start (HH:MM): ") {
        Some(s) => validation::time(&s, "start time")?,
        None => return Ok(()),
    };
    let end = match ctx.prompt("End (HH:MM): ") {
        Some(s) => validation::time(&s, "end time")?,
        None => return Ok(()),
    };
    let location = match ctx.prompt("Location: ") {
        Some(s) => s,
        None => return Ok(()),
    };
    let description = ctx.prompt("Description (optional): ").unwrap_or_default();

    meeting_ops::create_meeting(
        &ctx.client,
        &title,
        date,
        start,
        end,
        &location,
        Some(description.as_str()),
    )?;
    after_change(ctx, "Meeting created.")
}

/// Success notice, then the list fetched again from the server.
fn after_change(ctx: &CliContext, message: &str) -> CommunityResult<()> {
    ctx.print_notice(&Notice::Success(message.to_string()));
    list(ctx, "")
}

pub fn edit(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id = match ctx.parse_id(args, "edit-meeting <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let mut view = MeetingView::load(&ctx.client, id)?;
    let draft = view.begin_edit()?.clone();

    println!("Editing meeting #{} (Enter keeps the current value, 'c' cancels)", id);
    let mut edited = draft;

    macro_rules! field_or_cancel {
        ($label:expr, $current:expr) => {
            match ctx.prompt_with_default($label, &$current) {
                Some(s) if s.eq_ignore_ascii_case("c") => {
                    view.cancel_edit();
                    println!("Edit cancelled.");
                    return Ok(());
                }
                Some(s) => s,
                None => return Ok(()),
            }
        };
    }

    edited.title = field_or_cancel!("Title", edited.title);
    edited.date = validation::date(&field_or_cancel!("Date", edited.date.to_string()), "date")?;
    edited.start_time = validation::time(
        &field_or_cancel!("Start", edited.start_time.format("%H:%M").to_string()),
        "start time",
    )?;
    edited.end_time = validation::time(
        &field_or_cancel!("End", edited.end_time.format("%H:%M").to_string()),
        "end time",
    )?;
    edited.location = field_or_cancel!("Location", edited.location);
    if let Some(description) = ctx.prompt_optional("Description", edited.description.as_deref()) {
        edited.description = description;
    }

    if let Some(draft) = view.draft_mut() {
        *draft = edited;
    }
    view.save(&ctx.client)?;
    ctx.print_notice(&Notice::Success("Meeting updated.".into()));
    print_meeting(ctx, &view);
    Ok(())
}

pub fn open(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id = match ctx.parse_id(args, "open-meeting <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let mut view = MeetingView::load(&ctx.client, id)?;
    view.open(&ctx.client)?;
    println!("Meeting '{}' is now {}.", view.meeting().title, view.meeting().status.display_name());
    Ok(())
}

pub fn close(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id = match ctx.parse_id(args, "close-meeting <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let mut view = MeetingView::load(&ctx.client, id)?;
    if !ctx.confirm(&format!("Close '{}'? Attendance can no longer be registered", view.meeting().title)) {
        return Ok(());
    }
    view.close(&ctx.client)?;
    println!("Meeting '{}' is now {}.", view.meeting().title, view.meeting().status.display_name());
    Ok(())
}

pub fn delete(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id = match ctx.parse_id(args, "delete-meeting <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let view = MeetingView::load(&ctx.client, id)?;
    if !ctx.confirm(&format!("Delete '{}'?", view.meeting().title)) {
        return Ok(());
    }
    remove(ctx, view)
}

fn remove(ctx: &CliContext, view: MeetingView) -> CommunityResult<()> {
    view.delete(&ctx.client)?;
    after_change(ctx, "Meeting deleted.")
}

/// Shows a placeholder while asking the server for the real code.
pub fn code(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id = match ctx.parse_id(args, "meeting-code <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let mut view = MeetingView::load(&ctx.client, id)?;
    println!("Generating code (preview {})...", attendance_code::generate());
    let code = view.generate_code(&ctx.client)?;
    println!("Attendance code for '{}': {}", view.meeting().title, code);
    Ok(())
}

/// `meeting-qr <id> [file.svg]`
pub fn qr(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id = match ctx.parse_id(args, "meeting-qr <id> [file.svg]") {
        Some(id) => id,
        None => return Ok(()),
    };
    let meeting = meeting_ops::get_meeting(&ctx.client, id)?;
    let link = attendance_code::registration_link(&ctx.config.public_url, meeting.id);

    println!("{}", attendance_code::render_terminal(&link)?);
    println!("{}", link);
    if let Some(code) = &meeting.attendance_code {
        println!("Code: {}", code);
    }

    if let Some(path) = args.split_whitespace().nth(1) {
        let path = PathBuf::from(path);
        std::fs::write(&path, attendance_code::render_svg(&link)?)?;
        println!("Saved QR to {}", path.display());
    }
    Ok(())
}

/// Leading number is a page, the rest a search term.
pub(crate) fn split_page_and_search(args: &str) -> (u32, Option<String>) {
    let args = args.trim();
    let (first, rest) = match args.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (args, ""),
    };
    match first.parse::<u32>() {
        Ok(page) => (page.max(1), Some(rest.to_string()).filter(|s| !s.is_empty())),
        Err(_) => (1, Some(args.to_string()).filter(|s| !s.is_empty())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{unsigned_jwt, ScriptedTransport};
    use crate::api::{ApiClient, Method};
    use crate::config::Config;
    use crate::db::schema;
    use crate::model::Id;
    use crate::session::Session;
    use serde_json::json;

    fn admin_context() -> (CliContext, ScriptedTransport) {
        let transport = ScriptedTransport::new();
        let mut session = Session::load(schema::test_connection()).unwrap();
        let token = unsigned_jwt(&json!({
            "exp": (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp(),
            "role": "admin"
        }));
        session.login(&token, None).unwrap();
        let client = ApiClient::new("http://api.test", Box::new(transport.clone()), session);
        (CliContext::new(client, Config::from_lookup(|_| None)), transport)
    }

    #[test]
    fn deleting_a_meeting_fetches_the_list_again() {
        let (ctx, transport) = admin_context();
        transport
            .respond_json(
                200,
                json!({
                    "id": 4, "titulo": "Asamblea", "fecha": "2025-03-01",
                    "horaInicio": "10:00", "horaFin": "12:00",
                    "ubicacion": "Salón A", "estado": "PROGRAMADA"
                }),
            )
            .respond_empty(204)
            .respond_json(200, json!({ "data": [], "total": 0, "page": 1, "limit": 10 }));

        let view = MeetingView::load(&ctx.client, Id::new(4)).unwrap();
        remove(&ctx, view).unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[2].method, Method::Get);
        assert_eq!(requests[2].url, "http://api.test/reunion/reunion");
    }

    #[test]
    fn created_meeting_is_followed_by_a_list_fetch() {
        let (ctx, transport) = admin_context();
        transport
            .respond_empty(201)
            .respond_json(200, json!({ "data": [], "total": 0, "page": 1, "limit": 10 }));

        meeting_ops::create_meeting(
            &ctx.client,
            "Asamblea",
            validation::date("2025-03-01", "date").unwrap(),
            validation::time("10:00", "start").unwrap(),
            validation::time("12:00", "end").unwrap(),
            "Salón A",
            None,
        )
        .unwrap();
        after_change(&ctx, "Meeting created.").unwrap();

        assert_eq!(transport.last_request().unwrap().url, "http://api.test/reunion/reunion");
    }

    #[test]
    fn status_argument_is_not_sent_as_search() {
        let (ctx, transport) = admin_context();
        transport.respond_json(200, json!({ "data": [], "total": 0, "page": 1, "limit": 10 }));

        list(&ctx, "en_curso").unwrap();

        let request = transport.last_request().unwrap();
        assert!(!request.query.iter().any(|(k, _)| k == "search"));
    }
}
