use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

use crate::api::{ApiClient, RequestOptions};
use crate::error::CommunityResult;
use crate::model::{Id, IssuedCode, ListQuery, Meeting, NewMeeting, Page};
use crate::validation::{self, trim_optional};

const BASE: &str = "/reunion/reunion";

fn meeting_path(id: Id<Meeting>) -> String {
    format!("{}/{}", BASE, id)
}

pub fn list_meetings(client: &ApiClient, query: &ListQuery) -> CommunityResult<Page<Meeting>> {
    client.json(BASE, RequestOptions::get().query(query.to_pairs()))
}

pub fn get_meeting(client: &ApiClient, id: Id<Meeting>) -> CommunityResult<Meeting> {
    client.json(&meeting_path(id), RequestOptions::get())
}

/// Validates and creates a meeting. The gateway may answer with the new
/// record or just a confirmation; the record is returned when present.
pub fn create_meeting(
    client: &ApiClient,
    title: &str,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    location: &str,
    description: Option<&str>,
) -> CommunityResult<Option<Meeting>> {
    let meeting = NewMeeting {
        title: validation::non_blank(title, "title")?,
        description: trim_optional(description),
        date,
        start_time,
        end_time,
        location: validation::non_blank(location, "location")?,
    };
    validation::time_window(meeting.start_time, meeting.end_time)?;

    let created: Value = client.json(&format!("{}/create", BASE), RequestOptions::post().json(&meeting)?)?;
    log::info!("Created meeting '{}'", meeting.title);
    Ok(serde_json::from_value(created).ok())
}

/// Replaces the whole record; there is no field-level update.
pub fn update_meeting(client: &ApiClient, meeting: &Meeting) -> CommunityResult<()> {
    validation::non_blank(&meeting.title, "title")?;
    validation::non_blank(&meeting.location, "location")?;
    validation::time_window(meeting.start_time, meeting.end_time)?;
    client.execute(&meeting_path(meeting.id), RequestOptions::put().json(meeting)?)?;
    Ok(())
}

pub fn delete_meeting(client: &ApiClient, id: Id<Meeting>) -> CommunityResult<()> {
    client.execute(&meeting_path(id), RequestOptions::delete())?;
    Ok(())
}

/// Scheduled -> in progress.
pub fn open_meeting(client: &ApiClient, id: Id<Meeting>) -> CommunityResult<()> {
    client.execute(&format!("{}/abrir", meeting_path(id)), RequestOptions::patch())?;
    log::info!("Opened meeting {}", id);
    Ok(())
}

/// In progress -> closed.
pub fn close_meeting(client: &ApiClient, id: Id<Meeting>) -> CommunityResult<()> {
    client.execute(&format!("{}/cerrar", meeting_path(id)), RequestOptions::patch())?;
    log::info!("Closed meeting {}", id);
    Ok(())
}

/// Asks the server for the authoritative attendance code.
pub fn generate_attendance_code(client: &ApiClient, id: Id<Meeting>) -> CommunityResult<IssuedCode> {
    client.json(
        &format!("{}/generate-asistencia-code", meeting_path(id)),
        RequestOptions::post(),
    )
}
