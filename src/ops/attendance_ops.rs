use crate::api::{ApiClient, RequestOptions};
use crate::error::CommunityResult;
use crate::model::{Attendee, Id, Meeting, Person, SelfRegistration};
use crate::validation;

const BASE: &str = "/asistencia/asistencia";

pub const SELF_REGISTERED_MESSAGE: &str = "Asistencia registrada correctamente";

fn roll_path(meeting_id: Id<Meeting>, person_id: Id<Person>) -> String {
    format!("{}/{}/{}", BASE, meeting_id, person_id)
}

/// Everyone associated with a meeting, present or not.
pub fn list_attendees(client: &ApiClient, meeting_id: Id<Meeting>) -> CommunityResult<Vec<Attendee>> {
    client.json(&format!("{}/reunion/{}", BASE, meeting_id), RequestOptions::get())
}

pub fn mark_present(client: &ApiClient, meeting_id: Id<Meeting>, person_id: Id<Person>) -> CommunityResult<()> {
    client.execute(&roll_path(meeting_id, person_id), RequestOptions::post())?;
    Ok(())
}

pub fn mark_absent(client: &ApiClient, meeting_id: Id<Meeting>, person_id: Id<Person>) -> CommunityResult<()> {
    client.execute(&roll_path(meeting_id, person_id), RequestOptions::delete())?;
    Ok(())
}

/// Self-service check-in with a typed code. The code is uppercased before it
/// is sent; the server decides whether it matches.
pub fn register_with_code(
    client: &ApiClient,
    code: &str,
    person_id: Id<Person>,
    meeting_id: Option<Id<Meeting>>,
) -> CommunityResult<()> {
    let registration = SelfRegistration {
        code: validation::attendance_code(code)?,
        person_id,
        meeting_id,
    };
    client.execute(BASE, RequestOptions::post().json(&registration)?)?;
    log::info!("Registered attendance for person {}", person_id);
    Ok(())
}
