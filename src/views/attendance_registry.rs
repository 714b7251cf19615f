use crate::api::ApiClient;
use crate::attendance_code;
use crate::error::{CommunityError, CommunityResult};
use crate::model::{Attendee, Id, Meeting, Person};
use crate::ops::attendance_ops::{self, SELF_REGISTERED_MESSAGE};
use crate::queries::meeting_queries::AttendanceSummary;

/// A meeting's attendance roll.
#[derive(Debug, Clone)]
pub struct AttendanceRegistry {
    meeting_id: Id<Meeting>,
    entries: Vec<Attendee>,
}

impl AttendanceRegistry {
    pub fn load(client: &ApiClient, meeting_id: Id<Meeting>) -> CommunityResult<Self> {
        let entries = attendance_ops::list_attendees(client, meeting_id)?;
        Ok(Self { meeting_id, entries })
    }

    pub fn meeting_id(&self) -> Id<Meeting> {
        self.meeting_id
    }

    pub fn entries(&self) -> &[Attendee] {
        &self.entries
    }

    pub fn entry(&self, person_id: Id<Person>) -> Option<&Attendee> {
        self.entries.iter().find(|a| a.person_id == person_id)
    }

    pub fn summary(&self) -> AttendanceSummary {
        AttendanceSummary::of(&self.entries)
    }

    pub fn reload(&mut self, client: &ApiClient) -> CommunityResult<()> {
        self.entries = attendance_ops::list_attendees(client, self.meeting_id)?;
        Ok(())
    }

    /// Flips one person's flag: DELETE when present, POST when absent. The
    /// local flag only changes once the server accepted the call. Returns the
    /// new flag.
    pub fn toggle(&mut self, client: &ApiClient, person_id: Id<Person>) -> CommunityResult<bool> {
        let index = self
            .entries
            .iter()
            .position(|a| a.person_id == person_id)
            .ok_or_else(|| CommunityError::NotFound {
                entity_type: "Attendee".into(),
                id: person_id.to_string(),
            })?;

        let currently_present = self.entries[index].present;
        if currently_present {
            attendance_ops::mark_absent(client, self.meeting_id, person_id)?;
        } else {
            attendance_ops::mark_present(client, self.meeting_id, person_id)?;
        }

        self.entries[index].present = !currently_present;
        Ok(!currently_present)
    }
}

/// Self-service check-in for the logged-in person. Returns the message to
/// show on success.
pub fn register_self(
    client: &ApiClient,
    code: &str,
    meeting_id: Option<Id<Meeting>>,
) -> CommunityResult<&'static str> {
    let person_id = client
        .session()
        .person_id()
        .ok_or(CommunityError::NotAuthenticated)?;
    attendance_ops::register_with_code(client, code, person_id, meeting_id)?;
    Ok(SELF_REGISTERED_MESSAGE)
}

/// Same as [`register_self`], with the meeting taken from a scanned QR link.
pub fn register_from_link(client: &ApiClient, link: &str, code: &str) -> CommunityResult<&'static str> {
    let meeting_id = attendance_code::meeting_id_from_link(link).ok_or_else(|| CommunityError::InvalidFormat {
        field: "link".into(),
        expected: "a registration link or meeting id".into(),
    })?;
    register_self(client, code, Some(meeting_id))
}
