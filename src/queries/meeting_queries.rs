use chrono::NaiveDate;

use crate::model::{Attendee, Meeting, MeetingStatus};

pub fn with_status(meetings: &[Meeting], status: MeetingStatus) -> Vec<&Meeting> {
    meetings.iter().filter(|m| m.status == status).collect()
}

/// Meetings on or after `today` that have not been closed, soonest first.
pub fn upcoming(meetings: &[Meeting], today: NaiveDate) -> Vec<&Meeting> {
    let mut result: Vec<&Meeting> = meetings
        .iter()
        .filter(|m| m.date >= today)
        .filter(|m| matches!(m.status, MeetingStatus::Programada | MeetingStatus::EnCurso))
        .collect();
    result.sort_by_key(|m| (m.date, m.start_time));
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub present: usize,
    pub total: usize,
}

impl AttendanceSummary {
    pub fn of(attendees: &[Attendee]) -> Self {
        Self {
            present: attendees.iter().filter(|a| a.present).count(),
            total: attendees.len(),
        }
    }

    /// Whole-number percentage present; 0 for an empty roll.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            ((self.present * 100) / self.total) as u32
        }
    }
}
