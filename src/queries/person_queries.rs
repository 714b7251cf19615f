use crate::model::Attendee;

/// Roll entries whose name or document matches.
pub fn matching_attendees<'a>(attendees: &'a [Attendee], term: &str) -> Vec<&'a Attendee> {
    let lower = term.trim().to_lowercase();
    attendees
        .iter()
        .filter(|a| {
            lower.is_empty()
                || a.full_name.to_lowercase().contains(&lower)
                || a.document
                    .as_ref()
                    .map(|d| d.to_lowercase().contains(&lower))
                    .unwrap_or(false)
        })
        .collect()
}
