use chrono::{NaiveDate, NaiveTime};

use crate::error::{CommunityError, CommunityResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> CommunityResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(CommunityError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Passwords are sent exactly as typed; only an empty one is rejected.
pub fn password(value: &str) -> CommunityResult<String> {
    if value.is_empty() {
        Err(CommunityError::BlankField {
            field: "password".into(),
        })
    } else {
        Ok(value.to_string())
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn date(value: &str, field: &str) -> CommunityResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| CommunityError::InvalidFormat {
        field: field.to_string(),
        expected: "a date like 2025-03-01".into(),
    })
}

/// Parses a wall-clock time. Accepts `HH:MM` and `HH:MM:SS`.
pub fn time(value: &str, field: &str) -> CommunityResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| CommunityError::InvalidFormat {
            field: field.to_string(),
            expected: "a time like 10:00".into(),
        })
}

/// End must be strictly after start.
pub fn time_window(start: NaiveTime, end: NaiveTime) -> CommunityResult<()> {
    if end <= start {
        Err(CommunityError::InvalidRange(format!(
            "end time {} must be after start time {}",
            end.format("%H:%M"),
            start.format("%H:%M")
        )))
    } else {
        Ok(())
    }
}

/// Normalizes a typed attendance code: trimmed and uppercased. Whether it
/// is valid is the server's call.
pub fn attendance_code(value: &str) -> CommunityResult<String> {
    Ok(non_blank(value, "code")?.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_trims_whitespace() {
        assert_eq!(non_blank("  Asamblea  ", "title").unwrap(), "Asamblea");
    }

    #[test]
    fn non_blank_rejects_whitespace_only() {
        assert!(non_blank("   ", "title").is_err());
    }

    #[test]
    fn trim_optional_returns_none_for_blank() {
        assert_eq!(trim_optional(Some("   ")), None);
        assert_eq!(trim_optional(None), None);
        assert_eq!(trim_optional(Some(" Salón A ")), Some("Salón A".to_string()));
    }

    #[test]
    fn password_keeps_surrounding_spaces() {
        assert_eq!(password("  secret  ").unwrap(), "  secret  ");
        assert!(password("").is_err());
    }

    #[test]
    fn date_parses_iso() {
        assert_eq!(
            date("2025-03-01", "date").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert!(date("01/03/2025", "date").is_err());
    }

    #[test]
    fn time_accepts_minutes_and_seconds() {
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        assert_eq!(time("10:00", "start").unwrap(), ten);
        assert_eq!(time("10:00:00", "start").unwrap(), ten);
        assert!(time("25:00", "start").is_err());
    }

    #[test]
    fn time_window_requires_end_after_start() {
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert!(time_window(ten, noon).is_ok());
        assert!(time_window(noon, ten).is_err());
        assert!(time_window(ten, ten).is_err());
    }

    #[test]
    fn attendance_code_is_uppercased() {
        assert_eq!(attendance_code(" abc123 ").unwrap(), "ABC123");
    }

    #[test]
    fn attendance_code_leaves_shape_to_the_server() {
        assert!(attendance_code("   ").is_err());
        assert_eq!(attendance_code("abcd1234").unwrap(), "ABCD1234");
        assert_eq!(attendance_code("AB-12").unwrap(), "AB-12");
    }
}
