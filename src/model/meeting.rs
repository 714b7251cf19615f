use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::ids::Id;

/// Lifecycle of a community meeting as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingStatus {
    Programada,
    EnCurso,
    Cerrada,
    /// Present in backend payloads but never produced by any client action.
    Completada,
    /// Present in backend payloads but never produced by any client action.
    Cancelada,
}

impl MeetingStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            MeetingStatus::Programada => "Scheduled",
            MeetingStatus::EnCurso => "In progress",
            MeetingStatus::Cerrada => "Closed",
            MeetingStatus::Completada => "Completed",
            MeetingStatus::Cancelada => "Cancelled",
        }
    }

    /// Parse from the wire representation, ignoring case.
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PROGRAMADA" => Some(MeetingStatus::Programada),
            "EN_CURSO" => Some(MeetingStatus::EnCurso),
            "CERRADA" => Some(MeetingStatus::Cerrada),
            "COMPLETADA" => Some(MeetingStatus::Completada),
            "CANCELADA" => Some(MeetingStatus::Cancelada),
            _ => None,
        }
    }

    /// Convert to the wire representation.
    pub fn to_api_str(&self) -> &'static str {
        match self {
            MeetingStatus::Programada => "PROGRAMADA",
            MeetingStatus::EnCurso => "EN_CURSO",
            MeetingStatus::Cerrada => "CERRADA",
            MeetingStatus::Completada => "COMPLETADA",
            MeetingStatus::Cancelada => "CANCELADA",
        }
    }

    /// Admin actions that make sense for a meeting in this status.
    pub fn actions(&self) -> &'static [MeetingAction] {
        match self {
            MeetingStatus::Programada => &[MeetingAction::Open, MeetingAction::Edit, MeetingAction::Delete],
            MeetingStatus::EnCurso => &[
                MeetingAction::Close,
                MeetingAction::Edit,
                MeetingAction::GenerateCode,
            ],
            MeetingStatus::Cerrada | MeetingStatus::Completada | MeetingStatus::Cancelada => &[],
        }
    }

    pub fn allows(&self, action: MeetingAction) -> bool {
        self.actions().contains(&action)
    }
}

/// An admin action on a single meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingAction {
    Open,
    Close,
    Edit,
    Delete,
    GenerateCode,
}

impl MeetingAction {
    pub fn verb(&self) -> &'static str {
        match self {
            MeetingAction::Open => "open",
            MeetingAction::Close => "close",
            MeetingAction::Edit => "edit",
            MeetingAction::Delete => "delete",
            MeetingAction::GenerateCode => "generate a code for",
        }
    }
}

/// A scheduled community gathering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(alias = "idReunion")]
    pub id: Id<Meeting>,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "horaInicio", with = "hour_minute")]
    pub start_time: NaiveTime,
    #[serde(rename = "horaFin", with = "hour_minute")]
    pub end_time: NaiveTime,
    #[serde(rename = "ubicacion")]
    pub location: String,
    #[serde(rename = "estado")]
    pub status: MeetingStatus,
    #[serde(rename = "codigoAsistencia", default, skip_serializing_if = "Option::is_none")]
    pub attendance_code: Option<String>,
    #[serde(rename = "totalAsistentes", default, skip_serializing_if = "Option::is_none")]
    pub attendee_count: Option<u32>,
}

/// Payload for `POST /reunion/reunion/create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMeeting {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "horaInicio", with = "hour_minute")]
    pub start_time: NaiveTime,
    #[serde(rename = "horaFin", with = "hour_minute")]
    pub end_time: NaiveTime,
    #[serde(rename = "ubicacion")]
    pub location: String,
}

/// Times travel as `HH:MM`; some endpoints answer with `HH:MM:SS`.
pub(crate) mod hour_minute {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
