use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::meeting::Meeting;
use super::person::Person;

/// One row of a meeting's attendance roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    #[serde(rename = "idPersona")]
    pub person_id: Id<Person>,
    #[serde(rename = "idReunion", default, skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<Id<Meeting>>,
    #[serde(rename = "nombreCompleto", alias = "nombre", default)]
    pub full_name: String,
    #[serde(rename = "dpi", alias = "documento", default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(rename = "asistio", alias = "presente", default)]
    pub present: bool,
}

/// Body of a self-service registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelfRegistration {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "idPersona")]
    pub person_id: Id<Person>,
    #[serde(rename = "idReunion", skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<Id<Meeting>>,
}

/// Server-issued attendance code for an open meeting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssuedCode {
    #[serde(rename = "codigo", alias = "codigoAsistencia", alias = "code")]
    pub code: String,
}
