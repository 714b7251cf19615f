use chrono::NaiveTime;
use serde_json::json;

use comunidad::model::*;
use comunidad::queries::{meeting_queries, person_queries};

fn meeting(id: i64, date: &str, start: &str, status: &str) -> Meeting {
    serde_json::from_value(json!({
        "id": id,
        "titulo": format!("Reunión {}", id),
        "fecha": date,
        "horaInicio": start,
        "horaFin": "23:00",
        "ubicacion": "Salón comunal",
        "estado": status
    }))
    .unwrap()
}

// ==========================================================================
// MEETING STATUS
// ==========================================================================

#[test]
fn status_round_trips_through_wire_names() {
    for status in [
        MeetingStatus::Programada,
        MeetingStatus::EnCurso,
        MeetingStatus::Cerrada,
        MeetingStatus::Completada,
        MeetingStatus::Cancelada,
    ] {
        assert_eq!(MeetingStatus::from_api_str(status.to_api_str()), Some(status));
        let wire = serde_json::to_value(status).unwrap();
        assert_eq!(wire, json!(status.to_api_str()));
    }
    assert_eq!(MeetingStatus::from_api_str(" en_curso "), Some(MeetingStatus::EnCurso));
    assert_eq!(MeetingStatus::from_api_str("ARCHIVADA"), None);
}

#[test]
fn only_scheduled_and_running_meetings_have_actions() {
    assert!(MeetingStatus::Programada.allows(MeetingAction::Delete));
    assert!(!MeetingStatus::EnCurso.allows(MeetingAction::Delete));
    assert!(MeetingStatus::EnCurso.allows(MeetingAction::GenerateCode));
    for status in [MeetingStatus::Cerrada, MeetingStatus::Completada, MeetingStatus::Cancelada] {
        assert!(status.actions().is_empty());
    }
}

#[test]
fn unknown_status_fails_to_parse() {
    let result: Result<Meeting, _> = serde_json::from_value(json!({
        "id": 1, "titulo": "X", "fecha": "2025-01-01",
        "horaInicio": "09:00", "horaFin": "10:00", "ubicacion": "Y", "estado": "ARCHIVADA"
    }));
    assert!(result.is_err());
}

#[test]
fn meeting_reads_optional_fields() {
    let m: Meeting = serde_json::from_value(json!({
        "idReunion": 4,
        "titulo": "Asamblea",
        "descripcion": "Anual",
        "fecha": "2025-03-01",
        "horaInicio": "10:00:00",
        "horaFin": "12:30",
        "ubicacion": "Salón A",
        "estado": "EN_CURSO",
        "codigoAsistencia": "ABC123",
        "totalAsistentes": 18
    }))
    .unwrap();

    assert_eq!(m.id, Id::new(4));
    assert_eq!(m.start_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    assert_eq!(m.end_time, NaiveTime::from_hms_opt(12, 30, 0).unwrap());
    assert_eq!(m.attendance_code.as_deref(), Some("ABC123"));
    assert_eq!(m.attendee_count, Some(18));
}

// ==========================================================================
// PAGES AND QUERIES
// ==========================================================================

#[test]
fn page_reads_items_alias_and_counts_pages() {
    let page: Page<Parcialidad> = serde_json::from_value(json!({
        "items": [{ "id": 1, "nombre": "Norte" }],
        "total": 21,
        "page": 2,
        "limit": 10
    }))
    .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.page_count(), 3);
    assert!(page.has_next());
}

#[test]
fn list_query_omits_blank_search() {
    let pairs = ListQuery::search("   ").to_pairs();
    assert_eq!(pairs, vec![("page", "1".to_string()), ("limit", "10".to_string())]);
}

#[test]
fn attendee_accepts_alternate_names() {
    let a: Attendee = serde_json::from_value(json!({
        "idPersona": 3, "nombre": "Rosa Xol", "documento": "99", "presente": true
    }))
    .unwrap();
    assert_eq!(a.full_name, "Rosa Xol");
    assert_eq!(a.document.as_deref(), Some("99"));
    assert!(a.present);
}

#[test]
fn role_claim_maps_to_role() {
    assert_eq!(Role::from_claim("Administrador"), Role::Admin);
    assert_eq!(Role::from_claim("admin"), Role::Admin);
    assert_eq!(Role::from_claim("usuario"), Role::Usuario);
    assert_eq!(Role::from_claim("otro"), Role::Usuario);
}

#[test]
fn upcoming_skips_past_and_closed_meetings() {
    let meetings = vec![
        meeting(1, "2025-03-10", "09:00", "PROGRAMADA"),
        meeting(2, "2025-03-01", "18:00", "EN_CURSO"),
        meeting(3, "2025-03-01", "08:00", "PROGRAMADA"),
        meeting(4, "2025-03-05", "09:00", "CERRADA"),
        meeting(5, "2025-02-20", "09:00", "PROGRAMADA"),
    ];
    let today = chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

    let ids: Vec<i64> = meeting_queries::upcoming(&meetings, today)
        .iter()
        .map(|m| m.id.value)
        .collect();

    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(meeting_queries::with_status(&meetings, MeetingStatus::Cerrada).len(), 1);
}

#[test]
fn attendee_search_matches_name_and_document() {
    let roll: Vec<Attendee> = serde_json::from_value(json!([
        { "idPersona": 1, "nombreCompleto": "Ana López", "dpi": "1234567", "asistio": true },
        { "idPersona": 2, "nombreCompleto": "Luis Pérez", "asistio": false },
        { "idPersona": 3, "nombreCompleto": "Rosa Anaya", "asistio": false }
    ]))
    .unwrap();

    assert_eq!(person_queries::matching_attendees(&roll, "ana").len(), 2);
    assert_eq!(person_queries::matching_attendees(&roll, "4567").len(), 1);
    assert_eq!(person_queries::matching_attendees(&roll, "  ").len(), 3);
}

#[test]
fn system_user_role_accepts_claim_spellings() {
    let user: SystemUser = serde_json::from_value(json!({
        "id": 2, "username": "lucia", "email": "l@example.com", "rol": "Administrador"
    }))
    .unwrap();
    assert_eq!(user.role, Role::Admin);
    assert_eq!(serde_json::to_value(user.role).unwrap(), json!("admin"));
}
