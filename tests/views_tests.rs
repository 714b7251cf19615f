use chrono::{Duration, Utc};
use serde_json::{json, Value};

use comunidad::api::testing::{unsigned_jwt, ScriptedTransport};
use comunidad::api::{ApiClient, Method};
use comunidad::db::schema;
use comunidad::error::CommunityError;
use comunidad::model::{Id, MeetingAction, MeetingStatus};
use comunidad::ops::attendance_ops::SELF_REGISTERED_MESSAGE;
use comunidad::session::Session;
use comunidad::views::attendance_registry::{self, AttendanceRegistry};
use comunidad::views::MeetingView;

fn setup(role: &str) -> (ApiClient, ScriptedTransport) {
    let transport = ScriptedTransport::new();
    let mut session = Session::load(schema::test_connection()).unwrap();
    let token = unsigned_jwt(&json!({
        "exp": (Utc::now() + Duration::hours(1)).timestamp(),
        "role": role,
        "idPersona": 42
    }));
    session.login(&token, Some("r-1")).unwrap();
    let client = ApiClient::new("http://api.test", Box::new(transport.clone()), session);
    (client, transport)
}

fn meeting_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "titulo": "Asamblea",
        "fecha": "2025-03-01",
        "horaInicio": "10:00",
        "horaFin": "12:00",
        "ubicacion": "Salón A",
        "estado": status
    })
}

fn roll_json() -> Value {
    json!([
        { "idPersona": 1, "nombreCompleto": "Ana López", "dpi": "1234", "asistio": true },
        { "idPersona": 2, "nombreCompleto": "Luis Pérez", "asistio": false }
    ])
}

// ==========================================================================
// MEETING VIEW
// ==========================================================================

#[test]
fn actions_follow_status() {
    let (client, transport) = setup("admin");
    transport.respond_json(200, meeting_json(5, "PROGRAMADA"));

    let view = MeetingView::load(&client, Id::new(5)).unwrap();

    assert_eq!(
        view.actions(),
        &[MeetingAction::Open, MeetingAction::Edit, MeetingAction::Delete]
    );
    assert!(!view.can(MeetingAction::Close));
    assert!(!view.can(MeetingAction::GenerateCode));
}

#[test]
fn open_patches_then_reloads() {
    let (client, transport) = setup("admin");
    transport
        .respond_json(200, meeting_json(5, "PROGRAMADA"))
        .respond_empty(200)
        .respond_json(200, meeting_json(5, "EN_CURSO"));

    let mut view = MeetingView::load(&client, Id::new(5)).unwrap();
    view.open(&client).unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].method, Method::Patch);
    assert_eq!(requests[1].url, "http://api.test/reunion/reunion/5/abrir");
    assert_eq!(requests[2].method, Method::Get);
    assert_eq!(view.meeting().status, MeetingStatus::EnCurso);
    assert_eq!(
        view.actions(),
        &[MeetingAction::Close, MeetingAction::Edit, MeetingAction::GenerateCode]
    );
}

#[test]
fn close_patches_cerrar() {
    let (client, transport) = setup("admin");
    transport
        .respond_json(200, meeting_json(5, "EN_CURSO"))
        .respond_empty(200)
        .respond_json(200, meeting_json(5, "CERRADA"));

    let mut view = MeetingView::load(&client, Id::new(5)).unwrap();
    view.close(&client).unwrap();

    assert_eq!(transport.requests()[1].url, "http://api.test/reunion/reunion/5/cerrar");
    assert!(view.actions().is_empty());
}

#[test]
fn unavailable_action_sends_nothing() {
    let (client, transport) = setup("admin");
    transport.respond_json(200, meeting_json(5, "CERRADA"));

    let mut view = MeetingView::load(&client, Id::new(5)).unwrap();
    let err = view.open(&client).unwrap_err();

    assert!(matches!(err, CommunityError::ActionUnavailable { .. }));
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn completed_and_cancelled_are_display_only() {
    for status in ["COMPLETADA", "CANCELADA"] {
        let (client, transport) = setup("admin");
        transport.respond_json(200, meeting_json(9, status));
        let mut view = MeetingView::load(&client, Id::new(9)).unwrap();
        assert!(view.actions().is_empty());
        assert!(view.begin_edit().is_err());
    }
}

#[test]
fn failed_open_keeps_status() {
    let (client, transport) = setup("admin");
    transport
        .respond_json(200, meeting_json(5, "PROGRAMADA"))
        .respond_json(409, json!({ "mensaje": "La reunión ya fue abierta" }));

    let mut view = MeetingView::load(&client, Id::new(5)).unwrap();
    let err = view.open(&client).unwrap_err();

    assert_eq!(err.to_string(), "La reunión ya fue abierta");
    assert_eq!(view.meeting().status, MeetingStatus::Programada);
    assert_eq!(transport.request_count(), 2);
}

#[test]
fn generate_code_returns_server_code() {
    let (client, transport) = setup("admin");
    let mut refreshed = meeting_json(5, "EN_CURSO");
    refreshed["codigoAsistencia"] = json!("QWE123");
    transport
        .respond_json(200, meeting_json(5, "EN_CURSO"))
        .respond_json(200, json!({ "codigo": "QWE123" }))
        .respond(comunidad::api::HttpResponse::json(200, &refreshed));

    let mut view = MeetingView::load(&client, Id::new(5)).unwrap();
    let code = view.generate_code(&client).unwrap();

    assert_eq!(code, "QWE123");
    assert_eq!(
        transport.requests()[1].url,
        "http://api.test/reunion/reunion/5/generate-asistencia-code"
    );
    assert_eq!(view.meeting().attendance_code.as_deref(), Some("QWE123"));
}

#[test]
fn cancel_edit_discards_draft() {
    let (client, transport) = setup("admin");
    transport.respond_json(200, meeting_json(5, "PROGRAMADA"));

    let mut view = MeetingView::load(&client, Id::new(5)).unwrap();
    view.begin_edit().unwrap().title = "Cambiado".into();
    view.cancel_edit();

    assert!(!view.is_editing());
    assert_eq!(view.meeting().title, "Asamblea");
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn save_puts_full_record_then_reloads() {
    let (client, transport) = setup("admin");
    let mut updated = meeting_json(5, "PROGRAMADA");
    updated["titulo"] = json!("Asamblea general");
    transport
        .respond_json(200, meeting_json(5, "PROGRAMADA"))
        .respond_empty(200)
        .respond(comunidad::api::HttpResponse::json(200, &updated));

    let mut view = MeetingView::load(&client, Id::new(5)).unwrap();
    view.begin_edit().unwrap().title = "Asamblea general".into();
    view.save(&client).unwrap();

    let put = &transport.requests()[1];
    assert_eq!(put.method, Method::Put);
    assert_eq!(put.url, "http://api.test/reunion/reunion/5");
    let body = put.body_json().unwrap();
    assert_eq!(body["titulo"], "Asamblea general");
    assert_eq!(body["horaInicio"], "10:00");
    assert_eq!(body["estado"], "PROGRAMADA");
    assert!(!view.is_editing());
    assert_eq!(view.meeting().title, "Asamblea general");
}

#[test]
fn invalid_draft_is_kept_and_not_sent() {
    let (client, transport) = setup("admin");
    transport.respond_json(200, meeting_json(5, "PROGRAMADA"));

    let mut view = MeetingView::load(&client, Id::new(5)).unwrap();
    let draft = view.begin_edit().unwrap();
    draft.end_time = draft.start_time;

    assert!(matches!(view.save(&client), Err(CommunityError::InvalidRange(_))));
    assert!(view.is_editing());
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn delete_only_when_scheduled() {
    let (client, transport) = setup("admin");
    transport
        .respond_json(200, meeting_json(5, "PROGRAMADA"))
        .respond_empty(204);

    let view = MeetingView::load(&client, Id::new(5)).unwrap();
    view.delete(&client).unwrap();

    let last = transport.last_request().unwrap();
    assert_eq!(last.method, Method::Delete);
    assert_eq!(last.url, "http://api.test/reunion/reunion/5");
}

// ==========================================================================
// ATTENDANCE REGISTRY
// ==========================================================================

#[test]
fn loads_roll_and_summary() {
    let (client, transport) = setup("admin");
    transport.respond_json(200, roll_json());

    let registry = AttendanceRegistry::load(&client, Id::new(5)).unwrap();

    assert_eq!(
        transport.last_request().unwrap().url,
        "http://api.test/asistencia/asistencia/reunion/5"
    );
    assert_eq!(registry.entries().len(), 2);
    let summary = registry.summary();
    assert_eq!((summary.present, summary.total), (1, 2));
    assert_eq!(summary.percent(), 50);
}

#[test]
fn toggling_present_person_sends_one_delete() {
    let (client, transport) = setup("admin");
    transport.respond_json(200, roll_json()).respond_empty(204);

    let mut registry = AttendanceRegistry::load(&client, Id::new(5)).unwrap();
    let now_present = registry.toggle(&client, Id::new(1)).unwrap();

    assert!(!now_present);
    assert_eq!(transport.request_count(), 2);
    let last = transport.last_request().unwrap();
    assert_eq!(last.method, Method::Delete);
    assert_eq!(last.url, "http://api.test/asistencia/asistencia/5/1");
    assert!(!registry.entry(Id::new(1)).unwrap().present);
}

#[test]
fn toggling_absent_person_posts() {
    let (client, transport) = setup("admin");
    transport.respond_json(200, roll_json()).respond_empty(201);

    let mut registry = AttendanceRegistry::load(&client, Id::new(5)).unwrap();
    assert!(registry.toggle(&client, Id::new(2)).unwrap());

    let last = transport.last_request().unwrap();
    assert_eq!(last.method, Method::Post);
    assert_eq!(last.url, "http://api.test/asistencia/asistencia/5/2");
    assert_eq!(registry.summary().present, 2);
}

#[test]
fn failed_toggle_keeps_flag() {
    let (client, transport) = setup("admin");
    transport
        .respond_json(200, roll_json())
        .respond_json(500, json!({ "message": "db down" }));

    let mut registry = AttendanceRegistry::load(&client, Id::new(5)).unwrap();
    let err = registry.toggle(&client, Id::new(1)).unwrap_err();

    assert_eq!(err.to_string(), "db down");
    assert!(registry.entry(Id::new(1)).unwrap().present);
}

#[test]
fn toggling_unknown_person_sends_nothing() {
    let (client, transport) = setup("admin");
    transport.respond_json(200, roll_json());

    let mut registry = AttendanceRegistry::load(&client, Id::new(5)).unwrap();
    assert!(matches!(
        registry.toggle(&client, Id::new(99)),
        Err(CommunityError::NotFound { .. })
    ));
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn self_registration_uppercases_code() {
    let (client, transport) = setup("usuario");
    transport.respond_json(201, json!({ "ok": true }));

    let message = attendance_registry::register_self(&client, " abc123 ", Some(Id::new(5))).unwrap();

    assert_eq!(message, SELF_REGISTERED_MESSAGE);
    let request = transport.last_request().unwrap();
    assert_eq!(request.url, "http://api.test/asistencia/asistencia");
    assert_eq!(
        request.body_json().unwrap(),
        json!({ "codigo": "ABC123", "idPersona": 42, "idReunion": 5 })
    );
}

#[test]
fn self_registration_without_meeting_omits_it() {
    let (client, transport) = setup("usuario");
    transport.respond_empty(201);

    attendance_registry::register_self(&client, "xyz789", None).unwrap();

    assert_eq!(
        transport.last_request().unwrap().body_json().unwrap(),
        json!({ "codigo": "XYZ789", "idPersona": 42 })
    );
}

#[test]
fn blank_code_is_rejected_locally() {
    let (client, transport) = setup("usuario");

    assert!(attendance_registry::register_self(&client, "   ", None).is_err());
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn code_of_any_shape_goes_to_the_server() {
    let (client, transport) = setup("usuario");
    transport.respond_empty(201);

    attendance_registry::register_self(&client, "abcd1234", None).unwrap();

    assert_eq!(transport.last_request().unwrap().body_json().unwrap()["codigo"], "ABCD1234");
}

#[test]
fn wrong_code_shows_server_message() {
    let (client, transport) = setup("usuario");
    transport.respond_json(400, json!({ "mensaje": "Código incorrecto" }));

    let err = attendance_registry::register_self(&client, "ABC123", None).unwrap_err();
    assert_eq!(err.to_string(), "Código incorrecto");
}

#[test]
fn registration_from_link_uses_linked_meeting() {
    let (client, transport) = setup("usuario");
    transport.respond_empty(201);

    attendance_registry::register_from_link(&client, "http://localhost:5173/asistencia/registrar/17", "abc123")
        .unwrap();

    assert_eq!(transport.last_request().unwrap().body_json().unwrap()["idReunion"], 17);
}
