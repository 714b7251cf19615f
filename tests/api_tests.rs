use chrono::{Duration, Utc};
use serde_json::json;

use comunidad::api::testing::{unsigned_jwt, ScriptedTransport};
use comunidad::api::{ApiClient, HttpResponse, Method, MultipartForm, RequestOptions};
use comunidad::db::schema;
use comunidad::error::CommunityError;
use comunidad::model::{ListQuery, Meeting, Page};
use comunidad::ops::auth_ops;
use comunidad::session::Session;
use comunidad::views::Notice;

fn setup(expires_in_minutes: Option<i64>) -> (ApiClient, ScriptedTransport) {
    let transport = ScriptedTransport::new();
    let mut session = Session::load(schema::test_connection()).unwrap();
    if let Some(minutes) = expires_in_minutes {
        let token = unsigned_jwt(&json!({
            "exp": (Utc::now() + Duration::minutes(minutes)).timestamp(),
            "role": "admin",
            "idPersona": 1
        }));
        session.login(&token, Some("r-1")).unwrap();
    }
    let client = ApiClient::new("http://api.test/", Box::new(transport.clone()), session);
    (client, transport)
}

// ==========================================================================
// REQUEST SHAPE
// ==========================================================================

#[test]
fn attaches_bearer_token() {
    let (client, transport) = setup(Some(60));
    transport.respond_json(200, json!([]));

    let _: Vec<serde_json::Value> = client.json("/parcialidad", RequestOptions::get()).unwrap();

    let request = transport.last_request().unwrap();
    let token = client.session().token().unwrap();
    assert_eq!(request.header("authorization"), Some(format!("Bearer {}", token).as_str()));
    assert_eq!(request.url, "http://api.test/parcialidad");
    assert_eq!(request.method, Method::Get);
}

#[test]
fn anonymous_request_has_no_bearer() {
    let (client, transport) = setup(Some(60));
    transport.respond_empty(204);

    client
        .execute("/password/recovery", RequestOptions::post().anonymous())
        .unwrap();

    assert_eq!(transport.last_request().unwrap().header("Authorization"), None);
}

#[test]
fn json_body_sets_content_type() {
    let (client, transport) = setup(Some(60));
    transport.respond_empty(201);

    client
        .execute("/parcialidad", RequestOptions::post().json(&json!({ "nombre": "Norte" })).unwrap())
        .unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert_eq!(request.body_json().unwrap(), json!({ "nombre": "Norte" }));
}

#[test]
fn multipart_body_carries_its_boundary() {
    let (client, transport) = setup(Some(60));
    transport.respond_empty(201);

    let form = MultipartForm::new()
        .text("titulo", "Jornada")
        .file("fotos", "a.jpg", "image/jpeg", vec![0xFF, 0xD8]);
    client
        .execute("/index/index", RequestOptions::post().multipart(form))
        .unwrap();

    let request = transport.last_request().unwrap();
    let content_type = request.header("Content-Type").unwrap();
    let boundary = content_type
        .strip_prefix("multipart/form-data; boundary=")
        .expect("multipart content type");
    let body = String::from_utf8_lossy(request.body.as_deref().unwrap()).into_owned();
    assert!(body.contains(&format!("--{}", boundary)));
    assert!(body.contains(r#"name="titulo""#));
    assert!(body.contains(r#"filename="a.jpg""#));
    assert!(body.trim_end().ends_with(&format!("--{}--", boundary)));
}

#[test]
fn list_query_goes_into_query_string() {
    let (client, transport) = setup(Some(60));
    transport.respond_json(200, json!({ "data": [], "total": 0, "page": 2, "limit": 10 }));

    let query = ListQuery {
        page: 2,
        search: Some(" asamblea ".into()),
        ..ListQuery::default()
    };
    let page: Page<Meeting> = client
        .json("/reunion/reunion", RequestOptions::get().query(query.to_pairs()))
        .unwrap();

    assert!(page.is_empty());
    let request = transport.last_request().unwrap();
    assert!(request.query.contains(&("page".to_string(), "2".to_string())));
    assert!(request.query.contains(&("limit".to_string(), "10".to_string())));
    assert!(request.query.contains(&("search".to_string(), "asamblea".to_string())));
}

// ==========================================================================
// EXPIRED TOKEN
// ==========================================================================

#[test]
fn expired_token_is_rejected_before_sending() {
    let (client, transport) = setup(Some(-1));

    let err = client.execute("/personas", RequestOptions::get()).unwrap_err();

    assert!(matches!(err, CommunityError::SessionExpired));
    assert!(err.ends_session());
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn expired_token_does_not_block_anonymous_calls() {
    let (client, transport) = setup(Some(-1));
    transport.respond_empty(200);

    client
        .execute("/password/recovery", RequestOptions::post().anonymous())
        .unwrap();

    assert_eq!(transport.request_count(), 1);
}

// ==========================================================================
// ERROR NORMALIZATION
// ==========================================================================

#[test]
fn server_mensaje_reaches_the_error_notice() {
    let (client, transport) = setup(Some(60));
    transport.respond_json(422, json!({ "mensaje": "Documento inválido" }));

    let result = client.execute("/personas", RequestOptions::post().json(&json!({})).unwrap());
    let notice = Notice::from_result(&result, "Guardado");

    assert!(notice.is_error());
    assert_eq!(notice.text(), "Documento inválido");
    assert!(matches!(result, Err(CommunityError::Api { status: 422, .. })));
}

#[test]
fn plain_text_error_is_used_verbatim() {
    let (client, transport) = setup(Some(60));
    transport.respond(HttpResponse::new(502, "Bad gateway upstream"));

    let err = client.execute("/personas", RequestOptions::get()).unwrap_err();
    assert_eq!(err.to_string(), "Bad gateway upstream");
}

#[test]
fn empty_error_body_uses_status_line() {
    let (client, transport) = setup(Some(60));
    transport.respond_empty(404);

    let err = client.execute("/personas/99", RequestOptions::get()).unwrap_err();
    assert_eq!(err.to_string(), "Error 404: Not Found");
}

#[test]
fn unauthorized_response_ends_session() {
    let (client, transport) = setup(Some(60));
    transport.respond_json(401, json!({ "detail": "Token inválido" }));

    let err = client.execute("/personas", RequestOptions::get()).unwrap_err();
    assert!(err.ends_session());
    assert_eq!(err.to_string(), "Token inválido");
}

#[test]
fn unauthorized_anonymous_call_keeps_session() {
    let (mut client, transport) = setup(Some(60));
    transport.respond_json(401, json!({ "detail": "Credenciales inválidas" }));

    let err = auth_ops::login(&mut client, "ana", "mal").unwrap_err();

    assert!(!err.ends_session());
    assert!(matches!(err, CommunityError::Api { status: 401, .. }));
    assert!(client.session().is_authenticated());
}

#[test]
fn transport_failure_is_reported() {
    let (client, transport) = setup(Some(60));
    transport.fail_transport("connection refused");

    let err = client.execute("/personas", RequestOptions::get()).unwrap_err();
    assert!(matches!(err, CommunityError::Transport(_)));
    assert!(!err.ends_session());
}

// ==========================================================================
// RESPONSE BODIES
// ==========================================================================

#[test]
fn empty_success_body_reads_as_null() {
    let (client, transport) = setup(Some(60));
    transport.respond_empty(204);

    let value: Option<serde_json::Value> = client.json("/personas/1", RequestOptions::delete()).unwrap();
    assert_eq!(value, None);
}

#[test]
fn blob_keeps_download_headers() {
    let (client, transport) = setup(Some(60));
    transport.respond(
        HttpResponse::new(200, vec![1u8, 2, 3])
            .with_header("Content-Type", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
            .with_header("Content-Disposition", r#"attachment; filename="personas.xlsx""#),
    );

    let blob = client.blob("/reportes/reporte/personas", RequestOptions::get()).unwrap();

    assert_eq!(blob.bytes, vec![1, 2, 3]);
    assert_eq!(
        blob.content_disposition.as_deref(),
        Some(r#"attachment; filename="personas.xlsx""#)
    );
    assert!(blob.content_type.unwrap().contains("spreadsheetml"));
}

#[test]
fn text_returns_raw_body() {
    let (client, transport) = setup(Some(60));
    transport.respond(HttpResponse::new(200, "ok"));

    assert_eq!(client.text("/health", RequestOptions::get().anonymous()).unwrap(), "ok");
}
