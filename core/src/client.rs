//! Stateless HTTP request builder and response parser for the festival API.
//!
//! # Design
//! `FestivalClient` holds only a `base_url` and carries no mutable state
//! between calls. Each backend operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`; `transport::execute` performs the round-trip in between.
//!
//! The bearer token is passed into every `build_*` call by reference — it is
//! read at request-build time, and the session that owns it lives elsewhere.
//! When present it is attached uniformly, public endpoints included; requests
//! proceed without one if absent.
//!
//! Parsing applies one envelope rule for every endpoint: a top-level
//! `{"data": X}` wrapper is unwrapped to `X` before deserializing, so callers
//! see the same flat shape regardless of which convention the backend used
//! for that route. Beyond that, payloads pass through unmodified.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::content::StaticContent;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, MultipartForm, RequestBody};
use crate::types::{
    CommitteeMember, CommitteeMemberInput, CurrentUser, Event, EventInput, LoginRequest,
    LoginResponse, Registration, RegistrationInput, UploadResponse, User, UserInput,
};

/// Form field name the upload endpoint expects.
const UPLOAD_FIELD: &str = "file";

/// Stateless builder/parser for every festival backend operation.
#[derive(Debug, Clone)]
pub struct FestivalClient {
    base_url: String,
}

impl FestivalClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build(
        &self,
        method: HttpMethod,
        endpoint: &str,
        token: Option<&str>,
        body: Option<RequestBody>,
    ) -> HttpRequest {
        let mut headers = Vec::new();
        match &body {
            Some(RequestBody::Json(_)) => headers.push((
                "content-type".to_string(),
                "application/json".to_string(),
            )),
            // Multipart sets its own boundary-bearing content type; a JSON
            // content type here would break the part framing.
            Some(RequestBody::Multipart(form)) => {
                headers.push(("content-type".to_string(), form.content_type_header()));
            }
            None => {}
        }
        if let Some(token) = token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        HttpRequest {
            method,
            path: format!("{}{endpoint}", self.base_url),
            headers,
            body,
        }
    }

    fn json_body<T: Serialize>(input: &T) -> Result<RequestBody, ApiError> {
        serde_json::to_string(input)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::Serialization(e.to_string()))
    }

    // -----------------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------------

    pub fn build_login(
        &self,
        token: Option<&str>,
        email: &str,
        password: &str,
    ) -> Result<HttpRequest, ApiError> {
        let body = Self::json_body(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        Ok(self.build(HttpMethod::Post, "/api/auth/login", token, Some(body)))
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<LoginResponse, ApiError> {
        parse_json(response)
    }

    pub fn build_current_user(&self, token: Option<&str>) -> HttpRequest {
        self.build(HttpMethod::Get, "/api/auth/me", token, None)
    }

    pub fn parse_current_user(&self, response: HttpResponse) -> Result<CurrentUser, ApiError> {
        parse_json(response)
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    pub fn build_events(&self, token: Option<&str>) -> HttpRequest {
        self.build(HttpMethod::Get, "/api/events", token, None)
    }

    pub fn parse_events(&self, response: HttpResponse) -> Result<Vec<Event>, ApiError> {
        parse_json(response)
    }

    pub fn build_event(&self, token: Option<&str>, id: &str) -> HttpRequest {
        self.build(HttpMethod::Get, &format!("/api/events/{id}"), token, None)
    }

    pub fn parse_event(&self, response: HttpResponse) -> Result<Event, ApiError> {
        parse_json(response)
    }

    /// Privileged listing: for an `admin` account the backend restricts the
    /// result to the caller's assigned event.
    pub fn build_admin_events(&self, token: Option<&str>) -> HttpRequest {
        self.build(HttpMethod::Get, "/api/events/admin/events", token, None)
    }

    pub fn parse_admin_events(&self, response: HttpResponse) -> Result<Vec<Event>, ApiError> {
        parse_json(response)
    }

    pub fn build_create_event(
        &self,
        token: Option<&str>,
        input: &EventInput,
    ) -> Result<HttpRequest, ApiError> {
        let body = Self::json_body(input)?;
        Ok(self.build(HttpMethod::Post, "/api/events", token, Some(body)))
    }

    pub fn parse_create_event(&self, response: HttpResponse) -> Result<Event, ApiError> {
        parse_json(response)
    }

    pub fn build_update_event(
        &self,
        token: Option<&str>,
        id: &str,
        input: &EventInput,
    ) -> Result<HttpRequest, ApiError> {
        let body = Self::json_body(input)?;
        Ok(self.build(HttpMethod::Put, &format!("/api/events/{id}"), token, Some(body)))
    }

    pub fn parse_update_event(&self, response: HttpResponse) -> Result<Event, ApiError> {
        parse_json(response)
    }

    pub fn build_delete_event(&self, token: Option<&str>, id: &str) -> HttpRequest {
        self.build(HttpMethod::Delete, &format!("/api/events/{id}"), token, None)
    }

    pub fn parse_delete_event(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(response)
    }

    // -----------------------------------------------------------------------
    // Committee
    // -----------------------------------------------------------------------

    pub fn build_committee_members(&self, token: Option<&str>) -> HttpRequest {
        self.build(HttpMethod::Get, "/api/committee", token, None)
    }

    pub fn parse_committee_members(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<CommitteeMember>, ApiError> {
        parse_json(response)
    }

    pub fn build_committee_member(&self, token: Option<&str>, id: &str) -> HttpRequest {
        self.build(HttpMethod::Get, &format!("/api/committee/{id}"), token, None)
    }

    pub fn parse_committee_member(
        &self,
        response: HttpResponse,
    ) -> Result<CommitteeMember, ApiError> {
        parse_json(response)
    }

    pub fn build_create_committee_member(
        &self,
        token: Option<&str>,
        input: &CommitteeMemberInput,
    ) -> Result<HttpRequest, ApiError> {
        let body = Self::json_body(input)?;
        Ok(self.build(HttpMethod::Post, "/api/committee", token, Some(body)))
    }

    pub fn parse_create_committee_member(
        &self,
        response: HttpResponse,
    ) -> Result<CommitteeMember, ApiError> {
        parse_json(response)
    }

    pub fn build_update_committee_member(
        &self,
        token: Option<&str>,
        id: &str,
        input: &CommitteeMemberInput,
    ) -> Result<HttpRequest, ApiError> {
        let body = Self::json_body(input)?;
        Ok(self.build(HttpMethod::Put, &format!("/api/committee/{id}"), token, Some(body)))
    }

    pub fn parse_update_committee_member(
        &self,
        response: HttpResponse,
    ) -> Result<CommitteeMember, ApiError> {
        parse_json(response)
    }

    pub fn build_delete_committee_member(&self, token: Option<&str>, id: &str) -> HttpRequest {
        self.build(HttpMethod::Delete, &format!("/api/committee/{id}"), token, None)
    }

    pub fn parse_delete_committee_member(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(response)
    }

    // -----------------------------------------------------------------------
    // Users (super_admin only, enforced server-side)
    // -----------------------------------------------------------------------

    pub fn build_users(&self, token: Option<&str>) -> HttpRequest {
        self.build(HttpMethod::Get, "/api/auth/users", token, None)
    }

    pub fn parse_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        parse_json(response)
    }

    pub fn build_create_user(
        &self,
        token: Option<&str>,
        input: &UserInput,
    ) -> Result<HttpRequest, ApiError> {
        let body = Self::json_body(input)?;
        Ok(self.build(HttpMethod::Post, "/api/auth/users", token, Some(body)))
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response)
    }

    pub fn build_update_user(
        &self,
        token: Option<&str>,
        id: &str,
        input: &UserInput,
    ) -> Result<HttpRequest, ApiError> {
        let body = Self::json_body(input)?;
        Ok(self.build(HttpMethod::Put, &format!("/api/auth/users/{id}"), token, Some(body)))
    }

    pub fn parse_update_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response)
    }

    pub fn build_delete_user(&self, token: Option<&str>, id: &str) -> HttpRequest {
        self.build(HttpMethod::Delete, &format!("/api/auth/users/{id}"), token, None)
    }

    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(response)
    }

    // -----------------------------------------------------------------------
    // Registrations
    // -----------------------------------------------------------------------

    pub fn build_create_registration(
        &self,
        token: Option<&str>,
        input: &RegistrationInput,
    ) -> Result<HttpRequest, ApiError> {
        let body = Self::json_body(input)?;
        Ok(self.build(HttpMethod::Post, "/api/registrations", token, Some(body)))
    }

    pub fn parse_create_registration(
        &self,
        response: HttpResponse,
    ) -> Result<Registration, ApiError> {
        parse_json(response)
    }

    pub fn build_registrations(&self, token: Option<&str>) -> HttpRequest {
        self.build(HttpMethod::Get, "/api/registrations", token, None)
    }

    pub fn parse_registrations(&self, response: HttpResponse) -> Result<Vec<Registration>, ApiError> {
        parse_json(response)
    }

    // -----------------------------------------------------------------------
    // Static content
    // -----------------------------------------------------------------------

    pub fn build_static_content(&self, token: Option<&str>) -> HttpRequest {
        self.build(HttpMethod::Get, "/api/static-content", token, None)
    }

    pub fn parse_static_content(&self, response: HttpResponse) -> Result<StaticContent, ApiError> {
        parse_json(response)
    }

    pub fn build_update_static_content(
        &self,
        token: Option<&str>,
        doc: &StaticContent,
    ) -> Result<HttpRequest, ApiError> {
        let body = Self::json_body(doc)?;
        Ok(self.build(HttpMethod::Put, "/api/static-content", token, Some(body)))
    }

    pub fn parse_update_static_content(
        &self,
        response: HttpResponse,
    ) -> Result<StaticContent, ApiError> {
        parse_json(response)
    }

    // -----------------------------------------------------------------------
    // Upload
    // -----------------------------------------------------------------------

    pub fn build_upload(
        &self,
        token: Option<&str>,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> HttpRequest {
        let form = MultipartForm::new(UPLOAD_FIELD, file_name, content_type, data);
        self.build(
            HttpMethod::Post,
            "/api/upload",
            token,
            Some(RequestBody::Multipart(form)),
        )
    }

    pub fn parse_upload(&self, response: HttpResponse) -> Result<UploadResponse, ApiError> {
        parse_json(response)
    }
}

/// Shape the backend uses for error bodies.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// Map non-success statuses to the appropriate `ApiError` variant.
///
/// 401/403 become the typed `Unauthorized` so call sites never have to match
/// on server wording. Everything else non-2xx surfaces the body's `message`
/// field, or a generic status line when the body carries none.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 401 || response.status == 403 {
        return Err(ApiError::Unauthorized);
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .map(|b| b.message)
        .unwrap_or_else(|_| format!("request failed with status {}", response.status));
    Err(ApiError::Api {
        status: response.status,
        message,
    })
}

/// Unwrap the optional `{"data": X}` envelope some endpoints use.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    let value: Value = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::Deserialization(e.to_string()))?;
    serde_json::from_value(unwrap_envelope(value))
        .map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    const BASE_URL: &str = "http://localhost:4000";

    fn client() -> FestivalClient {
        FestivalClient::new(BASE_URL)
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn event_input() -> EventInput {
        EventInput {
            title: "Short Film".to_string(),
            category: "Cinema".to_string(),
            description: "Screening and judging".to_string(),
            full_description: "Submit a short film under 15 minutes".to_string(),
            prize: "₹25,000".to_string(),
            date: "2025-09-13".to_string(),
            time: "2:00 PM".to_string(),
            participants: "Team of up to 5".to_string(),
            venue: "Auditorium".to_string(),
            duration: "15 min".to_string(),
            poster_image: "/uploads/film.png".to_string(),
            rules: vec!["Original work only".to_string()],
            status: None,
            registration_deadline: None,
            max_participants: None,
        }
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = FestivalClient::new("http://localhost:4000/");
        let req = client.build_events(None);
        assert_eq!(req.path, "http://localhost:4000/api/events");
    }

    #[test]
    fn public_request_carries_no_bearer_header() {
        let req = client().build_events(None);
        assert_eq!(req.method, HttpMethod::Get);
        assert!(req.headers.iter().all(|(k, _)| k != "authorization"));
        assert!(req.body.is_none());
    }

    #[test]
    fn token_is_attached_as_bearer_credential() {
        let req = client().build_events(Some("tok-1"));
        assert!(req
            .headers
            .contains(&("authorization".to_string(), "Bearer tok-1".to_string())));
    }

    #[test]
    fn json_body_sets_json_content_type() {
        let req = client().build_create_event(Some("t"), &event_input()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, format!("{BASE_URL}/api/events"));
        assert!(req
            .headers
            .contains(&("content-type".to_string(), "application/json".to_string())));

        let Some(RequestBody::Json(body)) = req.body else {
            panic!("expected JSON body");
        };
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["title"], "Short Film");
        assert_eq!(json["posterImage"], "/uploads/film.png");
    }

    #[test]
    fn login_posts_credentials() {
        let req = client().build_login(None, "admin@varnave.test", "hunter2").unwrap();
        assert_eq!(req.path, format!("{BASE_URL}/api/auth/login"));
        let Some(RequestBody::Json(body)) = req.body else {
            panic!("expected JSON body");
        };
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["email"], "admin@varnave.test");
        assert_eq!(json["password"], "hunter2");
    }

    #[test]
    fn update_and_delete_target_the_id_path() {
        let update = client()
            .build_update_committee_member(Some("t"), "cm42", &CommitteeMemberInput {
                name: "Meena R".to_string(),
                position: "Treasurer".to_string(),
                phone: "9000000001".to_string(),
                email: "meena@varnave.test".to_string(),
                image: "/uploads/meena.png".to_string(),
                bio: None,
                is_active: None,
                order: None,
            })
            .unwrap();
        assert_eq!(update.method, HttpMethod::Put);
        assert_eq!(update.path, format!("{BASE_URL}/api/committee/cm42"));

        let delete = client().build_delete_user(Some("t"), "u7");
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.path, format!("{BASE_URL}/api/auth/users/u7"));
        assert!(delete.body.is_none());
    }

    #[test]
    fn admin_listing_uses_privileged_path() {
        let req = client().build_admin_events(Some("t"));
        assert_eq!(req.path, format!("{BASE_URL}/api/events/admin/events"));
    }

    #[test]
    fn upload_builds_multipart_not_json() {
        let req = client().build_upload(Some("t"), "poster.png", "image/png", vec![9, 9]);
        let content_type = req
            .headers
            .iter()
            .find(|(k, _)| k == "content-type")
            .map(|(_, v)| v.clone())
            .unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));

        let Some(RequestBody::Multipart(form)) = req.body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.field(), "file");
        let encoded = String::from_utf8_lossy(&form.encode()).into_owned();
        assert!(encoded.contains("name=\"file\""));
    }

    #[test]
    fn success_payload_passes_through() {
        let body = r#"[{"_id":"1","title":"Dance","category":"Dance","description":"d",
            "fullDescription":"fd","prize":"p","date":"dt","time":"t","participants":"x",
            "venue":"v","duration":"dur","posterImage":"img","rules":["r1"]}]"#;
        let events = client().parse_events(response(200, body)).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "1");
        assert_eq!(events[0].title, "Dance");
    }

    #[test]
    fn enveloped_payload_is_unwrapped() {
        let body = r#"{"data":[{"_id":"1","title":"Dance","category":"Dance","description":"d",
            "fullDescription":"fd","prize":"p","date":"dt","time":"t","participants":"x",
            "venue":"v","duration":"dur","posterImage":"img","rules":[]}]}"#;
        let events = client().parse_events(response(200, body)).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Dance");
    }

    #[test]
    fn static_content_reads_identically_with_and_without_envelope() {
        let doc = StaticContent::fallback();
        let flat = serde_json::to_string(&doc).unwrap();
        let wrapped = format!("{{\"data\":{flat}}}");

        let from_flat = client().parse_static_content(response(200, &flat)).unwrap();
        let from_wrapped = client().parse_static_content(response(200, &wrapped)).unwrap();
        assert_eq!(from_flat.festival_name, "VARNAVE'25");
        assert_eq!(from_flat, from_wrapped);
    }

    #[test]
    fn error_body_message_is_surfaced_verbatim() {
        let err = client()
            .parse_event(response(404, r#"{"message":"Not found"}"#))
            .unwrap_err();
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn error_without_message_falls_back_to_status_line() {
        let err = client().parse_events(response(500, "boom")).unwrap_err();
        match err {
            ApiError::Api { message, .. } => assert!(message.contains("500")),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn auth_failures_become_the_typed_variant() {
        let err401 = client()
            .parse_registrations(response(401, r#"{"message":"Unauthorized"}"#))
            .unwrap_err();
        assert!(matches!(err401, ApiError::Unauthorized));

        let err403 = client()
            .parse_create_user(response(403, r#"{"message":"Forbidden"}"#))
            .unwrap_err();
        assert!(matches!(err403, ApiError::Unauthorized));
    }

    #[test]
    fn malformed_success_body_is_a_deserialization_error() {
        let err = client().parse_events(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn login_response_parses_user_and_token() {
        let body = r#"{"token":"tok-9","user":{"_id":"u1","name":"Admin",
            "email":"admin@varnave.test","role":"super_admin"}}"#;
        let out = client().parse_login(response(200, body)).unwrap();
        assert_eq!(out.token, "tok-9");
        assert_eq!(out.user.role, Role::SuperAdmin);
        assert!(out.user.assigned_event_id.is_none());
    }
}
