//! Domain DTOs for the festival backend API.
//!
//! # Design
//! These types mirror the backend's JSON wire format (camelCase field names,
//! Mongo-style `_id`) but are defined independently of the mock-server crate;
//! integration tests catch any schema drift between the two. The client adds
//! no behavior to them — records are forwarded and parsed, never transformed.
//!
//! Ids stay plain strings: the backend owns their format and the client never
//! inspects them.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an event listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Inactive,
    Completed,
}

/// A festival event as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    /// Drawn from a fixed label set the public listing filters on; not
    /// enforced server-side.
    pub category: String,
    pub description: String,
    pub full_description: String,
    pub prize: String,
    pub date: String,
    pub time: String,
    pub participants: String,
    pub venue: String,
    pub duration: String,
    pub poster_image: String,
    pub rules: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_participants: Option<u32>,
}

/// Payload for creating or replacing an event. The admin form submits the
/// whole document; there is no partial patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub title: String,
    pub category: String,
    pub description: String,
    pub full_description: String,
    pub prize: String,
    pub date: String,
    pub time: String,
    pub participants: String,
    pub venue: String,
    pub duration: String,
    pub poster_image: String,
    pub rules: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
}

/// A committee roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeMember {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub position: String,
    pub phone: String,
    pub email: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// Payload for creating or replacing a committee member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeMemberInput {
    pub name: String,
    pub position: String,
    pub phone: String,
    pub email: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// Admin-panel account role; gates which admin sections are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    User,
    Volunteer,
}

/// An admin-panel account. The password never appears in responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Only meaningful when `role` is `Admin`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_event_id: Option<String>,
}

/// Payload for creating or updating an account. `password` is omitted when
/// an edit leaves it unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_event_id: Option<String>,
}

/// A public registration, append-only from the admin's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub event_id: String,
    pub event_name: String,
    pub total_fee: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requirements: Option<String>,
}

/// Payload the public registration form submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub event_id: String,
    pub event_name: String,
    pub total_fee: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requirements: Option<String>,
}

/// Credentials submitted to the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login: the opaque bearer token plus the authenticated account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Response of `GET /api/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub user: User,
}

/// Response of the file upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_uses_wire_field_names() {
        let event = Event {
            id: "ev1".to_string(),
            title: "Adaptive Dance".to_string(),
            category: "Dance".to_string(),
            description: "Group dance".to_string(),
            full_description: "Group dance, 4-8 members".to_string(),
            prize: "₹10,000".to_string(),
            date: "2025-09-12".to_string(),
            time: "10:00 AM".to_string(),
            participants: "4-8 per team".to_string(),
            venue: "Main Stage".to_string(),
            duration: "10 min".to_string(),
            poster_image: "/uploads/dance.png".to_string(),
            rules: vec!["No props".to_string()],
            status: Some(EventStatus::Active),
            registration_deadline: None,
            max_participants: Some(120),
            current_participants: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["_id"], "ev1");
        assert_eq!(json["fullDescription"], "Group dance, 4-8 members");
        assert_eq!(json["posterImage"], "/uploads/dance.png");
        assert_eq!(json["status"], "active");
        assert_eq!(json["maxParticipants"], 120);
        assert!(json.get("registrationDeadline").is_none());
    }

    #[test]
    fn event_optional_fields_default_to_none() {
        let event: Event = serde_json::from_str(
            r#"{"_id":"e","title":"T","category":"Music","description":"d",
                "fullDescription":"fd","prize":"p","date":"d","time":"t",
                "participants":"solo","venue":"v","duration":"5 min",
                "posterImage":"img","rules":[]}"#,
        )
        .unwrap();
        assert!(event.status.is_none());
        assert!(event.max_participants.is_none());
    }

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(Role::SuperAdmin).unwrap(),
            serde_json::json!("super_admin")
        );
        assert_eq!(
            serde_json::from_str::<Role>(r#""volunteer""#).unwrap(),
            Role::Volunteer
        );
    }

    #[test]
    fn user_input_omits_absent_password() {
        let input = UserInput {
            name: "Priya".to_string(),
            email: "priya@varnave.test".to_string(),
            password: None,
            role: Role::Admin,
            assigned_event_id: Some("ev1".to_string()),
        };
        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["assignedEventId"], "ev1");
    }

    #[test]
    fn registration_round_trips() {
        let json = r#"{"_id":"r1","fullName":"Arun K","email":"arun@example.com",
            "phone":"9876543210","college":"PSG Tech","eventId":"ev1",
            "eventName":"Adaptive Dance","totalFee":250,
            "registrationDate":"2025-09-01T10:00:00Z"}"#;
        let reg: Registration = serde_json::from_str(json).unwrap();
        assert_eq!(reg.full_name, "Arun K");
        assert_eq!(reg.total_fee, 250);
        assert!(reg.payment_status.is_none());

        let back = serde_json::to_value(&reg).unwrap();
        assert_eq!(back["fullName"], "Arun K");
        assert_eq!(back["eventId"], "ev1");
    }
}
