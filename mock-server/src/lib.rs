//! In-memory test double for the festival backend API.
//!
//! Implements the endpoint surface the client depends on: auth (login /
//! current user), events, committee, users, registrations, static content,
//! and multipart upload. State lives in a `HashMap` behind an `RwLock`; a
//! super-admin account is seeded so tests can log in. Error bodies are
//! `{"message": ...}` and the static-content routes answer with the
//! `{"data": ...}` envelope, matching the production backend's conventions.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Email of the seeded super-admin account.
pub const ADMIN_EMAIL: &str = "admin@varnave.test";
/// Password of the seeded super-admin account.
pub const ADMIN_PASSWORD: &str = "varnave-festival-2025";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
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
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
}

#[derive(Deserialize)]
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
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub registration_deadline: Option<String>,
    #[serde(default)]
    pub max_participants: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeMember {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub position: String,
    pub phone: String,
    pub email: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeMemberInput {
    pub name: String,
    pub position: String,
    pub phone: String,
    pub email: String,
    pub image: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub order: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_event_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    pub role: String,
    #[serde(default)]
    pub assigned_event_id: Option<String>,
}

/// Account record including the credential; only the `user` half is ever
/// serialized into responses.
#[derive(Clone, Debug)]
pub struct StoredUser {
    pub user: User,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
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
    pub payment_status: String,
    pub registration_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requirements: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub event_id: String,
    pub event_name: String,
    pub total_fee: u32,
    #[serde(default)]
    pub special_requirements: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

#[derive(Default)]
pub struct ServerState {
    pub users: HashMap<String, StoredUser>,
    pub tokens: HashMap<String, String>,
    pub events: HashMap<String, Event>,
    pub committee: HashMap<String, CommitteeMember>,
    pub registrations: HashMap<String, Registration>,
    pub content: Option<Value>,
}

impl ServerState {
    pub fn seeded() -> Self {
        let mut state = Self::default();
        let id = Uuid::new_v4().to_string();
        state.users.insert(
            id.clone(),
            StoredUser {
                user: User {
                    id,
                    name: "Festival Admin".to_string(),
                    email: ADMIN_EMAIL.to_string(),
                    role: "super_admin".to_string(),
                    assigned_event_id: None,
                },
                password: ADMIN_PASSWORD.to_string(),
            },
        );
        state
    }
}

pub type Db = Arc<RwLock<ServerState>>;

type Failure = (StatusCode, Json<ErrorMessage>);

fn fail(status: StatusCode, message: &str) -> Failure {
    (
        status,
        Json(ErrorMessage {
            message: message.to_string(),
        }),
    )
}

fn not_found(what: &str) -> Failure {
    fail(StatusCode::NOT_FOUND, &format!("{what} not found"))
}

fn unauthorized() -> Failure {
    fail(StatusCode::UNAUTHORIZED, "Unauthorized")
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// Resolve the bearer token to an account, or 401.
async fn authed_user(db: &Db, headers: &HeaderMap) -> Result<User, Failure> {
    let token = bearer(headers).ok_or_else(unauthorized)?;
    let state = db.read().await;
    let user_id = state.tokens.get(&token).ok_or_else(unauthorized)?;
    let stored = state.users.get(user_id).ok_or_else(unauthorized)?;
    Ok(stored.user.clone())
}

/// Like `authed_user`, but additionally requires the super_admin role.
async fn authed_super_admin(db: &Db, headers: &HeaderMap) -> Result<User, Failure> {
    let user = authed_user(db, headers).await?;
    if user.role != "super_admin" {
        return Err(fail(StatusCode::FORBIDDEN, "Forbidden"));
    }
    Ok(user)
}

pub fn app() -> Router {
    app_with_state(Arc::new(RwLock::new(ServerState::seeded())))
}

pub fn app_with_state(db: Db) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(current_user))
        .route("/api/auth/users", get(list_users).post(create_user))
        .route("/api/auth/users/{id}", axum::routing::put(update_user).delete(delete_user))
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/admin/events", get(admin_events))
        .route(
            "/api/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/api/committee", get(list_committee).post(create_member))
        .route(
            "/api/committee/{id}",
            get(get_member).put(update_member).delete(delete_member),
        )
        .route(
            "/api/registrations",
            get(list_registrations).post(create_registration),
        )
        .route("/api/static-content", get(get_content).put(put_content))
        .route("/api/upload", post(upload))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

async fn login(
    State(db): State<Db>,
    Json(input): Json<LoginInput>,
) -> Result<Json<Value>, Failure> {
    let mut state = db.write().await;
    let stored = state
        .users
        .values()
        .find(|s| s.user.email == input.email)
        .cloned();
    match stored {
        Some(s) if s.password == input.password => {
            let token = Uuid::new_v4().to_string();
            state.tokens.insert(token.clone(), s.user.id.clone());
            Ok(Json(json!({ "token": token, "user": s.user })))
        }
        _ => Err(fail(StatusCode::UNAUTHORIZED, "Invalid email or password")),
    }
}

async fn current_user(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, Failure> {
    let user = authed_user(&db, &headers).await?;
    Ok(Json(json!({ "user": user })))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

async fn list_users(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Vec<User>>, Failure> {
    authed_super_admin(&db, &headers).await?;
    let state = db.read().await;
    Ok(Json(state.users.values().map(|s| s.user.clone()).collect()))
}

async fn create_user(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<UserInput>,
) -> Result<(StatusCode, Json<User>), Failure> {
    authed_super_admin(&db, &headers).await?;
    let password = input
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| fail(StatusCode::BAD_REQUEST, "Password is required"))?;
    let id = Uuid::new_v4().to_string();
    let user = User {
        id: id.clone(),
        name: input.name,
        email: input.email,
        role: input.role,
        assigned_event_id: input.assigned_event_id,
    };
    db.write()
        .await
        .users
        .insert(id, StoredUser { user: user.clone(), password });
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(input): Json<UserInput>,
) -> Result<Json<User>, Failure> {
    authed_super_admin(&db, &headers).await?;
    let mut state = db.write().await;
    let stored = state.users.get_mut(&id).ok_or_else(|| not_found("User"))?;
    stored.user.name = input.name;
    stored.user.email = input.email;
    stored.user.role = input.role;
    stored.user.assigned_event_id = input.assigned_event_id;
    if let Some(password) = input.password.filter(|p| !p.is_empty()) {
        stored.password = password;
    }
    Ok(Json(stored.user.clone()))
}

async fn delete_user(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, Failure> {
    authed_super_admin(&db, &headers).await?;
    let mut state = db.write().await;
    state.users.remove(&id).ok_or_else(|| not_found("User"))?;
    state.tokens.retain(|_, user_id| user_id != &id);
    Ok(Json(json!({ "message": "User deleted" })))
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

async fn list_events(State(db): State<Db>) -> Json<Vec<Event>> {
    let state = db.read().await;
    Json(state.events.values().cloned().collect())
}

async fn get_event(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Event>, Failure> {
    let state = db.read().await;
    state
        .events
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Event"))
}

/// Privileged listing: an `admin` account sees only its assigned event.
async fn admin_events(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<Event>>, Failure> {
    let user = authed_user(&db, &headers).await?;
    let state = db.read().await;
    let events = match (user.role.as_str(), &user.assigned_event_id) {
        ("admin", Some(event_id)) => state
            .events
            .values()
            .filter(|e| &e.id == event_id)
            .cloned()
            .collect(),
        _ => state.events.values().cloned().collect(),
    };
    Ok(Json(events))
}

async fn create_event(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<EventInput>,
) -> Result<(StatusCode, Json<Event>), Failure> {
    authed_user(&db, &headers).await?;
    let event = Event {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        category: input.category,
        description: input.description,
        full_description: input.full_description,
        prize: input.prize,
        date: input.date,
        time: input.time,
        participants: input.participants,
        venue: input.venue,
        duration: input.duration,
        poster_image: input.poster_image,
        rules: input.rules,
        status: input.status.unwrap_or_else(|| "active".to_string()),
        registration_deadline: input.registration_deadline,
        max_participants: input.max_participants,
    };
    db.write().await.events.insert(event.id.clone(), event.clone());
    Ok((StatusCode::CREATED, Json(event)))
}

async fn update_event(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(input): Json<EventInput>,
) -> Result<Json<Event>, Failure> {
    authed_user(&db, &headers).await?;
    let mut state = db.write().await;
    let event = state.events.get_mut(&id).ok_or_else(|| not_found("Event"))?;
    event.title = input.title;
    event.category = input.category;
    event.description = input.description;
    event.full_description = input.full_description;
    event.prize = input.prize;
    event.date = input.date;
    event.time = input.time;
    event.participants = input.participants;
    event.venue = input.venue;
    event.duration = input.duration;
    event.poster_image = input.poster_image;
    event.rules = input.rules;
    if let Some(status) = input.status {
        event.status = status;
    }
    event.registration_deadline = input.registration_deadline;
    event.max_participants = input.max_participants;
    Ok(Json(event.clone()))
}

async fn delete_event(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, Failure> {
    authed_user(&db, &headers).await?;
    let mut state = db.write().await;
    state.events.remove(&id).ok_or_else(|| not_found("Event"))?;
    Ok(Json(json!({ "message": "Event deleted" })))
}

// ---------------------------------------------------------------------------
// Committee
// ---------------------------------------------------------------------------

async fn list_committee(State(db): State<Db>) -> Json<Vec<CommitteeMember>> {
    let state = db.read().await;
    Json(state.committee.values().cloned().collect())
}

async fn get_member(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<CommitteeMember>, Failure> {
    let state = db.read().await;
    state
        .committee
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Committee member"))
}

async fn create_member(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CommitteeMemberInput>,
) -> Result<(StatusCode, Json<CommitteeMember>), Failure> {
    authed_user(&db, &headers).await?;
    let member = CommitteeMember {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        position: input.position,
        phone: input.phone,
        email: input.email,
        image: input.image,
        bio: input.bio,
        is_active: input.is_active,
        order: input.order,
    };
    db.write()
        .await
        .committee
        .insert(member.id.clone(), member.clone());
    Ok((StatusCode::CREATED, Json(member)))
}

async fn update_member(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(input): Json<CommitteeMemberInput>,
) -> Result<Json<CommitteeMember>, Failure> {
    authed_user(&db, &headers).await?;
    let mut state = db.write().await;
    let member = state
        .committee
        .get_mut(&id)
        .ok_or_else(|| not_found("Committee member"))?;
    member.name = input.name;
    member.position = input.position;
    member.phone = input.phone;
    member.email = input.email;
    member.image = input.image;
    member.bio = input.bio;
    member.is_active = input.is_active;
    member.order = input.order;
    Ok(Json(member.clone()))
}

async fn delete_member(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, Failure> {
    authed_user(&db, &headers).await?;
    let mut state = db.write().await;
    state
        .committee
        .remove(&id)
        .ok_or_else(|| not_found("Committee member"))?;
    Ok(Json(json!({ "message": "Committee member deleted" })))
}

// ---------------------------------------------------------------------------
// Registrations
// ---------------------------------------------------------------------------

async fn create_registration(
    State(db): State<Db>,
    Json(input): Json<RegistrationInput>,
) -> Result<(StatusCode, Json<Registration>), Failure> {
    let registration = Registration {
        id: Uuid::new_v4().to_string(),
        full_name: input.full_name,
        email: input.email,
        phone: input.phone,
        college: input.college,
        event_id: input.event_id,
        event_name: input.event_name,
        total_fee: input.total_fee,
        payment_status: "pending".to_string(),
        registration_date: chrono::Utc::now().to_rfc3339(),
        special_requirements: input.special_requirements,
    };
    db.write()
        .await
        .registrations
        .insert(registration.id.clone(), registration.clone());
    Ok((StatusCode::CREATED, Json(registration)))
}

async fn list_registrations(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<Registration>>, Failure> {
    authed_user(&db, &headers).await?;
    let state = db.read().await;
    Ok(Json(state.registrations.values().cloned().collect()))
}

// ---------------------------------------------------------------------------
// Static content
// ---------------------------------------------------------------------------

async fn get_content(State(db): State<Db>) -> Result<Json<Value>, Failure> {
    let state = db.read().await;
    match &state.content {
        Some(content) => Ok(Json(json!({ "data": content }))),
        None => Err(not_found("Static content")),
    }
}

async fn put_content(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(content): Json<Value>,
) -> Result<Json<Value>, Failure> {
    authed_user(&db, &headers).await?;
    let mut state = db.write().await;
    state.content = Some(content.clone());
    Ok(Json(json!({ "data": content })))
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

async fn upload(
    State(db): State<Db>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Value>, Failure> {
    authed_user(&db, &headers).await?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| fail(StatusCode::BAD_REQUEST, "Malformed multipart body"))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("upload.bin").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|_| fail(StatusCode::BAD_REQUEST, "Malformed multipart body"))?;
            if data.is_empty() {
                return Err(fail(StatusCode::BAD_REQUEST, "Uploaded file is empty"));
            }
            let url = format!("/uploads/{}-{}", Uuid::new_v4().simple(), file_name);
            return Ok(Json(json!({ "url": url })));
        }
    }
    Err(fail(StatusCode::BAD_REQUEST, "file field is required"))
}
