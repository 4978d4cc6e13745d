//! Executing facade: one method per backend operation.
//!
//! # Design
//! `FestivalApi` is the composition point: it owns the stateless
//! `FestivalClient`, the `Session` (sole owner of the bearer token), and the
//! `CancelToken` its requests consult. Each method is build → execute →
//! parse, returning the parsed payload unchanged; failures propagate to the
//! caller without retries or logging, and the caller decides on notification
//! and recovery (clearing the session on `ApiError::Unauthorized` included).
//!
//! The login method is the one wrapper with a side effect: on success it
//! stores the returned token, so session establishment is atomic with a
//! successful credential check from the caller's point of view.

use serde_json::Value;

use crate::client::FestivalClient;
use crate::content::StaticContent;
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::session::Session;
use crate::transport::{self, CancelToken};
use crate::types::{
    CommitteeMember, CommitteeMemberInput, CurrentUser, Event, EventInput, LoginResponse,
    Registration, RegistrationInput, UploadResponse, User, UserInput,
};

/// Base address used when `FESTIVAL_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://cultural-backend-7gfl.onrender.com";

/// Environment variable overriding the backend origin.
pub const BASE_URL_ENV: &str = "FESTIVAL_API_URL";

/// High-level client for the festival backend.
#[derive(Debug)]
pub struct FestivalApi {
    client: FestivalClient,
    session: Session,
    cancel: CancelToken,
}

impl FestivalApi {
    pub fn new(base_url: &str, session: Session) -> Self {
        Self {
            client: FestivalClient::new(base_url),
            session,
            cancel: CancelToken::new(),
        }
    }

    /// Build against `FESTIVAL_API_URL`, falling back to the production
    /// origin.
    pub fn from_env(session: Session) -> Self {
        let base = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base, session)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// A handle that aborts this client's in-flight and future requests when
    /// cancelled. Responses arriving after cancellation are dropped.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    fn token(&self) -> Option<&str> {
        self.session.token()
    }

    fn execute(&self, req: crate::http::HttpRequest) -> Result<HttpResponse, ApiError> {
        transport::execute(&req, &self.cancel)
    }

    // -----------------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------------

    /// Exchange credentials for a session. On success the returned token is
    /// stored in the session before this returns.
    pub fn login(&mut self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let req = self.client.build_login(self.token(), email, password)?;
        let out = self.client.parse_login(self.execute(req)?)?;
        self.session.set_token(Some(&out.token));
        Ok(out)
    }

    /// Clear the session. Purely local; the backend keeps no session state
    /// worth revoking.
    pub fn logout(&mut self) {
        self.session.set_token(None);
    }

    pub fn current_user(&self) -> Result<CurrentUser, ApiError> {
        let req = self.client.build_current_user(self.token());
        self.client.parse_current_user(self.execute(req)?)
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    pub fn events(&self) -> Result<Vec<Event>, ApiError> {
        let req = self.client.build_events(self.token());
        self.client.parse_events(self.execute(req)?)
    }

    pub fn event(&self, id: &str) -> Result<Event, ApiError> {
        let req = self.client.build_event(self.token(), id);
        self.client.parse_event(self.execute(req)?)
    }

    pub fn admin_events(&self) -> Result<Vec<Event>, ApiError> {
        let req = self.client.build_admin_events(self.token());
        self.client.parse_admin_events(self.execute(req)?)
    }

    pub fn create_event(&self, input: &EventInput) -> Result<Event, ApiError> {
        let req = self.client.build_create_event(self.token(), input)?;
        self.client.parse_create_event(self.execute(req)?)
    }

    pub fn update_event(&self, id: &str, input: &EventInput) -> Result<Event, ApiError> {
        let req = self.client.build_update_event(self.token(), id, input)?;
        self.client.parse_update_event(self.execute(req)?)
    }

    pub fn delete_event(&self, id: &str) -> Result<Value, ApiError> {
        let req = self.client.build_delete_event(self.token(), id);
        self.client.parse_delete_event(self.execute(req)?)
    }

    // -----------------------------------------------------------------------
    // Committee
    // -----------------------------------------------------------------------

    pub fn committee_members(&self) -> Result<Vec<CommitteeMember>, ApiError> {
        let req = self.client.build_committee_members(self.token());
        self.client.parse_committee_members(self.execute(req)?)
    }

    pub fn committee_member(&self, id: &str) -> Result<CommitteeMember, ApiError> {
        let req = self.client.build_committee_member(self.token(), id);
        self.client.parse_committee_member(self.execute(req)?)
    }

    pub fn create_committee_member(
        &self,
        input: &CommitteeMemberInput,
    ) -> Result<CommitteeMember, ApiError> {
        let req = self.client.build_create_committee_member(self.token(), input)?;
        self.client.parse_create_committee_member(self.execute(req)?)
    }

    pub fn update_committee_member(
        &self,
        id: &str,
        input: &CommitteeMemberInput,
    ) -> Result<CommitteeMember, ApiError> {
        let req = self
            .client
            .build_update_committee_member(self.token(), id, input)?;
        self.client.parse_update_committee_member(self.execute(req)?)
    }

    pub fn delete_committee_member(&self, id: &str) -> Result<Value, ApiError> {
        let req = self.client.build_delete_committee_member(self.token(), id);
        self.client.parse_delete_committee_member(self.execute(req)?)
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub fn users(&self) -> Result<Vec<User>, ApiError> {
        let req = self.client.build_users(self.token());
        self.client.parse_users(self.execute(req)?)
    }

    pub fn create_user(&self, input: &UserInput) -> Result<User, ApiError> {
        let req = self.client.build_create_user(self.token(), input)?;
        self.client.parse_create_user(self.execute(req)?)
    }

    pub fn update_user(&self, id: &str, input: &UserInput) -> Result<User, ApiError> {
        let req = self.client.build_update_user(self.token(), id, input)?;
        self.client.parse_update_user(self.execute(req)?)
    }

    pub fn delete_user(&self, id: &str) -> Result<Value, ApiError> {
        let req = self.client.build_delete_user(self.token(), id);
        self.client.parse_delete_user(self.execute(req)?)
    }

    // -----------------------------------------------------------------------
    // Registrations
    // -----------------------------------------------------------------------

    pub fn create_registration(&self, input: &RegistrationInput) -> Result<Registration, ApiError> {
        let req = self.client.build_create_registration(self.token(), input)?;
        self.client.parse_create_registration(self.execute(req)?)
    }

    pub fn registrations(&self) -> Result<Vec<Registration>, ApiError> {
        let req = self.client.build_registrations(self.token());
        self.client.parse_registrations(self.execute(req)?)
    }

    // -----------------------------------------------------------------------
    // Static content & upload
    // -----------------------------------------------------------------------

    pub fn static_content(&self) -> Result<StaticContent, ApiError> {
        let req = self.client.build_static_content(self.token());
        self.client.parse_static_content(self.execute(req)?)
    }

    pub fn update_static_content(&self, doc: &StaticContent) -> Result<StaticContent, ApiError> {
        let req = self.client.build_update_static_content(self.token(), doc)?;
        self.client.parse_update_static_content(self.execute(req)?)
    }

    pub fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<UploadResponse, ApiError> {
        let req = self
            .client
            .build_upload(self.token(), file_name, content_type, data);
        self.client.parse_upload(self.execute(req)?)
    }
}
