//! API client core for the festival promotional site and back office.
//!
//! # Overview
//! Everything the site needs from the backend goes through here: bearer
//! session management, request building/parsing for each resource (events,
//! committee, users, registrations, static content, uploads, auth), the
//! transport edge that performs the round-trip, and the page-lifetime cache
//! of the site-copy document.
//!
//! # Design
//! - `FestivalClient` is stateless — it holds only `base_url`. Each backend
//!   operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit and the
//!   interesting logic stays deterministic.
//! - `Session` is the one piece of mutable process-wide state (the bearer
//!   token), owned by `FestivalApi` and read at request-build time.
//! - `transport::execute` is the only place the network is touched; a
//!   `CancelToken` checked around it drops responses the caller no longer
//!   wants.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod content;
pub mod error;
pub mod http;
pub mod session;
pub mod transport;
pub mod types;

pub use api::FestivalApi;
pub use client::FestivalClient;
pub use content::{ContentCache, StaticContent};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, MultipartForm, RequestBody};
pub use session::Session;
pub use transport::CancelToken;
pub use types::{
    CommitteeMember, CommitteeMemberInput, CurrentUser, Event, EventInput, EventStatus,
    LoginRequest, LoginResponse, Registration, RegistrationInput, Role, UploadResponse, User,
    UserInput,
};
