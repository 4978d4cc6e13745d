//! HTTP transport types shared by the build and execute layers.
//!
//! # Design
//! Requests and responses are plain data. `FestivalClient` builds
//! `HttpRequest` values and parses `HttpResponse` values without touching the
//! network; `transport::execute` performs the actual round-trip. Keeping the
//! boundary as owned data makes the build/parse layer deterministic and easy
//! to test against literal fixtures.
//!
//! Bodies come in two encodings: a pre-serialized JSON string, or a single
//! binary form field framed as `multipart/form-data`. The multipart framing
//! is done here, at build time, so the exact bytes on the wire are visible to
//! unit tests.

use uuid::Uuid;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Request body encoding.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// A JSON document, already serialized. Sent with
    /// `content-type: application/json`.
    Json(String),
    /// A single binary form field. Sent with the form's own
    /// `multipart/form-data; boundary=...` content type.
    Multipart(MultipartForm),
}

/// An HTTP request described as plain data.
///
/// Built by `FestivalClient::build_*` methods and executed by
/// `transport::execute`. `path` is the absolute URL.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the executor after the round-trip, then passed to
/// `FestivalClient::parse_*` methods for status interpretation and
/// deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// A `multipart/form-data` body carrying one binary field.
///
/// The upload endpoint expects exactly one part named `file`. The boundary is
/// generated per form so two uploads never share framing.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    field: String,
    file_name: String,
    content_type: String,
    data: Vec<u8>,
    boundary: String,
}

impl MultipartForm {
    pub fn new(field: &str, file_name: &str, content_type: &str, data: Vec<u8>) -> Self {
        Self {
            field: field.to_string(),
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            data,
            boundary: format!("festival-{}", Uuid::new_v4().simple()),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Value for the request's `content-type` header.
    pub fn content_type_header(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encode the form into the exact byte body sent on the wire.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() + 256);
        out.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        out.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                self.field, self.file_name
            )
            .as_bytes(),
        );
        out.extend_from_slice(format!("Content-Type: {}\r\n\r\n", self.content_type).as_bytes());
        out.extend_from_slice(&self.data);
        out.extend_from_slice(format!("\r\n--{}--\r\n", self.boundary).as_bytes());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> MultipartForm {
        MultipartForm::new("file", "poster.png", "image/png", vec![1, 2, 3, 4])
    }

    #[test]
    fn content_type_carries_boundary() {
        let header = form().content_type_header();
        assert!(header.starts_with("multipart/form-data; boundary=festival-"));
        assert!(!header.contains("application/json"));
    }

    #[test]
    fn encoded_body_frames_single_file_field() {
        let body = String::from_utf8_lossy(&form().encode()).into_owned();
        assert!(body.starts_with("--festival-"));
        assert!(
            body.contains("Content-Disposition: form-data; name=\"file\"; filename=\"poster.png\"")
        );
        assert!(body.contains("Content-Type: image/png"));
        assert!(body.trim_end().ends_with("--"));
    }

    #[test]
    fn encoded_body_contains_payload_bytes() {
        let form = MultipartForm::new("file", "a.bin", "application/octet-stream", vec![0xde, 0xad]);
        let body = form.encode();
        assert!(body.windows(2).any(|w| w == [0xde, 0xad]));
    }

    #[test]
    fn boundaries_are_unique_per_form() {
        assert_ne!(form().content_type_header(), form().content_type_header());
    }
}
