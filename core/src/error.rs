//! Error types for the LinkedIn API client.
//!
//! # Design
//! Contract violations on the caller side (`InvalidArgument`) are kept apart
//! from everything the server can send back. A 5xx response lands in
//! `ServerError` with the raw body attached; a well-formed vendor `<error>`
//! document becomes `Api` carrying the parsed record. Payloads whose shape
//! the parser does not know surface as `UnrecognizedPayloadShape` instead of
//! a lookup failure, and a required field that is absent surfaces as
//! `MissingField`.

use thiserror::Error;

use crate::types::LinkedInError;

/// Errors returned by `LinkedInClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller passed an argument the API cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The server answered with a 5xx status.
    #[error("server error {status}: {body}")]
    ServerError { status: u16, body: String },

    /// A non-success status whose body is not a vendor error document.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The API reported a failure through an `<error>` document.
    #[error("API error {}: {}", .0.error_code, .0.message)]
    Api(LinkedInError),

    /// A root tag or update-type code outside the known set.
    #[error("unrecognized {context} `{found}`")]
    UnrecognizedPayloadShape { context: &'static str, found: String },

    /// A known payload, but not the one the operation produces.
    #[error("expected a {expected} payload, got {found}")]
    UnexpectedPayload {
        expected: &'static str,
        found: &'static str,
    },

    /// A field every well-formed payload of this kind carries is absent.
    #[error("{entity} is missing required field `{field}`")]
    MissingField { entity: &'static str, field: String },

    /// A field expected at most once appears several times.
    #[error("{entity} has more than one `{field}`")]
    DuplicateField { entity: &'static str, field: String },

    /// The response body is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(String),

    /// The response body could not be deserialized from JSON.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;
