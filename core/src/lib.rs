//! Synchronous client core for the LinkedIn REST API.
//!
//! # Overview
//! Builds OAuth-signed `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). The caller executes
//! the actual HTTP round-trip with whatever client it likes.
//!
//! # Design
//! - `LinkedInClient` holds only a `ClientConfig` and the consumer token.
//! - Each operation is split into `build_*` (produces a request) and
//!   `parse_*` (consumes a response), so the I/O boundary is explicit.
//! - Legacy XML responses are read into a small `xml::Element` tree, have
//!   epoch-millisecond dates rewritten per `DatePolicy`, then dispatch on
//!   their root tag to flat records in `types`.
//! - Newer endpoints speak JSON and go through `serde_json` directly.
//! - Failures are one `ApiError` enum; nothing is printed or swallowed.

pub mod body;
pub mod client;
pub mod config;
pub mod dates;
pub mod entities;
pub mod error;
pub mod http;
pub mod oauth;
pub mod parser;
pub mod search;
pub mod types;
pub mod url;
pub mod xml;

pub use client::LinkedInClient;
pub use config::ClientConfig;
pub use dates::DatePolicy;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use oauth::{Token, TokenResponse};
pub use parser::{Payload, PayloadKind};
pub use search::{SearchCriteria, SearchValue};
pub use types::{
    Connections, ConnectionsQuery, Education, Invitation, InvitationRecipient, LinkedInError,
    NetworkUpdate, NetworkUpdateComment, NetworkUpdateQuery, NetworkUpdates, Position, Profile,
    ProfileQuery, Share, ShareContent, ShareReceipt, ShareVisibility, TimeBound, UpdateContent,
    UpdateKind,
};
pub use url::QueryValue;
pub use xml::Element;
