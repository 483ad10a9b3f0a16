//! Domain records produced by the response parsers, plus the request inputs
//! that are richer than a plain string.
//!
//! # Design
//! Every record is flat and built once per parsed response. Optional fields
//! are `Option<String>`; numeric ids and dates stay as the raw text the API
//! sent. Each record keeps a clone of the element it was read from in `node`
//! so callers can re-serialize it; `node` is skipped when serializing to JSON.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::url::QueryValue;
use crate::xml::Element;

/// A member profile read from a `person` (or `job-poster`) element.
///
/// Field names are the element tags with `-` replaced by `_`, kept in
/// document order. Serializes as a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    #[serde(serialize_with = "fields_as_map")]
    pub fields: Vec<(String, Option<String>)>,
    #[serde(skip)]
    pub node: Element,
}

fn fields_as_map<S: Serializer>(
    fields: &[(String, Option<String>)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(fields.iter().map(|(k, v)| (k, v)))
}

impl Profile {
    /// `None` both for an absent field and for one without text.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.field(field).and_then(Option::as_deref)
    }

    /// Distinguishes an absent field (`None`) from an empty one (`Some(None)`).
    pub fn field(&self, field: &str) -> Option<&Option<String>> {
        self.fields.iter().find(|(k, _)| k == field).map(|(_, v)| v)
    }

    pub fn id(&self) -> Option<&str> {
        self.get("id")
    }

    pub fn first_name(&self) -> Option<&str> {
        self.get("first_name")
    }

    pub fn last_name(&self) -> Option<&str> {
        self.get("last_name")
    }

    pub fn headline(&self) -> Option<&str> {
        self.get("headline")
    }

    pub fn location(&self) -> Option<&str> {
        self.get("location")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    pub id: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: Option<String>,
    pub company: Option<String>,
    #[serde(skip)]
    pub node: Element,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Education {
    pub id: Option<String>,
    pub school_name: Option<String>,
    pub field_of_study: Option<String>,
    /// Year only; read from `start-date/year`.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub degree: Option<String>,
    pub activities: Option<String>,
    #[serde(skip)]
    pub node: Element,
}

/// The short code tagging each item of a network update feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateKind {
    #[serde(rename = "STAT")]
    Status,
    #[serde(rename = "CONN")]
    Connection,
    #[serde(rename = "JGRP")]
    Group,
    #[serde(rename = "NCON")]
    NewConnection,
    #[serde(rename = "CCEM")]
    AddressBook,
    #[serde(rename = "QSTN")]
    Question,
    #[serde(rename = "ANSW")]
    Answer,
    #[serde(rename = "JOBP")]
    JobPosting,
    #[serde(rename = "APPS")]
    Application,
    #[serde(rename = "JOBS")]
    Jobs,
    #[serde(rename = "PICT")]
    Picture,
    #[serde(rename = "RECU")]
    Recommendation,
    #[serde(rename = "PRFU")]
    ProfileUpdate,
}

impl UpdateKind {
    pub const ALL: [UpdateKind; 13] = [
        UpdateKind::Status,
        UpdateKind::Connection,
        UpdateKind::Group,
        UpdateKind::NewConnection,
        UpdateKind::AddressBook,
        UpdateKind::Question,
        UpdateKind::Answer,
        UpdateKind::JobPosting,
        UpdateKind::Application,
        UpdateKind::Jobs,
        UpdateKind::Picture,
        UpdateKind::Recommendation,
        UpdateKind::ProfileUpdate,
    ];

    pub fn code(self) -> &'static str {
        match self {
            UpdateKind::Status => "STAT",
            UpdateKind::Connection => "CONN",
            UpdateKind::Group => "JGRP",
            UpdateKind::NewConnection => "NCON",
            UpdateKind::AddressBook => "CCEM",
            UpdateKind::Question => "QSTN",
            UpdateKind::Answer => "ANSW",
            UpdateKind::JobPosting => "JOBP",
            UpdateKind::Application => "APPS",
            UpdateKind::Jobs => "JOBS",
            UpdateKind::Picture => "PICT",
            UpdateKind::Recommendation => "RECU",
            UpdateKind::ProfileUpdate => "PRFU",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }

    /// Whether the code may be passed as a `type` filter when requesting the
    /// feed. `NCON`, `CCEM` and `JOBP` only ever appear in responses.
    pub fn is_filterable(self) -> bool {
        !matches!(
            self,
            UpdateKind::NewConnection | UpdateKind::AddressBook | UpdateKind::JobPosting
        )
    }
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The fields extracted from one feed item. Which variant is used depends
/// on the update kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum UpdateContent {
    Generic {
        update_key: Option<String>,
        first_name: String,
        last_name: String,
        profile_url: String,
        timestamp: String,
    },
    /// Answers carry no `web-url`, so `profile_url` is only set for questions.
    QuestionAnswer {
        first_name: String,
        last_name: String,
        profile_url: Option<String>,
        timestamp: String,
    },
    JobPosting {
        job_title: String,
        job_company: String,
        profile_url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkUpdate {
    pub kind: UpdateKind,
    pub content: UpdateContent,
    #[serde(skip)]
    pub node: Element,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkUpdates {
    pub total: String,
    pub updates: Vec<NetworkUpdate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkUpdateComment {
    pub sequence_number: Option<String>,
    pub comment: Option<String>,
    pub timestamp: Option<String>,
    pub person_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(skip)]
    pub node: Element,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connections {
    pub total: String,
    pub people: Vec<Profile>,
}

/// A failure reported by the API in an `<error>` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedInError {
    pub status: String,
    pub timestamp: String,
    pub error_code: String,
    pub message: String,
    #[serde(skip)]
    pub node: Element,
}

/// Body of a share, posted as JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Share {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ShareContent>,
    pub visibility: ShareVisibility,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ShareContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareVisibility {
    pub code: String,
}

impl Default for ShareVisibility {
    fn default() -> Self {
        Self {
            code: "anyone".to_string(),
        }
    }
}

/// What the API returns after accepting a share.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShareReceipt {
    pub update_key: Option<String>,
    pub update_url: Option<String>,
}

/// Who an invitation is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvitationRecipient {
    /// An existing member. `auth_name`/`auth_value` come from the
    /// `api-standard-profile-request` header of a prior profile read.
    Member {
        id: String,
        auth_name: String,
        auth_value: String,
    },
    /// Someone identified only by e-mail address.
    Email {
        address: String,
        first_name: String,
        last_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub recipient: InvitationRecipient,
    pub subject: String,
    pub body: String,
}

/// A profile read. With no `ids` the authenticated member is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileQuery {
    pub ids: Vec<String>,
    pub selectors: Vec<String>,
    /// Extra query arguments, appended in order.
    pub params: Vec<(String, QueryValue)>,
}

impl ProfileQuery {
    pub fn me() -> Self {
        Self::default()
    }

    pub fn member(id: impl Into<String>) -> Self {
        Self {
            ids: vec![id.into()],
            ..Self::default()
        }
    }

    pub fn with_selectors<S: AsRef<str>>(mut self, selectors: &[S]) -> Self {
        self.selectors = selectors.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionsQuery {
    pub selectors: Vec<String>,
    pub count: Option<u32>,
    pub start: Option<u32>,
}

/// One end of a time window, as epoch milliseconds or a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBound {
    Millis(i64),
    At(DateTime<Utc>),
}

impl TimeBound {
    pub fn as_millis(self) -> i64 {
        match self {
            TimeBound::Millis(ms) => ms,
            TimeBound::At(at) => at.timestamp_millis(),
        }
    }
}

impl From<i64> for TimeBound {
    fn from(ms: i64) -> Self {
        TimeBound::Millis(ms)
    }
}

impl From<DateTime<Utc>> for TimeBound {
    fn from(at: DateTime<Utc>) -> Self {
        TimeBound::At(at)
    }
}

/// Filters for the network update feed. `types` holds raw update codes and
/// is validated when the request is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkUpdateQuery {
    pub count: Option<u32>,
    pub start: Option<u32>,
    pub types: Vec<String>,
    pub before: Option<TimeBound>,
    pub after: Option<TimeBound>,
}
