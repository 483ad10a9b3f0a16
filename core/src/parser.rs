//! Routes an XML response to the parser for its root tag.
//!
//! # Design
//! The set of known root tags is the closed enum `PayloadKind`; `dispatch`
//! matches on it exhaustively, so an unknown tag is a single, explicit
//! `UnrecognizedPayloadShape` error instead of a failed table lookup.

use tracing::debug;

use crate::dates::{self, DatePolicy};
use crate::entities;
use crate::error::{ApiError, Result};
use crate::types::{
    Connections, Education, LinkedInError, NetworkUpdateComment, NetworkUpdates, Position, Profile,
};
use crate::xml::Element;

/// Root tags the parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Network,
    Person,
    JobPoster,
    UpdateComments,
    Connections,
    Error,
    Position,
    Education,
    People,
    PeopleSearch,
}

impl PayloadKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "network" => PayloadKind::Network,
            "person" => PayloadKind::Person,
            "job-poster" => PayloadKind::JobPoster,
            "update-comments" => PayloadKind::UpdateComments,
            "connections" => PayloadKind::Connections,
            "error" => PayloadKind::Error,
            "position" => PayloadKind::Position,
            "education" => PayloadKind::Education,
            "people" => PayloadKind::People,
            "people-search" => PayloadKind::PeopleSearch,
            _ => return None,
        };
        Some(kind)
    }

    pub fn tag(self) -> &'static str {
        match self {
            PayloadKind::Network => "network",
            PayloadKind::Person => "person",
            PayloadKind::JobPoster => "job-poster",
            PayloadKind::UpdateComments => "update-comments",
            PayloadKind::Connections => "connections",
            PayloadKind::Error => "error",
            PayloadKind::Position => "position",
            PayloadKind::Education => "education",
            PayloadKind::People => "people",
            PayloadKind::PeopleSearch => "people-search",
        }
    }
}

/// A parsed response document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    NetworkUpdates(NetworkUpdates),
    Profile(Profile),
    Comments(Vec<NetworkUpdateComment>),
    Connections(Connections),
    Error(LinkedInError),
    Position(Position),
    Education(Education),
    People(Vec<Profile>),
}

impl Payload {
    pub fn name(&self) -> &'static str {
        match self {
            Payload::NetworkUpdates(_) => "network updates",
            Payload::Profile(_) => "profile",
            Payload::Comments(_) => "comments",
            Payload::Connections(_) => "connections",
            Payload::Error(_) => "error",
            Payload::Position(_) => "position",
            Payload::Education(_) => "education",
            Payload::People(_) => "people",
        }
    }
}

/// Parse `xml`, run the date pass over it, then dispatch on the root tag.
pub fn parse_document(xml: &str, policy: &DatePolicy) -> Result<Payload> {
    let mut root = Element::parse(xml)?;
    let rewritten = dates::apply(&mut root, policy);
    debug!(root = %root.tag, rewritten, "parsed response document");
    dispatch(&root)
}

pub fn dispatch(root: &Element) -> Result<Payload> {
    let kind = PayloadKind::from_tag(&root.tag).ok_or_else(|| ApiError::UnrecognizedPayloadShape {
        context: "root tag",
        found: root.tag.clone(),
    })?;

    let payload = match kind {
        PayloadKind::Network => Payload::NetworkUpdates(entities::network_updates(root)?),
        PayloadKind::Person | PayloadKind::JobPoster => Payload::Profile(entities::profile(root)),
        PayloadKind::UpdateComments => Payload::Comments(entities::update_comments(root)?),
        PayloadKind::Connections => Payload::Connections(entities::connections(root)?),
        PayloadKind::Error => Payload::Error(entities::error(root)?),
        PayloadKind::Position => Payload::Position(entities::position(root)?),
        PayloadKind::Education => Payload::Education(entities::education(root)?),
        PayloadKind::People => Payload::People(entities::people(root)),
        PayloadKind::PeopleSearch => {
            let people = root.child("people").ok_or_else(|| ApiError::MissingField {
                entity: "people-search",
                field: "people".into(),
            })?;
            Payload::People(entities::people(people))
        }
    };
    Ok(payload)
}
