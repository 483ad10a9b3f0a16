//! Per-entity field extraction.
//!
//! Each parser reads a fixed set of fields with child-path queries relative
//! to the element it is given. Two lookups are used throughout:
//! `required_text` fails with `MissingField` when the node or its text is
//! absent, and `optional_text` yields `None` for an absent node or empty text
//! and fails with `DuplicateField` when the path matches more than once.

use tracing::debug;

use crate::error::{ApiError, Result};
use crate::parser::{dispatch, Payload};
use crate::types::{
    Connections, Education, LinkedInError, NetworkUpdate, NetworkUpdateComment, NetworkUpdates,
    Position, Profile, UpdateContent, UpdateKind,
};
use crate::xml::Element;

fn required_text(node: &Element, entity: &'static str, path: &str) -> Result<String> {
    node.find(path)
        .and_then(Element::text)
        .map(str::to_string)
        .ok_or_else(|| ApiError::MissingField {
            entity,
            field: path.to_string(),
        })
}

fn optional_text(node: &Element, entity: &'static str, path: &str) -> Result<Option<String>> {
    match node.find_unique(path) {
        Ok(found) => Ok(found.and_then(Element::text).map(str::to_string)),
        Err(ambiguous) => Err(ApiError::DuplicateField {
            entity,
            field: ambiguous.path,
        }),
    }
}

fn required_attr(node: &Element, entity: &'static str, name: &str) -> Result<String> {
    node.attr(name)
        .map(str::to_string)
        .ok_or_else(|| ApiError::MissingField {
            entity,
            field: format!("@{name}"),
        })
}

pub fn network_updates(root: &Element) -> Result<NetworkUpdates> {
    let updates = root.find("updates").ok_or_else(|| ApiError::MissingField {
        entity: "network",
        field: "updates".into(),
    })?;
    let total = required_attr(updates, "updates", "total")?;

    let mut parsed = Vec::new();
    for update in updates.children_named("update") {
        parsed.push(network_update(update)?);
    }
    debug!(total = %total, parsed = parsed.len(), "parsed network updates");
    Ok(NetworkUpdates {
        total,
        updates: parsed,
    })
}

fn network_update(update: &Element) -> Result<NetworkUpdate> {
    let code = required_text(update, "update", "update-type")?;
    let kind = UpdateKind::from_code(&code).ok_or(ApiError::UnrecognizedPayloadShape {
        context: "update type",
        found: code,
    })?;

    let content = match kind {
        UpdateKind::Question | UpdateKind::Answer => question_answer_content(update)?,
        UpdateKind::JobPosting => job_posting_content(update)?,
        UpdateKind::Status
        | UpdateKind::Connection
        | UpdateKind::Group
        | UpdateKind::NewConnection
        | UpdateKind::AddressBook
        | UpdateKind::Application
        | UpdateKind::Jobs
        | UpdateKind::Picture
        | UpdateKind::Recommendation
        | UpdateKind::ProfileUpdate => generic_content(update)?,
    };

    Ok(NetworkUpdate {
        kind,
        content,
        node: update.clone(),
    })
}

fn generic_content(update: &Element) -> Result<UpdateContent> {
    const E: &str = "update";
    Ok(UpdateContent::Generic {
        update_key: update.find("update-key").and_then(Element::text).map(str::to_string),
        first_name: required_text(update, E, "update-content/person/first-name")?,
        last_name: required_text(update, E, "update-content/person/last-name")?,
        profile_url: required_text(update, E, "update-content/person/site-standard-profile-request/url")?,
        timestamp: required_text(update, E, "timestamp")?,
    })
}

fn question_answer_content(update: &Element) -> Result<UpdateContent> {
    const E: &str = "question update";
    Ok(UpdateContent::QuestionAnswer {
        first_name: required_text(update, E, "update-content/question/author/first-name")?,
        last_name: required_text(update, E, "update-content/question/author/last-name")?,
        profile_url: update
            .find("update-content/question/web-url")
            .and_then(Element::text)
            .map(str::to_string),
        timestamp: required_text(update, E, "timestamp")?,
    })
}

fn job_posting_content(update: &Element) -> Result<UpdateContent> {
    const E: &str = "job posting update";
    Ok(UpdateContent::JobPosting {
        job_title: required_text(update, E, "update-content/job/position/title")?,
        job_company: required_text(update, E, "update-content/job/company/name")?,
        profile_url: required_text(update, E, "update-content/job/site-job-request/url")?,
    })
}

/// Read a profile from the children of `node`.
///
/// For a `person` element the `location` child is collapsed to the text of
/// its first child (the location name). Any other wrapper, such as
/// `job-poster`, has its children copied as they are.
pub fn profile(node: &Element) -> Profile {
    read_profile(node, node.tag == "person")
}

/// Read `node` as a `person` document whatever its tag.
pub fn person(node: &Element) -> Profile {
    read_profile(node, true)
}

fn read_profile(node: &Element, collapse_location: bool) -> Profile {
    let mut fields: Vec<(String, Option<String>)> = Vec::new();
    for item in &node.children {
        let name = item.tag.replace('-', "_");
        let value = if collapse_location && item.tag == "location" {
            item.children.first().and_then(|c| c.text.clone())
        } else {
            item.text.clone()
        };
        // a repeated tag keeps its first position and its last value
        match fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => fields.push((name, value)),
        }
    }
    Profile {
        fields,
        node: node.clone(),
    }
}

pub fn people(root: &Element) -> Vec<Profile> {
    root.children.iter().map(person).collect()
}

pub fn update_comments(root: &Element) -> Result<Vec<NetworkUpdateComment>> {
    if root.children.is_empty() {
        return Ok(Vec::new());
    }
    root.children_named("update-comment").map(update_comment).collect()
}

fn update_comment(node: &Element) -> Result<NetworkUpdateComment> {
    const E: &str = "update-comment";
    Ok(NetworkUpdateComment {
        sequence_number: optional_text(node, E, "sequence-number")?,
        comment: optional_text(node, E, "comment")?,
        timestamp: optional_text(node, E, "timestamp")?,
        person_id: optional_text(node, E, "person/id")?,
        first_name: optional_text(node, E, "person/first-name")?,
        last_name: optional_text(node, E, "person/last-name")?,
        node: node.clone(),
    })
}

/// Each child is parsed as a document of its own through the dispatcher.
pub fn connections(root: &Element) -> Result<Connections> {
    let total = required_attr(root, "connections", "total")?;
    let mut people = Vec::with_capacity(root.children.len());
    for child in &root.children {
        match dispatch(child)? {
            Payload::Profile(profile) => people.push(profile),
            other => {
                return Err(ApiError::UnexpectedPayload {
                    expected: "profile",
                    found: other.name(),
                })
            }
        }
    }
    Ok(Connections { total, people })
}

pub fn error(root: &Element) -> Result<LinkedInError> {
    const E: &str = "error";
    Ok(LinkedInError {
        status: required_text(root, E, "status")?,
        timestamp: required_text(root, E, "timestamp")?,
        error_code: required_text(root, E, "error-code")?,
        message: required_text(root, E, "message")?,
        node: root.clone(),
    })
}

pub fn position(root: &Element) -> Result<Position> {
    const E: &str = "position";
    Ok(Position {
        id: optional_text(root, E, "id")?,
        title: optional_text(root, E, "title")?,
        summary: optional_text(root, E, "summary")?,
        start_date: optional_text(root, E, "start-date")?,
        end_date: optional_text(root, E, "end-date")?,
        is_current: optional_text(root, E, "is-current")?,
        company: optional_text(root, E, "company/name")?,
        node: root.clone(),
    })
}

pub fn education(root: &Element) -> Result<Education> {
    const E: &str = "education";
    Ok(Education {
        id: optional_text(root, E, "id")?,
        school_name: optional_text(root, E, "school-name")?,
        field_of_study: optional_text(root, E, "field-of-study")?,
        start_date: optional_text(root, E, "start-date/year")?,
        end_date: optional_text(root, E, "end-date/year")?,
        degree: optional_text(root, E, "degree")?,
        activities: optional_text(root, E, "activities")?,
        node: root.clone(),
    })
}
