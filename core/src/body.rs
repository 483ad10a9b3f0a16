//! XML request bodies for the legacy write endpoints.
//!
//! Bodies are assembled as `Element` trees and written out through
//! `quick_xml::Writer`, so user text is always escaped.

use crate::error::{ApiError, Result};
use crate::types::{Invitation, InvitationRecipient};
use crate::xml::Element;

const MEMBER_PATH: &str = "/people/";
const INVITE_ID_PATH: &str = "/people/id=";
const INVITE_EMAIL_PATH: &str = "/people/email=";

/// `<current-status>` body for a status update.
pub fn status_body(text: &str) -> Result<String> {
    Element::new("current-status").with_text(text).to_document()
}

/// `<update-comment>` body for commenting on a network update.
pub fn comment_body(text: &str) -> Result<String> {
    Element::new("update-comment")
        .with_child(Element::new("comment").with_text(text))
        .to_document()
}

/// `<mailbox-item>` body for a message to one or more connections.
pub fn message_body<S: AsRef<str>>(recipients: &[S], subject: &str, body: &str) -> Result<String> {
    if recipients.is_empty() {
        return Err(ApiError::InvalidArgument(
            "a message needs at least one recipient".into(),
        ));
    }
    let recipients = recipients.iter().fold(Element::new("recipients"), |list, id| {
        list.with_child(recipient(
            Element::new("person").with_attribute("path", format!("{MEMBER_PATH}{}", id.as_ref())),
        ))
    });
    Element::new("mailbox-item")
        .with_child(recipients)
        .with_child(Element::new("subject").with_text(subject))
        .with_child(Element::new("body").with_text(body))
        .to_xml()
}

/// `<mailbox-item>` body for a connection invitation.
pub fn invitation_body(invitation: &Invitation) -> Result<String> {
    let connect = Element::new("connect-type").with_text("friend");
    let (person, request) = match &invitation.recipient {
        InvitationRecipient::Member {
            id,
            auth_name,
            auth_value,
        } => {
            if id.is_empty() || id.contains('@') {
                return Err(ApiError::InvalidArgument(format!(
                    "`{id}` is not a member id"
                )));
            }
            let person = Element::new("person").with_attribute("path", format!("{INVITE_ID_PATH}{id}"));
            let auth = Element::new("authorization")
                .with_child(Element::new("name").with_text(auth_name.as_str()))
                .with_child(Element::new("value").with_text(auth_value.as_str()));
            let request = Element::new("invitation-request")
                .with_child(connect)
                .with_child(auth);
            (person, request)
        }
        InvitationRecipient::Email {
            address,
            first_name,
            last_name,
        } => {
            if !address.contains('@') {
                return Err(ApiError::InvalidArgument(format!(
                    "`{address}` is not an e-mail address"
                )));
            }
            let person = Element::new("person")
                .with_attribute("path", format!("{INVITE_EMAIL_PATH}{address}"))
                .with_child(Element::new("first-name").with_text(first_name.as_str()))
                .with_child(Element::new("last-name").with_text(last_name.as_str()));
            (person, Element::new("invitation-request").with_child(connect))
        }
    };

    Element::new("mailbox-item")
        .with_child(Element::new("recipients").with_child(recipient(person)))
        .with_child(Element::new("subject").with_text(invitation.subject.as_str()))
        .with_child(Element::new("body").with_text(invitation.body.as_str()))
        .with_child(Element::new("item-content").with_child(request))
        .to_xml()
}

fn recipient(person: Element) -> Element {
    Element::new("recipient").with_child(person)
}
