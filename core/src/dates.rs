//! Rewrites epoch-millisecond text nodes into readable dates before parsing.
//!
//! The API sends timestamps as milliseconds since the epoch. Under the
//! default `DatePolicy::Heuristic`, any element whose trimmed text parses as
//! an integer and is longer than 8 characters is treated as such a timestamp,
//! whatever the element means. A numeric member id of nine or more digits is
//! rewritten too. `DatePolicy::Fields` limits the pass to named tags.

use chrono::DateTime;
use tracing::trace;

use crate::error::Result;
use crate::xml::Element;

/// Output format for rewritten timestamps, always in UTC.
pub const DATE_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Which text nodes the date pass rewrites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatePolicy {
    /// Integer text longer than 8 characters, anywhere in the document.
    #[default]
    Heuristic,
    /// Integer text inside elements with one of these tags.
    Fields(Vec<String>),
    /// Leave every node untouched.
    Off,
}

impl DatePolicy {
    /// The tags that carry timestamps in the documents this crate parses.
    pub fn known_fields() -> Self {
        DatePolicy::Fields(vec!["timestamp".to_string()])
    }

    fn applies_to(&self, element: &Element) -> bool {
        match self {
            DatePolicy::Heuristic => true,
            DatePolicy::Fields(tags) => tags.iter().any(|t| *t == element.tag),
            DatePolicy::Off => false,
        }
    }
}

/// Format epoch milliseconds as `MM/DD/YYYY HH:MM:SS` in UTC.
pub fn format_epoch_millis(millis: i64) -> Option<String> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.format(DATE_FORMAT).to_string())
}

fn rewrite(text: &str, policy: &DatePolicy) -> Option<String> {
    let millis: i64 = text.parse().ok()?;
    if matches!(policy, DatePolicy::Heuristic) && text.len() <= 8 {
        return None;
    }
    format_epoch_millis(millis)
}

/// Rewrite timestamp text in place. Returns how many nodes changed.
pub fn apply(root: &mut Element, policy: &DatePolicy) -> usize {
    let mut rewritten = 0;
    root.walk_mut(&mut |element: &mut Element| {
        if !policy.applies_to(element) {
            return;
        }
        let formatted = match element.text.as_deref() {
            Some(text) => rewrite(text, policy),
            None => None,
        };
        if let Some(formatted) = formatted {
            trace!(tag = %element.tag, %formatted, "rewrote timestamp");
            element.text = Some(formatted);
            rewritten += 1;
        }
    });
    rewritten
}

/// Parse `xml`, rewrite its timestamps and serialize it again.
pub fn clean_dates(xml: &str, policy: &DatePolicy) -> Result<String> {
    let mut root = Element::parse(xml)?;
    apply(&mut root, policy);
    root.to_xml()
}
