//! Maps people-search criteria onto the query parameters the API expects.
//!
//! Recognized keys get a dedicated encoding:
//!
//! | key | parameter | encoding |
//! |---|---|---|
//! | `keywords`, `name` | same | list joined with `+` |
//! | `current_company`, `current_title` | `current-company`, `current-title` | `true` / `false` |
//! | `location_type` | `search-location-type` | one of `I`, `Y` |
//! | `network` | `network` | one of `in`, `out` |
//! | `sort_criteria` | `sort-criteria` | one of `recommenders`, `distance`, `relevance` |
//!
//! Any other key is appended as a plain query argument. Criteria are
//! applied in the order given.

use crate::error::{ApiError, Result};
use crate::url::{append_arg, QueryValue};

pub const LOCATION_TYPES: [&str; 2] = ["I", "Y"];
pub const NETWORKS: [&str; 2] = ["in", "out"];
pub const SORT_CRITERIA: [&str; 3] = ["recommenders", "distance", "relevance"];

/// A single search criterion value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchValue {
    Text(String),
    List(Vec<String>),
    Flag(bool),
}

impl SearchValue {
    fn truthy(&self) -> bool {
        match self {
            SearchValue::Text(s) => !s.is_empty(),
            SearchValue::List(items) => !items.is_empty(),
            SearchValue::Flag(b) => *b,
        }
    }

    fn into_query(self) -> QueryValue {
        match self {
            SearchValue::Text(s) => QueryValue::One(s),
            SearchValue::List(items) => QueryValue::Many(items),
            SearchValue::Flag(b) => QueryValue::One(b.to_string()),
        }
    }
}

impl From<&str> for SearchValue {
    fn from(v: &str) -> Self {
        SearchValue::Text(v.to_string())
    }
}

impl From<String> for SearchValue {
    fn from(v: String) -> Self {
        SearchValue::Text(v)
    }
}

impl From<bool> for SearchValue {
    fn from(v: bool) -> Self {
        SearchValue::Flag(v)
    }
}

impl From<Vec<String>> for SearchValue {
    fn from(v: Vec<String>) -> Self {
        SearchValue::List(v)
    }
}

impl From<&[&str]> for SearchValue {
    fn from(v: &[&str]) -> Self {
        SearchValue::List(v.iter().map(|s| s.to_string()).collect())
    }
}

/// Ordered search criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    entries: Vec<(String, SearchValue)>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<SearchValue>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    pub fn entries(&self) -> &[(String, SearchValue)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<SearchValue>> FromIterator<(K, V)> for SearchCriteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Append every criterion to `url`.
pub fn route_search(url: &str, criteria: &SearchCriteria) -> Result<String> {
    let mut url = url.to_string();
    for (key, value) in criteria.entries() {
        url = route_one(&url, key, value.clone())?;
    }
    Ok(url)
}

fn route_one(url: &str, key: &str, value: SearchValue) -> Result<String> {
    match key {
        "keywords" | "name" => list_argument(url, key, value),
        "current_company" => Ok(true_false_argument(url, "current-company", &value)),
        "current_title" => Ok(true_false_argument(url, "current-title", &value)),
        "location_type" => {
            let v = one_of(key, value, &LOCATION_TYPES)?;
            Ok(append_arg("search-location-type", &v, url))
        }
        "network" => {
            let v = one_of(key, value, &NETWORKS)?;
            Ok(append_arg("network", &v, url))
        }
        "sort_criteria" => {
            let v = one_of(key, value, &SORT_CRITERIA)?;
            Ok(append_arg("sort-criteria", &v, url))
        }
        _ => Ok(append_arg(key, &value.into_query(), url)),
    }
}

/// Items are percent-encoded one by one so that a space inside an item does
/// not collide with the `+` separator.
fn list_argument(url: &str, key: &str, value: SearchValue) -> Result<String> {
    let items = match value {
        SearchValue::Text(s) => vec![s],
        SearchValue::List(items) => items,
        SearchValue::Flag(_) => {
            return Err(ApiError::InvalidArgument(format!(
                "`{key}` takes a word or a list of words"
            )))
        }
    };
    let joined = items
        .iter()
        .map(|item| urlencoding::encode(item).into_owned())
        .collect::<Vec<_>>()
        .join("+");
    Ok(append_arg(key, &QueryValue::One(joined), url))
}

fn true_false_argument(url: &str, param: &str, value: &SearchValue) -> String {
    let flag = if value.truthy() { "true" } else { "false" };
    append_arg(param, &QueryValue::from(flag), url)
}

fn one_of(key: &str, value: SearchValue, allowed: &[&str]) -> Result<QueryValue> {
    match value {
        SearchValue::Text(s) if allowed.contains(&s.as_str()) => Ok(QueryValue::One(s)),
        other => Err(ApiError::InvalidArgument(format!(
            "valid values for `{key}` are {}, got {other:?}",
            allowed.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH: &str = "http://api.linkedin.com/v1/people-search";

    #[test]
    fn keywords_are_joined_with_plus() {
        let criteria = SearchCriteria::new().with("keywords", &["rust", "xml"][..]);
        let url = route_search(SEARCH, &criteria).unwrap();
        assert_eq!(url, format!("{SEARCH}?keywords=rust+xml"));
    }

    #[test]
    fn spaces_inside_keywords_are_encoded() {
        let criteria = SearchCriteria::new().with("name", vec!["Ada Lovelace".to_string()]);
        let url = route_search(SEARCH, &criteria).unwrap();
        assert_eq!(url, format!("{SEARCH}?name=Ada%20Lovelace"));
    }

    #[test]
    fn flags_become_true_false() {
        let criteria = SearchCriteria::new()
            .with("current_company", true)
            .with("current_title", false);
        let url = route_search(SEARCH, &criteria).unwrap();
        assert_eq!(url, format!("{SEARCH}?current-company=true&current-title=false"));
    }

    #[test]
    fn enumerated_values_are_checked() {
        for (key, good, param) in [
            ("location_type", "Y", "search-location-type"),
            ("network", "out", "network"),
            ("sort_criteria", "distance", "sort-criteria"),
        ] {
            let url = route_search(SEARCH, &SearchCriteria::new().with(key, good)).unwrap();
            assert_eq!(url, format!("{SEARCH}?{param}={good}"));

            let err = route_search(SEARCH, &SearchCriteria::new().with(key, "bogus")).unwrap_err();
            assert!(matches!(err, ApiError::InvalidArgument(_)), "{key}");
        }
    }

    #[test]
    fn enumerated_values_reject_non_text() {
        let err = route_search(SEARCH, &SearchCriteria::new().with("network", true)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn unrecognized_keys_pass_through_in_order() {
        let criteria: SearchCriteria = vec![("country-code", "us"), ("keywords", "rust"), ("count", "25")]
            .into_iter()
            .collect();
        let url = route_search(SEARCH, &criteria).unwrap();
        assert_eq!(url, format!("{SEARCH}?country-code=us&keywords=rust&count=25"));
    }
}
