//! Query-string and path assembly for API URLs.
//!
//! # Design
//! URLs are assembled by plain concatenation, the way the API documents
//! them: member ids are substituted for the `~` placeholder, field selectors
//! are appended as `:(a,b,c)` right after the resource path, and query
//! arguments are appended one at a time. The first argument must be added
//! with `append_initial_arg` (`?k=v`), later ones with
//! `append_sequential_arg` (`&k=v`). Values are not percent-encoded here.

use crate::error::{ApiError, Result};

/// The value of a query argument. `Many` expands into repeated `k=v` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    One(String),
    Many(Vec<String>),
}

impl QueryValue {
    /// Empty strings and empty lists are skipped by `build_url`.
    pub fn is_empty(&self) -> bool {
        match self {
            QueryValue::One(v) => v.is_empty(),
            QueryValue::Many(vs) => vs.is_empty(),
        }
    }

    fn values(&self) -> &[String] {
        match self {
            QueryValue::One(v) => std::slice::from_ref(v),
            QueryValue::Many(vs) => vs,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        QueryValue::One(v.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        QueryValue::One(v)
    }
}

impl From<u32> for QueryValue {
    fn from(v: u32) -> Self {
        QueryValue::One(v.to_string())
    }
}

impl From<i64> for QueryValue {
    fn from(v: i64) -> Self {
        QueryValue::One(v.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(vs: Vec<String>) -> Self {
        QueryValue::Many(vs)
    }
}

impl From<&[&str]> for QueryValue {
    fn from(vs: &[&str]) -> Self {
        QueryValue::Many(vs.iter().map(|v| v.to_string()).collect())
    }
}

/// Substitute member ids into a template containing `~`.
///
/// One id replaces the `~` with `id=<X>`. Several ids replace `/~` with
/// `::(id=<A>,id=<B>,...)`.
pub fn append_id_args<S: AsRef<str>>(ids: &[S], url: &str) -> Result<String> {
    if ids.is_empty() {
        return Err(ApiError::InvalidArgument("id list must not be empty".into()));
    }
    if let Some(id) = ids.iter().find(|id| id.as_ref().is_empty()) {
        return Err(ApiError::InvalidArgument(format!(
            "member id `{}` must not be empty",
            id.as_ref()
        )));
    }

    if let [id] = ids {
        if !url.contains('~') {
            return Err(ApiError::InvalidArgument(format!(
                "{url} has no `~` placeholder"
            )));
        }
        return Ok(url.replacen('~', &format!("id={}", id.as_ref()), 1));
    }

    let pos = url
        .find("/~")
        .ok_or_else(|| ApiError::InvalidArgument(format!("{url} has no `/~` placeholder")))?;
    let list = ids
        .iter()
        .map(|id| format!("id={}", id.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    Ok(format!("{}::({}){}", &url[..pos], list, &url[pos + 2..]))
}

/// Append the first query argument. Fails if `url` already has a query.
pub fn append_initial_arg(key: &str, value: &QueryValue, url: &str) -> Result<String> {
    if url.contains('?') {
        return Err(ApiError::InvalidArgument(format!(
            "initial argument has already been applied to {url}"
        )));
    }
    let (first, rest) = match value.values() {
        [first, rest @ ..] => (first, rest),
        [] => {
            return Err(ApiError::InvalidArgument(format!(
                "argument `{key}` has no values"
            )))
        }
    };
    let mut out = format!("{url}?{key}={first}");
    for v in rest {
        out.push_str(&format!("&{key}={v}"));
    }
    Ok(out)
}

/// Append a query argument after the first.
pub fn append_sequential_arg(key: &str, value: &QueryValue, url: &str) -> String {
    let mut out = url.to_string();
    for v in value.values() {
        out.push_str(&format!("&{key}={v}"));
    }
    out
}

/// Append with `?` or `&`, whichever the URL needs.
pub fn append_arg(key: &str, value: &QueryValue, url: &str) -> String {
    if value.is_empty() {
        return url.to_string();
    }
    match append_initial_arg(key, value, url) {
        Ok(out) => out,
        Err(_) => append_sequential_arg(key, value, url),
    }
}

/// Append `:(field1,field2,...)` to a resource path.
pub fn prepare_field_selectors<S: AsRef<str>>(selectors: &[S], url: &str) -> Result<String> {
    if let Some(s) = selectors.iter().find(|s| s.as_ref().trim().is_empty()) {
        return Err(ApiError::InvalidArgument(format!(
            "field selector `{}` must not be blank",
            s.as_ref()
        )));
    }
    let joined = selectors
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(",");
    Ok(format!("{url}:({joined})"))
}

/// Substitute ids (when any) and append every non-empty argument in order.
pub fn build_url<S: AsRef<str>>(
    template: &str,
    ids: &[S],
    params: &[(String, QueryValue)],
) -> Result<String> {
    let mut url = if ids.is_empty() {
        template.to_string()
    } else {
        append_id_args(ids, template)?
    };
    for (key, value) in params {
        url = append_arg(key, value, &url);
    }
    Ok(url)
}
