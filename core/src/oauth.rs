//! OAuth 1.0a request signing.
//!
//! The HMAC-SHA1 signature itself comes from the `oauth-client` crate. This
//! module builds the base string that goes into it: the URL without its
//! query string, then every query pair, form-body pair and `oauth_*` pair,
//! sorted. A repeated query key such as `type=STAT&type=CONN` contributes
//! each of its values. Nonce and timestamp are fresh on every call.

use std::collections::BTreeMap;

use chrono::Utc;
use oauth_client::percent_encode_string;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::http::HttpMethod;

/// A key/secret pair: either the consumer credentials of the application
/// or a request/access token for a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub key: String,
    pub secret: String,
}

impl Token {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

/// Body of a requestToken or accessToken response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: Token,
    /// Every other pair, e.g. `oauth_callback_confirmed` or `oauth_expires_in`.
    pub extra: BTreeMap<String, String>,
}

/// Split `url` at the first `?`.
pub(crate) fn split_url(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (url, None),
    }
}

/// Decode `application/x-www-form-urlencoded` pairs. `+` means space.
pub(crate) fn form_pairs(encoded: &str) -> Vec<(String, String)> {
    encoded
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (form_decode(k), form_decode(v))
        })
        .collect()
}

fn form_decode(s: &str) -> String {
    let spaced = s.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Build the `Authorization` header value for a request.
pub fn authorization_header(
    method: HttpMethod,
    url: &str,
    consumer: &Token,
    token: Option<&Token>,
    form: &[(String, String)],
) -> String {
    let nonce = Uuid::new_v4().simple().to_string();
    sign(method, url, consumer, token, form, &nonce, Utc::now().timestamp())
}

/// Sort and join percent-encoded pairs into the parameter string of the
/// signature base. Repeated names keep every value, ordered by value.
pub fn normalized_parameters(pairs: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| {
            (
                percent_encode_string(k).into_owned(),
                percent_encode_string(v).into_owned(),
            )
        })
        .collect();
    encoded.sort();
    encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

pub(crate) fn sign(
    method: HttpMethod,
    url: &str,
    consumer: &Token,
    token: Option<&Token>,
    form: &[(String, String)],
    nonce: &str,
    timestamp: i64,
) -> String {
    let (base, query) = split_url(url);

    let mut protocol = vec![
        ("oauth_consumer_key", consumer.key.clone()),
        ("oauth_nonce", nonce.to_string()),
        ("oauth_signature_method", "HMAC-SHA1".to_string()),
        ("oauth_timestamp", timestamp.to_string()),
        ("oauth_version", "1.0".to_string()),
    ];
    if let Some(token) = token {
        protocol.push(("oauth_token", token.key.clone()));
    }

    let mut params = query.map(form_pairs).unwrap_or_default();
    params.extend(form.iter().cloned());
    params.extend(protocol.iter().map(|(k, v)| (k.to_string(), v.clone())));

    let signature = oauth_client::signature(
        method.as_str(),
        base,
        &normalized_parameters(&params),
        &consumer.secret,
        token.map(|t| t.secret.as_str()),
    );
    protocol.push(("oauth_signature", signature));
    protocol.sort();

    let fields = protocol
        .iter()
        .map(|(k, v)| format!("{k}=\"{}\"", percent_encode_string(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {fields}")
}
