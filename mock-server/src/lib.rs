//! In-memory stand-in for the LinkedIn REST API, used by the integration
//! tests of the core crate.
//!
//! Every route requires an `Authorization: OAuth ...` header; signatures are
//! not verified. Reads return canned members and a canned network feed,
//! writes are kept in a shared `Store` so later reads can see them.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, RawQuery, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use quick_xml::{escape::escape, events::Event, Reader};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const REQUEST_TOKEN: (&str, &str) = ("request-token", "request-secret");
pub const ACCESS_TOKEN: (&str, &str) = ("access-token", "access-secret");

/// Fixed timestamp stamped on error documents.
pub const ERROR_TIMESTAMP: i64 = 1_300_000_000_000;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub headline: &'static str,
    pub location: &'static str,
}

/// The first member is the one the access token belongs to.
pub static MEMBERS: [Member; 3] = [
    Member {
        id: "ada",
        first_name: "Ada",
        last_name: "Lovelace",
        headline: "Analyst",
        location: "London",
    },
    Member {
        id: "grace",
        first_name: "Grace",
        last_name: "Hopper",
        headline: "Compiler writer",
        location: "Arlington",
    },
    Member {
        id: "linus",
        first_name: "Linus",
        last_name: "Torvalds",
        headline: "Kernel hacker",
        location: "Portland",
    },
];

#[derive(Debug, Default)]
pub struct Store {
    pub status: Option<String>,
    /// Comment text per update key, in posting order.
    pub comments: HashMap<String, Vec<String>>,
    pub shares: Vec<Value>,
    pub mailbox: Vec<String>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/uas/oauth/requestToken", post(request_token))
        .route("/uas/oauth/accessToken", post(access_token))
        .route("/v1/{resource}", get(people_collection))
        .route("/v1/people/{who}", get(get_person))
        .route("/v1/people/{who}/connections", get(connections))
        .route("/v1/people/{who}/network", get(network))
        .route(
            "/v1/people/{who}/network/updates/{key}/update-comments",
            get(list_comments).post(add_comment),
        )
        .route("/v1/people/{who}/current-status", put(set_status))
        .route("/v1/people/{who}/shares", post(share))
        .route("/v1/people/{who}/mailbox", post(mailbox))
        .layer(middleware::from_fn(require_oauth))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_oauth(request: Request, next: Next) -> Response {
    let signed = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("OAuth "));
    if !signed {
        warn!(path = %request.uri().path(), "rejecting unsigned request");
        return error_response(StatusCode::UNAUTHORIZED, "[unauthorized]. OAuth header missing");
    }
    next.run(request).await
}

// --- responses ---

pub fn error_document(status: StatusCode, message: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<error><status>{}</status><timestamp>{ERROR_TIMESTAMP}</timestamp><error-code>0</error-code><message>{}</message></error>",
        status.as_u16(),
        escape(message)
    )
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, xml(error_document(status, message))).into_response()
}

fn xml(body: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/xml;charset=UTF-8")], body)
}

fn form(body: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/x-www-form-urlencoded")], body)
}

fn person_xml(member: &Member) -> String {
    format!(
        "<person><id>{}</id><first-name>{}</first-name><last-name>{}</last-name><headline>{}</headline><location><name>{}</name></location></person>",
        member.id, member.first_name, member.last_name, member.headline, member.location
    )
}

// --- request parsing ---

/// Unescaped text of the first `tag` element, including the text of any
/// nested elements. `<tag/>` yields an empty string. Malformed XML is `None`.
pub fn element_text(body: &str, tag: &str) -> Option<String> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut depth = 0usize;
    let mut text = String::new();
    loop {
        match reader.read_event().ok()? {
            Event::Start(e) if e.name().as_ref() == tag.as_bytes() => depth += 1,
            Event::End(e) if depth > 0 && e.name().as_ref() == tag.as_bytes() => {
                depth -= 1;
                if depth == 0 {
                    return Some(text);
                }
            }
            Event::Empty(e) if depth == 0 && e.name().as_ref() == tag.as_bytes() => {
                return Some(String::new());
            }
            Event::Text(t) if depth > 0 => text.push_str(&t.unescape().ok()?),
            Event::CData(c) if depth > 0 => text.push_str(&String::from_utf8_lossy(&c.into_inner())),
            Event::Eof => return None,
            _ => {}
        }
    }
}

/// Values of every `key=` pair in a raw query string, in order.
pub fn query_values<'a>(query: Option<&'a str>, key: &str) -> Vec<&'a str> {
    query
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(k, _)| *k == key)
        .map(|(_, v)| v)
        .collect()
}

/// `~`, `id=...`, either with an optional `:(...)` field selector.
fn find_member(who: &str) -> Option<&'static Member> {
    let who = who.split(':').next().unwrap_or_default();
    match who {
        "~" => Some(&MEMBERS[0]),
        _ => who
            .strip_prefix("id=")
            .and_then(|id| MEMBERS.iter().find(|m| m.id == id)),
    }
}

// --- OAuth ---

async fn request_token(body: String) -> Response {
    debug!(%body, "request token");
    let (key, secret) = REQUEST_TOKEN;
    form(format!(
        "oauth_token={key}&oauth_token_secret={secret}&oauth_callback_confirmed=true"
    ))
    .into_response()
}

async fn access_token(body: String) -> Response {
    if !body.contains("oauth_verifier=") {
        return (StatusCode::BAD_REQUEST, "oauth_problem=parameter_absent").into_response();
    }
    let (key, secret) = ACCESS_TOKEN;
    form(format!(
        "oauth_token={key}&oauth_token_secret={secret}&oauth_expires_in=5184000"
    ))
    .into_response()
}

// --- reads ---

async fn get_person(Path(who): Path<String>) -> Response {
    match find_member(&who) {
        Some(member) => Json(member).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            &format!("Could not find person based on: {who}"),
        ),
    }
}

/// `people::(id=a,id=b)` and `people-search[:(...)]` share the `/v1/` level.
async fn people_collection(Path(resource): Path<String>, RawQuery(query): RawQuery) -> Response {
    if let Some(rest) = resource.strip_prefix("people::(") {
        let list = rest.split(')').next().unwrap_or_default();
        let values: Vec<&Member> = list
            .split(',')
            .filter_map(|id| id.strip_prefix("id="))
            .filter_map(|id| MEMBERS.iter().find(|m| m.id == id))
            .collect();
        return Json(json!({ "_total": values.len(), "values": values })).into_response();
    }
    if resource.starts_with("people-search") {
        return search(query.as_deref()).into_response();
    }
    error_response(StatusCode::NOT_FOUND, "unknown resource")
}

fn search(query: Option<&str>) -> impl IntoResponse {
    let keywords: Vec<String> = query_values(query, "keywords")
        .into_iter()
        .flat_map(|v| v.split('+'))
        .map(str::to_lowercase)
        .collect();
    let hits: Vec<&Member> = MEMBERS
        .iter()
        .filter(|m| {
            keywords.is_empty()
                || keywords.iter().any(|k| {
                    [m.first_name, m.last_name, m.headline]
                        .iter()
                        .any(|field| field.to_lowercase().contains(k.as_str()))
                })
        })
        .collect();
    info!(hits = hits.len(), "people search");
    let people: String = hits.iter().map(|m| person_xml(m)).collect();
    xml(format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<people-search><people total=\"{}\">{people}</people></people-search>",
        hits.len()
    ))
}

async fn connections(Path(who): Path<String>) -> Response {
    if find_member(&who).is_none() {
        return error_response(StatusCode::NOT_FOUND, "unknown member");
    }
    let values = &MEMBERS[1..];
    Json(json!({ "_total": values.len(), "_count": values.len(), "_start": 0, "values": values }))
        .into_response()
}

async fn network(State(db): State<Db>, RawQuery(query): RawQuery) -> Response {
    let status = db
        .read()
        .await
        .status
        .clone()
        .unwrap_or_else(|| "Hello".to_string());
    let [me, grace, _] = &MEMBERS;
    let feed = [
        (
            "STAT",
            format!(
                "<update><timestamp>1300000000000</timestamp><update-key>STAT-1</update-key><update-type>STAT</update-type><update-content><person><id>{}</id><first-name>{}</first-name><last-name>{}</last-name><current-status>{}</current-status><site-standard-profile-request><url>http://www.linkedin.com/profile?id={}</url></site-standard-profile-request></person></update-content></update>",
                me.id, me.first_name, me.last_name, escape(&status), me.id
            ),
        ),
        (
            "CONN",
            format!(
                "<update><timestamp>1300000100000</timestamp><update-key>CONN-2</update-key><update-type>CONN</update-type><update-content><person><id>{}</id><first-name>{}</first-name><last-name>{}</last-name><site-standard-profile-request><url>http://www.linkedin.com/profile?id={}</url></site-standard-profile-request></person></update-content></update>",
                grace.id, grace.first_name, grace.last_name, grace.id
            ),
        ),
        (
            "JOBP",
            "<update><timestamp>1300000200000</timestamp><update-type>JOBP</update-type><update-content><job><position><title>Rust engineer</title></position><company><name>Initech</name></company><site-job-request><url>http://www.linkedin.com/jobs?id=7</url></site-job-request></job></update-content></update>".to_string(),
        ),
    ];
    let types = query_values(query.as_deref(), "type");
    let updates: Vec<&String> = feed
        .iter()
        .filter(|(code, _)| types.is_empty() || types.contains(code))
        .map(|(_, update)| update)
        .collect();
    let body: String = updates.iter().map(|u| u.as_str()).collect();
    xml(format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<network><updates total=\"{}\">{body}</updates></network>",
        updates.len()
    ))
    .into_response()
}

async fn list_comments(
    State(db): State<Db>,
    Path((_who, key)): Path<(String, String)>,
) -> Response {
    let Some(key) = key.strip_prefix("key=") else {
        return error_response(StatusCode::BAD_REQUEST, "malformed update key");
    };
    let store = db.read().await;
    let comments = store.comments.get(key).map(Vec::as_slice).unwrap_or_default();
    let me = &MEMBERS[0];
    let items: String = comments
        .iter()
        .enumerate()
        .map(|(seq, text)| {
            format!(
                "<update-comment><sequence-number>{seq}</sequence-number><comment>{}</comment><person><id>{}</id><first-name>{}</first-name><last-name>{}</last-name></person><timestamp>{}</timestamp></update-comment>",
                escape(text),
                me.id,
                me.first_name,
                me.last_name,
                ERROR_TIMESTAMP + seq as i64
            )
        })
        .collect();
    xml(format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<update-comments total=\"{}\">{items}</update-comments>",
        comments.len()
    ))
    .into_response()
}

// --- writes ---

async fn add_comment(
    State(db): State<Db>,
    Path((_who, key)): Path<(String, String)>,
    body: String,
) -> Response {
    let Some(key) = key.strip_prefix("key=") else {
        return error_response(StatusCode::BAD_REQUEST, "malformed update key");
    };
    let Some(text) = element_text(&body, "comment") else {
        return error_response(StatusCode::BAD_REQUEST, "missing comment");
    };
    db.write()
        .await
        .comments
        .entry(key.to_string())
        .or_default()
        .push(text);
    info!(%key, "comment added");
    StatusCode::CREATED.into_response()
}

async fn set_status(State(db): State<Db>, body: String) -> Response {
    let Some(text) = element_text(&body, "current-status") else {
        return error_response(StatusCode::BAD_REQUEST, "missing current-status");
    };
    db.write().await.status = Some(text);
    StatusCode::NO_CONTENT.into_response()
}

async fn share(State(db): State<Db>, Json(share): Json<Value>) -> Response {
    if share.get("visibility").and_then(|v| v.get("code")).is_none() {
        return error_response(StatusCode::BAD_REQUEST, "visibility is required");
    }
    db.write().await.shares.push(share);
    let id = Uuid::new_v4();
    (
        StatusCode::CREATED,
        Json(json!({
            "updateKey": format!("UNIU-{id}"),
            "updateUrl": format!("http://www.linkedin.com/updates?topic={id}"),
        })),
    )
        .into_response()
}

async fn mailbox(State(db): State<Db>, body: String) -> Response {
    if element_text(&body, "recipients").is_none() {
        return error_response(StatusCode::BAD_REQUEST, "a mailbox item needs recipients");
    }
    db.write().await.mailbox.push(body);
    StatusCode::CREATED.into_response()
}
