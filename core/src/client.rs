//! Stateless, signing request builder and response parser for the LinkedIn API.
//!
//! # Design
//! `LinkedInClient` holds only its configuration and the consumer
//! credentials, and carries no mutable state between calls. Each operation
//! is split into a `build_*` method that produces a signed `HttpRequest` and
//! a `parse_*` method that consumes an `HttpResponse`. The caller executes
//! the actual HTTP round-trip, keeping the core deterministic apart from the
//! OAuth nonce and free of I/O dependencies.
//!
//! Every `parse_*` method surfaces a 5xx status as `ApiError::ServerError`.
//! XML endpoints run the body through the date pass and the payload
//! dispatcher; a vendor `<error>` document becomes `ApiError::Api`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::body;
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::oauth::{self, form_pairs, Token, TokenResponse};
use crate::parser::{parse_document, Payload};
use crate::search::{route_search, SearchCriteria};
use crate::types::{
    ConnectionsQuery, Invitation, NetworkUpdateComment, NetworkUpdateQuery, NetworkUpdates,
    Profile, ProfileQuery, Share, ShareReceipt, UpdateKind,
};
use crate::url::{build_url, prepare_field_selectors, QueryValue};

const CONTENT_TYPE: &str = "content-type";
const XML: &str = "application/xml";
const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

const NO_IDS: [&str; 0] = [];

/// Synchronous, stateless client for the LinkedIn API.
///
/// Builds signed `HttpRequest` values and parses `HttpResponse` values
/// without touching the network.
#[derive(Debug, Clone)]
pub struct LinkedInClient {
    config: ClientConfig,
    consumer: Token,
}

impl LinkedInClient {
    pub fn new(consumer_key: &str, consumer_secret: &str) -> Self {
        Self::with_config(ClientConfig::default(), Token::new(consumer_key, consumer_secret))
    }

    pub fn with_config(config: ClientConfig, consumer: Token) -> Self {
        Self { config, consumer }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn signed(
        &self,
        method: HttpMethod,
        url: String,
        token: Option<&Token>,
        form: &[(String, String)],
        content_type: Option<&str>,
        body: Option<String>,
    ) -> HttpRequest {
        let authorization = oauth::authorization_header(method, &url, &self.consumer, token, form);
        let mut headers = vec![("authorization".to_string(), authorization)];
        if let Some(content_type) = content_type {
            headers.push((CONTENT_TYPE.to_string(), content_type.to_string()));
        }
        debug!(%method, %url, "built request");
        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }

    // -- OAuth handshake ----------------------------------------------------

    pub fn build_request_token(&self, redirect_url: Option<&str>) -> HttpRequest {
        let url = self.config.request_token_url();
        match redirect_url {
            Some(redirect) => {
                let form = vec![("oauth_callback".to_string(), redirect.to_string())];
                let body = format!("oauth_callback={}", urlencoding::encode(redirect));
                self.signed(HttpMethod::Post, url, None, &form, Some(FORM), Some(body))
            }
            None => self.signed(HttpMethod::Post, url, None, &[], None, None),
        }
    }

    pub fn build_access_token(&self, request_token: &Token, verifier: &str) -> HttpRequest {
        let form = vec![("oauth_verifier".to_string(), verifier.to_string())];
        let body = format!("oauth_verifier={}", urlencoding::encode(verifier));
        self.signed(
            HttpMethod::Post,
            self.config.access_token_url(),
            Some(request_token),
            &form,
            Some(FORM),
            Some(body),
        )
    }

    /// The page a member visits to grant access to `request_token`.
    pub fn authorize_url(&self, request_token: &Token) -> String {
        format!(
            "{}?oauth_token={}",
            self.config.authorize_url(),
            urlencoding::encode(&request_token.key)
        )
    }

    pub fn parse_token_response(&self, response: HttpResponse) -> Result<TokenResponse> {
        check_status(&response)?;
        if !response.is_success() {
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            });
        }
        let mut pairs: BTreeMap<String, String> = form_pairs(&response.body).into_iter().collect();
        let mut take = |field: &str| {
            pairs.remove(field).ok_or_else(|| ApiError::MissingField {
                entity: "token response",
                field: field.to_string(),
            })
        };
        let key = take("oauth_token")?;
        let secret = take("oauth_token_secret")?;
        Ok(TokenResponse {
            token: Token::new(key, secret),
            extra: pairs,
        })
    }

    // -- JSON reads ---------------------------------------------------------

    pub fn build_get_user_profile(&self, token: &Token, query: &ProfileQuery) -> Result<HttpRequest> {
        let mut url = self.config.profile_url();
        if !query.selectors.is_empty() {
            url = prepare_field_selectors(&query.selectors, &url)?;
        }
        let mut params = vec![("format".to_string(), QueryValue::from("json"))];
        params.extend(query.params.iter().cloned());
        let url = build_url(&url, &query.ids, &params)?;
        Ok(self.signed(HttpMethod::Get, url, Some(token), &[], None, None))
    }

    pub fn parse_get_user_profile(&self, response: HttpResponse) -> Result<serde_json::Value> {
        self.parse_json(response)
    }

    pub fn build_get_user_connections(
        &self,
        token: &Token,
        query: &ConnectionsQuery,
    ) -> Result<HttpRequest> {
        let mut url = self.config.connections_url();
        if !query.selectors.is_empty() {
            url = prepare_field_selectors(&query.selectors, &url)?;
        }
        let mut params = vec![("format".to_string(), QueryValue::from("json"))];
        if let Some(count) = query.count {
            params.push(("count".to_string(), count.into()));
        }
        if let Some(start) = query.start {
            params.push(("start".to_string(), start.into()));
        }
        let url = build_url(&url, &NO_IDS, &params)?;
        Ok(self.signed(HttpMethod::Get, url, Some(token), &[], None, None))
    }

    pub fn parse_get_user_connections(&self, response: HttpResponse) -> Result<serde_json::Value> {
        self.parse_json(response)
    }

    // -- XML reads ----------------------------------------------------------

    pub fn build_get_network_updates(
        &self,
        token: &Token,
        query: &NetworkUpdateQuery,
    ) -> Result<HttpRequest> {
        for code in &query.types {
            check_network_code(code)?;
        }
        let mut params: Vec<(String, QueryValue)> = Vec::new();
        if let Some(count) = query.count {
            params.push(("count".to_string(), count.into()));
        }
        if let Some(start) = query.start {
            params.push(("start".to_string(), start.into()));
        }
        params.push(("type".to_string(), QueryValue::Many(query.types.clone())));
        if let Some(before) = query.before {
            params.push(("before".to_string(), before.as_millis().into()));
        }
        if let Some(after) = query.after {
            params.push(("after".to_string(), after.as_millis().into()));
        }
        let url = build_url(&self.config.network_url(), &NO_IDS, &params)?;
        Ok(self.signed(HttpMethod::Get, url, Some(token), &[], None, None))
    }

    pub fn parse_get_network_updates(&self, response: HttpResponse) -> Result<NetworkUpdates> {
        match self.read_xml(response)? {
            Payload::NetworkUpdates(updates) => Ok(updates),
            other => Err(unexpected("network updates", &other)),
        }
    }

    pub fn build_get_comment_feed(&self, token: &Token, network_key: &str) -> Result<HttpRequest> {
        let url = self.comment_feed_url(network_key)?;
        Ok(self.signed(HttpMethod::Get, url, Some(token), &[], None, None))
    }

    pub fn parse_get_comment_feed(&self, response: HttpResponse) -> Result<Vec<NetworkUpdateComment>> {
        match self.read_xml(response)? {
            Payload::Comments(comments) => Ok(comments),
            other => Err(unexpected("comments", &other)),
        }
    }

    /// Search for members. `field_selector` is appended after a `:`, e.g.
    /// `(people:(id,first-name))`.
    pub fn build_search(
        &self,
        token: &Token,
        criteria: &SearchCriteria,
        field_selector: Option<&str>,
    ) -> Result<HttpRequest> {
        let mut url = self.config.search_url();
        if let Some(selector) = field_selector {
            url.push(':');
            url.push_str(selector);
        }
        let url = route_search(&url, criteria)?;
        Ok(self.signed(HttpMethod::Get, url, Some(token), &[], None, None))
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<Vec<Profile>> {
        match self.read_xml(response)? {
            Payload::People(people) => Ok(people),
            other => Err(unexpected("people", &other)),
        }
    }

    /// Parse any XML response into whatever payload its root tag names. A
    /// vendor `<error>` document is returned as `Payload::Error` here.
    pub fn parse_payload(&self, response: HttpResponse) -> Result<Payload> {
        check_status(&response)?;
        parse_document(&response.body, &self.config.date_policy)
    }

    // -- Writes -------------------------------------------------------------

    pub fn build_submit_comment(
        &self,
        token: &Token,
        network_key: &str,
        comment: &str,
    ) -> Result<HttpRequest> {
        let url = self.comment_feed_url(network_key)?;
        let body = body::comment_body(comment)?;
        Ok(self.signed(HttpMethod::Post, url, Some(token), &[], Some(XML), Some(body)))
    }

    pub fn parse_submit_comment(&self, response: HttpResponse) -> Result<()> {
        self.parse_write(response)
    }

    pub fn build_set_status_update(&self, token: &Token, status: &str) -> Result<HttpRequest> {
        let body = body::status_body(status)?;
        Ok(self.signed(
            HttpMethod::Put,
            self.config.status_url(),
            Some(token),
            &[],
            Some(XML),
            Some(body),
        ))
    }

    pub fn parse_set_status_update(&self, response: HttpResponse) -> Result<()> {
        self.parse_write(response)
    }

    pub fn build_share(&self, token: &Token, share: &Share) -> Result<HttpRequest> {
        let body = serde_json::to_string(share).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut req = self.signed(
            HttpMethod::Post,
            self.config.shares_url(),
            Some(token),
            &[],
            Some(JSON),
            Some(body),
        );
        req.headers.push(("x-li-format".to_string(), "json".to_string()));
        Ok(req)
    }

    pub fn parse_share(&self, response: HttpResponse) -> Result<ShareReceipt> {
        self.parse_json(response)
    }

    pub fn build_send_message<S: AsRef<str>>(
        &self,
        token: &Token,
        recipients: &[S],
        subject: &str,
        body: &str,
    ) -> Result<HttpRequest> {
        let body = body::message_body(recipients, subject, body)?;
        Ok(self.signed(
            HttpMethod::Post,
            self.config.mailbox_url(),
            Some(token),
            &[],
            Some(XML),
            Some(body),
        ))
    }

    pub fn parse_send_message(&self, response: HttpResponse) -> Result<()> {
        self.parse_write(response)
    }

    pub fn build_send_invitation(&self, token: &Token, invitation: &Invitation) -> Result<HttpRequest> {
        let body = body::invitation_body(invitation)?;
        Ok(self.signed(
            HttpMethod::Post,
            self.config.mailbox_url(),
            Some(token),
            &[],
            Some(XML),
            Some(body),
        ))
    }

    pub fn parse_send_invitation(&self, response: HttpResponse) -> Result<()> {
        self.parse_write(response)
    }

    // -- helpers ------------------------------------------------------------

    fn comment_feed_url(&self, network_key: &str) -> Result<String> {
        if network_key.is_empty() || network_key.contains(['/', '?', '&']) {
            return Err(ApiError::InvalidArgument(format!(
                "`{network_key}` is not a network update key"
            )));
        }
        Ok(self.config.comment_feed_url(network_key))
    }

    fn parse_json<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T> {
        check_status(&response)?;
        if !response.is_success() {
            return Err(self.vendor_error(response));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    fn parse_write(&self, response: HttpResponse) -> Result<()> {
        check_status(&response)?;
        if response.is_success() {
            Ok(())
        } else {
            Err(self.vendor_error(response))
        }
    }

    fn read_xml(&self, response: HttpResponse) -> Result<Payload> {
        check_status(&response)?;
        if !response.is_success() {
            return Err(self.vendor_error(response));
        }
        match parse_document(&response.body, &self.config.date_policy)? {
            Payload::Error(error) => {
                warn!(status = %error.status, code = %error.error_code, message = %error.message, "API error");
                Err(ApiError::Api(error))
            }
            payload => Ok(payload),
        }
    }

    /// A non-success response below 500: the vendor error document when the
    /// body is one, the raw status and body otherwise.
    fn vendor_error(&self, response: HttpResponse) -> ApiError {
        match parse_document(&response.body, &self.config.date_policy) {
            Ok(Payload::Error(error)) => {
                warn!(status = %error.status, code = %error.error_code, message = %error.message, "API error");
                ApiError::Api(error)
            }
            _ => ApiError::HttpError {
                status: response.status,
                body: response.body,
            },
        }
    }
}

/// Only codes the feed can be filtered by are accepted.
pub fn check_network_code(code: &str) -> Result<UpdateKind> {
    UpdateKind::from_code(code)
        .filter(|kind| kind.is_filterable())
        .ok_or_else(|| ApiError::InvalidArgument(format!("code {code} is not a valid update code")))
}

/// Surface 5xx statuses before looking at the body.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.status >= 500 {
        warn!(status = response.status, "server error");
        return Err(ApiError::ServerError {
            status: response.status,
            body: response.body.clone(),
        });
    }
    Ok(())
}

fn unexpected(expected: &'static str, found: &Payload) -> ApiError {
    ApiError::UnexpectedPayload {
        expected,
        found: found.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InvitationRecipient, ShareContent, UpdateContent};

    fn client() -> LinkedInClient {
        LinkedInClient::new("consumer-key", "consumer-secret")
    }

    fn token() -> Token {
        Token::new("access-key", "access-secret")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse::new(200, body)
    }

    #[test]
    fn every_request_is_signed() {
        let req = client().build_get_comment_feed(&token(), "STAT-1").unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert!(req.header("Authorization").unwrap().starts_with("OAuth "));
        assert!(req.body.is_none());
    }

    #[test]
    fn build_profile_for_me() {
        let query = ProfileQuery::me().with_selectors(&["id", "first-name"]);
        let req = client().build_get_user_profile(&token(), &query).unwrap();
        assert_eq!(req.url, "http://api.linkedin.com/v1/people/~:(id,first-name)?format=json");
    }

    #[test]
    fn build_profile_for_several_members() {
        let query = ProfileQuery {
            ids: vec!["a".into(), "b".into()],
            ..ProfileQuery::default()
        };
        let req = client().build_get_user_profile(&token(), &query).unwrap();
        assert_eq!(req.url, "http://api.linkedin.com/v1/people::(id=a,id=b)?format=json");
    }

    #[test]
    fn build_profile_for_one_member_with_params() {
        let query = ProfileQuery::member("xyz").with_param("count", 5u32);
        let req = client().build_get_user_profile(&token(), &query).unwrap();
        assert_eq!(req.url, "http://api.linkedin.com/v1/people/id=xyz?format=json&count=5");
    }

    #[test]
    fn build_connections_without_selectors() {
        let query = ConnectionsQuery {
            count: Some(10),
            start: Some(20),
            ..ConnectionsQuery::default()
        };
        let req = client().build_get_user_connections(&token(), &query).unwrap();
        assert_eq!(
            req.url,
            "http://api.linkedin.com/v1/people/~/connections?format=json&count=10&start=20"
        );
    }

    #[test]
    fn build_network_updates_with_filters() {
        let query = NetworkUpdateQuery {
            count: Some(5),
            types: vec!["STAT".into(), "CONN".into()],
            after: Some(1_300_000_000_000i64.into()),
            ..NetworkUpdateQuery::default()
        };
        let req = client().build_get_network_updates(&token(), &query).unwrap();
        assert_eq!(
            req.url,
            "http://api.linkedin.com/v1/people/~/network?count=5&type=STAT&type=CONN&after=1300000000000"
        );
    }

    #[test]
    fn build_network_updates_rejects_bad_codes() {
        for code in ["NOPE", "JOBP"] {
            let query = NetworkUpdateQuery {
                types: vec![code.into()],
                ..NetworkUpdateQuery::default()
            };
            let err = client().build_get_network_updates(&token(), &query).unwrap_err();
            assert!(matches!(err, ApiError::InvalidArgument(_)), "{code}");
        }
    }

    #[test]
    fn comment_feed_rejects_bad_keys() {
        let err = client().build_get_comment_feed(&token(), "a/b").unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn build_submit_comment_posts_xml() {
        let req = client().build_submit_comment(&token(), "STAT-1", "Great").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.url,
            "http://api.linkedin.com/v1/people/~/network/updates/key=STAT-1/update-comments"
        );
        assert_eq!(req.header("content-type"), Some("application/xml"));
        assert!(req.body.unwrap().contains("<comment>Great</comment>"));
    }

    #[test]
    fn build_set_status_update_puts_xml() {
        let req = client().build_set_status_update(&token(), "Hacking").unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://api.linkedin.com/v1/people/~/current-status");
        assert!(req.body.unwrap().ends_with("<current-status>Hacking</current-status>"));
    }

    #[test]
    fn build_share_posts_json() {
        let share = Share {
            comment: Some("Look".into()),
            content: Some(ShareContent {
                submitted_url: Some("http://example.com".into()),
                ..ShareContent::default()
            }),
            ..Share::default()
        };
        let req = client().build_share(&token(), &share).unwrap();
        assert_eq!(req.header("x-li-format"), Some("json"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["comment"], "Look");
        assert_eq!(body["content"]["submitted-url"], "http://example.com");
        assert_eq!(body["visibility"]["code"], "anyone");
        assert!(body["content"].get("title").is_none());
    }

    #[test]
    fn build_search_with_selector() {
        let criteria = SearchCriteria::new().with("keywords", &["rust", "oauth"][..]).with("network", "in");
        let req = client()
            .build_search(&token(), &criteria, Some("(people:(id,first-name))"))
            .unwrap();
        assert_eq!(
            req.url,
            "http://api.linkedin.com/v1/people-search:(people:(id,first-name))?keywords=rust+oauth&network=in"
        );
    }

    #[test]
    fn build_send_message_and_invitation() {
        let req = client().build_send_message(&token(), &["abc"], "Hi", "Hello").unwrap();
        assert_eq!(req.url, "http://api.linkedin.com/v1/people/~/mailbox");
        assert!(req.body.unwrap().contains(r#"<person path="/people/abc"/>"#));

        let invitation = Invitation {
            recipient: InvitationRecipient::Email {
                address: "a@b.c".into(),
                first_name: "A".into(),
                last_name: "B".into(),
            },
            subject: "Join".into(),
            body: "Please".into(),
        };
        let req = client().build_send_invitation(&token(), &invitation).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert!(req.body.unwrap().contains("/people/email=a@b.c"));
    }

    #[test]
    fn build_request_token_with_callback() {
        let req = client().build_request_token(Some("http://localhost/cb?x=1"));
        assert_eq!(req.url, "https://api.linkedin.com/uas/oauth/requestToken");
        assert_eq!(req.header("content-type"), Some(FORM));
        assert_eq!(
            req.body.as_deref(),
            Some("oauth_callback=http%3A%2F%2Flocalhost%2Fcb%3Fx%3D1")
        );
    }

    #[test]
    fn authorize_url_carries_request_token() {
        let url = client().authorize_url(&Token::new("rt", "rs"));
        assert_eq!(url, "https://www.linkedin.com/uas/oauth/authorize?oauth_token=rt");
    }

    #[test]
    fn parse_token_response_success() {
        let parsed = client()
            .parse_token_response(ok("oauth_token=t1&oauth_token_secret=s1&oauth_callback_confirmed=true"))
            .unwrap();
        assert_eq!(parsed.token, Token::new("t1", "s1"));
        assert_eq!(parsed.extra.get("oauth_callback_confirmed").map(String::as_str), Some("true"));
    }

    #[test]
    fn parse_token_response_missing_secret() {
        let err = client().parse_token_response(ok("oauth_token=t1")).unwrap_err();
        assert!(matches!(err, ApiError::MissingField { .. }));
    }

    #[test]
    fn server_errors_carry_the_body() {
        let c = client();
        let err = c.parse_get_user_profile(HttpResponse::new(503, "down")).unwrap_err();
        assert!(matches!(err, ApiError::ServerError { status: 503, ref body } if body == "down"));
        let err = c.parse_get_network_updates(HttpResponse::new(500, "<oops")).unwrap_err();
        assert!(matches!(err, ApiError::ServerError { status: 500, .. }));
        let err = c.parse_set_status_update(HttpResponse::new(502, "")).unwrap_err();
        assert!(matches!(err, ApiError::ServerError { status: 502, .. }));
    }

    #[test]
    fn vendor_error_document_becomes_api_error() {
        let body = "<error><status>401</status><timestamp>1300000000000</timestamp><error-code>0</error-code><message>[unauthorized]. bad token</message></error>";
        let err = client().parse_get_network_updates(HttpResponse::new(401, body)).unwrap_err();
        let ApiError::Api(error) = err else {
            panic!("expected an API error");
        };
        assert_eq!(error.status, "401");
        assert_eq!(error.message, "[unauthorized]. bad token");

        let err = client().parse_submit_comment(HttpResponse::new(401, body)).unwrap_err();
        assert!(matches!(err, ApiError::Api(_)));
    }

    #[test]
    fn non_xml_client_error_is_http_error() {
        let err = client().parse_get_comment_feed(HttpResponse::new(404, "not found")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 404, .. }));
    }

    #[test]
    fn client_error_with_other_xml_is_http_error() {
        let err = client()
            .parse_get_network_updates(HttpResponse::new(400, "<foo/>"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 400, .. }));

        let err = client()
            .parse_get_comment_feed(HttpResponse::new(404, "<network><updates total=\"0\"/></network>"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 404, .. }));

        let err = client()
            .parse_get_network_updates(HttpResponse::new(403, "<error><status>403</status></error>"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 403, .. }));
    }

    #[test]
    fn parse_profile_json() {
        let value = client()
            .parse_get_user_profile(ok(r#"{"firstName":"Ada","lastName":"Lovelace"}"#))
            .unwrap();
        assert_eq!(value["firstName"], "Ada");
    }

    #[test]
    fn parse_profile_bad_json() {
        let err = client().parse_get_user_profile(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_network_updates_cleans_dates() {
        let body = r#"<network><updates total="1"><update>
            <timestamp>1234567890123</timestamp><update-type>CONN</update-type>
            <update-content><person><first-name>A</first-name><last-name>B</last-name>
            <site-standard-profile-request><url>http://li/a</url></site-standard-profile-request>
            </person></update-content></update></updates></network>"#;
        let network = client().parse_get_network_updates(ok(body)).unwrap();
        let UpdateContent::Generic { timestamp, update_key, .. } = &network.updates[0].content else {
            panic!("expected generic content");
        };
        assert_eq!(timestamp, "02/13/2009 23:31:30");
        assert_eq!(update_key, &None);
    }

    #[test]
    fn parse_search_expects_people() {
        let err = client().parse_search(ok("<position><title>x</title></position>")).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedPayload { expected: "people", found: "position" }));
    }

    #[test]
    fn parse_payload_keeps_error_documents() {
        let body = "<error><status>404</status><timestamp>1</timestamp><error-code>0</error-code><message>gone</message></error>";
        let payload = client().parse_payload(HttpResponse::new(404, body)).unwrap();
        assert!(matches!(payload, Payload::Error(_)));
    }

    #[test]
    fn parse_share_receipt() {
        let receipt = client()
            .parse_share(HttpResponse::new(201, r#"{"updateKey":"UNIU-1","updateUrl":"http://li/u/1"}"#))
            .unwrap();
        assert_eq!(receipt.update_key.as_deref(), Some("UNIU-1"));
    }

    #[test]
    fn parse_write_success() {
        assert!(client().parse_send_message(HttpResponse::new(201, "")).is_ok());
        assert!(client().parse_send_invitation(HttpResponse::new(201, "")).is_ok());
    }
}
