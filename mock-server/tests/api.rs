use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use tower::ServiceExt;

const AUTH: &str = r#"OAuth oauth_consumer_key="ck", oauth_signature="sig""#;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn signed(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, AUTH)
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn unsigned_request_gets_error_document() {
    let resp = app()
        .oneshot(Request::builder().uri("/v1/people/~").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_text(resp).await;
    assert!(body.contains("<error><status>401</status>"));
}

#[tokio::test]
async fn request_token_is_form_encoded() {
    let resp = app()
        .oneshot(signed("POST", "/uas/oauth/requestToken", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.starts_with("oauth_token=request-token&oauth_token_secret=request-secret"));
}

#[tokio::test]
async fn access_token_needs_verifier() {
    let resp = app()
        .oneshot(signed("POST", "/uas/oauth/accessToken", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app()
        .oneshot(signed("POST", "/uas/oauth/accessToken", "oauth_verifier=1234"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("oauth_token=access-token"));
}

// --- reads ---

#[tokio::test]
async fn profile_of_current_member() {
    let resp = app()
        .oneshot(signed("GET", "/v1/people/~:(id,first-name)?format=json", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let profile = body_json(resp).await;
    assert_eq!(profile["id"], "ada");
    assert_eq!(profile["firstName"], "Ada");
}

#[tokio::test]
async fn profile_of_unknown_member_is_404() {
    let resp = app()
        .oneshot(signed("GET", "/v1/people/id=nobody", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_text(resp).await.contains("<status>404</status>"));
}

#[tokio::test]
async fn profiles_of_several_members() {
    let resp = app()
        .oneshot(signed("GET", "/v1/people::(id=grace,id=linus)?format=json", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let profiles = body_json(resp).await;
    assert_eq!(profiles["_total"], 2);
    assert_eq!(profiles["values"][1]["lastName"], "Torvalds");
}

#[tokio::test]
async fn connections_list_everyone_else() {
    let resp = app()
        .oneshot(signed("GET", "/v1/people/~/connections?format=json", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let connections = body_json(resp).await;
    assert_eq!(connections["_total"], 2);
    assert_eq!(connections["values"][0]["id"], "grace");
}

#[tokio::test]
async fn network_filters_by_type() {
    let resp = app()
        .oneshot(signed("GET", "/v1/people/~/network?type=CONN&type=JOBP", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(r#"<updates total="2">"#));
    assert!(!body.contains("<update-type>STAT</update-type>"));
}

#[tokio::test]
async fn search_matches_keywords() {
    let resp = app()
        .oneshot(signed("GET", "/v1/people-search:(people:(id))?keywords=kernel", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(r#"<people total="1">"#));
    assert!(body.contains("<id>linus</id>"));
}

// --- writes ---

#[tokio::test]
async fn malformed_update_key_is_rejected() {
    let resp = app()
        .oneshot(signed("GET", "/v1/people/~/network/updates/STAT-1/update-comments", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_comment_body_is_rejected() {
    let resp = app()
        .oneshot(signed(
            "POST",
            "/v1/people/~/network/updates/key=STAT-1/update-comments",
            "<update-comment><comment>a &bogus; b</comment></update-comment>",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("<message>missing comment</message>"));
}

#[tokio::test]
async fn share_requires_visibility() {
    let mut req = signed("POST", "/v1/people/~/shares", r#"{"comment":"hi"}"#);
    req.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn writes_are_visible_to_later_reads() {
    use tower::Service;

    let mut app = app().into_service();
    let comments = "/v1/people/~/network/updates/key=STAT-1/update-comments";

    // comment
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(signed(
            "POST",
            comments,
            "<update-comment><comment>Nice &amp; tidy</comment></update-comment>",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(signed("GET", comments, ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(r#"<update-comments total="1">"#));
    assert!(body.contains("<comment>Nice &amp; tidy</comment>"));

    // status
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(signed(
            "PUT",
            "/v1/people/~/current-status",
            "<current-status>Ship &amp; tell</current-status>",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(signed("GET", "/v1/people/~/network?type=STAT", ""))
        .await
        .unwrap();
    let body = body_text(resp).await;
    assert!(body.contains("<current-status>Ship &amp; tell</current-status>"));

    // mailbox
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(signed(
            "POST",
            "/v1/people/~/mailbox",
            r#"<mailbox-item><recipients><recipient><person path="/people/grace"/></recipient></recipients></mailbox-item>"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}
