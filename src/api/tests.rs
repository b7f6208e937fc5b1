use super::*;
use httpmock::prelude::*;
use serde_json::json;

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new_with_base_url(server.url("")).with_bearer("tok-1")
}

#[tokio::test]
async fn login_posts_credentials_and_parses_the_token_pair() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/auth/login")
            .json_body(json!({ "email": "a@example.com", "password": "secret" }));
        then.status(200)
            .json_body(json!({ "token": "tok-9", "user_id": "u-1" }));
    });

    let api = ApiClient::new_with_base_url(server.url(""));
    let response = api
        .login(&LoginRequest {
            email: "a@example.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.token, "tok-9");
    assert_eq!(response.user_id, "u-1");
}

#[tokio::test]
async fn login_error_body_is_passed_through_verbatim() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/auth/login");
        then.status(401).json_body(json!({
            "error": "Wrong password.",
            "code": "UNAUTHORIZED"
        }));
    });

    let api = ApiClient::new_with_base_url(server.url(""));
    let error = api
        .login(&LoginRequest {
            email: "a@example.com".into(),
            password: "nope".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(error.error, "Wrong password.");
    assert_eq!(error.code, "UNAUTHORIZED");
}

#[tokio::test]
async fn signup_maps_a_bare_422_to_a_validation_error() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(PUT).path("/auth/signup");
        then.status(422).body("unprocessable");
    });

    let api = ApiClient::new_with_base_url(server.url(""));
    let error = api
        .signup(&SignupRequest {
            email: "a@example.com".into(),
            name: "Alice".into(),
            password: "secret".into(),
        })
        .await
        .unwrap_err();

    assert!(error.is_validation());
}

#[tokio::test]
async fn validation_details_survive_the_error_body_parse() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(PUT).path("/auth/signup");
        then.status(422).json_body(json!({
            "error": "Validation failed.",
            "code": "VALIDATION_ERROR",
            "details": [
                { "field": "email", "message": "E-mail address already exists!" }
            ]
        }));
    });

    let api = ApiClient::new_with_base_url(server.url(""));
    let error = api
        .signup(&SignupRequest {
            email: "a@example.com".into(),
            name: "Alice".into(),
            password: "secret".into(),
        })
        .await
        .unwrap_err();

    assert!(error.is_validation());
    let details = error.details.unwrap();
    assert_eq!(details[0]["field"], "email");
    assert_eq!(details[0]["message"], "E-mail address already exists!");
}

#[tokio::test]
async fn list_posts_sends_the_page_and_the_bearer_credential() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/posts")
            .query_param("page", "3")
            .header("authorization", "Bearer tok-1");
        then.status(200).json_body(json!({
            "posts": [],
            "total_posts": 7
        }));
    });

    let list = client_for(&server).list_posts(3).await.unwrap();

    mock.assert_async().await;
    assert_eq!(list.total_posts, 7);
    assert!(list.posts.is_empty());
}

#[tokio::test]
async fn authenticated_calls_without_a_credential_never_reach_the_server() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET).path("/posts");
        then.status(200)
            .json_body(json!({ "posts": [], "total_posts": 0 }));
    });

    let api = ApiClient::new_with_base_url(server.url(""));
    let error = api.list_posts(1).await.unwrap_err();

    assert_eq!(error.code, "UNAUTHORIZED");
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn get_post_parses_the_creator_and_timestamp() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/posts/p-1");
        then.status(200).json_body(json!({
            "id": "p-1",
            "title": "Hello",
            "content": "World",
            "image_url": "images/p-1.png",
            "creator": { "name": "Alice" },
            "created_at": "2025-01-02T10:00:00Z"
        }));
    });

    let post = client_for(&server).get_post("p-1").await.unwrap();

    assert_eq!(post.creator.name, "Alice");
    assert_eq!(post.created_at.to_rfc3339(), "2025-01-02T10:00:00+00:00");
}

#[tokio::test]
async fn create_post_sends_the_payload_as_json() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/posts").json_body(json!({
            "title": "Hello",
            "content": "World",
            "image_url": "images/p-1.png"
        }));
        then.status(201).json_body(json!({
            "id": "p-1",
            "title": "Hello",
            "content": "World",
            "image_url": "images/p-1.png",
            "creator": { "name": "Alice" },
            "created_at": "2025-01-02T10:00:00Z"
        }));
    });

    let created = client_for(&server)
        .create_post(&PostPayload {
            title: "Hello".into(),
            content: "World".into(),
            image_url: "images/p-1.png".into(),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(created.id, "p-1");
}

#[tokio::test]
async fn delete_post_succeeds_on_any_2xx() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(DELETE).path("/posts/p-1");
        then.status(200).json_body(json!({ "message": "Deleted." }));
    });

    client_for(&server).delete_post("p-1").await.unwrap();
}

#[tokio::test]
async fn upload_normalizes_backslash_locators() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/post-image")
            .header("authorization", "Bearer tok-1")
            .body_contains("old_path")
            .body_contains("images/prior.png");
        then.status(200)
            .json_body(json!({ "file_path": "images\\new.png" }));
    });

    let locator = client_for(&server)
        .upload_image(vec![1, 2, 3], "new.png", Some("images/prior.png"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(locator, "images/new.png");
}

#[tokio::test]
async fn upload_without_a_prior_locator_omits_the_old_path_part() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(PUT).path("/post-image");
        then.status(200)
            .json_body(json!({ "file_path": "images/new.png" }));
    });
    let with_old_path = server.mock(|when, then| {
        when.method(PUT).path("/post-image").body_contains("old_path");
        then.status(500).json_body(json!({}));
    });

    let locator = client_for(&server)
        .upload_image(vec![1], "new.png", None)
        .await
        .unwrap();

    assert_eq!(locator, "images/new.png");
    assert_eq!(with_old_path.hits_async().await, 0);
}

#[tokio::test]
async fn status_update_sends_the_new_text() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/status")
            .json_body(json!({ "status": "out for lunch" }));
        then.status(200).json_body(json!({ "message": "Updated." }));
    });

    client_for(&server)
        .update_status("out for lunch")
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn unparseable_error_bodies_fall_back_to_the_status_code() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/status");
        then.status(503).body("upstream down");
    });

    let error = client_for(&server).get_status().await.unwrap_err();
    assert_eq!(error.code, "UNKNOWN");
    assert!(error.error.contains("503"));
}

#[tokio::test]
async fn transport_failures_map_to_request_failed() {
    // Port 1 is never bound; the connection is refused immediately.
    let api = ApiClient::new_with_base_url("http://127.0.0.1:1").with_bearer("tok-1");
    let error = api.get_status().await.unwrap_err();
    assert_eq!(error.code, "REQUEST_FAILED");
}
