use super::*;
use tower::ServiceExt;

#[tokio::test]
async fn test_signup_success() {
    // Arrange
    let app = test_app().await;

    // Act
    let response = app
        .clone()
        .oneshot(form_post("/signupSubmit", "name=A&email=a%40x.com&password=p"))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/members"));

    let set_cookie = session_set_cookie(&response).expect("session cookie should be set");
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=3600"));

    let cookie = session_cookie(&response).unwrap();
    let members = app.oneshot(get("/members", Some(&cookie))).await.unwrap();
    assert_eq!(members.status(), StatusCode::OK);
    assert!(body_text(members).await.contains("Hello, A."));
}

#[tokio::test]
async fn test_signup_invalid_email() {
    // Arrange
    let app = test_app().await;

    // Act
    let response = app
        .oneshot(form_post("/signupSubmit", "name=A&email=invalid-email&password=p"))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(session_set_cookie(&response).is_none());

    let body = body_text(response).await;
    assert!(body.contains("&quot;email&quot; must be a valid email"));
    assert!(body.contains("<a href=\"/signup\">Try again</a>"));
}

#[tokio::test]
async fn test_signup_missing_fields_report_first_rule() {
    // Arrange
    let app = test_app().await;

    // Act
    let response = app
        .oneshot(form_post("/signupSubmit", "email=a%40x.com"))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("&quot;name&quot; is required"));
}

#[tokio::test]
async fn test_signup_repeated_field_is_a_validation_error() {
    // Arrange
    let app = test_app().await;

    // Act
    let response = app
        .oneshot(form_post("/signupSubmit", "name=A&name=B&email=a%40x.com&password=p"))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(session_set_cookie(&response).is_none());

    let body = body_text(response).await;
    assert!(body.contains("&quot;name&quot; must be a string"));
    assert!(body.contains("<a href=\"/signup\">Try again</a>"));
}

#[tokio::test]
async fn test_signup_without_form_content_type() {
    // Arrange
    let app = test_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/signupSubmit")
        .body(Body::from("name=A&email=a%40x.com&password=p"))
        .unwrap();

    // Act
    let response = app.oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("<a href=\"/signup\">Try again</a>"));
}

#[tokio::test]
async fn test_signup_replaces_existing_session() {
    // Arrange
    let app = test_app().await;
    let old_cookie = signup_ada(&app).await;

    // Act
    let response = app
        .clone()
        .oneshot(form_post_with_cookie(
            "/signupSubmit",
            "name=B&email=b%40x.com&password=q",
            Some(&old_cookie),
        ))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let members = app.oneshot(get("/members", Some(&old_cookie))).await.unwrap();
    assert_eq!(members.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&members).as_deref(), Some("/"));
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    // Arrange
    let app = test_app().await;
    signup_ada(&app).await;

    // Act
    let response = app
        .oneshot(form_post("/signupSubmit", "name=B&email=a%40x.com&password=q"))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(session_set_cookie(&response).is_none());

    let body = body_text(response).await;
    assert!(body.contains("Email already registered."));
    assert!(body.contains("<a href=\"/signup\">Try again</a>"));
}

#[tokio::test]
async fn test_signup_name_is_escaped_on_pages() {
    // Arrange
    let app = test_app().await;
    let response = app
        .clone()
        .oneshot(form_post(
            "/signupSubmit",
            "name=%3Cscript%3Ex%3C%2Fscript%3E&email=m%40x.com&password=p",
        ))
        .await
        .unwrap();
    let cookie = session_cookie(&response).unwrap();

    // Act
    let members = app.oneshot(get("/members", Some(&cookie))).await.unwrap();

    // Assert
    let body = body_text(members).await;
    assert!(body.contains("Hello, &lt;script&gt;x&lt;/script&gt;."));
    assert!(!body.contains("<script>"));
}
