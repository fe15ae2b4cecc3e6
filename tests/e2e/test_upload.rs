use crate::helpers;

use helpers::api_client::MultipartField;
use helpers::spawn_app;
use hyper::StatusCode;

#[tokio::test]
async fn it_should_strip_html_down_to_visible_text() {
    let app = spawn_app().await;

    let response = app
        .client
        .post_multipart(
            "/upload-file",
            &[MultipartField::file(
                "file",
                "page.html",
                "text/html",
                b"<p>Hello</p><script>bad()</script>",
            )],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("content").and_then(|v| v.as_str()), Some("Hello"));
}

#[tokio::test]
async fn it_should_pass_plain_text_through_unchanged() {
    let app = spawn_app().await;

    let response = app
        .client
        .post_multipart(
            "/upload-file",
            &[MultipartField::file(
                "file",
                "notes.txt",
                "text/plain",
                b"Some notes about bridges.",
            )],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(
        body.get("content").and_then(|v| v.as_str()),
        Some("Some notes about bridges.")
    );
}

#[tokio::test]
async fn it_should_detect_type_from_extension_when_mime_is_generic() {
    let app = spawn_app().await;

    let response = app
        .client
        .post_multipart(
            "/upload-file",
            &[MultipartField::file(
                "file",
                "page.html",
                "application/octet-stream",
                b"<h1>Title</h1>",
            )],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    let content = body.get("content").and_then(|v| v.as_str()).unwrap();
    assert!(content.contains("Title"));
    assert!(!content.contains('<'));
}

#[tokio::test]
async fn it_should_reject_unsupported_file_types() {
    let app = spawn_app().await;

    let response = app
        .client
        .post_multipart(
            "/upload-file",
            &[MultipartField::file(
                "file",
                "paper.pdf",
                "application/pdf",
                b"%PDF-1.4",
            )],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_error_message("unsupported file type");
}

#[tokio::test]
async fn it_should_reject_requests_without_a_file_field() {
    let app = spawn_app().await;

    let response = app
        .client
        .post_multipart("/upload-file", &[MultipartField::text("style", "casual")])
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_error_message("no file field");
}
