use crate::helpers;

use helpers::api_client::MultipartField;
use helpers::fakes::{FakeSpeechRepository, ScriptBehavior, FAKE_AUDIO};
use helpers::{spawn_app, spawn_app_with};
use hyper::StatusCode;
use serde_json::json;

#[tokio::test]
async fn it_should_generate_script_and_audio_from_text_submission() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(
            "/generate-podcast",
            &json!({
                "content": "The history of bridges",
                "style": "casual",
                "type": "Text"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();

    let script = body.get("script").and_then(|v| v.as_str()).unwrap();
    assert!(!script.is_empty());

    let audio_path = body.get("audio_path").and_then(|v| v.as_str()).unwrap();
    assert!(audio_path.starts_with("/audio/"));

    // The artifact must be retrievable afterwards
    let audio = app.client.get(audio_path).await.unwrap();
    audio.assert_status(StatusCode::OK);
    assert_eq!(
        audio.header("content-type").map(|s| s.as_str()),
        Some("audio/mpeg")
    );
    assert_eq!(audio.body_bytes, FAKE_AUDIO.to_vec());
}

#[tokio::test]
async fn it_should_reject_empty_content() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(
            "/generate-podcast",
            &json!({"content": "   ", "style": "casual", "type": "text"}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_error_message("No content provided");

    assert!(app.calls.snapshot().is_empty());
}

#[tokio::test]
async fn it_should_reject_unknown_content_types() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(
            "/generate-podcast",
            &json!({"content": "hello", "style": "casual", "type": "spreadsheet"}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_error_message("unknown content type");
}

#[tokio::test]
async fn it_should_never_synthesize_when_script_generation_fails() {
    let app = spawn_app_with(ScriptBehavior::FailTransport, FakeSpeechRepository::default_voices()).await;

    let response = app
        .client
        .post(
            "/generate-podcast",
            &json!({"content": "hello", "style": "casual", "type": "text"}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    response.assert_error_tags("script", "generation_failed");

    // Ordering property: synthesis must not have been invoked
    assert_eq!(app.calls.snapshot(), vec!["script"]);
}

#[tokio::test]
async fn it_should_tag_empty_upstream_output_as_empty_response() {
    let app = spawn_app_with(ScriptBehavior::ReturnEmpty, FakeSpeechRepository::default_voices()).await;

    let response = app
        .client
        .post(
            "/generate-podcast",
            &json!({"content": "hello", "style": "casual", "type": "text"}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    response.assert_error_tags("script", "empty_response");
}

#[tokio::test]
async fn it_should_fail_on_invalid_voice_instead_of_substituting() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(
            "/generate-podcast",
            &json!({
                "content": "hello",
                "style": "casual",
                "type": "text",
                "voice": "narrator-9000"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    response.assert_error_tags("synthesis", "synthesis_failed");
    response.assert_error_message("narrator-9000");
}

#[tokio::test]
async fn it_should_reject_pdf_submissions_as_unsupported() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(
            "/generate-podcast",
            &json!({"content": "paper.pdf", "style": "formal", "type": "pdf"}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_error_tags("ingest", "unsupported_format");
}

#[tokio::test]
async fn it_should_return_audio_binary_from_multipart_form() {
    let app = spawn_app().await;

    let response = app
        .client
        .post_multipart(
            "/api/generate",
            &[
                MultipartField::text("style", "casual"),
                MultipartField::text("content_type", "text"),
                MultipartField::text("content", "The history of bridges"),
            ],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.header("content-type").map(|s| s.as_str()),
        Some("audio/mpeg")
    );
    assert!(response
        .header("content-disposition")
        .map(|s| s.contains("podcast.mp3"))
        .unwrap_or(false));
    assert_eq!(response.body_bytes, FAKE_AUDIO.to_vec());
}

#[tokio::test]
async fn it_should_accept_an_uploaded_file_in_multipart_form() {
    let app = spawn_app().await;

    let response = app
        .client
        .post_multipart(
            "/api/generate",
            &[
                MultipartField::text("style", "formal"),
                MultipartField::text("content_type", "text"),
                MultipartField::file(
                    "file",
                    "notes.txt",
                    "text/plain",
                    b"Some notes about bridges.",
                ),
            ],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body_bytes, FAKE_AUDIO.to_vec());
}

#[tokio::test]
async fn it_should_delete_the_upload_when_the_request_is_rejected() {
    let app = spawn_app().await;

    // No content_type field, so the handler rejects the request after the
    // uploaded file has already been stored
    let response = app
        .client
        .post_multipart(
            "/api/generate",
            &[MultipartField::file(
                "file",
                "notes.txt",
                "text/plain",
                b"Some notes about bridges.",
            )],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);

    let leftovers: Vec<_> = match std::fs::read_dir(&app.upload_dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name())
            .collect(),
        Err(_) => Vec::new(),
    };
    assert!(
        leftovers.is_empty(),
        "temporary upload left behind: {:?}",
        leftovers
    );
}

#[tokio::test]
async fn it_should_reject_multipart_form_without_content() {
    let app = spawn_app().await;

    let response = app
        .client
        .post_multipart(
            "/api/generate",
            &[
                MultipartField::text("style", "casual"),
                MultipartField::text("content_type", "text"),
            ],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_error_message("No content provided");
}
