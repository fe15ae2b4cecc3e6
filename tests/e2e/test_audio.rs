use crate::helpers;

use helpers::spawn_app;
use hyper::StatusCode;

#[tokio::test]
async fn it_should_serve_a_stored_artifact_with_its_mime_type() {
    let app = spawn_app().await;

    tokio::fs::create_dir_all(&app.audio_dir).await.unwrap();
    let audio = [0xFF, 0xFB, 0x90, 0x64];
    tokio::fs::write(app.audio_dir.join("episode.mp3"), audio)
        .await
        .unwrap();

    let response = app.client.get("/audio/episode.mp3").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.header("content-type").map(|s| s.as_str()),
        Some("audio/mpeg")
    );
    assert_eq!(response.body_bytes, audio.to_vec());
}

#[tokio::test]
async fn it_should_return_404_for_unknown_artifacts() {
    let app = spawn_app().await;

    let response = app.client.get("/audio/no-such-file.mp3").await.unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn it_should_not_serve_files_outside_the_audio_directory() {
    let app = spawn_app().await;

    let response = app.client.get("/audio/..%2F..%2Fetc%2Fpasswd").await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);

    let response = app.client.get("/audio/..config").await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}
