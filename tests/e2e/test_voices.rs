use crate::helpers;

use helpers::fakes::ScriptBehavior;
use helpers::{spawn_app, spawn_app_with};
use hyper::StatusCode;

#[tokio::test]
async fn it_should_list_voices_with_id_name_and_description() {
    let app = spawn_app().await;

    let response = app.client.get("/voices").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    let voices = body.get("voices").and_then(|v| v.as_array()).unwrap();
    assert!(!voices.is_empty());

    for voice in voices {
        assert!(voice.get("id").and_then(|v| v.as_str()).is_some());
        assert!(voice.get("name").and_then(|v| v.as_str()).is_some());
        assert!(voice.get("description").and_then(|v| v.as_str()).is_some());
    }
}

#[tokio::test]
async fn it_should_return_an_empty_list_when_no_voices_match() {
    let app = spawn_app_with(ScriptBehavior::Succeed, vec![]).await;

    let response = app.client.get("/voices").await.unwrap();

    // An empty catalogue is a valid answer, not an error
    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    let voices = body.get("voices").and_then(|v| v.as_array()).unwrap();
    assert!(voices.is_empty());
}
