use crate::e2e::helpers;

use helpers::assertions::{assert_metadata_matches, assert_narrated_story};
use helpers::fixtures::{
    story_request, story_request_with, story_request_without, NOT_JSON, NO_STORY_KEY,
    TWO_SENTENCE_STORY, UNFENCED_FLAT_STORY,
};
use helpers::{TestContext, TEST_COLLECTION};
use hyper::StatusCode;
use kataru_backend::domain::story::GenerateStoryResponse;
use pretty_assertions::assert_eq;
use test_context::test_context;

// ============================================================================
// Successful generation
// ============================================================================

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_narrate_and_save_story(ctx: &TestContext) {
    ctx.generator.respond_with(TWO_SENTENCE_STORY);
    let request = story_request();

    let response = ctx.client.post("/generate_story", &request).await.unwrap();

    response.assert_status(StatusCode::OK);
    let body: GenerateStoryResponse = response.json().unwrap();
    assert!(!body.document_path.is_empty());
    assert!(body
        .document_path
        .starts_with(&format!("{}/", TEST_COLLECTION)));

    // The saved record has both sentences narrated and the request echoed back
    let document = ctx
        .stories
        .get(&body.document_path)
        .expect("Story was not saved under the returned path");
    assert_narrated_story(&document, 2);
    assert_metadata_matches(&document, &request);

    // One blob per sentence, each referenced by its sentence
    let blobs = ctx.audio_storage.blobs();
    assert_eq!(blobs.len(), 2);
    for blob in &blobs {
        assert_eq!(blob.content_type, "audio/mpeg");
        assert!(blob.key.ends_with(".mp3"));
        assert!(!blob.bytes.is_empty());
    }

    let links: Vec<&str> = document["story"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["audio_link"].as_str())
        .collect();
    assert_ne!(links[0], links[1]);
    for link in links {
        assert!(
            blobs.iter().any(|b| link.ends_with(&b.key)),
            "audio_link {} does not reference a stored blob",
            link
        );
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_sentence_order_and_spans(ctx: &TestContext) {
    ctx.generator.respond_with(TWO_SENTENCE_STORY);

    let response = ctx
        .client
        .post("/generate_story", &story_request())
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let body: GenerateStoryResponse = response.json().unwrap();
    let document = ctx.stories.get(&body.document_path).unwrap();
    let story = document["story"].as_array().unwrap();

    assert_eq!(story[0]["children"][0]["text"], "猫");
    assert_eq!(story[0]["children"][0]["transliteration"], "neko");
    assert_eq!(story[0]["children"][3]["type"], "punctuation");
    assert_eq!(story[0]["children"][4]["type"], "translation");
    assert_eq!(story[1]["children"][0]["text"], "犬");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_narrate_in_target_language_with_requested_voice(ctx: &TestContext) {
    ctx.generator.respond_with(TWO_SENTENCE_STORY);

    let response = ctx
        .client
        .post("/generate_story", &story_request())
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let calls = ctx.tts.calls();
    assert_eq!(calls.len(), 2);
    for call in &calls {
        assert_eq!(call.language, "Japanese");
        assert_eq!(call.voice, "ja-JP-Standard-A");
        assert!(!call.text.contains('。'), "Punctuation was spoken: {}", call.text);
    }
    assert!(calls.iter().any(|c| c.text.contains("猫")));
    assert!(calls.iter().any(|c| c.text.contains("犬")));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_build_prompt_from_request(ctx: &TestContext) {
    ctx.generator.respond_with(TWO_SENTENCE_STORY);

    ctx.client
        .post("/generate_story", &story_request())
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let prompts = ctx.generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("English"));
    assert!(prompts[0].contains("Japanese"));
    assert!(prompts[0].contains("adventure"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_unfenced_flat_sentences(ctx: &TestContext) {
    ctx.generator.respond_with(UNFENCED_FLAT_STORY);
    let request = story_request_with("target_language", "Spanish");

    let response = ctx.client.post("/generate_story", &request).await.unwrap();

    response.assert_status(StatusCode::OK);
    let body: GenerateStoryResponse = response.json().unwrap();
    let document = ctx.stories.get(&body.document_path).unwrap();
    assert_narrated_story(&document, 1);
    assert_eq!(document["story"][0]["children"][0]["text"], "Hola");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_multi_word_difficulty_label(ctx: &TestContext) {
    ctx.generator.respond_with(TWO_SENTENCE_STORY);
    let request = story_request_with("difficulty_level", "Absolute Beginner");

    let response = ctx.client.post("/generate_story", &request).await.unwrap();

    response.assert_status(StatusCode::OK);
    let body: GenerateStoryResponse = response.json().unwrap();
    let document = ctx.stories.get(&body.document_path).unwrap();
    assert_eq!(
        document["metadata"]["difficulty_level"],
        "Absolute Beginner"
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_save_each_story_under_its_own_path(ctx: &TestContext) {
    ctx.generator.respond_with(TWO_SENTENCE_STORY);

    let first: GenerateStoryResponse = ctx
        .client
        .post("/generate_story", &story_request())
        .await
        .unwrap()
        .json()
        .unwrap();
    let second: GenerateStoryResponse = ctx
        .client
        .post("/generate_story", &story_request())
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_ne!(first.document_path, second.document_path);
    assert_eq!(ctx.stories.records().len(), 2);
    assert_eq!(ctx.audio_storage.blobs().len(), 4);
}

// ============================================================================
// Bad model output
// ============================================================================

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_on_empty_model_output(ctx: &TestContext) {
    ctx.generator.respond_with("");

    let response = ctx
        .client
        .post("/generate_story", &story_request())
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Empty response from Vertex AI")
        .assert_error_kind("empty_generation");

    assert!(ctx.stories.records().is_empty());
    assert!(ctx.audio_storage.blobs().is_empty());
    assert!(ctx.tts.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_on_malformed_model_output(ctx: &TestContext) {
    ctx.generator.respond_with(NOT_JSON);

    let response = ctx
        .client
        .post("/generate_story", &story_request())
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Failed to decode JSON response")
        .assert_error_kind("decode");

    assert!(ctx.stories.records().is_empty());
    assert!(ctx.audio_storage.blobs().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_when_story_key_is_missing(ctx: &TestContext) {
    ctx.generator.respond_with(NO_STORY_KEY);

    let response = ctx
        .client
        .post("/generate_story", &story_request())
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Failed to decode JSON response")
        .assert_error_kind("decode");
    assert!(ctx.stories.records().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_when_fenced_output_is_empty(ctx: &TestContext) {
    ctx.generator.respond_with("```json\n```");

    let response = ctx
        .client
        .post("/generate_story", &story_request())
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_kind("decode");
    assert!(ctx.stories.records().is_empty());
}

// ============================================================================
// Collaborator failures
// ============================================================================

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_generator_failure(ctx: &TestContext) {
    ctx.generator.fail_with("Vertex AI error (503): unavailable");

    let response = ctx
        .client
        .post("/generate_story", &story_request())
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Failed to generate story")
        .assert_error_kind("generation");
    assert!(ctx.stories.records().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_save_story_when_narration_fails(ctx: &TestContext) {
    ctx.generator.respond_with(TWO_SENTENCE_STORY);
    ctx.tts.fail_for_voice("ja-JP-Broken");
    let request = story_request_with("voice", "ja-JP-Broken");

    let response = ctx.client.post("/generate_story", &request).await.unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Failed to narrate story")
        .assert_error_kind("narration");
    assert!(ctx.stories.records().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_persistence_failure(ctx: &TestContext) {
    ctx.generator.respond_with(TWO_SENTENCE_STORY);
    ctx.stories.set_available(false);

    let response = ctx
        .client
        .post("/generate_story", &story_request())
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Failed to save story")
        .assert_error_kind("persistence");
}

// ============================================================================
// Request validation
// ============================================================================

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_fields(ctx: &TestContext) {
    ctx.generator.respond_with(TWO_SENTENCE_STORY);

    for field in [
        "native_language",
        "target_language",
        "genre",
        "difficulty_level",
        "voice",
    ] {
        let response = ctx
            .client
            .post("/generate_story", &story_request_without(field))
            .await
            .unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message(&format!("{} is required", field))
            .assert_error_kind("invalid_request");
    }

    assert!(ctx.generator.prompts().is_empty());
    assert!(ctx.stories.records().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_fields(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/generate_story", &story_request_with("genre", "   "))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("genre is required");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_difficulty(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/generate_story",
            &story_request_with("difficulty_level", "Grandmaster"),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("difficulty_level must be one of")
        .assert_error_kind("invalid_request");
    assert!(ctx.generator.prompts().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_json_body(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw("/generate_story", "{\"genre\": ")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_kind("invalid_request");
    assert!(ctx.generator.prompts().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_story_responses(ctx: &TestContext) {
    ctx.generator.respond_with(TWO_SENTENCE_STORY);

    let ok = ctx
        .client
        .post("/generate_story", &story_request())
        .await
        .unwrap();
    ok.assert_header_exists("x-request-id");

    let bad = ctx
        .client
        .post("/generate_story", &story_request_without("voice"))
        .await
        .unwrap();
    bad.assert_header_exists("x-request-id");

    assert_ne!(ok.header("x-request-id"), bad.header("x-request-id"));
}
