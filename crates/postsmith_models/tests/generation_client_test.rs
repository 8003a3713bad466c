// Tests for the generation client's retry and tier fallback behavior.
//
// Time is paused, so backoff sleeps complete instantly while the gaps between
// recorded calls still reflect the scheduled delays.

mod test_utils;

use postsmith_core::{AspectRatio, GenerationRequest, ImageSize, PostBrief};
use postsmith_error::GenerationErrorKind;
use postsmith_models::{GenerationClient, Payload};
use postsmith_retry::{Backoff, ModelCatalog, ModelTier, PostsmithConfig, TierSelector};
use test_utils::{
    MockBackend, MockResponse, image_response, permission_denied, rate_limited, text_response,
};

const POST_JSON: &str = r##"{
    "title": "Cold Brew, Warm Mornings",
    "title_variations": ["Brew It Cold", "Slow Coffee"],
    "caption": "Tired of bitter coffee? Try a 12-hour cold brew. Tag a friend who needs this.",
    "hashtags": ["#coldbrew", "#homebarista"],
    "visual_prompt": "A mason jar of cold brew on a sunlit wooden counter",
    "variations": {
        "short_version": "Cold brew: 12 hours, zero bitterness.",
        "funny_version": "My coffee takes longer to wake up than I do."
    }
}"##;

// "hello" in base64
const PNG_B64: &str = "aGVsbG8=";

fn client(backend: MockBackend) -> GenerationClient<MockBackend> {
    GenerationClient::new(backend, &PostsmithConfig::default())
}

fn client_with_budget(backend: MockBackend, max_attempts: u32) -> GenerationClient<MockBackend> {
    GenerationClient::with_parts(
        backend,
        TierSelector::new(ModelCatalog::default()),
        Backoff::from_millis(2000),
        max_attempts,
    )
}

fn brief() -> anyhow::Result<PostBrief> {
    Ok(PostBrief::builder()
        .theme("Cold brew at home")
        .niche("Coffee")
        .audience("Home baristas")
        .goal("Engagement")
        .tone("Playful")
        .build()?)
}

fn image_size_sent(call: &test_utils::RecordedCall) -> Option<String> {
    call.request
        .generation_config
        .as_ref()
        .and_then(|c| c.image_config.as_ref())
        .and_then(|c| c.image_size.clone())
}

#[tokio::test(start_paused = true)]
async fn test_4k_permission_denied_downgrades_silently() -> anyhow::Result<()> {
    let mock = MockBackend::new_sequence(vec![
        permission_denied("The caller does not have permission"),
        MockResponse::Success(image_response(PNG_B64)),
    ]);
    let client = client(mock);

    let image = client
        .generate_image("a lighthouse at dusk", AspectRatio::Landscape16x9, ImageSize::Size4K)
        .await?;

    assert_eq!(image.value.data, b"hello");
    assert_eq!(image.tier, ModelTier::Standard);
    assert_eq!(image.model, "gemini-2.5-flash-image");
    assert!(image.downgraded);
    assert_eq!(image.network_attempts, 2);

    let mock = client.backend();
    assert_eq!(
        mock.models(),
        vec!["gemini-3-pro-image-preview", "gemini-2.5-flash-image"]
    );
    let calls = mock.calls();
    assert_eq!(image_size_sent(&calls[0]).as_deref(), Some("4K"));
    assert_eq!(image_size_sent(&calls[1]), None);
    // No backoff before the fallback
    assert_eq!(mock.gaps_ms(), vec![0]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_three_rate_limits_exhaust_with_growing_backoff() -> anyhow::Result<()> {
    let mock = MockBackend::new_sequence(vec![
        rate_limited("Resource has been exhausted (e.g. check quota)."),
        rate_limited("Resource has been exhausted (e.g. check quota)."),
        rate_limited("Resource has been exhausted (e.g. check quota). final"),
    ]);
    let client = client(mock);

    let err = client.generate_post(&brief()?).await.unwrap_err();

    match err.kind() {
        GenerationErrorKind::RateLimited { message, attempts } => {
            assert_eq!(message, "Resource has been exhausted (e.g. check quota). final");
            assert_eq!(*attempts, 3);
        }
        other => panic!("expected RateLimited, got {:?}", other),
    }
    let mock = client.backend();
    assert_eq!(mock.call_count(), 3);
    assert_eq!(mock.gaps_ms(), vec![2000, 4000]);
    assert!(mock.models().iter().all(|m| m == "gemini-2.5-flash"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_recovers_at_same_tier() -> anyhow::Result<()> {
    let mock = MockBackend::new_sequence(vec![
        rate_limited("429 Too Many Requests"),
        MockResponse::Success(image_response(PNG_B64)),
    ]);
    let client = client(mock);

    let image = client
        .generate_image("a fox", AspectRatio::Square, ImageSize::Size2K)
        .await?;

    assert_eq!(image.tier, ModelTier::Pro);
    assert!(!image.downgraded);
    assert_eq!(image.network_attempts, 2);
    assert_eq!(
        client.backend().models(),
        vec!["gemini-3-pro-image-preview", "gemini-3-pro-image-preview"]
    );
    assert_eq!(client.backend().gaps_ms(), vec![2000]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_retry_hint_overrides_exponential_delay() -> anyhow::Result<()> {
    let mock = MockBackend::new_sequence(vec![
        rate_limited("Quota exceeded for metric. Please retry in 5.2s."),
        MockResponse::Success(text_response(POST_JSON)),
    ]);
    let client = client(mock);

    client.generate_post(&brief()?).await?;

    assert_eq!(client.backend().gaps_ms(), vec![6200]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_last_attempt_exhausts_without_further_calls() -> anyhow::Result<()> {
    let mock = MockBackend::new_sequence(vec![
        rate_limited("RESOURCE_EXHAUSTED"),
        MockResponse::Success(text_response(POST_JSON)),
    ]);
    let client = client_with_budget(mock, 1);

    let err = client.generate_post(&brief()?).await.unwrap_err();

    assert!(err.is_rate_limited());
    assert_eq!(client.backend().call_count(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_second_permission_denied_surfaces_original_message() -> anyhow::Result<()> {
    let mock = MockBackend::new_sequence(vec![
        permission_denied("Pro image model is not enabled for this key"),
        permission_denied("Image generation is not enabled for this key"),
    ]);
    let client = client(mock);

    let err = client
        .generate_image("a lighthouse", AspectRatio::Portrait9x16, ImageSize::Size4K)
        .await
        .unwrap_err();

    match err.kind() {
        GenerationErrorKind::PermissionDenied { message, fallback } => {
            assert_eq!(message, "Pro image model is not enabled for this key");
            assert_eq!(
                fallback.as_deref(),
                Some("Image generation is not enabled for this key")
            );
        }
        other => panic!("expected PermissionDenied, got {:?}", other),
    }
    assert_eq!(err.message(), "Pro image model is not enabled for this key");
    assert_eq!(client.backend().call_count(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_unusable_fallback_payload_surfaces_original_message() -> anyhow::Result<()> {
    let mock = MockBackend::new_sequence(vec![
        permission_denied("Pro image model is not enabled for this key"),
        MockResponse::Success(text_response("I cannot draw that")),
    ]);
    let client = client(mock);

    let err = client
        .generate_image("a lighthouse", AspectRatio::Square, ImageSize::Size4K)
        .await
        .unwrap_err();

    match err.kind() {
        GenerationErrorKind::PermissionDenied { message, fallback } => {
            assert_eq!(message, "Pro image model is not enabled for this key");
            assert!(
                fallback
                    .as_deref()
                    .is_some_and(|f| f.contains("No image data found"))
            );
        }
        other => panic!("expected PermissionDenied, got {:?}", other),
    }
    assert_eq!(client.backend().call_count(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rate_limited_fallback_is_not_retried() -> anyhow::Result<()> {
    let mock = MockBackend::new_sequence(vec![
        permission_denied("Pro image model is not enabled for this key"),
        rate_limited("Quota exceeded. Please retry in 1s."),
        MockResponse::Success(image_response(PNG_B64)),
    ]);
    let client = client(mock);

    let err = client
        .generate_image("a lighthouse", AspectRatio::Square, ImageSize::Size4K)
        .await
        .unwrap_err();

    match err.kind() {
        GenerationErrorKind::PermissionDenied { message, fallback } => {
            assert_eq!(message, "Pro image model is not enabled for this key");
            assert_eq!(
                fallback.as_deref(),
                Some("Quota exceeded. Please retry in 1s.")
            );
        }
        other => panic!("expected PermissionDenied, got {:?}", other),
    }
    let mock = client.backend();
    assert_eq!(mock.call_count(), 2);
    assert_eq!(mock.gaps_ms(), vec![0]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_permission_denied_at_standard_tier_is_terminal() -> anyhow::Result<()> {
    let mock = MockBackend::new_sequence(vec![
        permission_denied("API key not valid for this project"),
        MockResponse::Success(text_response(POST_JSON)),
    ]);
    let client = client(mock);

    let err = client.generate_post(&brief()?).await.unwrap_err();

    match err.kind() {
        GenerationErrorKind::PermissionDenied { message, fallback } => {
            assert_eq!(message, "API key not valid for this project");
            assert!(fallback.is_none());
        }
        other => panic!("expected PermissionDenied, got {:?}", other),
    }
    assert_eq!(client.backend().call_count(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_fallback_does_not_consume_budget() -> anyhow::Result<()> {
    let mock = MockBackend::new_sequence(vec![
        permission_denied("PERMISSION_DENIED"),
        MockResponse::Success(image_response(PNG_B64)),
    ]);
    let client = client_with_budget(mock, 1);

    let image = client
        .generate_image("a fox", AspectRatio::Portrait3x4, ImageSize::Size2K)
        .await?;

    assert!(image.downgraded);
    assert_eq!(image.network_attempts, 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_then_permission_denied_still_downgrades() -> anyhow::Result<()> {
    let mock = MockBackend::new_sequence(vec![
        rate_limited("RESOURCE_EXHAUSTED"),
        permission_denied("The caller does not have permission"),
        MockResponse::Success(image_response(PNG_B64)),
    ]);
    let client = client(mock);

    let image = client
        .generate_image("a fox", AspectRatio::Landscape4x3, ImageSize::Size4K)
        .await?;

    assert_eq!(image.tier, ModelTier::Standard);
    assert_eq!(image.network_attempts, 3);
    assert_eq!(
        client.backend().models(),
        vec![
            "gemini-3-pro-image-preview",
            "gemini-3-pro-image-preview",
            "gemini-2.5-flash-image"
        ]
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_other_failure_is_never_retried() -> anyhow::Result<()> {
    let mock = MockBackend::new_sequence(vec![
        MockResponse::Error(postsmith_error::RemoteError::with_status(
            500,
            "Internal error encountered.",
        )),
        MockResponse::Success(image_response(PNG_B64)),
    ]);
    let client = client(mock);

    let err = client
        .generate_image("a fox", AspectRatio::Square, ImageSize::Size4K)
        .await
        .unwrap_err();

    match err.kind() {
        GenerationErrorKind::Remote { status, message } => {
            assert_eq!(*status, Some(500));
            assert_eq!(message, "Internal error encountered.");
        }
        other => panic!("expected Remote, got {:?}", other),
    }
    assert_eq!(client.backend().call_count(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_is_terminal() -> anyhow::Result<()> {
    let mock = MockBackend::new_sequence(vec![MockResponse::Error(
        postsmith_error::RemoteError::new("Request failed: connection refused"),
    )]);
    let client = client(mock);

    let err = client.generate_post(&brief()?).await.unwrap_err();

    assert!(matches!(
        err.kind(),
        GenerationErrorKind::Remote { status: None, .. }
    ));
    assert_eq!(client.backend().call_count(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_text_round_trip_is_unchanged() -> anyhow::Result<()> {
    let client = client(MockBackend::new_success(text_response(POST_JSON)));

    let post = client.generate_post(&brief()?).await?;

    let expected: postsmith_core::GeneratedPost = serde_json::from_str(POST_JSON)?;
    assert_eq!(post.value, expected);
    assert_eq!(post.value.title, "Cold Brew, Warm Mornings");
    assert_eq!(post.value.hashtags, vec!["#coldbrew", "#homebarista"]);
    assert_eq!(post.model, "gemini-2.5-flash");
    assert_eq!(post.network_attempts, 1);

    let request = &client.backend().calls()[0].request;
    let sent: serde_json::Value =
        serde_json::from_str(request.contents[0].parts[0].text.as_deref().unwrap_or_default())?;
    assert_eq!(sent["theme"], "Cold brew at home");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_malformed_text_is_not_retried() -> anyhow::Result<()> {
    let mock = MockBackend::new_sequence(vec![
        MockResponse::Success(text_response("Sure! Here is your post: ...")),
        MockResponse::Success(text_response(POST_JSON)),
    ]);
    let client = client(mock);

    let err = client.generate_post(&brief()?).await.unwrap_err();

    assert!(matches!(
        err.kind(),
        GenerationErrorKind::MalformedResponse(_)
    ));
    assert_eq!(client.backend().call_count(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_image_without_inline_data_is_malformed() -> anyhow::Result<()> {
    let client = client(MockBackend::new_success(text_response("I cannot draw that")));

    let err = client
        .generate_image("a fox", AspectRatio::Square, ImageSize::Size1K)
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        GenerationErrorKind::MalformedResponse(_)
    ));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_standard_image_omits_size() -> anyhow::Result<()> {
    let client = client(MockBackend::new_success(image_response(PNG_B64)));

    let image = client
        .generate_image("a fox", AspectRatio::Square, ImageSize::Size1K)
        .await?;

    assert_eq!(image.model, "gemini-2.5-flash-image");
    assert_eq!(image.tier, ModelTier::Standard);
    assert_eq!(image_size_sent(&client.backend().calls()[0]), None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_execute_returns_raw_payload() -> anyhow::Result<()> {
    let client = client(MockBackend::new_success(text_response("plain text")));

    let request = GenerationRequest::text("hello", "reply briefly");
    let generated = client.execute(&request).await?;

    assert_eq!(generated.value, Payload::Text("plain text".to_string()));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_requests_back_off_independently() -> anyhow::Result<()> {
    let limited = client(MockBackend::new_sequence(vec![
        rate_limited("RESOURCE_EXHAUSTED"),
        MockResponse::Success(text_response(POST_JSON)),
    ]));
    let healthy = client(MockBackend::new_success(text_response(POST_JSON)));
    let brief = brief()?;

    let start = tokio::time::Instant::now();
    let (slow, fast) = tokio::join!(limited.generate_post(&brief), async {
        let result = healthy.generate_post(&brief).await;
        (result, tokio::time::Instant::now())
    });

    slow?;
    let (fast, finished_at) = fast;
    fast?;
    assert_eq!((finished_at - start).as_millis(), 0);
    assert_eq!(limited.backend().gaps_ms(), vec![2000]);
    Ok(())
}
