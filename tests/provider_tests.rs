use anychat::providers::{
  build_request, completion_from_chunk,
  completion_from_response, status_to_error,
  ChatApiResponse, ChatChunk, SseBuffer
};
use anychat::{
  AzureChatCompletion, AzureConfig, ChatBackend,
  ChatCompletion, ChatMessage, ChatRequestSettings,
  Error, ErrorKind, OpenAiChatCompletion, Role
};

#[test]
fn test_message_wire_shape()
{   let message = ChatMessage::user("hello");
    let value = serde_json::to_value(&message).unwrap();
    assert_eq!(
      value,
      serde_json::json!({
        "role": "user",
        "content": "hello"
      })
    );

    let system = ChatMessage::system("be brief");
    assert_eq!(system.role, Role::System);
}

#[test]
fn test_default_settings_serialize_empty()
{   let settings = ChatRequestSettings::default();
    let value = serde_json::to_value(&settings).unwrap();
    assert_eq!(value, serde_json::json!({}));
}

#[test]
fn test_request_carries_only_set_fields()
{   let settings = ChatRequestSettings
    {   temperature: Some(0.7)
      , max_tokens: Some(256)
      , number_of_responses: Some(2)
      , ..Default::default()
    };
    let messages = vec![ChatMessage::user("hi")];

    let request = build_request(
      Some("gpt-4".to_string()),
      &messages,
      &settings,
      true
    );
    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(value["model"], "gpt-4");
    assert_eq!(value["temperature"], 0.7);
    assert_eq!(value["max_tokens"], 256);
    assert_eq!(value["n"], 2);
    assert_eq!(value["stream"], true);
    assert!(value.get("top_p").is_none());
    assert!(value.get("stop").is_none());
}

#[test]
fn test_response_single_choice()
{   let body = r#"{
      "choices": [
        {"index": 0,
         "message": {"role": "assistant", "content": "traffic"},
         "finish_reason": "stop"}
      ]
    }"#;
    let response: ChatApiResponse
      = serde_json::from_str(body).unwrap();

    let completion
      = completion_from_response(response).unwrap();
    assert_eq!(
      completion,
      ChatCompletion::Single("traffic".to_string())
    );
}

#[test]
fn test_response_multiple_choices()
{   let body = r#"{
      "choices": [
        {"index": 0,
         "message": {"role": "assistant", "content": "traffic"},
         "finish_reason": "stop"},
        {"index": 1,
         "message": {"role": "assistant", "content": "weather"},
         "finish_reason": "stop"}
      ]
    }"#;
    let response: ChatApiResponse
      = serde_json::from_str(body).unwrap();

    let completion
      = completion_from_response(response).unwrap();
    assert_eq!(
      completion,
      ChatCompletion::Alternatives(vec![
        "traffic".to_string(),
        "weather".to_string()
      ])
    );
}

#[test]
fn test_response_without_choices_is_an_error()
{   let response: ChatApiResponse
      = serde_json::from_str(r#"{"choices": []}"#)
        .unwrap();

    let err
      = completion_from_response(response).unwrap_err();
    assert_eq!(err, Error::NoChoicesInResponse);
    assert_eq!(err.kind(), ErrorKind::Backend);
}

#[test]
fn test_chunk_with_content_delta()
{   let body = r#"{
      "choices": [
        {"index": 0,
         "delta": {"content": "tra"},
         "finish_reason": null}
      ]
    }"#;
    let chunk: ChatChunk
      = serde_json::from_str(body).unwrap();

    let completion
      = completion_from_chunk(chunk, 1).unwrap();
    assert_eq!(
      completion,
      ChatCompletion::Single("tra".to_string())
    );
}

#[test]
fn test_role_only_chunk_yields_nothing()
{   let body = r#"{
      "choices": [
        {"index": 0,
         "delta": {"role": "assistant"},
         "finish_reason": null}
      ]
    }"#;
    let chunk: ChatChunk
      = serde_json::from_str(body).unwrap();

    assert!(completion_from_chunk(chunk, 1).is_none());
}

#[test]
fn test_chunk_deltas_land_at_choice_index()
{   let body = r#"{
      "choices": [
        {"index": 1,
         "delta": {"content": "weather"},
         "finish_reason": null}
      ]
    }"#;
    let chunk: ChatChunk
      = serde_json::from_str(body).unwrap();

    let completion
      = completion_from_chunk(chunk, 2).unwrap();
    assert_eq!(
      completion,
      ChatCompletion::Alternatives(vec![
        String::new(),
        "weather".to_string()
      ])
    );
}

#[test]
fn test_sse_buffer_reassembles_split_lines()
{   let mut buffer = SseBuffer::new();

    buffer.push(b"event: chunk\ndata: {\"a\"");
    assert!(buffer.next_data().is_none());

    buffer.push(b": 1}\n\ndata: [DONE]\n");
    assert_eq!(
      buffer.next_data().as_deref(),
      Some("{\"a\": 1}")
    );
    assert_eq!(
      buffer.next_data().as_deref(),
      Some("[DONE]")
    );
    assert!(buffer.next_data().is_none());
}

#[test]
fn test_status_mapping()
{   let status
      = |code| reqwest::StatusCode::from_u16(code).unwrap();

    let err = status_to_error(
      status(401),
      "bad key".to_string()
    );
    assert_eq!(
      err,
      Error::InvalidCredentials("bad key".to_string())
    );
    assert_eq!(err.kind(), ErrorKind::Backend);

    assert_eq!(
      status_to_error(status(429), String::new()),
      Error::QuotaExceeded
    );
    assert!(matches!(
      status_to_error(status(400), "n too big".to_string()),
      Error::InvalidSettings(_)
    ));
    assert!(matches!(
      status_to_error(status(500), "boom".to_string()),
      Error::ApiError(_)
    ));
}

#[test]
fn test_azure_config_defaults()
{   let config
      = AzureConfig::new("https://r.openai.azure.com", "chat", "k");
    assert_eq!(config.api_version, "2023-05-15");
    assert!(config.timeout_secs.is_none());
}

#[test]
fn test_connector_rejects_blank_key()
{   let config
      = AzureConfig::new("https://r.openai.azure.com", "chat", "");
    let err
      = AzureChatCompletion::new(config).unwrap_err();
    assert!(matches!(err, Error::MissingApiKey(_)));
}

#[tokio::test]
#[ignore]
async fn test_azure_live_completion()
{   let _ = env_logger::builder()
      .is_test(true)
      .try_init();

    let backend = match AzureChatCompletion::from_env()
    {   Ok(b) => b
      , Err(e) => {
          println!("Skipping: {}", e);
          return;
        }
    };

    let messages = vec![
      ChatMessage::system("You complete sentences tersely."),
      ChatMessage::user("I am late because")
    ];
    let settings = ChatRequestSettings
    {   max_tokens: Some(32)
      , ..Default::default()
    };

    match backend.complete_chat(&messages, &settings).await
    {   Ok(reply) => {
          println!("Azure replied: {}", reply.first());
          assert!(!reply.first().is_empty());
        }
      , Err(e) => {
          println!("Azure call failed: {}", e);
        }
    }
}

#[tokio::test]
#[ignore]
async fn test_openai_live_stream()
{   let _ = env_logger::builder()
      .is_test(true)
      .try_init();

    let backend
      = match OpenAiChatCompletion::from_env("gpt-4o-mini")
    {   Ok(b) => b
      , Err(e) => {
          println!("Skipping: {}", e);
          return;
        }
    };

    let messages = vec![
      ChatMessage::user("Count from 1 to 5.")
    ];
    let settings = ChatRequestSettings
    {   max_tokens: Some(64)
      , ..Default::default()
    };

    let stream = match backend
      .complete_chat_stream(&messages, &settings)
      .await
    {   Ok(s) => s
      , Err(e) => {
          println!("OpenAI stream failed to open: {}", e);
          return;
        }
    };

    match stream.collect_text().await
    {   Ok(text) => {
          println!("OpenAI streamed: {}", text);
          assert!(!text.is_empty());
        }
      , Err(e) => {
          println!("OpenAI stream failed: {}", e);
        }
    }
}
