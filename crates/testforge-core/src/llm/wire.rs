//! Wire format shared by the Gemini and Vertex endpoints
//!
//! Both endpoint families accept the same `generateContent` request body
//! (`contents` + `generationConfig`) and return the same candidate/usage
//! shape, so request building and response parsing live here once.

use crate::error::{ForgeError, ForgeResult};
use crate::llm::messages::{GenerationMessage, GenerationResponse, MessageRole, TokenUsage};
use crate::llm::provider_types::ModelParams;
use serde_json::{json, Value};

/// Build the `generateContent` request body
pub fn build_request(messages: &[GenerationMessage], params: &ModelParams) -> Value {
    let mut contents = Vec::new();
    let mut system_message = String::new();

    for message in messages {
        match message.role {
            MessageRole::System => {
                // System instructions are folded into the first user turn
                if !system_message.is_empty() {
                    system_message.push_str("\n\n");
                }
                system_message.push_str(&message.content);
            }
            MessageRole::User => {
                let mut content = message.content.clone();
                if !system_message.is_empty() {
                    content = format!("{}\n\n{}", system_message, content);
                    system_message.clear();
                }
                contents.push(json!({
                    "role": "user",
                    "parts": [{"text": content}]
                }));
            }
            MessageRole::Model => {
                contents.push(json!({
                    "role": "model",
                    "parts": [{"text": message.content}]
                }));
            }
        }
    }

    // A trailing system message with no user turn still has to reach the model
    if !system_message.is_empty() {
        contents.push(json!({
            "role": "user",
            "parts": [{"text": system_message}]
        }));
    }

    let mut request_body = json!({ "contents": contents });

    let mut generation_config = json!({});
    if let Some(max_tokens) = params.max_output_tokens {
        generation_config["maxOutputTokens"] = json!(max_tokens);
    }
    if let Some(temperature) = params.temperature {
        generation_config["temperature"] = json!(temperature);
    }
    if let Some(top_p) = params.top_p {
        generation_config["topP"] = json!(top_p);
    }
    if let Some(top_k) = params.top_k {
        generation_config["topK"] = json!(top_k);
    }
    if let Some(stop) = &params.stop_sequences {
        generation_config["stopSequences"] = json!(stop);
    }
    if let Some(count) = params.candidate_count {
        generation_config["candidateCount"] = json!(count);
    }

    if generation_config
        .as_object()
        .is_some_and(|obj| !obj.is_empty())
    {
        request_body["generationConfig"] = generation_config;
    }

    request_body
}

/// Parse a `generateContent` response body
pub fn parse_response(response: Value, model: &str) -> ForgeResult<GenerationResponse> {
    let candidates = response["candidates"]
        .as_array()
        .ok_or_else(|| ForgeError::llm("No candidates in model response"))?;

    if candidates.is_empty() {
        return Err(ForgeError::llm("Empty candidates array in model response"));
    }

    let candidate = &candidates[0];
    let content_parts = candidate["content"]["parts"]
        .as_array()
        .ok_or_else(|| ForgeError::llm("No content parts in model response"))?;

    let mut content = String::new();
    for part in content_parts {
        if let Some(text) = part["text"].as_str() {
            content.push_str(text);
        }
    }

    let finish_reason = candidate["finishReason"].as_str().map(|s| s.to_string());

    let usage = response["usageMetadata"].as_object().map(|usage_metadata| {
        let prompt_tokens = usage_metadata
            .get("promptTokenCount")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32;
        let completion_tokens = usage_metadata
            .get("candidatesTokenCount")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32;
        let total_tokens = usage_metadata
            .get("totalTokenCount")
            .and_then(|v| v.as_u64())
            .unwrap_or((prompt_tokens + completion_tokens) as u64) as u32;

        TokenUsage {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        }
    });

    Ok(GenerationResponse {
        content,
        model: Some(model.to_string()),
        finish_reason,
        usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_message_folds_into_first_user_turn() {
        let messages = vec![
            GenerationMessage::system("You write tests."),
            GenerationMessage::user("Generate tests for foo()."),
        ];
        let body = build_request(&messages, &ModelParams::default());

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["role"], "user");
        let text = contents[0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("You write tests."));
        assert!(text.ends_with("Generate tests for foo()."));
    }

    #[test]
    fn generation_config_only_present_when_set() {
        let messages = vec![GenerationMessage::user("hi")];
        let body = build_request(&messages, &ModelParams::default());
        assert!(body.get("generationConfig").is_none());

        let params = ModelParams::default()
            .with_temperature(0.2)
            .with_max_output_tokens(1024)
            .with_candidate_count(1);
        let body = build_request(&messages, &params);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(body["generationConfig"]["candidateCount"], 1);
    }

    #[test]
    fn parses_candidates_and_usage() {
        let response = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "def test_a():\n    pass\n"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 100,
                "candidatesTokenCount": 20,
                "totalTokenCount": 120
            }
        });

        let parsed = parse_response(response, "gemini-1.5-pro").unwrap();
        assert!(parsed.content.contains("def test_a"));
        assert_eq!(parsed.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(parsed.usage.unwrap().total_tokens, 120);
    }

    #[test]
    fn missing_candidates_is_an_error() {
        let err = parse_response(serde_json::json!({}), "gemini-1.5-pro").unwrap_err();
        assert!(matches!(err, ForgeError::Llm { .. }));
    }
}
