//! OpenAI-compatible chat-completions backend.
//!
//! One blocking `POST {base_url}/chat/completions` per recommendation, JSON
//! response format, bounded by the configured timeout. Works with any server
//! speaking the same wire format (OpenAI, local gateways, Ollama's `/v1`).

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::prompt::{SYSTEM_PROMPT, render_prompt};
use super::{RecommendationError, Recommender, parse_recommendation};
use crate::config::AdvisorConfig;
use crate::domain::{FinancingInput, RecommendationResult};

const TEMPERATURE: f32 = 0.2;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

pub struct ChatCompletionsRecommender {
    client: Client,
    config: AdvisorConfig,
}

impl ChatCompletionsRecommender {
    pub fn new(config: AdvisorConfig) -> Result<Self, RecommendationError> {
        if config.api_key.is_empty() {
            return Err(RecommendationError::MissingApiKey);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn build_request<'a>(&'a self, input: &FinancingInput) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: render_prompt(input),
                },
            ],
            temperature: TEMPERATURE,
            response_format: ResponseFormat { kind: "json_object" },
        }
    }
}

impl Recommender for ChatCompletionsRecommender {
    fn recommend(&self, input: &FinancingInput) -> Result<RecommendationResult, RecommendationError> {
        let url = self.endpoint();
        tracing::debug!(%url, model = %self.config.model, "requesting recommendation");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.build_request(input))
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RecommendationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text()?;
        let body: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| RecommendationError::MalformedResponse(e.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(RecommendationError::EmptyOutput)?;

        let result = parse_recommendation(&content)?;
        tracing::debug!(recommendation = %result.recommendation, "recommendation parsed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::domain::{FinancingOption, Preference};

    fn input() -> FinancingInput {
        FinancingInput {
            vehicle_price: 22000.0,
            down_payment: 2000.0,
            duration: 4,
            mileage: 12000,
            interest_rate: 5.8,
            residual_value_rate: 42.0,
            monthly_payment_credit: 420.0,
            monthly_payment_loa: 280.0,
            monthly_payment_lld: 264.0,
            first_payment_loa: 0.0,
            first_payment_lld: 0.0,
            credit_duration: None,
            preference_flexibility: Preference::No,
            preference_zero_constraint: Preference::No,
            preference_cost_optimization: Preference::Yes,
        }
    }

    fn config(base_url: String) -> AdvisorConfig {
        AdvisorConfig {
            api_key: "sk-test".to_string(),
            base_url,
            model: "test-model".to_string(),
            timeout_secs: 5,
        }
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[test]
    fn missing_key_is_rejected_before_any_request() {
        let cfg = AdvisorConfig { api_key: String::new(), ..config("http://localhost".to_string()) };
        assert!(matches!(
            ChatCompletionsRecommender::new(cfg),
            Err(RecommendationError::MissingApiKey)
        ));
    }

    #[test]
    fn request_body_carries_prompt_and_json_mode() {
        let rec = ChatCompletionsRecommender::new(config("http://localhost".to_string())).unwrap();
        let body = serde_json::to_value(rec.build_request(&input())).unwrap();

        assert_eq!(body["model"], "test-model");
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        let prompt = body["messages"][1]["content"].as_str().unwrap();
        assert!(prompt.contains("Kilométrage annuel : 12000 km"));
    }

    #[test]
    fn successful_answer_is_parsed() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-test");
            then.status(200).json_body(completion(
                r#"{"recommendation": "Crédit", "reasoning": "Coût total le plus faible."}"#,
            ));
        });

        let rec = ChatCompletionsRecommender::new(config(server.base_url())).unwrap();
        let result = rec.recommend(&input()).unwrap();

        mock.assert();
        assert_eq!(result.recommendation, FinancingOption::Credit);
        assert_eq!(result.reasoning, "Coût total le plus faible.");
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .json_body(completion(r#"{"recommendation": "LOA", "reasoning": "Flexible."}"#));
        });

        let rec = ChatCompletionsRecommender::new(config(format!("{}/", server.base_url()))).unwrap();
        assert_eq!(rec.recommend(&input()).unwrap().recommendation, FinancingOption::Loa);
        mock.assert();
    }

    #[test]
    fn upstream_status_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(503).body("overloaded");
        });

        let rec = ChatCompletionsRecommender::new(config(server.base_url())).unwrap();
        match rec.recommend(&input()).unwrap_err() {
            RecommendationError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn body_without_choices_is_empty_output() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({ "choices": [] }));
        });

        let rec = ChatCompletionsRecommender::new(config(server.base_url())).unwrap();
        assert!(matches!(rec.recommend(&input()), Err(RecommendationError::EmptyOutput)));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).body("<html>gateway</html>");
        });

        let rec = ChatCompletionsRecommender::new(config(server.base_url())).unwrap();
        assert!(matches!(
            rec.recommend(&input()),
            Err(RecommendationError::MalformedResponse(_))
        ));
    }

    #[test]
    fn unreachable_server_is_an_http_error() {
        // Port 9 (discard) on localhost is not expected to accept connections.
        let rec = ChatCompletionsRecommender::new(config("http://127.0.0.1:9".to_string())).unwrap();
        assert!(matches!(rec.recommend(&input()), Err(RecommendationError::Http(_))));
    }
}
