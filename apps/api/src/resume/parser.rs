//! Resume Parser — turns extracted resume text into the model's JSON answer.

use async_trait::async_trait;

use crate::llm_client::LlmClient;
use crate::resume::prompts::build_resume_prompt;

/// The resume parser trait. Implement this to swap the completion backend
/// without touching the upload handler.
///
/// Carried in `AppState` as `Arc<dyn ResumeParser>`.
#[async_trait]
pub trait ResumeParser: Send + Sync {
    /// Returns the model output exactly as received. It is expected to be
    /// JSON but is never parsed or validated here.
    async fn parse(&self, resume_text: &str) -> anyhow::Result<String>;
}

/// Default parser: one chat-completion call per resume.
pub struct LlmResumeParser {
    llm: LlmClient,
}

impl LlmResumeParser {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeParser for LlmResumeParser {
    async fn parse(&self, resume_text: &str) -> anyhow::Result<String> {
        let prompt = build_resume_prompt(resume_text);
        Ok(self.llm.complete(&prompt).await?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;

    fn parser_for(server: &MockServer) -> LlmResumeParser {
        let llm = LlmClient::new(
            "test-key".to_string(),
            &server.uri(),
            "gpt-3.5-turbo".to_string(),
            None,
        )
        .unwrap();
        LlmResumeParser::new(llm)
    }

    #[tokio::test]
    async fn test_parse_sends_prompt_with_resume_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(|req: &Request| {
                let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
                let content = body["messages"][0]["content"].as_str().unwrap_or_default();
                let answer = if content.contains("Resume Text:\nJane Doe, Rust engineer") {
                    r#"{"Name": "Jane Doe"}"#
                } else {
                    "prompt did not embed resume"
                };
                ResponseTemplate::new(200).set_body_json(json!({
                    "choices": [{ "message": { "role": "assistant", "content": answer } }]
                }))
            })
            .expect(1)
            .mount(&server)
            .await;

        let output = parser_for(&server)
            .parse("Jane Doe, Rust engineer")
            .await
            .unwrap();
        assert_eq!(output, r#"{"Name": "Jane Doe"}"#);
    }

    #[tokio::test]
    async fn test_parse_error_carries_llm_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": { "message": "The server had an error" }
            })))
            .mount(&server)
            .await;

        let err = parser_for(&server).parse("resume").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "API error (status 500): The server had an error"
        );
    }
}
