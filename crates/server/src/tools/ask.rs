//! ask tool implementation.

use ecowatch_jobs::Services;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Parameters for the ask tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AskParams {
    /// Environmental question to answer.
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AskOutput {
    /// Short HTML answer.
    pub answer: String,
}

pub async fn ask_impl(services: &Services, params: AskParams) -> Result<CallToolResult, McpError> {
    let answer = services.analyst()?.ask(&params.question).await?;
    json_result(&AskOutput { answer })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{services, services_with_generator, text};

    #[tokio::test]
    async fn test_ask() {
        let services = services_with_generator().await;

        let result = ask_impl(&services, AskParams { question: "What is a wetland?".to_string() }).await.unwrap();

        let output: AskOutput = serde_json::from_str(&text(&result)).unwrap();
        assert!(output.answer.starts_with("<p>"));
    }

    #[tokio::test]
    async fn test_ask_empty_question() {
        let services = services_with_generator().await;

        let err = ask_impl(&services, AskParams { question: String::new() }).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[tokio::test]
    async fn test_ask_without_key() {
        let services = services().await;

        let err = ask_impl(&services, AskParams { question: "Why?".to_string() }).await.unwrap_err();
        assert_eq!(err.code.0, -32000);
    }
}
