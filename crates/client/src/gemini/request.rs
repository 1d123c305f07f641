//! Gemini `generateContent` request body.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

impl GenerateContentRequest {
    /// A single-turn request carrying `prompt` unchanged.
    pub fn from_prompt(prompt: &str) -> Self {
        Self { contents: vec![Content { parts: vec![Part { text: prompt.to_string() }] }] }
    }
}
