use serde::Deserialize;

/// One message of a chat-completion request
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// The parts of an `OpenAI` chat-completion request this service reads
///
/// Other request fields (`model`, `stream`, ...) are accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
}

/// Transcript returned by the backend; other fields are ignored
#[derive(Debug, Deserialize)]
pub struct TranscriptionResult {
    pub text: String,
}
