use serde::Serialize;

const COMPLETION_ID: &str = "chatcmpl-mockid";
const COMPLETION_OBJECT: &str = "chat.completion";

/// Chat-completion response carrying a transcript or an error text
///
/// The same shape is used for both so chat clients always receive a
/// well-formed assistant message.
#[derive(Debug, Serialize)]
pub struct ChatCompletionResponse {
    pub id: &'static str,
    pub object: &'static str,
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Serialize)]
pub struct Choice {
    pub index: u32,
    pub message: AssistantMessage,
    pub finish_reason: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AssistantMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatCompletionResponse {
    pub fn new(model: &str, content: impl Into<String>) -> Self {
        Self {
            id: COMPLETION_ID,
            object: COMPLETION_OBJECT,
            created: jiff::Timestamp::now().as_second(),
            model: model.to_owned(),
            choices: vec![Choice {
                index: 0,
                message: AssistantMessage {
                    role: "assistant",
                    content: content.into(),
                },
                finish_reason: "stop",
            }],
        }
    }
}
