//! Request and response bodies of the chat completion endpoint.
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReplyMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    pub message: String,
}

impl ChatResponse {
    /// Text of the first choice, if the service sent one.
    pub fn into_reply(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_as_single_user_message() {
        let request = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "model": "gpt-3.5-turbo",
                "messages": [{"role": "user", "content": "hello"}]
            })
        );
    }

    #[test]
    fn reply_is_first_choice_content() {
        let body: ChatResponse = serde_json::from_value(serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "first"}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ]
        }))
        .unwrap();
        assert_eq!(body.into_reply().as_deref(), Some("first"));
    }

    #[test]
    fn missing_choices_yield_no_reply() {
        let body: ChatResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(body.into_reply(), None);
    }
}
