//! Chat request and response types.
//!
//! A diagram is discussed by sending a message together with the diagram's
//! notation as context. This module only composes the prompt; it does not
//! talk to any completion service.

use serde::{Deserialize, Serialize};

use crate::UmlSketchError;

/// A question about a diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    context: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
        }
    }

    /// Attaches context, usually the serialized diagram.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Checks that the request carries a message.
    ///
    /// # Errors
    ///
    /// Returns [`UmlSketchError::Chat`] if the message is empty or blank.
    pub fn validate(&self) -> Result<(), UmlSketchError> {
        if self.message.trim().is_empty() {
            return Err(UmlSketchError::Chat("message is required".to_string()));
        }
        Ok(())
    }

    /// Composes the prompt text: the message, then a blank line and the
    /// context when there is any.
    ///
    /// ```
    /// use umlsketch::chat::ChatRequest;
    ///
    /// let request = ChatRequest::new("What does this do?").with_context("@startuml");
    /// assert_eq!(request.prompt(), "What does this do?\n\n@startuml");
    /// assert_eq!(ChatRequest::new("Hi").prompt(), "Hi");
    /// ```
    pub fn prompt(&self) -> String {
        match self.context.as_deref() {
            Some(context) if !context.is_empty() => format!("{}\n\n{context}", self.message),
            _ => self.message.clone(),
        }
    }
}

/// Reply to a [`ChatRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    response: String,
}

impl ChatResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    pub fn response(&self) -> &str {
        &self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_with_empty_context() {
        let request = ChatRequest::new("Explain").with_context("");
        assert_eq!(request.prompt(), "Explain");
    }

    #[test]
    fn test_validate() {
        assert!(ChatRequest::new("Explain").validate().is_ok());

        let err = ChatRequest::new("  ").validate().expect_err("blank message");
        assert!(matches!(err, UmlSketchError::Chat(_)));
    }

    #[test]
    fn test_wire_shape() {
        let request: ChatRequest =
            serde_json::from_str(r#"{ "message": "Why?", "context": "1 --> 2" }"#)
                .expect("request parses");
        assert_eq!(request.message(), "Why?");
        assert_eq!(request.context(), Some("1 --> 2"));

        let no_context: ChatRequest =
            serde_json::from_str(r#"{ "message": "Why?" }"#).expect("request parses");
        assert_eq!(no_context.context(), None);

        let reply = serde_json::to_string(&ChatResponse::new("Because")).expect("serializes");
        assert_eq!(reply, r#"{"response":"Because"}"#);
    }
}
