//! Scripted provider for tests
//!
//! Replies are served in order from a queue. Every request is recorded so
//! tests can assert on the exact prompt that reached the "model".

use crate::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, Result, StopReason,
    TokenUsage,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A provider that answers from a fixed script
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    fallback: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    /// Serve `replies` in order, then fail
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            fallback: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with the same text
    pub fn constant(reply: impl Into<String>) -> Self {
        Self::new(Vec::<String>::new()).with_fallback(reply)
    }

    /// Answer with `reply` once the script is exhausted
    pub fn with_fallback(mut self, reply: impl Into<String>) -> Self {
        self.fallback = Some(reply.into());
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Number of completions requested
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests
            .lock()
            .map_err(|e| LLMError::RequestFailed(format!("script lock poisoned: {e}")))?
            .push(request);

        let next = self
            .replies
            .lock()
            .map_err(|e| LLMError::RequestFailed(format!("script lock poisoned: {e}")))?
            .pop_front();

        let text = next.or_else(|| self.fallback.clone()).ok_or_else(|| {
            LLMError::UnexpectedResponse("scripted provider ran out of replies".to_string())
        })?;

        Ok(CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        })
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest::builder("test")
            .add_message(Message::user(text))
            .build()
    }

    #[tokio::test]
    async fn test_replies_in_order_then_fails() {
        let provider = ScriptedProvider::new(["one", "two"]);

        assert_eq!(provider.complete(request("a")).await.unwrap().text(), "one");
        assert_eq!(provider.complete(request("b")).await.unwrap().text(), "two");
        assert!(provider.complete(request("c")).await.is_err());
        assert_eq!(provider.call_count(), 3);
        assert_eq!(provider.requests()[1].messages[0].content, "b");
    }

    #[tokio::test]
    async fn test_constant() {
        let provider = ScriptedProvider::constant("same");
        for _ in 0..3 {
            assert_eq!(provider.complete(request("x")).await.unwrap().text(), "same");
        }
    }
}
