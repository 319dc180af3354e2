use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Display;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

use super::Chain;
use crate::question::ValidatedQuestion;

/// The error a failing [`MockChain`] returns. Tests downcast to it to check
/// that failures come back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mock chain failed: {0}")]
pub struct MockFailure(pub String);

enum Reply<T> {
    Answer(T),
    Fail(String),
}

/// A scripted chain for tests. Replies the same way on every call.
pub struct MockChain<T> {
    reply: Reply<T>,
    calls: AtomicUsize,
    seen: Mutex<Vec<ValidatedQuestion>>,
}

impl<T> MockChain<T> {
    fn with_reply(reply: Reply<T>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(answer: T) -> Self {
        Self::with_reply(Reply::Answer(answer))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fail(message.into()))
    }

    /// How many times `process` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every question received, in order.
    pub fn seen(&self) -> Vec<ValidatedQuestion> {
        self.seen.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl<T> Chain for MockChain<T>
where
    T: Display + Clone + Send + Sync,
{
    type Output = T;

    async fn process(&self, question: ValidatedQuestion) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .expect("mock lock poisoned")
            .push(question);
        match &self.reply {
            Reply::Answer(answer) => Ok(answer.clone()),
            Reply::Fail(message) => Err(MockFailure(message.clone()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answering_repeats_answer() {
        let chain = MockChain::answering("OK");
        assert_eq!(chain.process("a".into()).await.unwrap(), "OK");
        assert_eq!(chain.process("b".into()).await.unwrap(), "OK");
        assert_eq!(chain.calls(), 2);
    }

    #[tokio::test]
    async fn failing_returns_mock_failure() {
        let chain = MockChain::<String>::failing("boom");
        let err = chain.process("a".into()).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<MockFailure>(),
            Some(&MockFailure("boom".to_string()))
        );
    }

    #[tokio::test]
    async fn records_questions() {
        let chain = MockChain::answering(1);
        chain.process("first".into()).await.unwrap();
        chain.process("second".into()).await.unwrap();

        let seen: Vec<String> = chain.seen().into_iter().map(String::from).collect();
        assert_eq!(seen, vec!["first", "second"]);
    }
}
