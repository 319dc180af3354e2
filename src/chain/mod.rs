pub mod command;
pub mod http;
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Display;
use std::sync::Arc;

use crate::question::ValidatedQuestion;

/// The external processor. Whatever backs it (a script, a service, a test
/// double) is opaque to the rest of the crate; only its output's `Display`
/// form is ever looked at.
#[async_trait]
pub trait Chain: Send + Sync {
    type Output: Display + Send;

    async fn process(&self, question: ValidatedQuestion) -> Result<Self::Output>;
}

#[async_trait]
impl<C: Chain + ?Sized> Chain for Box<C> {
    type Output = C::Output;

    async fn process(&self, question: ValidatedQuestion) -> Result<Self::Output> {
        (**self).process(question).await
    }
}

#[async_trait]
impl<C: Chain + ?Sized> Chain for Arc<C> {
    type Output = C::Output;

    async fn process(&self, question: ValidatedQuestion) -> Result<Self::Output> {
        (**self).process(question).await
    }
}

/// A chain picked at runtime. Both built-in adapters produce raw text.
pub type DynChain = Box<dyn Chain<Output = String>>;

/// Strip a single trailing line ending, leaving any other whitespace alone.
pub(crate) fn strip_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_newline_removes_one() {
        assert_eq!(strip_newline("ok\n".to_string()), "ok");
        assert_eq!(strip_newline("ok\r\n".to_string()), "ok");
        assert_eq!(strip_newline("ok\n\n".to_string()), "ok\n");
    }

    #[test]
    fn strip_newline_keeps_other_whitespace() {
        assert_eq!(strip_newline("  ok  ".to_string()), "  ok  ");
        assert_eq!(strip_newline(String::new()), "");
    }
}
