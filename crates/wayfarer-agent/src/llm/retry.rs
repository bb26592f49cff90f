//! Exponential backoff around another provider.

use super::{ChatRequest, ChatResponse, LlmProvider};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use std::sync::Arc;
use std::time::Duration;
use wayfarer_core::{Error, Result};

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Retries retryable failures (transport errors, timeouts, 429 and 5xx)
/// with exponential backoff; other errors are returned at once.
#[derive(Clone)]
pub struct RetryWrapper {
    inner: Arc<dyn LlmProvider>,
    max_retries: usize,
    min_delay: Duration,
    max_delay: Duration,
}

impl RetryWrapper {
    /// Wraps `inner` with the default policy.
    pub fn new(inner: Arc<dyn LlmProvider>) -> Self {
        Self {
            inner,
            max_retries: DEFAULT_MAX_RETRIES,
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }

    /// Sets the retry count.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the first and the largest delay.
    pub fn with_delays(mut self, min_delay: Duration, max_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self.max_delay = max_delay;
        self
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries)
            .with_jitter()
    }
}

impl std::fmt::Debug for RetryWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryWrapper")
            .field("inner", &self.inner.name())
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

#[async_trait]
impl LlmProvider for RetryWrapper {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let attempt = || async { self.inner.chat(request.clone()).await };
        attempt
            .retry(self.backoff())
            .when(Error::is_retryable)
            .notify(|err: &Error, delay: Duration| {
                tracing::warn!(
                    provider = self.inner.name(),
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "retrying chat completion"
                );
            })
            .await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::llm::{ChatMessage, MockLlmProvider};
    use std::sync::Mutex;

    /// Fails with the queued errors, then succeeds.
    struct Flaky {
        errors: Mutex<Vec<Error>>,
        calls: Mutex<usize>,
    }

    impl Flaky {
        fn new(errors: Vec<Error>) -> Self {
            Self {
                errors: Mutex::new(errors),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl LlmProvider for Flaky {
        async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse> {
            *self.calls.lock().unwrap() += 1;
            match self.errors.lock().unwrap().pop() {
                Some(err) => Err(err),
                None => Ok(ChatResponse::new(ChatMessage::assistant("ok"))),
            }
        }

        fn name(&self) -> &str {
            "flaky"
        }
    }

    fn fast(inner: Arc<dyn LlmProvider>) -> RetryWrapper {
        RetryWrapper::new(inner).with_delays(Duration::from_millis(1), Duration::from_millis(5))
    }

    fn request() -> ChatRequest {
        ChatRequest::new(vec![ChatMessage::user("hi")])
    }

    #[tokio::test]
    async fn test_retries_transient_failures() {
        let flaky = Arc::new(Flaky::new(vec![
            Error::upstream("openai", 503),
            Error::upstream("openai", 429),
        ]));
        let response = fast(flaky.clone()).chat(request()).await.unwrap();
        assert_eq!(response.message.text_content(), "ok");
        assert_eq!(flaky.calls(), 3);
    }

    #[tokio::test]
    async fn test_does_not_retry_client_errors() {
        let flaky = Arc::new(Flaky::new(vec![Error::upstream("openai", 401)]));
        let err = fast(flaky.clone()).chat(request()).await.unwrap_err();
        assert!(matches!(err, Error::Upstream { status: 401, .. }));
        assert_eq!(flaky.calls(), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let errors = (0..5).map(|_| Error::upstream("openai", 500)).collect();
        let flaky = Arc::new(Flaky::new(errors));
        let wrapper = fast(flaky.clone()).with_max_retries(2);
        assert!(wrapper.chat(request()).await.is_err());
        assert_eq!(flaky.calls(), 3);
    }

    #[tokio::test]
    async fn test_passes_through_name() {
        let wrapper = RetryWrapper::new(Arc::new(MockLlmProvider::with_response("x")));
        assert_eq!(wrapper.name(), "mock");
        assert!(format!("{wrapper:?}").contains("mock"));
    }
}
