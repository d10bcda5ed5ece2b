/*!
 * Mock backend implementations for testing.
 *
 * This module provides mock backends that simulate different behaviors:
 * - `MockBackend::identity()` - returns the input unchanged
 * - `MockBackend::dictionary()` - translates via a fixed lookup table and
 *   fails on texts it does not know, catching unexpected backend calls
 * - `MockBackend::tagged()` - wraps the input in a `[lang]` marker
 * - `MockBackend::failing()` - always fails with an error
 * - `MockBackend::slow()` - delays before answering, for concurrency and
 *   timeout tests
 *
 * Every mock records its call count and the maximum number of simultaneously
 * active calls, so tests can assert the translator's parallelism bound.
 */

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::BackendError;

use super::Backend;

/// Behavior mode for the mock backend
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the input text unchanged
    Identity,
    /// Look the input up in a fixed table; unknown texts are an error
    Dictionary(HashMap<String, String>),
    /// Wrap the input in a `[lang]` marker
    Tagged,
    /// Always fail with a simulated API error
    Failing,
    /// Sleep before answering with the input unchanged
    Slow {
        /// Delay before each response
        delay_ms: u64,
    },
}

/// Mock backend for testing translation behavior
#[derive(Debug)]
pub struct MockBackend {
    /// Behavior mode
    behavior: MockBehavior,
    /// Total number of calls
    calls: Arc<AtomicUsize>,
    /// Currently active calls
    active: Arc<AtomicUsize>,
    /// High-water mark of simultaneously active calls
    max_active: Arc<AtomicUsize>,
}

impl MockBackend {
    /// Create a new mock backend with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
            active: Arc::new(AtomicUsize::new(0)),
            max_active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock that returns every input unchanged
    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    /// Create a mock translating via the given lookup table
    pub fn dictionary(entries: &[(&str, &str)]) -> Self {
        let table = entries
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        Self::new(MockBehavior::Dictionary(table))
    }

    /// Create a mock that wraps the input in a `[lang]` marker
    pub fn tagged() -> Self {
        Self::new(MockBehavior::Tagged)
    }

    /// Create a mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that sleeps before answering
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Total number of translate calls seen so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Maximum number of calls that were in flight at the same time
    pub fn max_concurrent_calls(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        target_lang: &str,
    ) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        let result = match &self.behavior {
            MockBehavior::Identity => Ok(text.to_string()),
            MockBehavior::Dictionary(table) => table.get(text).cloned().ok_or_else(|| {
                BackendError::Other(format!("no translation configured for {text:?}"))
            }),
            MockBehavior::Tagged => Ok(format!("[{target_lang}] {text}")),
            MockBehavior::Failing => Err(BackendError::ApiError {
                status_code: 500,
                message: "simulated backend failure".to_string(),
            }),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(text.to_string())
            }
        };

        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
