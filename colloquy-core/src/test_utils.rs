#![allow(clippy::missing_panics_doc)]
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use crate::chat_completion::{CompletionResult, LlmService, errors::ServiceError};

/// The arguments of a single `generate_response` call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpectedCall {
    pub instructions: String,
    pub input: String,
    pub max_tokens: u32,
}

impl ExpectedCall {
    pub fn new(instructions: impl Into<String>, input: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            instructions: instructions.into(),
            input: input.into(),
            max_tokens,
        }
    }
}

type Expectations = Arc<Mutex<Vec<(ExpectedCall, Result<CompletionResult, ServiceError>)>>>;

/// An `LlmService` that answers from a queue of expectations, in the order they were added.
///
/// Panics on unexpected calls, and on drop when expectations were left unmet.
#[derive(Clone, Debug)]
pub struct MockLlmService {
    expectations: Expectations,
    received_expectations: Expectations,
}

impl Default for MockLlmService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmService {
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(Vec::new())),
            received_expectations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn expect_generate_response(
        &self,
        call: ExpectedCall,
        response: Result<CompletionResult, ServiceError>,
    ) {
        let mut mutex = self.expectations.lock().unwrap();

        mutex.insert(0, (call, response));
    }

    /// Calls received so far
    pub fn received(&self) -> Vec<ExpectedCall> {
        self.received_expectations
            .lock()
            .unwrap()
            .iter()
            .map(|(call, _)| call.clone())
            .collect()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn generate_response(
        &self,
        instructions: &str,
        input: &str,
        max_tokens: u32,
    ) -> Result<CompletionResult, ServiceError> {
        let call = ExpectedCall::new(instructions, input, max_tokens);

        let (expected_call, response) =
            self.expectations.lock().unwrap().pop().unwrap_or_else(|| {
                panic!("Received generate_response, but no expectations are set\n {call:?}")
            });

        assert_eq!(expected_call, call, "Unexpected call {call:?}");

        self.received_expectations
            .lock()
            .unwrap()
            .push((expected_call, response.clone()));

        response
    }

    fn name(&self) -> &'static str {
        "MockLlmService"
    }
}

impl Drop for MockLlmService {
    fn drop(&mut self) {
        // We are still cloned, so do not check assertions yet
        if Arc::strong_count(&self.received_expectations) > 1 || std::thread::panicking() {
            return;
        }
        let Ok(expectations) = self.expectations.lock() else {
            return;
        };

        if expectations.is_empty() {
            let num_received = self
                .received_expectations
                .lock()
                .map(|received| received.len())
                .unwrap_or_default();
            tracing::debug!("[MockLlmService] All {num_received} expectations were met");
        } else {
            let pending = expectations
                .iter()
                .map(|(call, response)| format!("{call:?} => {response:?}"))
                .collect::<Vec<_>>()
                .join("\n---\n");

            panic!("[MockLlmService] Not all expectations were met\n pending:\n{pending}");
        }
    }
}
