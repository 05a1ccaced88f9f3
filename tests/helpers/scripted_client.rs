// ABOUTME: Scripted CompletionClient double for orchestrator and route tests
// ABOUTME: Replays queued outcomes in order and records every call it receives

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use pierre_plan_server::llm::{CompletionClient, CompletionFailure, PromptPair};

/// One recorded call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: PromptPair,
    pub temperature: f32,
    pub timeout: Duration,
}

/// Completion client that returns pre-programmed outcomes
pub struct ScriptedClient {
    configured: bool,
    outcomes: Mutex<VecDeque<Result<String, CompletionFailure>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    /// Configured client replaying `outcomes` in order
    pub fn new(outcomes: Vec<Result<String, CompletionFailure>>) -> Self {
        Self {
            configured: true,
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Client reporting no credential
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new(Vec::new())
        }
    }

    /// Every call received so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(
        &self,
        prompt: &PromptPair,
        temperature: f32,
        timeout: Duration,
    ) -> Result<String, CompletionFailure> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.clone(),
            temperature,
            timeout,
        });
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("ScriptedClient ran out of outcomes")
    }
}
