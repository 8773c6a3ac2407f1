// ABOUTME: Test support utilities.
// ABOUTME: Provides a recording spawner and tracing setup for integration tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use rsync_deploy::command::CommandInvocation;
use rsync_deploy::spawn::{SpawnError, Spawner};
use std::sync::Once;
use std::time::Duration;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("rsync_deploy=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Lifecycle of a fake spawn, recorded in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Started(usize),
    Finished(usize),
}

/// Spawner that records invocations instead of running them.
#[derive(Default)]
pub struct RecordingSpawner {
    calls: Mutex<Vec<CommandInvocation>>,
    events: Mutex<Vec<Event>>,
    fail_on_call: Option<usize>,
    delay: Duration,
}

#[allow(dead_code)]
impl RecordingSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the n-th call (zero based) exit with status 23.
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::default()
        }
    }

    /// Hold each fake process open for `delay` before it "exits".
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<CommandInvocation> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl Spawner for RecordingSpawner {
    async fn spawn(&self, invocation: &CommandInvocation) -> Result<(), SpawnError> {
        let index = {
            let mut calls = self.calls.lock();
            calls.push(invocation.clone());
            calls.len() - 1
        };
        self.events.lock().push(Event::Started(index));

        tokio::time::sleep(self.delay).await;

        self.events.lock().push(Event::Finished(index));

        if self.fail_on_call == Some(index) {
            return Err(SpawnError::Exit {
                program: invocation.program.clone(),
                code: Some(23),
                stderr: "rsync error: some files could not be transferred".to_string(),
            });
        }
        Ok(())
    }
}
