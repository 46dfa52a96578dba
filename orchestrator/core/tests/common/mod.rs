// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

// Shared fakes for the orchestrator integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tonic::{Code, Status};

use taskmaker_core::application::cancellation::{SignalSender, TerminationSignal};
use taskmaker_core::application::lifecycle::{CoordinatorConnector, CoordinatorSpawner};
use taskmaker_core::application::session_controller::{CoordinatorClient, EventStream};
use taskmaker_core::application::ui::UiAdapter;
use taskmaker_core::domain::client_config::{ClientConfig, RetryPolicy};
use taskmaker_core::domain::endpoint::CoordinatorEndpoint;
use taskmaker_core::domain::errors::{ConnectError, SpawnError};
use taskmaker_core::domain::session::{EvaluationId, Session};
use taskmaker_core::proto::event::EventOneof;
use taskmaker_core::proto::{
    EvaluateTaskRequest, Event, Subtask, Task, TaskScore, TestCase, TestcaseOutcome,
};

pub fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        connect_timeout: Duration::from_millis(20),
        retry_delay: Duration::from_millis(1),
    }
}

pub fn test_config(max_attempts: u32) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.retry = fast_policy(max_attempts);
    config.stop_timeout = Duration::from_millis(200);
    config
}

pub fn endpoint() -> CoordinatorEndpoint {
    CoordinatorEndpoint::new("127.0.0.1", 7071)
}

pub fn request() -> EvaluateTaskRequest {
    let subtask = |max_score: f64, ids: &[u32]| Subtask {
        max_score,
        testcases: ids.iter().map(|id| (*id, TestCase::default())).collect(),
    };
    EvaluateTaskRequest {
        task: Some(Task {
            name: "sum".to_string(),
            title: "Sum of two numbers".to_string(),
            time_limit: 1.0,
            memory_limit_kb: 65536,
            subtasks: [(0, subtask(0.0, &[0])), (1, subtask(100.0, &[2, 1]))]
                .into_iter()
                .collect(),
        }),
        ..Default::default()
    }
}

pub fn progress(testcase: u32) -> Event {
    Event {
        event_oneof: Some(EventOneof::TestcaseOutcome(TestcaseOutcome {
            solution: "sol.cpp".to_string(),
            subtask: 1,
            testcase,
            score: 1.0,
            ..Default::default()
        })),
    }
}

pub fn task_score(score: f64) -> Event {
    Event {
        event_oneof: Some(EventOneof::TaskScore(TaskScore {
            solution: "sol.cpp".to_string(),
            score,
        })),
    }
}

/// Poll `condition` until it holds or a second has passed.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("condition not reached in time");
}

// ---------------------------------------------------------------------------
// Coordinator client

#[derive(Debug, Clone, Copy)]
pub enum StopBehavior {
    Ack,
    /// Acknowledge after the given delay.
    AckAfter(Duration),
    Reject(Code),
    Hang,
}

struct ClientState {
    stream: Mutex<Option<EventStream>>,
    evaluate_calls: AtomicUsize,
    stop_calls: Mutex<Vec<EvaluationId>>,
    clean_calls: Mutex<Vec<(String, String)>>,
    stop_behavior: Mutex<StopBehavior>,
    evaluate_error: Mutex<Option<Status>>,
    clean_signal: Mutex<Option<(SignalSender, TerminationSignal)>>,
}

#[derive(Clone)]
pub struct FakeClient {
    state: Arc<ClientState>,
}

/// Feeds events into a [`FakeClient`] stream.
pub type EventFeed = mpsc::UnboundedSender<Result<Event, Status>>;

impl FakeClient {
    pub fn new() -> Self {
        Self {
            state: Arc::new(ClientState {
                stream: Mutex::new(None),
                evaluate_calls: AtomicUsize::new(0),
                stop_calls: Mutex::new(Vec::new()),
                clean_calls: Mutex::new(Vec::new()),
                stop_behavior: Mutex::new(StopBehavior::Ack),
                evaluate_error: Mutex::new(None),
                clean_signal: Mutex::new(None),
            }),
        }
    }

    /// Stream that yields `events` and then closes.
    pub fn with_events(events: Vec<Result<Event, Status>>) -> Self {
        let client = Self::new();
        *client.state.stream.lock() = Some(Box::pin(futures::stream::iter(events)));
        client
    }

    /// Stream driven by the returned sender; it closes when the sender drops.
    pub fn with_feed() -> (Self, EventFeed) {
        let client = Self::new();
        let (tx, rx) = mpsc::unbounded_channel();
        *client.state.stream.lock() = Some(Box::pin(UnboundedReceiverStream::new(rx)));
        (client, tx)
    }

    pub fn set_stop_behavior(&self, behavior: StopBehavior) {
        *self.state.stop_behavior.lock() = behavior;
    }

    pub fn reject_evaluation(&self, status: Status) {
        *self.state.evaluate_error.lock() = Some(status);
    }

    /// Deliver `signal` on `tx` while answering the clean request.
    pub fn raise_during_clean(&self, tx: SignalSender, signal: TerminationSignal) {
        *self.state.clean_signal.lock() = Some((tx, signal));
    }

    pub fn evaluate_calls(&self) -> usize {
        self.state.evaluate_calls.load(Ordering::SeqCst)
    }

    pub fn stop_calls(&self) -> Vec<EvaluationId> {
        self.state.stop_calls.lock().clone()
    }

    pub fn clean_calls(&self) -> Vec<(String, String)> {
        self.state.clean_calls.lock().clone()
    }
}

#[async_trait]
impl CoordinatorClient for FakeClient {
    async fn evaluate_task(&self, _request: EvaluateTaskRequest) -> Result<EventStream, Status> {
        self.state.evaluate_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.state.evaluate_error.lock().take() {
            return Err(status);
        }
        self.state
            .stream
            .lock()
            .take()
            .ok_or_else(|| Status::internal("no stream prepared"))
    }

    async fn stop(&self, evaluation: EvaluationId) -> Result<(), Status> {
        self.state.stop_calls.lock().push(evaluation);
        let behavior = *self.state.stop_behavior.lock();
        match behavior {
            StopBehavior::Ack => Ok(()),
            StopBehavior::AckAfter(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            StopBehavior::Reject(code) => Err(Status::new(code, "evaluation not running")),
            StopBehavior::Hang => {
                futures::future::pending::<()>().await;
                Ok(())
            }
        }
    }

    async fn clean_task(&self, store_dir: &str, temp_dir: &str) -> Result<(), Status> {
        self.state
            .clean_calls
            .lock()
            .push((store_dir.to_string(), temp_dir.to_string()));
        if let Some((tx, signal)) = self.state.clean_signal.lock().take() {
            let _ = tx.send(signal);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Connector and spawner

/// Refuses connections until attempt `reachable_on` (1-based).
#[derive(Clone)]
pub struct FakeConnector {
    reachable_on: Option<u32>,
    attempts: Arc<AtomicU32>,
    client: FakeClient,
}

impl FakeConnector {
    pub fn reachable_on(attempt: u32, client: FakeClient) -> Self {
        Self {
            reachable_on: Some(attempt),
            attempts: Arc::default(),
            client,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reachable_on: None,
            attempts: Arc::default(),
            client: FakeClient::new(),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CoordinatorConnector for FakeConnector {
    type Client = FakeClient;

    async fn connect(
        &self,
        _endpoint: &CoordinatorEndpoint,
        timeout: Duration,
    ) -> Result<FakeClient, ConnectError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        match self.reachable_on {
            Some(n) if attempt >= n => Ok(self.client.clone()),
            Some(_) => Err(ConnectError::Refused("connection refused".to_string())),
            None => {
                tokio::time::sleep(timeout).await;
                Err(ConnectError::Timeout)
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeSpawner {
    spawns: Arc<AtomicU32>,
    fail: bool,
}

impl FakeSpawner {
    pub fn failing() -> Self {
        Self {
            spawns: Arc::default(),
            fail: true,
        }
    }

    pub fn spawns(&self) -> u32 {
        self.spawns.load(Ordering::SeqCst)
    }
}

impl CoordinatorSpawner for FakeSpawner {
    fn spawn(&self, _endpoint: &CoordinatorEndpoint) -> Result<(), SpawnError> {
        self.spawns.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SpawnError {
                program: "/nonexistent/task-maker-manager".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// UI

#[derive(Debug, Clone, PartialEq)]
pub enum UiCall {
    TaskName(String),
    TimeLimit(f64),
    MemoryLimit(u64),
    SubtaskInfo(u32, f64, Vec<u32>),
    /// Event plus the active evaluation id at the time it was forwarded.
    Event(Event, Option<EvaluationId>),
    Stop(String),
    Fatal(String),
    FinalStatus,
}

#[derive(Clone, Default)]
pub struct RecordingUi {
    calls: Arc<Mutex<Vec<UiCall>>>,
    session: Option<Session>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the session's active evaluation with every forwarded event.
    pub fn observing(session: Session) -> Self {
        Self {
            calls: Arc::default(),
            session: Some(session),
        }
    }

    pub fn calls(&self) -> Vec<UiCall> {
        self.calls.lock().clone()
    }

    pub fn events(&self) -> Vec<Event> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                UiCall::Event(event, _) => Some(event),
                _ => None,
            })
            .collect()
    }

    pub fn fatal_errors(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                UiCall::Fatal(reason) => Some(reason),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&UiCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }

    fn push(&self, call: UiCall) {
        self.calls.lock().push(call);
    }
}

impl UiAdapter for RecordingUi {
    fn set_task_name(&mut self, name: &str) {
        self.push(UiCall::TaskName(name.to_string()));
    }

    fn set_time_limit(&mut self, seconds: f64) {
        self.push(UiCall::TimeLimit(seconds));
    }

    fn set_memory_limit(&mut self, kib: u64) {
        self.push(UiCall::MemoryLimit(kib));
    }

    fn set_subtask_info(&mut self, subtask: u32, max_score: f64, testcases: &[u32]) {
        self.push(UiCall::SubtaskInfo(subtask, max_score, testcases.to_vec()));
    }

    fn from_event(&mut self, event: &Event) {
        let active = self.session.as_ref().and_then(|s| s.active_evaluation());
        self.push(UiCall::Event(event.clone(), active));
    }

    fn stop(&mut self, reason: &str) {
        self.push(UiCall::Stop(reason.to_string()));
    }

    fn fatal_error(&mut self, reason: &str) {
        self.push(UiCall::Fatal(reason.to_string()));
    }

    fn print_final_status(&mut self) {
        self.push(UiCall::FinalStatus);
    }
}
