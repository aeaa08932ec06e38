//! # Mock Adapter & Testing Guide
//!
//! `MockAdapter` implements the same [`Adapter`] API as a production transport
//! but answers entirely in-memory. It records every call it receives and
//! replays scripted replies, which makes the "did this operation hit the
//! network, and how" question a plain assertion.
//!
//! ## When to use the mock vs a real transport
//!
//! | Feature | MockAdapter | HTTP adapter against a stub server |
//! |---------|-------------|------------------------------------|
//! | **Speed** | Instant (in-memory) | Fast (loopback socket) |
//! | **What it checks** | Which verb/path/payload the model issued | URL building, auth, status mapping |
//! | **Error Injection** | Easy (`fail_with`) | Status codes only |
//!
//! ## Scripting replies
//!
//! Replies are consumed first-in first-out. Once the queue is empty every call
//! answers `null`, which is also how a test asserts that an operation made
//! *no* call at all: the recorded call count stays at zero.
//!
//! ```rust
//! use resource_framework::mock::{MockAdapter, RecordedCall};
//! use resource_framework::{Adapter, Method, Params};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockAdapter::new();
//!     mock.respond_with(json!([{"group_name": "Test Group"}]));
//!
//!     // Hand a clone to the code under test; keep this one for assertions.
//!     let adapter: Box<dyn Adapter> = Box::new(mock.clone());
//!     let body = adapter.get("/members/1000/groups", &Params::new()).await.unwrap();
//!
//!     assert_eq!(body[0]["group_name"], "Test Group");
//!     assert_eq!(mock.call_count(), 1);
//!     assert_eq!(
//!         mock.last_call(),
//!         Some(RecordedCall::new(Method::Get, "/members/1000/groups", json!({})))
//!     );
//! }
//! ```
//!
//! ## Testing failure scenarios
//!
//! ```rust
//! use resource_framework::mock::MockAdapter;
//! use resource_framework::{Adapter, AdapterError, Params};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockAdapter::new();
//!     mock.fail_with(AdapterError::Status { status: 503, message: "down".into() });
//!
//!     let result = mock.get("/fields", &Params::new()).await;
//!     assert!(matches!(result, Err(AdapterError::Status { status: 503, .. })));
//! }
//! ```

use crate::adapter::{Adapter, Method, Params};
use crate::error::AdapterError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// One call observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    /// Query params or body, as passed by the caller.
    pub payload: Value,
}

impl RecordedCall {
    pub fn new(method: Method, path: impl Into<String>, payload: Value) -> Self {
        Self {
            method,
            path: path.into(),
            payload,
        }
    }
}

#[derive(Default)]
struct MockState {
    replies: VecDeque<Result<Value, AdapterError>>,
    calls: Vec<RecordedCall>,
}

/// An in-memory [`Adapter`] that records calls and replays scripted replies.
///
/// Clones share state, so a test can keep one handle and give another to the
/// code under test.
#[derive(Clone, Default)]
pub struct MockAdapter {
    state: Arc<Mutex<MockState>>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread can poison the lock; the recorded data is
        // still consistent, so keep going.
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Queues a successful reply.
    pub fn respond_with(&self, body: Value) {
        self.state().replies.push_back(Ok(body));
    }

    /// Queues a failure.
    pub fn fail_with(&self, error: AdapterError) {
        self.state().replies.push_back(Err(error));
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.state().calls.last().cloned()
    }

    /// Number of scripted replies not yet consumed.
    pub fn pending_replies(&self) -> usize {
        self.state().replies.len()
    }

    fn record(&self, method: Method, path: &str, params: &Params) -> Result<Value, AdapterError> {
        let mut state = self.state();
        state
            .calls
            .push(RecordedCall::new(method, path, Value::Object(params.clone())));
        state.replies.pop_front().unwrap_or(Ok(Value::Null))
    }
}

#[async_trait]
impl Adapter for MockAdapter {
    async fn get(&self, path: &str, params: &Params) -> Result<Value, AdapterError> {
        self.record(Method::Get, path, params)
    }

    async fn post(&self, path: &str, data: &Params) -> Result<Value, AdapterError> {
        self.record(Method::Post, path, data)
    }

    async fn put(&self, path: &str, params: &Params) -> Result<Value, AdapterError> {
        self.record(Method::Put, path, params)
    }

    async fn delete(&self, path: &str, params: &Params) -> Result<Value, AdapterError> {
        self.record(Method::Delete, path, params)
    }
}
