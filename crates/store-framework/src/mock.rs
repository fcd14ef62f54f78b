//! # Mock Transports & Testing Guide
//!
//! Two ways to stand in for the backend in tests, neither of which opens a socket.
//!
//! | Tool | Responses | Use Case |
//! |------|-----------|----------|
//! | [`MockTransport`] | Queued up front, answered instantly | Sequential flows, error injection, "no request was made" checks |
//! | [`create_mock_transport`] | Answered by the test, one by one | Controlling *when* each response resolves (races, in-flight state) |
//!
//! ## Fluent expectations
//!
//! ```rust
//! use serde_json::json;
//! use store_framework::mock::MockTransport;
//! use store_framework::{ApiError, ApiRequest, Method, Transport};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect(Method::Get, "/cart").return_ok(json!({"cart": null, "total": 0}));
//!     mock.expect(Method::Delete, "/cart").return_err(ApiError::Network("offline".into()));
//!
//!     assert!(mock.send(ApiRequest::get("/cart")).await.is_ok());
//!     assert!(mock.send(ApiRequest::delete("/cart")).await.is_err());
//!     mock.verify();
//! }
//! ```
//!
//! ## Controlled resolution order
//!
//! ```rust
//! use serde_json::json;
//! use store_framework::mock::{create_mock_transport, expect_request};
//! use store_framework::{ApiRequest, Transport};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (transport, mut requests) = create_mock_transport(8);
//!     let call = tokio::spawn(async move { transport.send(ApiRequest::get("/cart")).await });
//!
//!     let (request, responder) = expect_request(&mut requests).await.unwrap();
//!     assert_eq!(request.path, "/cart");
//!     responder.send(Ok(json!({"total": 0}))).unwrap();
//!
//!     assert!(call.await.unwrap().is_ok());
//! }
//! ```

use crate::error::ApiError;
use crate::transport::{ApiRequest, Method, Transport};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// One queued request/response pair.
struct Expectation {
    method: Method,
    path: String,
    response: Result<Value, ApiError>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    calls: Vec<ApiRequest>,
    token: Option<String>,
}

/// A transport that answers from a FIFO queue of expectations.
///
/// Requests must arrive in the order they were expected and match on method and path;
/// anything else panics, failing the test. Every received request is recorded.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a request with the given method and path.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            state: self.state.clone(),
        }
    }

    /// All requests received so far, in arrival order.
    pub fn calls(&self) -> Vec<ApiRequest> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    /// The token most recently set through [`Transport::set_token`].
    pub fn token(&self) -> Option<String> {
        self.state.lock().token.clone()
    }

    /// Panics if any expectation was never consumed.
    pub fn verify(&self) {
        let state = self.state.lock();
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let mut state = self.state.lock();
        state.calls.push(request.clone());
        match state.expectations.pop_front() {
            Some(expectation)
                if expectation.method == request.method && expectation.path == request.path =>
            {
                expectation.response
            }
            Some(expectation) => panic!(
                "Expected {} {}, got {} {}",
                expectation.method, expectation.path, request.method, request.path
            ),
            None => panic!("Unexpected request {} {}", request.method, request.path),
        }
    }

    fn set_token(&self, token: Option<String>) {
        self.state.lock().token = token;
    }
}

/// Builder returned by [`MockTransport::expect`].
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    /// Answers the request with this JSON body.
    pub fn return_ok(self, body: Value) {
        self.push(Ok(body));
    }

    /// Fails the request with this error.
    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Value, ApiError>) {
        self.state.lock().expectations.push_back(Expectation {
            method: self.method,
            path: self.path,
            response,
        });
    }
}

// =============================================================================
// MANUAL RESPONDERS
// =============================================================================

/// Sender half used by a test to resolve one in-flight request.
pub type Responder = oneshot::Sender<Result<Value, ApiError>>;

/// A request waiting for the test to answer it.
pub struct PendingRequest {
    pub request: ApiRequest,
    pub respond_to: Responder,
}

/// Transport half of [`create_mock_transport`].
#[derive(Clone)]
pub struct ChannelTransport {
    sender: mpsc::Sender<PendingRequest>,
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PendingRequest {
                request,
                respond_to,
            })
            .await
            .map_err(|_| ApiError::Network("mock transport closed".to_string()))?;
        response
            .await
            .map_err(|_| ApiError::Network("mock responder dropped".to_string()))?
    }
}

/// Creates a transport whose requests are delivered to `receiver` for the test to answer.
///
/// Each request stays in flight until its responder is used, which lets a test resolve
/// concurrent requests in any order it likes.
pub fn create_mock_transport(
    buffer_size: usize,
) -> (ChannelTransport, mpsc::Receiver<PendingRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ChannelTransport { sender }, receiver)
}

/// Waits for the next request sent through a [`ChannelTransport`].
pub async fn expect_request(
    receiver: &mut mpsc::Receiver<PendingRequest>,
) -> Option<(ApiRequest, Responder)> {
    receiver
        .recv()
        .await
        .map(|pending| (pending.request, pending.respond_to))
}
