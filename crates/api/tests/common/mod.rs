//! Common test utilities for integration tests.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot` against
//! an `InMemoryStudentStore`, so these tests need no running database.

// Not every helper is used by every test binary.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use domain::models::{Student, StudentFields};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use persistence::{InMemoryStudentStore, StoreError, StoreResult, StudentStore};
use serde_json::{json, Value};
use student_registry_api::{app::create_app, config::Config};
use tower::ServiceExt;
use uuid::Uuid;

/// Test configuration: in-memory backend, no config files involved.
pub fn test_config() -> Config {
    Config::load_for_test(&[("logging.format", "pretty")]).expect("Failed to load test config")
}

/// Create a router over a fresh store, returning the store for inspection.
pub fn create_test_app() -> (Router, Arc<InMemoryStudentStore>) {
    let store = Arc::new(InMemoryStudentStore::new());
    let app = create_app(test_config(), store.clone());
    (app, store)
}

/// How a [`FailingStudentStore`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFailure {
    /// Every update loses a write conflict; other calls succeed on an empty store.
    Conflict,
    /// The database is unreachable: every call, including `ping`, errors.
    Unavailable,
}

/// Store double that fails in a fixed way.
pub struct FailingStudentStore {
    failure: StoreFailure,
}

impl FailingStudentStore {
    pub fn new(failure: StoreFailure) -> Self {
        Self { failure }
    }

    fn unavailable<T>(&self) -> StoreResult<T> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

#[async_trait]
impl StudentStore for FailingStudentStore {
    async fn list(&self) -> StoreResult<Vec<Student>> {
        match self.failure {
            StoreFailure::Conflict => Ok(Vec::new()),
            StoreFailure::Unavailable => self.unavailable(),
        }
    }

    async fn get(&self, id: Uuid) -> StoreResult<Student> {
        match self.failure {
            StoreFailure::Conflict => Err(StoreError::NotFound(id)),
            StoreFailure::Unavailable => self.unavailable(),
        }
    }

    async fn create(&self, _fields: StudentFields) -> StoreResult<Student> {
        self.unavailable()
    }

    async fn update(&self, id: Uuid, _fields: StudentFields) -> StoreResult<Student> {
        match self.failure {
            StoreFailure::Conflict => Err(StoreError::Conflict(id)),
            StoreFailure::Unavailable => self.unavailable(),
        }
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        match self.failure {
            StoreFailure::Conflict => Err(StoreError::NotFound(id)),
            StoreFailure::Unavailable => self.unavailable(),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        match self.failure {
            StoreFailure::Conflict => Ok(()),
            StoreFailure::Unavailable => self.unavailable(),
        }
    }
}

/// Create a router over a store that fails in the given way.
pub fn create_failing_app(failure: StoreFailure) -> Router {
    create_app(test_config(), Arc::new(FailingStudentStore::new(failure)))
}

/// Student payload with generated names.
pub struct TestStudent {
    pub first_name: String,
    pub last_name: String,
    pub program: String,
}

impl TestStudent {
    pub fn new() -> Self {
        Self {
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            program: "Computer Science".to_string(),
        }
    }

    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    pub fn to_json(&self) -> Value {
        json!({
            "firstName": self.first_name,
            "lastName": self.last_name,
            "program": self.program,
        })
    }
}

impl Default for TestStudent {
    fn default() -> Self {
        Self::new()
    }
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn raw_json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn parse_response_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// POST a student and return the created JSON record.
pub async fn create_student(app: &Router, student: &TestStudent) -> Value {
    let response = send(
        app,
        json_request(Method::POST, "/api/students", student.to_json()),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    parse_response_body(response).await
}
