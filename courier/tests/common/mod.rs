#![allow(dead_code)]

use courier::{
    BoxError, CancellationToken, Notification, NotificationHandler, Request, RequestHandler,
    behaviors::Validate, testing::CallLog,
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AppError {
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("storage unavailable")]
    Unavailable,
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Echo(pub String);

impl Request for Echo {
    type Response = String;
}

#[derive(Clone, Debug)]
pub struct Reject(pub String);

impl Request for Reject {
    type Response = ();
}

#[derive(Clone, Debug)]
pub struct CreateUser {
    pub name: String,
    pub age: u32,
}

impl Request for CreateUser {
    type Response = u64;
}

impl Validate for CreateUser {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut violations = Vec::new();
        if self.name.is_empty() {
            violations.push("name must not be empty".to_string());
        }
        if self.age < 18 {
            violations.push("age must be at least 18".to_string());
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Answers after the given delay unless cancelled first.
#[derive(Clone, Debug)]
pub struct Slow(pub Duration);

impl Request for Slow {
    type Response = &'static str;
}

// ============================================================================
// Request Handlers
// ============================================================================

/// Echoes the payload back and logs `"handler"`.
#[derive(Clone, Default)]
pub struct EchoHandler {
    pub calls: Arc<AtomicUsize>,
    pub log: CallLog,
}

impl EchoHandler {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RequestHandler<Echo> for EchoHandler {
    async fn handle(&self, req: &Echo, _cancel: &CancellationToken) -> Result<String, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.push("handler");
        Ok(req.0.clone())
    }
}

pub struct RejectHandler;

impl RequestHandler<Reject> for RejectHandler {
    async fn handle(&self, req: &Reject, _cancel: &CancellationToken) -> Result<(), BoxError> {
        Err(AppError::Rejected(req.0.clone()).into())
    }
}

#[derive(Clone, Default)]
pub struct CreateUserHandler {
    pub calls: Arc<AtomicUsize>,
}

impl RequestHandler<CreateUser> for CreateUserHandler {
    async fn handle(&self, _req: &CreateUser, _cancel: &CancellationToken) -> Result<u64, BoxError> {
        Ok(self.calls.fetch_add(1, Ordering::SeqCst) as u64 + 1)
    }
}

pub struct SlowHandler;

impl RequestHandler<Slow> for SlowHandler {
    async fn handle(&self, req: &Slow, cancel: &CancellationToken) -> Result<&'static str, BoxError> {
        tokio::select! {
            _ = cancel.cancelled() => Err("stopped early".into()),
            _ = tokio::time::sleep(req.0) => Ok("done"),
        }
    }
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderPlaced {
    pub id: u64,
}

impl Notification for OrderPlaced {}

/// Sleeps, then logs its label.
pub struct DelayedHandler {
    pub label: &'static str,
    pub delay: Duration,
    pub log: CallLog,
}

impl NotificationHandler<OrderPlaced> for DelayedHandler {
    async fn handle(&self, _n: &OrderPlaced, _cancel: &CancellationToken) -> Result<(), BoxError> {
        tokio::time::sleep(self.delay).await;
        self.log.push(self.label);
        Ok(())
    }
}

/// Fails with [`AppError::Unavailable`].
pub struct UnavailableHandler;

impl NotificationHandler<OrderPlaced> for UnavailableHandler {
    async fn handle(&self, _n: &OrderPlaced, _cancel: &CancellationToken) -> Result<(), BoxError> {
        Err(AppError::Unavailable.into())
    }

    fn name(&self) -> &'static str {
        "inventory"
    }
}
