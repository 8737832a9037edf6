//! Transient user-facing alerts.
//!
//! Every failed call ends here: views push the error message, the front
//! end drains and shows it. Nothing is retried or escalated.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

/// How an alert should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// One alert message waiting to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

/// Queue of pending alerts, shared via `Arc<AlertService>`.
#[derive(Debug, Default)]
pub struct AlertService {
    alerts: Mutex<Vec<Alert>>,
}

impl AlertService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "Error alert");
        self.push(Severity::Error, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(%message, "Success alert");
        self.push(Severity::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "Info alert");
        self.push(Severity::Info, message);
    }

    /// Take every pending alert, oldest first.
    pub fn drain(&self) -> Vec<Alert> {
        std::mem::take(&mut *self.lock())
    }

    /// Copy of the pending alerts without removing them.
    pub fn pending(&self) -> Vec<Alert> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn push(&self, severity: Severity, message: String) {
        self.lock().push(Alert { severity, message });
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Alert>> {
        self.alerts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
