//! Error mapping shared by the HTTP-backed clients.

use aibridge_core::BackendError;
use reqwest::StatusCode;
use std::time::Duration;

pub fn transport(backend: &'static str, err: &reqwest::Error, timeout: Duration) -> BackendError {
    let reason = if err.is_timeout() {
        format!("request timed out after {}s", timeout.as_secs_f32())
    } else {
        err.to_string()
    };
    BackendError::Transport { backend, reason }
}

pub fn status(backend: &'static str, status: StatusCode, body: String) -> BackendError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Auth {
            backend,
            status: status.as_u16(),
            body,
        },
        _ => BackendError::Status {
            backend,
            status: status.as_u16(),
            body,
        },
    }
}

pub fn protocol(backend: &'static str, reason: impl Into<String>) -> BackendError {
    BackendError::Protocol {
        backend,
        reason: reason.into(),
    }
}
