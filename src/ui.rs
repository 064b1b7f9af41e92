//! Rendering boundary
//!
//! Toast notifications handed to whatever surface displays them

use crate::utils::error::ClientError;
use std::fmt;
use std::time::Duration;

/// Default time a toast stays visible
pub const DEFAULT_TOAST_TIMEOUT: Duration = Duration::from_millis(3500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToastLevel::Info => "info",
            ToastLevel::Success => "success",
            ToastLevel::Error => "error",
        };
        f.write_str(name)
    }
}

/// Short-lived message; `timeout` of `None` stays until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub timeout: Option<Duration>,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timeout: Some(DEFAULT_TOAST_TIMEOUT),
        }
    }

    pub fn sticky(mut self) -> Self {
        self.timeout = None;
        self
    }
}

/// Surface that displays toasts
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);

    fn info(&self, message: &str) {
        self.notify(Toast::new(ToastLevel::Info, message));
    }

    fn success(&self, message: &str) {
        self.notify(Toast::new(ToastLevel::Success, message));
    }

    fn error(&self, message: &str) {
        self.notify(Toast::new(ToastLevel::Error, message));
    }

    /// Error banner for a failed call
    fn report_error(&self, err: &ClientError) {
        self.error(&err.to_string());
    }
}

/// Notifier that writes toasts to the tracing log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Error => tracing::error!(toast = %toast.level, "{}", toast.message),
            ToastLevel::Success | ToastLevel::Info => {
                tracing::info!(toast = %toast.level, "{}", toast.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Toast>>);

    impl Notifier for Recorder {
        fn notify(&self, toast: Toast) {
            self.0.lock().unwrap().push(toast);
        }
    }

    #[test]
    fn test_default_methods_pick_level() {
        let recorder = Recorder::default();
        recorder.success("Balance refreshed");
        recorder.report_error(&ClientError::ConcurrentRequest);

        let toasts = recorder.0.lock().unwrap();
        assert_eq!(toasts[0].level, ToastLevel::Success);
        assert_eq!(toasts[0].timeout, Some(DEFAULT_TOAST_TIMEOUT));
        assert_eq!(toasts[1].level, ToastLevel::Error);
        assert_eq!(toasts[1].message, "Another request is already in progress");
    }

    #[test]
    fn test_sticky_toast() {
        let toast = Toast::new(ToastLevel::Info, "x").sticky();
        assert_eq!(toast.timeout, None);
        assert_eq!(toast.level.to_string(), "info");
    }
}
