//! User-facing side effects of a submission
//!
//! Toasts, navigation and form reset are owned by the front end; the workflow
//! only reaches them through these traits.

use std::sync::{Mutex, PoisonError};
use tracing::info;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

/// Toast/alert sink
#[cfg_attr(any(test, feature = "testing"), automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Route changes
#[cfg_attr(any(test, feature = "testing"), automock)]
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);
}

/// Clears the submitted form back to its defaults
#[cfg_attr(any(test, feature = "testing"), automock)]
pub trait FormReset: Send + Sync {
    fn reset_form(&self);
}

/// Prints toasts to stderr
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        info!(toast = message, "Notification shown");
        eprintln!("❌ {message}");
    }
}

/// Remembers the current route and prints every navigation
#[derive(Debug)]
pub struct TerminalNavigator {
    current: Mutex<String>,
}

impl TerminalNavigator {
    pub fn new(initial_route: &str) -> Self {
        Self {
            current: Mutex::new(initial_route.to_string()),
        }
    }

    pub fn current_route(&self) -> String {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate_to(&self, path: &str) {
        info!(route = path, "Navigating");
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = path.to_string();
        println!("➡️  Navigating to {path}");
    }
}
