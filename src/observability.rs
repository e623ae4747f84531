use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

use crate::workflow::WorkflowResult;

/// Registration outcome counters
#[derive(Debug, Default)]
pub struct RegistrationMetrics {
    pub submissions: AtomicU64,
    pub completed: AtomicU64,
    pub account_creation_failures: AtomicU64,
    pub sign_in_failures: AtomicU64,
    pub auth_check_failures: AtomicU64,
    pub transport_errors: AtomicU64,
    pub timeouts: AtomicU64,
    pub duplicate_submissions: AtomicU64,
}

impl RegistrationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, result: WorkflowResult) {
        self.submissions.fetch_add(1, Ordering::Relaxed);

        let counter = match result {
            WorkflowResult::NavigatedHome => &self.completed,
            WorkflowResult::AccountCreationFailed => &self.account_creation_failures,
            WorkflowResult::SignInFailed => &self.sign_in_failures,
            WorkflowResult::AuthCheckFailed => &self.auth_check_failures,
            WorkflowResult::TransportFailed { .. } => &self.transport_errors,
            WorkflowResult::TimedOut { .. } => &self.timeouts,
            WorkflowResult::AlreadySubmitting => &self.duplicate_submissions,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> RegistrationStats {
        RegistrationStats {
            submissions: self.submissions.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            account_creation_failures: self.account_creation_failures.load(Ordering::Relaxed),
            sign_in_failures: self.sign_in_failures.load(Ordering::Relaxed),
            auth_check_failures: self.auth_check_failures.load(Ordering::Relaxed),
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            duplicate_submissions: self.duplicate_submissions.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Registration metrics: submissions={}, completed={}, account_failures={}, sign_in_failures={}, auth_failures={}, transport_errors={}, timeouts={}, duplicates={}",
            stats.submissions,
            stats.completed,
            stats.account_creation_failures,
            stats.sign_in_failures,
            stats.auth_check_failures,
            stats.transport_errors,
            stats.timeouts,
            stats.duplicate_submissions
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationStats {
    pub submissions: u64,
    pub completed: u64,
    pub account_creation_failures: u64,
    pub sign_in_failures: u64,
    pub auth_check_failures: u64,
    pub transport_errors: u64,
    pub timeouts: u64,
    pub duplicate_submissions: u64,
}

/// Global metrics instance
static REGISTRATION_METRICS: std::sync::LazyLock<RegistrationMetrics> =
    std::sync::LazyLock::new(RegistrationMetrics::new);

pub fn registration_metrics() -> &'static RegistrationMetrics {
    &REGISTRATION_METRICS
}

/// Time an operation and log its duration
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn finish(self) {
        let duration = self.start.elapsed();
        info!(
            operation = %self.operation,
            duration_ms = duration.as_millis(),
            "Operation completed"
        );
    }
}
