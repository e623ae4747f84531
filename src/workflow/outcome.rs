use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::backend::BackendError;

pub const SIGN_UP_FAILED_MESSAGE: &str = "Sign Up failed. Please try again.";
pub const SIGN_IN_FAILED_MESSAGE: &str = "Sign in failed. Please try again.";
pub const AUTH_CHECK_FAILED_MESSAGE: &str = "Sign up failed. Please try again";

/// The three remote steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Step {
    CreateAccount,
    SignIn,
    CheckAuthenticated,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::CreateAccount => "create_account",
            Step::SignIn => "sign_in",
            Step::CheckAuthenticated => "check_authenticated",
        }
    }

    /// Toast shown when this step does not succeed
    pub fn failure_message(&self) -> &'static str {
        match self {
            Step::CreateAccount => SIGN_UP_FAILED_MESSAGE,
            Step::SignIn => SIGN_IN_FAILED_MESSAGE,
            Step::CheckAuthenticated => AUTH_CHECK_FAILED_MESSAGE,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorkflowResult {
    NavigatedHome,
    AccountCreationFailed,
    SignInFailed,
    AuthCheckFailed,
    /// A remote call failed without an answer (network, 5xx, bad body)
    TransportFailed { step: Step },
    /// A remote call exceeded the configured step timeout
    TimedOut { step: Step },
    /// Another submission on the same workflow was still running
    AlreadySubmitting,
}

impl WorkflowResult {
    pub fn is_success(&self) -> bool {
        matches!(self, WorkflowResult::NavigatedHome)
    }

    /// The single notification that accompanies this outcome, if any
    pub fn notification(&self) -> Option<&'static str> {
        match self {
            WorkflowResult::NavigatedHome | WorkflowResult::AlreadySubmitting => None,
            WorkflowResult::AccountCreationFailed => Some(SIGN_UP_FAILED_MESSAGE),
            WorkflowResult::SignInFailed => Some(SIGN_IN_FAILED_MESSAGE),
            WorkflowResult::AuthCheckFailed => Some(AUTH_CHECK_FAILED_MESSAGE),
            WorkflowResult::TransportFailed { step } | WorkflowResult::TimedOut { step } => {
                Some(step.failure_message())
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowResult::NavigatedHome => "navigated_home",
            WorkflowResult::AccountCreationFailed => "account_creation_failed",
            WorkflowResult::SignInFailed => "sign_in_failed",
            WorkflowResult::AuthCheckFailed => "auth_check_failed",
            WorkflowResult::TransportFailed { .. } => "transport_failed",
            WorkflowResult::TimedOut { .. } => "timed_out",
            WorkflowResult::AlreadySubmitting => "already_submitting",
        }
    }
}

impl fmt::Display for WorkflowResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowResult::TransportFailed { step } | WorkflowResult::TimedOut { step } => {
                write!(f, "{} ({step})", self.as_str())
            }
            _ => f.write_str(self.as_str()),
        }
    }
}

/// Why the step pipeline stopped early
#[derive(Debug, Error)]
pub enum StepFailure {
    #[error("{step} was refused by the account service")]
    Rejected { step: Step },
    #[error("{step} failed: {source}")]
    Transport {
        step: Step,
        #[source]
        source: BackendError,
    },
    #[error("{step} timed out after {after_ms}ms")]
    TimedOut { step: Step, after_ms: u64 },
}

impl StepFailure {
    pub fn step(&self) -> Step {
        match self {
            StepFailure::Rejected { step }
            | StepFailure::Transport { step, .. }
            | StepFailure::TimedOut { step, .. } => *step,
        }
    }

    pub fn outcome(&self) -> WorkflowResult {
        match self {
            StepFailure::Rejected {
                step: Step::CreateAccount,
            } => WorkflowResult::AccountCreationFailed,
            StepFailure::Rejected { step: Step::SignIn } => WorkflowResult::SignInFailed,
            StepFailure::Rejected {
                step: Step::CheckAuthenticated,
            } => WorkflowResult::AuthCheckFailed,
            StepFailure::Transport { step, .. } => WorkflowResult::TransportFailed { step: *step },
            StepFailure::TimedOut { step, .. } => WorkflowResult::TimedOut { step: *step },
        }
    }
}
