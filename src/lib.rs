// signup-flow library - client-side account registration
// Exposes the registration workflow and its collaborators for the CLI and for tests

pub mod backend;
pub mod config;
pub mod form;
pub mod observability;
pub mod telemetry;
pub mod ui;
pub mod workflow;

// Re-export key types for easy access
pub use backend::{
    AccountService, AuthContext, BackendError, Credentials, HttpAccountService,
    RegistrationInput, Session, SessionAuthContext, UserRecord,
};
pub use config::SignupConfig;
pub use form::{Field, SignUpForm, SignUpSchema, SignUpValues, SubmitOutcome, ValidationErrors, Validator};
pub use observability::{registration_metrics, OperationTimer, RegistrationMetrics};
pub use telemetry::{create_registration_span, generate_correlation_id, init_telemetry, shutdown_telemetry};
pub use ui::{FormReset, Navigator, Notifier, TerminalNavigator, TerminalNotifier};
pub use workflow::{Collaborators, RegistrationWorkflow, Step, WorkflowResult, WorkflowSettings};
