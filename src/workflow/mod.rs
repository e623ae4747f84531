// Registration workflow: account creation, sign-in, auth confirmation

pub mod outcome;
pub mod registration;

pub use outcome::{
    Step, StepFailure, WorkflowResult, AUTH_CHECK_FAILED_MESSAGE, SIGN_IN_FAILED_MESSAGE,
    SIGN_UP_FAILED_MESSAGE,
};
pub use registration::{Collaborators, RegistrationWorkflow, WorkflowSettings};
