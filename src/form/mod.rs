//! Sign-up form state
//!
//! Holds the field values, the per-field errors from the last submission and
//! the submitting flag that drives the button label. Validation happens here;
//! the remote work is handed to the registration workflow.

pub mod validation;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::ui::FormReset;
use crate::workflow::{RegistrationWorkflow, WorkflowResult};

pub use validation::{Field, FieldError, SignUpSchema, SignUpValues, ValidationErrors, Validator};

pub const SUBMIT_LABEL: &str = "Sign Up";
pub const LOADING_LABEL: &str = "Loading...";
pub const DEFAULT_SIGN_IN_ROUTE: &str = "/sign-in";

/// What happened to a form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the workflow was not started
    Invalid(ValidationErrors),
    /// The workflow ran to one of its terminal results
    Completed(WorkflowResult),
}

#[derive(Debug, Default)]
struct FormState {
    values: SignUpValues,
    errors: ValidationErrors,
    submitting: bool,
}

pub struct SignUpForm {
    state: Mutex<FormState>,
    validator: Arc<dyn Validator>,
    sign_in_route: String,
}

impl SignUpForm {
    pub fn new(validator: Arc<dyn Validator>) -> Self {
        Self {
            state: Mutex::new(FormState::default()),
            validator,
            sign_in_route: DEFAULT_SIGN_IN_ROUTE.to_string(),
        }
    }

    /// Form using the standard sign-up rules
    pub fn with_schema() -> Self {
        Self::new(Arc::new(SignUpSchema))
    }

    pub fn with_sign_in_route(mut self, route: &str) -> Self {
        self.sign_in_route = route.to_string();
        self
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.state().values.set(field, value);
    }

    pub fn set_values(&self, values: SignUpValues) {
        self.state().values = values;
    }

    pub fn values(&self) -> SignUpValues {
        self.state().values.clone()
    }

    pub fn errors(&self) -> ValidationErrors {
        self.state().errors.clone()
    }

    pub fn error_for(&self, field: Field) -> Option<String> {
        self.state().errors.get(field).map(str::to_string)
    }

    pub fn is_submitting(&self) -> bool {
        self.state().submitting
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_submitting() {
            LOADING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Target of the "Already have an account? Log In" link
    pub fn sign_in_route(&self) -> &str {
        &self.sign_in_route
    }

    /// Restore default (empty) values and clear errors
    pub fn reset(&self) {
        let mut state = self.state();
        state.values = SignUpValues::default();
        state.errors = ValidationErrors::new();
    }

    /// Validate the current values and, when they pass, run the workflow.
    ///
    /// The lock is never held across the workflow await, so the workflow may
    /// reset this form through [`FormReset`].
    ///
    /// A submission started while another is pending on this form is refused
    /// with `AlreadySubmitting` and leaves the pending one's flag alone.
    pub async fn submit(&self, workflow: &RegistrationWorkflow) -> SubmitOutcome {
        let input = {
            let mut state = self.state();
            if state.submitting {
                debug!("Sign-up form already submitting, ignoring");
                return SubmitOutcome::Completed(WorkflowResult::AlreadySubmitting);
            }
            match self.validator.validate(&state.values) {
                Ok(input) => {
                    state.errors = ValidationErrors::new();
                    state.submitting = true;
                    input
                }
                Err(errors) => {
                    debug!(errors = errors.len(), "Sign-up form failed validation");
                    state.errors = errors.clone();
                    return SubmitOutcome::Invalid(errors);
                }
            }
        };

        let _submitting = SubmittingGuard(self);
        SubmitOutcome::Completed(workflow.run(&input).await)
    }
}

/// Clears the form's submitting flag when the submission ends or is dropped
struct SubmittingGuard<'a>(&'a SignUpForm);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.state().submitting = false;
    }
}

impl FormReset for SignUpForm {
    fn reset_form(&self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{
        AccountService, BackendError, Credentials, MockAccountService, MockAuthContext,
        RegistrationInput, Session, UserRecord,
    };
    use crate::ui::{MockNavigator, MockNotifier};
    use crate::workflow::{Collaborators, WorkflowSettings};
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Notify;

    fn filled_form() -> Arc<SignUpForm> {
        let form = Arc::new(SignUpForm::with_schema());
        form.set_values(SignUpValues {
            name: "Ann".to_string(),
            username: "ann1".to_string(),
            email: "ann@x.com".to_string(),
            password: "secret12".to_string(),
        });
        form
    }

    fn workflow_for(
        form: Arc<SignUpForm>,
        accounts: MockAccountService,
        auth: MockAuthContext,
        notifier: MockNotifier,
        navigator: MockNavigator,
    ) -> RegistrationWorkflow {
        RegistrationWorkflow::new(
            Collaborators {
                accounts: Arc::new(accounts),
                auth: Arc::new(auth),
                notifier: Arc::new(notifier),
                navigator: Arc::new(navigator),
                form,
            },
            WorkflowSettings::default(),
        )
    }

    #[test]
    fn defaults_are_empty_with_submit_label() {
        let form = SignUpForm::with_schema();

        assert_eq!(form.values(), SignUpValues::default());
        assert!(form.errors().is_empty());
        assert_eq!(form.button_label(), SUBMIT_LABEL);
        assert_eq!(form.sign_in_route(), DEFAULT_SIGN_IN_ROUTE);
    }

    #[tokio::test]
    async fn invalid_values_never_reach_the_workflow() {
        let form = Arc::new(SignUpForm::with_schema());
        form.set_field(Field::Name, "A");
        form.set_field(Field::Email, "not-an-email");

        // mocks without expectations panic if called
        let workflow = workflow_for(
            form.clone(),
            MockAccountService::new(),
            MockAuthContext::new(),
            MockNotifier::new(),
            MockNavigator::new(),
        );

        let outcome = form.submit(&workflow).await;

        let errors = match outcome {
            SubmitOutcome::Invalid(errors) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        };
        assert_eq!(errors.get(Field::Name), Some(validation::TOO_SHORT));
        assert_eq!(form.error_for(Field::Email).as_deref(), Some(validation::INVALID_EMAIL));
        assert!(!form.is_submitting());
        // values stay put so the user can correct them
        assert_eq!(form.values().name, "A");
    }

    #[tokio::test]
    async fn injected_validator_decides_what_reaches_the_workflow() {
        let mut validator = validation::MockValidator::new();
        validator.expect_validate().times(1).returning(|_| {
            let mut errors = ValidationErrors::new();
            errors.add(Field::Username, "Username is taken");
            Err(errors)
        });
        let form = Arc::new(SignUpForm::new(Arc::new(validator)));
        form.set_values(SignUpValues {
            name: "Ann".to_string(),
            username: "ann1".to_string(),
            email: "ann@x.com".to_string(),
            password: "secret12".to_string(),
        });

        let workflow = workflow_for(
            form.clone(),
            MockAccountService::new(),
            MockAuthContext::new(),
            MockNotifier::new(),
            MockNavigator::new(),
        );

        assert!(matches!(form.submit(&workflow).await, SubmitOutcome::Invalid(_)));
        assert_eq!(form.error_for(Field::Username).as_deref(), Some("Username is taken"));
    }

    #[tokio::test]
    async fn successful_submission_resets_values() {
        let form = filled_form();

        let mut accounts = MockAccountService::new();
        accounts.expect_create_account().returning(|input| {
            Ok(Some(UserRecord {
                id: "u-1".to_string(),
                name: input.name.clone(),
                email: input.email.clone(),
                registered_at: None,
            }))
        });
        accounts
            .expect_sign_in()
            .returning(|_| Ok(Some(Session::from_secret("t"))));
        let mut auth = MockAuthContext::new();
        auth.expect_check_authenticated().returning(|| Ok(true));
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate_to()
            .withf(|path: &str| path == "/")
            .times(1)
            .return_const(());

        let workflow = workflow_for(form.clone(), accounts, auth, MockNotifier::new(), navigator);

        let outcome = form.submit(&workflow).await;

        assert_eq!(outcome, SubmitOutcome::Completed(WorkflowResult::NavigatedHome));
        assert_eq!(form.values(), SignUpValues::default());
        assert_eq!(form.button_label(), SUBMIT_LABEL);
    }

    #[tokio::test]
    async fn failed_submission_keeps_values() {
        let form = filled_form();

        let mut accounts = MockAccountService::new();
        accounts.expect_create_account().returning(|_| Ok(None));
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(1).return_const(());

        let workflow = workflow_for(
            form.clone(),
            accounts,
            MockAuthContext::new(),
            notifier,
            MockNavigator::new(),
        );

        let outcome = form.submit(&workflow).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Completed(WorkflowResult::AccountCreationFailed)
        );
        assert_eq!(form.values().username, "ann1");
        assert!(!form.is_submitting());
    }

    /// Account creation that waits until the test lets it answer
    struct HeldAccounts {
        release: Arc<Notify>,
    }

    #[async_trait]
    impl AccountService for HeldAccounts {
        async fn create_account(
            &self,
            _input: &RegistrationInput,
        ) -> Result<Option<UserRecord>, BackendError> {
            self.release.notified().await;
            Ok(None)
        }

        async fn sign_in(&self, _credentials: &Credentials) -> Result<Option<Session>, BackendError> {
            Ok(None)
        }

        async fn current_account(&self) -> Result<Option<UserRecord>, BackendError> {
            Ok(None)
        }
    }

    fn held_workflow(
        form: Arc<SignUpForm>,
        release: Arc<Notify>,
        notifier: MockNotifier,
    ) -> RegistrationWorkflow {
        RegistrationWorkflow::new(
            Collaborators {
                accounts: Arc::new(HeldAccounts { release }),
                auth: Arc::new(MockAuthContext::new()),
                notifier: Arc::new(notifier),
                navigator: Arc::new(MockNavigator::new()),
                form,
            },
            WorkflowSettings::default(),
        )
    }

    #[tokio::test]
    async fn second_submit_keeps_first_one_loading() {
        let form = filled_form();
        let release = Arc::new(Notify::new());
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(1).return_const(());
        let workflow = held_workflow(form.clone(), release.clone(), notifier);

        let first = form.submit(&workflow);
        let second = async {
            let outcome = form.submit(&workflow).await;
            let label_while_pending = form.button_label();
            let workflow_pending = workflow.is_submitting();
            release.notify_one();
            (outcome, label_while_pending, workflow_pending)
        };

        let (first, (second, label_while_pending, workflow_pending)) = tokio::join!(first, second);

        assert_eq!(second, SubmitOutcome::Completed(WorkflowResult::AlreadySubmitting));
        assert_eq!(label_while_pending, LOADING_LABEL);
        assert!(workflow_pending);
        assert_eq!(
            first,
            SubmitOutcome::Completed(WorkflowResult::AccountCreationFailed)
        );
        assert!(!form.is_submitting());
        assert_eq!(form.button_label(), SUBMIT_LABEL);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_submission_clears_loading_state() {
        let form = filled_form();
        let workflow = held_workflow(form.clone(), Arc::new(Notify::new()), MockNotifier::new());

        let abandoned = tokio::time::timeout(Duration::from_millis(10), form.submit(&workflow)).await;

        assert!(abandoned.is_err());
        assert!(!form.is_submitting());
        assert!(!workflow.is_submitting());
        assert_eq!(form.button_label(), SUBMIT_LABEL);
    }
}
