use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn, Instrument};

use super::outcome::{Step, StepFailure, WorkflowResult};
use crate::backend::{AccountService, AuthContext, BackendError, RegistrationInput};
use crate::config::WorkflowConfig;
use crate::observability::{registration_metrics, OperationTimer};
use crate::telemetry::{create_registration_span, generate_correlation_id};
use crate::ui::{FormReset, Navigator, Notifier};

/// Everything the workflow talks to
pub struct Collaborators {
    pub accounts: Arc<dyn AccountService>,
    pub auth: Arc<dyn AuthContext>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub form: Arc<dyn FormReset>,
}

#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub home_route: String,
    /// Upper bound for each remote step; `None` waits indefinitely
    pub step_timeout: Option<Duration>,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            home_route: "/".to_string(),
            step_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl From<&WorkflowConfig> for WorkflowSettings {
    fn from(config: &WorkflowConfig) -> Self {
        Self {
            home_route: config.home_route.clone(),
            step_timeout: config.step_timeout(),
        }
    }
}

/// Drives one sign-up submission: create the account, sign in, confirm the
/// auth state, then either reset the form and go home or show one toast.
///
/// Steps run strictly in order and stop at the first failure. An account
/// created before a later failure is left in place.
pub struct RegistrationWorkflow {
    accounts: Arc<dyn AccountService>,
    auth: Arc<dyn AuthContext>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    form: Arc<dyn FormReset>,
    settings: WorkflowSettings,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the submission ends, however it ends
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl RegistrationWorkflow {
    pub fn new(collaborators: Collaborators, settings: WorkflowSettings) -> Self {
        let Collaborators {
            accounts,
            auth,
            notifier,
            navigator,
            form,
        } = collaborators;

        Self {
            accounts,
            auth,
            notifier,
            navigator,
            form,
            settings,
            in_flight: AtomicBool::new(false),
        }
    }

    /// True while a submission is running
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run the whole workflow for one validated submission.
    ///
    /// Never fails: every way of stopping is a `WorkflowResult`, and at most
    /// one of notification or reset+navigation happens.
    pub async fn run(&self, input: &RegistrationInput) -> WorkflowResult {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!(username = %input.username, "Registration already in flight, ignoring submission");
            registration_metrics().record(WorkflowResult::AlreadySubmitting);
            return WorkflowResult::AlreadySubmitting;
        };

        let correlation_id = generate_correlation_id();
        let span = create_registration_span(&correlation_id, &input.username);

        async move {
            let timer = OperationTimer::new("registration");

            let result = match self.execute_steps(input).await {
                Ok(()) => {
                    self.form.reset_form();
                    self.navigator.navigate_to(&self.settings.home_route);
                    info!(route = %self.settings.home_route, "Registration complete");
                    WorkflowResult::NavigatedHome
                }
                Err(failure) => {
                    warn!(step = %failure.step(), error = %failure, "Registration stopped");
                    let outcome = failure.outcome();
                    if let Some(message) = outcome.notification() {
                        self.notifier.notify(message);
                    }
                    outcome
                }
            };

            timer.finish();
            registration_metrics().record(result);
            result
        }
        .instrument(span)
        .await
    }

    async fn execute_steps(&self, input: &RegistrationInput) -> Result<(), StepFailure> {
        let user = self
            .required(Step::CreateAccount, self.accounts.create_account(input))
            .await?;
        debug!(user.id = %user.id, "Account created");

        let credentials = input.credentials();
        let session = self
            .required(Step::SignIn, self.accounts.sign_in(&credentials))
            .await?;
        debug!(?session, "Signed in");

        let authenticated = self
            .bounded(Step::CheckAuthenticated, self.auth.check_authenticated())
            .await?;
        if !authenticated {
            return Err(StepFailure::Rejected {
                step: Step::CheckAuthenticated,
            });
        }

        Ok(())
    }

    /// A step whose empty answer counts as a refusal
    async fn required<T>(
        &self,
        step: Step,
        call: impl Future<Output = Result<Option<T>, BackendError>>,
    ) -> Result<T, StepFailure> {
        self.bounded(step, call)
            .await?
            .ok_or(StepFailure::Rejected { step })
    }

    async fn bounded<T>(
        &self,
        step: Step,
        call: impl Future<Output = Result<T, BackendError>>,
    ) -> Result<T, StepFailure> {
        debug!(%step, "Starting step");

        let result = match self.settings.step_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| StepFailure::TimedOut {
                    step,
                    after_ms: whole_millis(limit),
                })?,
            None => call.await,
        };

        result.map_err(|source| StepFailure::Transport { step, source })
    }
}

/// Milliseconds in `limit`, saturating for durations beyond `u64`
fn whole_millis(limit: Duration) -> u64 {
    u64::try_from(limit.as_millis()).unwrap_or(u64::MAX)
}
