use anyhow::{bail, Result};
use signup_flow::form::LOADING_LABEL;
use signup_flow::{
    AuthContext, Collaborators, HttpAccountService, RegistrationWorkflow, SessionAuthContext,
    SignUpForm, SignUpValues, SignupConfig, SubmitOutcome, TerminalNavigator, TerminalNotifier,
    WorkflowSettings,
};
use std::sync::Arc;
use tracing::debug;

use super::{print_field_errors, Command};

const SIGN_UP_ROUTE: &str = "/sign-up";

pub struct RegisterCommand {
    config: SignupConfig,
    values: SignUpValues,
}

impl RegisterCommand {
    pub fn new(config: SignupConfig, values: SignUpValues) -> Self {
        Self { config, values }
    }
}

impl Command for RegisterCommand {
    async fn execute(&self) -> Result<()> {
        let accounts = Arc::new(HttpAccountService::from_config(&self.config.backend)?);
        let auth = Arc::new(SessionAuthContext::new(accounts.clone()));
        let form = Arc::new(
            SignUpForm::with_schema().with_sign_in_route(&self.config.workflow.sign_in_route),
        );
        let navigator = Arc::new(TerminalNavigator::new(SIGN_UP_ROUTE));

        let workflow = RegistrationWorkflow::new(
            Collaborators {
                accounts: accounts.clone(),
                auth: auth.clone(),
                notifier: Arc::new(TerminalNotifier),
                navigator: navigator.clone(),
                form: form.clone(),
            },
            WorkflowSettings::from(&self.config.workflow),
        );

        form.set_values(self.values.clone());

        print!("🔄 {LOADING_LABEL} ");
        std::io::Write::flush(&mut std::io::stdout())?;

        match form.submit(&workflow).await {
            SubmitOutcome::Invalid(errors) => {
                println!();
                print_field_errors(&errors);
                bail!("{errors}")
            }
            SubmitOutcome::Completed(result) if result.is_success() => {
                println!("✅");
                if let Some(user) = auth.current_user().await {
                    println!("🎉 Welcome, {} (@{})", user.name, self.values.username.trim());
                }
                if let Some(session) = accounts.session().await {
                    debug!(session.id = %session.id, "Session available for reuse");
                }
                println!("📍 Now at {}", navigator.current_route());
                Ok(())
            }
            SubmitOutcome::Completed(result) => {
                println!();
                println!("💡 Already have an account? Log In at {}", form.sign_in_route());
                bail!("registration did not complete: {result}")
            }
        }
    }
}
