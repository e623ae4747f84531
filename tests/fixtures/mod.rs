//! Recording collaborators shared by the integration tests
//!
//! Every collaborator writes into one ordered call log so tests can assert
//! both which calls happened and in what order.
#![allow(dead_code)]

use async_trait::async_trait;
use signup_flow::{
    AccountService, AuthContext, BackendError, Collaborators, Credentials, FormReset, Navigator,
    Notifier, RegistrationInput, RegistrationWorkflow, Session, UserRecord, WorkflowSettings,
};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateAccount { email: String },
    SignIn { email: String },
    CheckAuthenticated,
    Notify(String),
    NavigateTo(String),
    ResetForm,
}

#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Notify(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

/// What each remote step answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Accept,
    Refuse,
    Fail,
}

pub struct ScriptedAccounts {
    pub log: CallLog,
    pub create: Answer,
    pub sign_in: Answer,
}

fn outage() -> BackendError {
    BackendError::Server {
        status: 503,
        message: "Service Unavailable".to_string(),
    }
}

#[async_trait]
impl AccountService for ScriptedAccounts {
    async fn create_account(
        &self,
        input: &RegistrationInput,
    ) -> Result<Option<UserRecord>, BackendError> {
        self.log.push(Call::CreateAccount {
            email: input.email.clone(),
        });
        match self.create {
            Answer::Accept => Ok(Some(UserRecord {
                id: "1".to_string(),
                name: input.name.clone(),
                email: input.email.clone(),
                registered_at: None,
            })),
            Answer::Refuse => Ok(None),
            Answer::Fail => Err(outage()),
        }
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Option<Session>, BackendError> {
        self.log.push(Call::SignIn {
            email: credentials.email.clone(),
        });
        match self.sign_in {
            Answer::Accept => Ok(Some(Session::from_secret("t"))),
            Answer::Refuse => Ok(None),
            Answer::Fail => Err(outage()),
        }
    }

    async fn current_account(&self) -> Result<Option<UserRecord>, BackendError> {
        Ok(None)
    }
}

pub struct ScriptedAuth {
    pub log: CallLog,
    pub check: Answer,
}

#[async_trait]
impl AuthContext for ScriptedAuth {
    async fn check_authenticated(&self) -> Result<bool, BackendError> {
        self.log.push(Call::CheckAuthenticated);
        match self.check {
            Answer::Accept => Ok(true),
            Answer::Refuse => Ok(false),
            Answer::Fail => Err(outage()),
        }
    }

    async fn current_user(&self) -> Option<UserRecord> {
        None
    }
}

pub struct RecordingUi {
    pub log: CallLog,
}

impl Notifier for RecordingUi {
    fn notify(&self, message: &str) {
        self.log.push(Call::Notify(message.to_string()));
    }
}

impl Navigator for RecordingUi {
    fn navigate_to(&self, path: &str) {
        self.log.push(Call::NavigateTo(path.to_string()));
    }
}

impl FormReset for RecordingUi {
    fn reset_form(&self) {
        self.log.push(Call::ResetForm);
    }
}

pub fn ann() -> RegistrationInput {
    RegistrationInput::new("Ann", "ann1", "ann@x.com", "secret1")
}

/// Workflow wired to scripted collaborators sharing one call log
pub fn scripted_workflow(create: Answer, sign_in: Answer, check: Answer) -> (RegistrationWorkflow, CallLog) {
    let log = CallLog::default();
    let ui = Arc::new(RecordingUi { log: log.clone() });

    let workflow = RegistrationWorkflow::new(
        Collaborators {
            accounts: Arc::new(ScriptedAccounts {
                log: log.clone(),
                create,
                sign_in,
            }),
            auth: Arc::new(ScriptedAuth {
                log: log.clone(),
                check,
            }),
            notifier: ui.clone(),
            navigator: ui.clone(),
            form: ui,
        },
        WorkflowSettings::default(),
    );

    (workflow, log)
}
