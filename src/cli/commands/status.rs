use anyhow::Result;
use signup_flow::{AuthContext, HttpAccountService, Session, SessionAuthContext, SignupConfig};
use std::sync::Arc;

use super::Command;

pub struct StatusCommand {
    config: SignupConfig,
    session: Option<String>,
}

impl StatusCommand {
    pub fn new(config: SignupConfig, session: Option<String>) -> Self {
        Self { config, session }
    }
}

impl Command for StatusCommand {
    async fn execute(&self) -> Result<()> {
        let accounts = Arc::new(HttpAccountService::from_config(&self.config.backend)?);
        if let Some(secret) = &self.session {
            accounts.restore_session(Session::from_secret(secret.as_str())).await;
        }

        let auth = SessionAuthContext::new(accounts.clone());

        println!("🔐 Account service: {}", accounts.endpoint());
        if auth.check_authenticated().await? {
            match auth.current_user().await {
                Some(user) => println!("✅ Signed in as {} <{}>", user.name, user.email),
                None => println!("✅ Signed in"),
            }
        } else {
            println!("⚪ Not signed in");
            println!("💡 Log In at {}", self.config.workflow.sign_in_route);
        }

        Ok(())
    }
}
