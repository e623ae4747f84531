use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::errors::BackendError;
use super::traits::{AccountService, AuthContext};
use super::types::UserRecord;

/// Auth state derived from the account service's view of the current session.
///
/// Passed explicitly to whoever needs it instead of living in a process-wide
/// context object.
pub struct SessionAuthContext {
    accounts: Arc<dyn AccountService>,
    user: RwLock<Option<UserRecord>>,
}

impl SessionAuthContext {
    pub fn new(accounts: Arc<dyn AccountService>) -> Self {
        Self {
            accounts,
            user: RwLock::new(None),
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }
}

#[async_trait]
impl AuthContext for SessionAuthContext {
    async fn check_authenticated(&self) -> Result<bool, BackendError> {
        let account = self.accounts.current_account().await?;
        let authenticated = account.is_some();

        debug!(
            authenticated,
            user.id = account.as_ref().map(|u| u.id.as_str()),
            "Auth state refreshed"
        );

        *self.user.write().await = account;
        Ok(authenticated)
    }

    async fn current_user(&self) -> Option<UserRecord> {
        self.user.read().await.clone()
    }
}
