// Traits for dependency injection - the workflow never talks to the network directly

use async_trait::async_trait;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

use super::errors::BackendError;
use super::types::{Credentials, RegistrationInput, Session, UserRecord};

/// Remote account service
///
/// `Ok(None)` means the service answered and refused the request;
/// `Err(_)` means no usable answer was obtained.
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create a new account from validated sign-up data
    async fn create_account(
        &self,
        input: &RegistrationInput,
    ) -> Result<Option<UserRecord>, BackendError>;

    /// Open an email/password session
    async fn sign_in(&self, credentials: &Credentials) -> Result<Option<Session>, BackendError>;

    /// Look up the account bound to the current session
    async fn current_account(&self) -> Result<Option<UserRecord>, BackendError>;
}

/// Authentication state owner
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait AuthContext: Send + Sync {
    /// Refresh the auth state and report whether a user is signed in
    async fn check_authenticated(&self) -> Result<bool, BackendError>;

    /// User captured by the last successful check
    async fn current_user(&self) -> Option<UserRecord>;
}
