//! Account backend abstractions
//!
//! Trait seams for the remote account service and the authentication context,
//! plus the REST client used outside of tests.

pub mod auth;
pub mod errors;
pub mod http;
pub mod traits;
pub mod types;

pub use auth::SessionAuthContext;
pub use errors::BackendError;
pub use http::HttpAccountService;
pub use traits::{AccountService, AuthContext};
pub use types::{Credentials, RegistrationInput, Session, UserRecord};

#[cfg(any(test, feature = "testing"))]
pub use traits::{MockAccountService, MockAuthContext};
