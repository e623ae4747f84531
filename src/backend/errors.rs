use thiserror::Error;

/// Failures talking to the account service.
///
/// A rejected request (bad credentials, duplicate email) is not an error at
/// this level; operations report it as `Ok(None)`. These variants cover the
/// cases where no answer was obtained at all.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error: {message}")]
    Network { message: String },
    #[error("Account service returned HTTP {status}: {message}")]
    Server { status: u16, message: String },
    #[error("Invalid response from account service: {message}")]
    InvalidResponse { message: String },
    #[error("Invalid account service endpoint: {url}")]
    InvalidEndpoint { url: String },
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::InvalidResponse {
                message: err.to_string(),
            }
        } else {
            BackendError::Network {
                message: err.to_string(),
            }
        }
    }
}
