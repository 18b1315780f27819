use thiserror::Error;
use votebymail_core::{EnrichError, TransportError};

#[derive(Debug, Error)]
pub enum SignupError {
    #[error("a submission is already in progress")]
    SubmissionInProgress,

    #[error("submit is disabled until the form is valid and the registration check has finished")]
    SubmitDisabled,

    #[error("this signup has already been submitted")]
    AlreadySubmitted,

    #[error("{0} does not support in-app signup")]
    UnsupportedState(String),

    #[error(transparent)]
    Jurisdiction(#[from] EnrichError),

    #[error("signup service error: {0}")]
    Service(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
