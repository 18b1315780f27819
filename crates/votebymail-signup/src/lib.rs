//! Signup orchestration for one voter: composes the base fields, the
//! jurisdiction's extension, and the signature into a submission, and drives
//! the registration lookup and the final register call.

mod error;
mod form;
mod notice;
mod phase;

pub use error::SignupError;
pub use form::{LookupTicket, SignupForm};
pub use notice::{
    FILL_REQUIRED, FILL_REQUIRED_FORMATS, Notice, NoticeCategory, NoticeLevel, SIGNATURE_MISSING,
};
pub use phase::{BlockReason, ModalContext, Phase, StatusModal, SubmitOutcome, ValidationReport};
