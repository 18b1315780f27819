//! Submission state machine and the values it hands back to callers.

use votebymail_core::{EnrichError, FailureKind, FieldId, LookupOutcome};

use crate::notice::{FILL_REQUIRED, FILL_REQUIRED_FORMATS, Notice, NoticeCategory, SIGNATURE_MISSING};

/// Where a form is in the submit flow.
///
/// `Validating`, `Checking`, `Confirmed` and `Submitting` are only held
/// while a submit call is running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Editing,
    Validating,
    Blocked(BlockReason),
    Checking,
    NeedsConfirmation,
    Confirmed,
    Submitting,
    Success { confirmation_id: String },
    Failed(FailureKind),
}

impl Phase {
    /// Phases that an edit returns to `Editing`.
    pub(crate) fn settles_on_edit(&self) -> bool {
        matches!(
            self,
            Phase::Blocked(_) | Phase::NeedsConfirmation | Phase::Failed(_)
        )
    }

    pub fn confirmation_id(&self) -> Option<&str> {
        match self {
            Phase::Success { confirmation_id } => Some(confirmation_id),
            _ => None,
        }
    }
}

/// Why the assembled record could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    /// The home address has not been resolved to a supported state.
    MissingAddress,
    InvalidFields(Vec<FieldId>),
    MailingAddress(EnrichError),
    StateFields(EnrichError),
    Signature(EnrichError),
}

impl BlockReason {
    pub(crate) fn notices(&self) -> Vec<Notice> {
        match self {
            BlockReason::MissingAddress => {
                vec![Notice::error(NoticeCategory::Address, FILL_REQUIRED)]
            }
            BlockReason::Signature(_) => vec![
                Notice::error(NoticeCategory::Signature, SIGNATURE_MISSING),
                Notice::error(NoticeCategory::Validation, FILL_REQUIRED_FORMATS),
            ],
            BlockReason::InvalidFields(_)
            | BlockReason::MailingAddress(_)
            | BlockReason::StateFields(_) => {
                vec![Notice::error(NoticeCategory::Validation, FILL_REQUIRED_FORMATS)]
            }
        }
    }
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockReason::MissingAddress => f.write_str("registration address not resolved"),
            BlockReason::InvalidFields(fields) => {
                let labels: Vec<_> = fields.iter().map(FieldId::label).collect();
                write!(f, "invalid fields: {}", labels.join(", "))
            }
            BlockReason::MailingAddress(e)
            | BlockReason::StateFields(e)
            | BlockReason::Signature(e) => write!(f, "{e}"),
        }
    }
}

/// What opened the registration-status modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalContext {
    /// The voter asked about the status indicator.
    Click,
    /// A submit press found an unconfirmed status.
    FormSubmit,
}

/// Content of the registration-status modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusModal {
    pub context: ModalContext,
    pub message: &'static str,
}

impl StatusModal {
    pub const TITLE: &'static str = "Unconfirmed Registration Status";
    pub const ADVICE: &'static str = "Please double check your name, address, and birthdate.  If you are reasonably sure that the registration information entered above is correct (our data might be slightly out of date), please ignore this warning.";
    pub const RECHECK_LABEL: &'static str = "Recheck Fields";

    pub(crate) fn new(context: ModalContext, outcome: Option<&LookupOutcome>) -> Self {
        let message = match outcome {
            Some(LookupOutcome::Error) => "Error while checking your registration status.",
            _ => {
                "Based on our search of public records, you are not currently registered to vote at this address."
            }
        };
        Self { context, message }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self.context {
            ModalContext::FormSubmit => "Sign up anyway",
            ModalContext::Click => "Ignore Warning",
        }
    }
}

/// Result of a submit press that reached the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Blocked(BlockReason),
    NeedsConfirmation(StatusModal),
    Submitted { confirmation_id: String },
    Failed(FailureKind),
}

/// Everything standing between the form and a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub address_resolved: bool,
    pub invalid_fields: Vec<FieldId>,
    pub mailing: Option<EnrichError>,
    pub state_fields: Option<EnrichError>,
    pub signature: Option<EnrichError>,
    pub status: &'static str,
    pub submit_enabled: bool,
}

impl ValidationReport {
    /// Nothing blocks building the record.
    pub fn is_complete(&self) -> bool {
        self.address_resolved
            && self.invalid_fields.is_empty()
            && self.mailing.is_none()
            && self.state_fields.is_none()
            && self.signature.is_none()
    }
}
