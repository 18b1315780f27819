//! Transient messages for the voter, drained by whoever renders the form.

use votebymail_core::{FailureKind, FieldId, FieldWarning};

pub const FILL_REQUIRED: &str = "Please fill all the required fields";
pub const FILL_REQUIRED_FORMATS: &str = "Please fill all the required fields in the right formats";
pub const SIGNATURE_MISSING: &str = "Please fill out the signature field";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// What a notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeCategory {
    Field(FieldId),
    Validation,
    Signature,
    Address,
    Submission(FailureKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub category: NoticeCategory,
    pub message: String,
}

impl Notice {
    pub fn error(category: NoticeCategory, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            category,
            message: message.into(),
        }
    }

    pub fn submission_failed(kind: FailureKind) -> Self {
        Self::error(NoticeCategory::Submission(kind), kind.user_message())
    }
}

impl From<FieldWarning> for Notice {
    fn from(warning: FieldWarning) -> Self {
        Self {
            level: NoticeLevel::Warning,
            category: NoticeCategory::Field(warning.field),
            message: warning.message,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
