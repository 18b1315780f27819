//! The common field set every signup form starts from, with per-field
//! validators and the readiness predicates derived from them.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::address::{AddressInputParts, format_address_input_parts, parse_formatted_address};
use crate::error::EnrichError;
use crate::name::NameParts;

static BIRTHDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[1-9]|1[012])[/.](0[1-9]|[12][0-9]|3[01])[/.](19|20)[0-9]{2}$")
        .expect("birthdate pattern is valid")
});

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("iso date pattern is valid")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@(([^<>()\[\]\\.,;:\s@"]+\.)+[^<>()\[\]\\.,;:\s@"]{2,})$"#,
    )
    .expect("email pattern is valid")
});

static TELEPHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{3}-?[0-9]{3}-?[0-9]{4}$").expect("telephone pattern is valid")
});

/// Identifies one of the base inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    FirstName,
    MiddleName,
    LastName,
    Suffix,
    Birthdate,
    Email,
    ConfirmEmail,
    Telephone,
}

impl FieldId {
    pub const ALL: [FieldId; 8] = [
        FieldId::FirstName,
        FieldId::MiddleName,
        FieldId::LastName,
        FieldId::Suffix,
        FieldId::Birthdate,
        FieldId::Email,
        FieldId::ConfirmEmail,
        FieldId::Telephone,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldId::FirstName => "First Name",
            FieldId::MiddleName => "Middle Name",
            FieldId::LastName => "Last Name",
            FieldId::Suffix => "Suffix",
            FieldId::Birthdate => "Birthdate",
            FieldId::Email => "Email",
            FieldId::ConfirmEmail => "Confirm Email",
            FieldId::Telephone => "Phone",
        }
    }

    /// Fields whose blur may trigger a registration lookup.
    pub fn triggers_lookup(&self) -> bool {
        matches!(
            self,
            FieldId::FirstName | FieldId::LastName | FieldId::Birthdate
        )
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Required name: non-empty, no digits, a single word-run with no interior whitespace.
pub fn is_valid_name(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && !trimmed.chars().any(|c| c.is_ascii_digit())
        && !trimmed.chars().any(char::is_whitespace)
}

/// Middle name or suffix: empty is fine, otherwise no digits.
pub fn is_valid_optional_name(value: &str) -> bool {
    !value.chars().any(|c| c.is_ascii_digit())
}

/// `MM/DD/YYYY` (or `.` separated) with a 19xx or 20xx year.
pub fn is_valid_birthdate(value: &str) -> bool {
    BIRTHDATE.is_match(value)
}

/// Bring a typed or query-supplied birthdate into `MM/DD/YYYY`.
///
/// `YYYY-MM-DD` is reordered; otherwise dashes become slashes and anything
/// other than digits, `/` and `.` is dropped.
pub fn normalize_birthdate(value: &str) -> String {
    let value = value.trim();
    if let Some(caps) = ISO_DATE.captures(value) {
        return format!("{}/{}/{}", &caps[2], &caps[3], &caps[1]);
    }
    value
        .replace('-', "/")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '/' || *c == '.')
        .collect()
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Optional phone: empty, or ten digits grouped 3-3-4 with optional hyphens.
pub fn is_valid_phone(value: &str) -> bool {
    value.is_empty() || TELEPHONE.is_match(value)
}

/// Change-time validity of one field.
pub fn is_input_valid(field: FieldId, value: &str, email: &str) -> bool {
    match field {
        FieldId::FirstName | FieldId::LastName => is_valid_name(value),
        FieldId::MiddleName | FieldId::Suffix => is_valid_optional_name(value),
        FieldId::Birthdate => is_valid_birthdate(value),
        FieldId::Email => is_valid_email(value),
        FieldId::ConfirmEmail => is_valid_email(value) && value == email,
        FieldId::Telephone => is_valid_phone(value),
    }
}

/// A non-fatal warning raised when a field loses focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWarning {
    pub field: FieldId,
    pub message: String,
}

/// Blur-time check: only warns about fields that have content.
pub fn blur_check(field: FieldId, value: &str) -> Option<FieldWarning> {
    if value.trim().is_empty() {
        return None;
    }
    let message = match field {
        FieldId::FirstName | FieldId::LastName if value.trim().contains(char::is_whitespace) => {
            format!(
                "Please enter only your {} in this box",
                field.label().to_lowercase()
            )
        }
        FieldId::FirstName | FieldId::LastName if !is_valid_name(value) => {
            format!("{} should not contain numbers", field.label())
        }
        FieldId::MiddleName | FieldId::Suffix if !is_valid_optional_name(value) => {
            format!("{} should not contain numbers", field.label())
        }
        FieldId::Birthdate if !is_valid_birthdate(value) => {
            "Please enter your birthdate as MM/DD/YYYY".to_string()
        }
        FieldId::Email if !is_valid_email(value) => "Please enter a valid email address".to_string(),
        FieldId::Telephone if !is_valid_phone(value) => {
            "Please enter a 10 digit phone number".to_string()
        }
        _ => return None,
    };
    Some(FieldWarning { field, message })
}

/// Current value of one input and whether it passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub valid: bool,
}

/// The centrally owned record of base inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseFields {
    states: [FieldState; 8],
    require_confirm_email: bool,
}

impl Default for BaseFields {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseFields {
    /// Empty fields; optional ones start out valid.
    pub fn new() -> Self {
        let states = FieldId::ALL.map(|id| FieldState {
            value: String::new(),
            valid: matches!(
                id,
                FieldId::MiddleName | FieldId::Suffix | FieldId::Telephone
            ),
        });
        Self {
            states,
            require_confirm_email: false,
        }
    }

    /// Also gate readiness on a matching confirm-email box.
    pub fn with_confirm_email(mut self) -> Self {
        self.require_confirm_email = true;
        self
    }

    pub fn get(&self, field: FieldId) -> &FieldState {
        &self.states[field.index()]
    }

    pub fn value(&self, field: FieldId) -> &str {
        &self.get(field).value
    }

    pub fn is_valid(&self, field: FieldId) -> bool {
        self.get(field).valid
    }

    /// Store a new value and recompute its validity.
    ///
    /// Birthdates are normalized first. Changing the email re-validates the
    /// confirmation box against it.
    pub fn update(&mut self, field: FieldId, value: &str) {
        let value = match field {
            FieldId::Birthdate => normalize_birthdate(value),
            _ => value.to_string(),
        };
        let email = self.value(FieldId::Email).to_string();
        let valid = is_input_valid(field, &value, &email);
        debug!(field = ?field, valid, "field updated");
        self.states[field.index()] = FieldState { value, valid };

        if field == FieldId::Email {
            let confirm = self.value(FieldId::ConfirmEmail).to_string();
            let email = self.value(FieldId::Email).to_string();
            self.states[FieldId::ConfirmEmail.index()].valid =
                is_input_valid(FieldId::ConfirmEmail, &confirm, &email);
        }
    }

    /// Name, birthdate and optional name parts are valid: enough to query the voter file.
    pub fn can_check_registration(&self) -> bool {
        [
            FieldId::FirstName,
            FieldId::LastName,
            FieldId::Birthdate,
            FieldId::MiddleName,
            FieldId::Suffix,
        ]
        .iter()
        .all(|f| self.is_valid(*f))
    }

    /// Every base input the form gates submission on is valid.
    pub fn all_valid(&self) -> bool {
        self.can_check_registration()
            && self.is_valid(FieldId::Email)
            && self.is_valid(FieldId::Telephone)
            && (!self.require_confirm_email || self.is_valid(FieldId::ConfirmEmail))
    }

    /// Fields currently failing validation.
    pub fn invalid_fields(&self) -> Vec<FieldId> {
        FieldId::ALL
            .into_iter()
            .filter(|f| *f != FieldId::ConfirmEmail || self.require_confirm_email)
            .filter(|f| !self.is_valid(*f))
            .collect()
    }

    pub fn name_parts(&self) -> NameParts {
        let optional = |field| {
            let value = self.value(field).trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        NameParts {
            first: self.value(FieldId::FirstName).trim().to_string(),
            middle: optional(FieldId::MiddleName),
            last: self.value(FieldId::LastName).trim().to_string(),
            suffix: optional(FieldId::Suffix),
        }
    }
}

/// A mailing address different from the registration address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MailingAddress {
    /// Entered one part per box.
    Parts(AddressInputParts),
    /// Entered, or pasted, as a single formatted line.
    Line { line: String },
}

impl MailingAddress {
    /// The formatted line and its parts, as sent with a submission.
    ///
    /// A pasted line is parsed back into parts and re-formatted, so both
    /// entry styles produce the same canonical line.
    pub fn resolve(&self) -> Result<(String, AddressInputParts), EnrichError> {
        let parts = match self {
            MailingAddress::Parts(parts) => {
                let parts = parts.clone().normalized();
                if !parts.is_complete() {
                    return Err(EnrichError::Missing("mailingAddress"));
                }
                parts
            }
            MailingAddress::Line { line } if line.trim().is_empty() => {
                return Err(EnrichError::Missing("mailingAddress"));
            }
            MailingAddress::Line { line } => {
                parse_formatted_address(line).ok_or_else(|| EnrichError::Invalid {
                    field: "mailingAddress",
                    reason: "expected \"street, city, state postcode\"".to_string(),
                })?
            }
        };
        Ok((format_address_input_parts(&parts), parts))
    }
}
