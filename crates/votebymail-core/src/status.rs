//! Voter-file registration status, as reported by the lookup service and
//! as tracked by the form while a lookup is pending or overridden.

use serde::{Deserialize, Serialize};

use crate::options::closed_set;

closed_set! {
    /// Registration status values reported by the voter-file service.
    pub enum RegistrationStatus {
        Active => "Active",
        Challenged => "Challenged",
        NotEligible => "Not Eligible",
        NotFound => "Not Found",
        Denied => "Denied",
        Inactive => "Inactive",
        Pending => "Pending",
        Confirmation => "Confirmation",
        Removed => "Removed",
        Preregistered => "Preregistered",
        Rejected => "Rejected",
        Unregistered => "Unregistered",
        Verify => "Verify",
        Cancelled => "Cancelled",
        Incomplete => "Incomplete",
        Purged => "Purged",
        NotReported => "Not Reported",
        Suspense => "Suspense",
        Provisional => "Provisional",
    }
}

/// Arguments for a registration lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationArgs {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    pub state_abbr: String,
    pub city: String,
    pub postcode: String,
    pub street: String,
    pub street_number: String,
}

/// A successful lookup response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationLookup {
    pub id: String,
    pub status: RegistrationStatus,
}

/// What a finished lookup produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(RegistrationLookup),
    /// The service could not be reached or reported an error.
    Error,
}

impl LookupOutcome {
    pub fn is_active(&self) -> bool {
        matches!(self, LookupOutcome::Found(l) if l.status == RegistrationStatus::Active)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LookupOutcome::Found(l) => l.status.as_str(),
            LookupOutcome::Error => "Error",
        }
    }
}

/// The form's single registration-status slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusSlot {
    /// No lookup yet, or the name changed since the last one.
    #[default]
    Unknown,
    Loading,
    Resolved(LookupOutcome),
    /// The voter chose to submit despite a non-active result.
    Ignored(LookupOutcome),
}

impl StatusSlot {
    pub fn label(&self) -> &'static str {
        match self {
            StatusSlot::Unknown => "Unknown",
            StatusSlot::Loading => "Loading",
            StatusSlot::Resolved(outcome) => outcome.label(),
            StatusSlot::Ignored(_) => "Ignored",
        }
    }

    /// Submission may go ahead without asking the voter first.
    pub fn clears_submission(&self) -> bool {
        match self {
            StatusSlot::Resolved(outcome) => outcome.is_active(),
            StatusSlot::Ignored(_) => true,
            StatusSlot::Unknown | StatusSlot::Loading => false,
        }
    }

    /// The lookup has settled one way or another.
    pub fn is_settled(&self) -> bool {
        matches!(self, StatusSlot::Resolved(_) | StatusSlot::Ignored(_))
    }

    pub fn outcome(&self) -> Option<&LookupOutcome> {
        match self {
            StatusSlot::Resolved(o) | StatusSlot::Ignored(o) => Some(o),
            StatusSlot::Unknown | StatusSlot::Loading => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(status: RegistrationStatus) -> LookupOutcome {
        LookupOutcome::Found(RegistrationLookup {
            id: "alloy-1".into(),
            status,
        })
    }

    #[test]
    fn only_active_or_ignored_clears_submission() {
        assert!(StatusSlot::Resolved(found(RegistrationStatus::Active)).clears_submission());
        assert!(!StatusSlot::Resolved(found(RegistrationStatus::Unregistered)).clears_submission());
        assert!(!StatusSlot::Resolved(LookupOutcome::Error).clears_submission());
        assert!(StatusSlot::Ignored(LookupOutcome::Error).clears_submission());
        assert!(!StatusSlot::Loading.clears_submission());
        assert!(!StatusSlot::Unknown.clears_submission());
    }

    #[test]
    fn labels() {
        assert_eq!(StatusSlot::Resolved(found(RegistrationStatus::NotFound)).label(), "Not Found");
        assert_eq!(StatusSlot::Resolved(LookupOutcome::Error).label(), "Error");
        assert_eq!(StatusSlot::Ignored(LookupOutcome::Error).label(), "Ignored");
    }

    #[test]
    fn lookup_response_from_wire() {
        let parsed: RegistrationLookup =
            serde_json::from_str(r#"{"id":"abc","status":"Not Reported"}"#).unwrap();
        assert_eq!(parsed.status, RegistrationStatus::NotReported);
    }

    #[test]
    fn registration_args_use_camel_case() {
        let args = RegistrationArgs {
            first_name: "George".into(),
            last_name: "Washington".into(),
            state_abbr: "VA".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json["firstName"], "George");
        assert_eq!(json["stateAbbr"], "VA");
        assert!(json.get("birthdate").is_none());
    }
}
