use serde::{Deserialize, Serialize};

use super::last_four_digits;
use crate::error::EnrichError;
use crate::states::{FieldDescriptor, Requirement};

pub(super) const FIELDS: &[FieldDescriptor] = &[FieldDescriptor {
    key: "last4DigitsOfSsn",
    label: "Last 4 Digits of Social Security Number",
    requirement: Requirement::Always,
    options: &[],
}];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirginiaFields {
    #[serde(rename = "last4DigitsOfSsn")]
    pub ssn_last4: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirginiaExtension {
    #[serde(rename = "last4DigitsOfSsn")]
    pub ssn_last4: String,
}

pub(super) fn enrich(fields: &VirginiaFields) -> Result<VirginiaExtension, EnrichError> {
    let ssn_last4 = last_four_digits(fields.ssn_last4.as_deref(), "last4DigitsOfSsn")?;
    Ok(VirginiaExtension { ssn_last4 })
}
