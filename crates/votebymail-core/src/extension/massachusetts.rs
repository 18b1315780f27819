use serde::{Deserialize, Serialize};

use super::{EnrichContext, text};
use crate::error::EnrichError;
use crate::states::{FieldDescriptor, Jurisdiction, Requirement};

pub(super) const FIELDS: &[FieldDescriptor] = &[FieldDescriptor {
    key: "party",
    label: "State Primary Party",
    requirement: Requirement::DuringPrimary,
    options: &[],
}];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassachusettsFields {
    pub party: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassachusettsExtension {
    /// Free-text party; sent as `null` outside the primary window.
    pub party_data: Option<String>,
}

pub(super) fn enrich(
    fields: &MassachusettsFields,
    ctx: &EnrichContext,
) -> Result<MassachusettsExtension, EnrichError> {
    let party_data = if ctx.primary_eligible(Jurisdiction::Massachusetts) {
        Some(text(fields.party.as_deref(), "party")?)
    } else {
        None
    };
    Ok(MassachusettsExtension { party_data })
}
