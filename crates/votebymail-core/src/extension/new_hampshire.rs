use serde::{Deserialize, Serialize};

use super::{EnrichContext, select};
use crate::error::EnrichError;
use crate::options::NewHampshirePrimaryParty;
use crate::states::{FieldDescriptor, Jurisdiction, Requirement};

pub(super) const FIELDS: &[FieldDescriptor] = &[FieldDescriptor {
    key: "primaryParty",
    label: "Party for Primary Ballot",
    requirement: Requirement::DuringPrimary,
    options: NewHampshirePrimaryParty::LABELS,
}];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewHampshireFields {
    pub primary_party: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHampshireExtension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_party: Option<NewHampshirePrimaryParty>,
}

pub(super) fn enrich(
    fields: &NewHampshireFields,
    ctx: &EnrichContext,
) -> Result<NewHampshireExtension, EnrichError> {
    let primary_party = if ctx.primary_eligible(Jurisdiction::NewHampshire) {
        Some(select(
            fields.primary_party.as_deref(),
            "primaryParty",
            NewHampshirePrimaryParty::parse,
        )?)
    } else {
        None
    };
    Ok(NewHampshireExtension { primary_party })
}
