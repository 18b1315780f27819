use serde::{Deserialize, Serialize};

use super::{EnrichContext, select};
use crate::error::EnrichError;
use crate::options::GeorgiaParty;
use crate::states::{FieldDescriptor, Jurisdiction, Requirement};

pub(super) const FIELDS: &[FieldDescriptor] = &[FieldDescriptor {
    key: "party",
    label: "Party for Primary Ballot",
    requirement: Requirement::DuringPrimary,
    options: GeorgiaParty::LABELS,
}];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeorgiaFields {
    pub party: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeorgiaExtension {
    /// Party ballot requested for the primary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<GeorgiaParty>,
}

pub(super) fn enrich(
    fields: &GeorgiaFields,
    ctx: &EnrichContext,
) -> Result<GeorgiaExtension, EnrichError> {
    if !ctx.primary_eligible(Jurisdiction::Georgia) {
        return Ok(GeorgiaExtension { party: None });
    }
    let party = select(fields.party.as_deref(), "party", GeorgiaParty::parse)?;
    Ok(GeorgiaExtension { party: Some(party) })
}
