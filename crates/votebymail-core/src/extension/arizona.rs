use serde::{Deserialize, Serialize};

use super::{EnrichContext, select, text};
use crate::error::EnrichError;
use crate::options::{ArizonaIdentityType, ArizonaParty};
use crate::states::{FieldDescriptor, Jurisdiction, Requirement};

pub(super) const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "party",
        label: "Party for Primary Ballot",
        requirement: Requirement::DuringPrimary,
        options: ArizonaParty::LABELS,
    },
    FieldDescriptor {
        key: "idType",
        label: "Identification Type",
        requirement: Requirement::Always,
        options: ArizonaIdentityType::LABELS,
    },
    FieldDescriptor {
        key: "idData",
        label: "Identity Information",
        requirement: Requirement::Always,
        options: &[],
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArizonaFields {
    pub party: Option<String>,
    pub id_type: Option<String>,
    pub id_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArizonaExtension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<ArizonaParty>,
    pub id_type: ArizonaIdentityType,
    pub id_data: String,
}

pub(super) fn enrich(
    fields: &ArizonaFields,
    ctx: &EnrichContext,
) -> Result<ArizonaExtension, EnrichError> {
    let id_type = select(fields.id_type.as_deref(), "idType", ArizonaIdentityType::parse)?;
    let id_data = text(fields.id_data.as_deref(), "idData")?;
    let party = if ctx.primary_eligible(Jurisdiction::Arizona) {
        Some(select(fields.party.as_deref(), "party", ArizonaParty::parse)?)
    } else {
        None
    };
    Ok(ArizonaExtension {
        party,
        id_type,
        id_data,
    })
}
