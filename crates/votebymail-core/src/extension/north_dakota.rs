use serde::{Deserialize, Serialize};

use super::{select, text};
use crate::error::EnrichError;
use crate::options::{NorthDakotaElectionType, NorthDakotaIdentityType};
use crate::states::{FieldDescriptor, Requirement};

pub(super) const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "idType",
        label: "Identification Method:",
        requirement: Requirement::Always,
        options: NorthDakotaIdentityType::LABELS,
    },
    FieldDescriptor {
        key: "idNumber",
        label: "Identification Number",
        requirement: Requirement::Always,
        options: &[],
    },
    FieldDescriptor {
        key: "electionType",
        label: "Election Type for Mail in Ballot",
        requirement: Requirement::Always,
        options: NorthDakotaElectionType::LABELS,
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NorthDakotaFields {
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub election_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NorthDakotaExtension {
    pub election_type: NorthDakotaElectionType,
    pub id_type: NorthDakotaIdentityType,
    pub id_number: String,
}

pub(super) fn enrich(fields: &NorthDakotaFields) -> Result<NorthDakotaExtension, EnrichError> {
    let id_type = select(
        fields.id_type.as_deref(),
        "idType",
        NorthDakotaIdentityType::parse,
    )?;
    let id_number = text(fields.id_number.as_deref(), "idNumber")?;
    let election_type = select(
        fields.election_type.as_deref(),
        "electionType",
        NorthDakotaElectionType::parse,
    )?;
    Ok(NorthDakotaExtension {
        election_type,
        id_type,
        id_number,
    })
}
