use serde::{Deserialize, Serialize};

use super::{last_four_digits, select, text};
use crate::error::EnrichError;
use crate::options::MinnesotaIdentityType;
use crate::states::{FieldDescriptor, Requirement};

pub(super) const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "idType",
        label: "Identification Type",
        requirement: Requirement::Always,
        options: MinnesotaIdentityType::LABELS,
    },
    FieldDescriptor {
        key: "idData",
        label: "Identity Information",
        requirement: Requirement::Conditional,
        options: &[],
    },
    FieldDescriptor {
        key: "noIdConfirmed",
        label: "I confirm that I do not have a Minnesota-issued driver's license, Minnesota-issued ID card or a social security number",
        requirement: Requirement::Conditional,
        options: &[],
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MinnesotaFields {
    pub id_type: Option<String>,
    pub id_data: Option<String>,
    pub no_id_confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinnesotaExtension {
    pub id_type: MinnesotaIdentityType,
    /// Empty when the voter has no ID.
    pub id_data: String,
}

fn parse_id_type(value: &str) -> Option<MinnesotaIdentityType> {
    MinnesotaIdentityType::parse(value).or_else(|| {
        value
            .eq_ignore_ascii_case(MinnesotaIdentityType::NoId.as_str())
            .then_some(MinnesotaIdentityType::NoId)
    })
}

pub(super) fn enrich(fields: &MinnesotaFields) -> Result<MinnesotaExtension, EnrichError> {
    let id_type = select(fields.id_type.as_deref(), "idType", parse_id_type)?;
    let id_data = match id_type {
        MinnesotaIdentityType::LicenseOrIdCard => text(fields.id_data.as_deref(), "idData")?,
        MinnesotaIdentityType::SsnLast4 => last_four_digits(fields.id_data.as_deref(), "idData")?,
        MinnesotaIdentityType::NoId => {
            if !fields.no_id_confirmed {
                return Err(EnrichError::Missing("noIdConfirmed"));
            }
            String::new()
        }
    };
    Ok(MinnesotaExtension { id_type, id_data })
}
