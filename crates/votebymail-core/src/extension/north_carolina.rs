use serde::{Deserialize, Serialize};

use super::{four_or_more_digits, select, text};
use crate::error::EnrichError;
use crate::fields::{is_valid_birthdate, normalize_birthdate};
use crate::options::NorthCarolinaIdentityType;
use crate::states::{FieldDescriptor, Requirement};

pub(super) const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "idType",
        label: "Identification Type",
        requirement: Requirement::Always,
        options: NorthCarolinaIdentityType::LABELS,
    },
    FieldDescriptor {
        key: "idData",
        label: "Identity Information",
        requirement: Requirement::Always,
        options: &[],
    },
    FieldDescriptor {
        key: "movedRecently",
        label: "I have not lived at this address for more than 30 days",
        requirement: Requirement::Optional,
        options: &[],
    },
    FieldDescriptor {
        key: "dateMoved",
        label: "Date moved",
        requirement: Requirement::Conditional,
        options: &[],
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NorthCarolinaFields {
    pub id_type: Option<String>,
    pub id_data: Option<String>,
    pub moved_recently: bool,
    pub date_moved: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NorthCarolinaExtension {
    pub id_type: NorthCarolinaIdentityType,
    pub id_data: String,
    /// `MM/DD/YYYY`, only for voters who moved within the last 30 days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_moved: Option<String>,
}

pub(super) fn enrich(fields: &NorthCarolinaFields) -> Result<NorthCarolinaExtension, EnrichError> {
    let id_type = select(
        fields.id_type.as_deref(),
        "idType",
        NorthCarolinaIdentityType::parse,
    )?;
    let id_data = four_or_more_digits(fields.id_data.as_deref(), "idData")?;
    let date_moved = if fields.moved_recently {
        let date = normalize_birthdate(&text(fields.date_moved.as_deref(), "dateMoved")?);
        if !is_valid_birthdate(&date) {
            return Err(EnrichError::Invalid {
                field: "dateMoved",
                reason: "expected MM/DD/YYYY".to_string(),
            });
        }
        Some(date)
    } else {
        None
    };
    Ok(NorthCarolinaExtension {
        id_type,
        id_data,
        date_moved,
    })
}
