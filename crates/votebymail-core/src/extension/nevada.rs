use serde::{Deserialize, Serialize};

use super::present;
use crate::states::{FieldDescriptor, Requirement};

pub(super) const FIELDS: &[FieldDescriptor] = &[FieldDescriptor {
    key: "idPhoto",
    label: "Upload Photo of ID",
    requirement: Requirement::Optional,
    options: &[],
}];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NevadaFields {
    pub id_photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NevadaExtension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_photo: Option<String>,
}

pub(super) fn enrich(fields: &NevadaFields) -> NevadaExtension {
    NevadaExtension {
        id_photo: present(fields.id_photo.as_deref()).map(str::to_string),
    }
}
