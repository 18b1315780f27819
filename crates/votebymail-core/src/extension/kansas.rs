use serde::{Deserialize, Serialize};

use super::{select, text};
use crate::error::EnrichError;
use crate::options::KansasIdentityType;
use crate::states::{FieldDescriptor, Requirement};

pub(super) const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "idType",
        label: "Identification Method:",
        requirement: Requirement::Always,
        options: KansasIdentityType::LABELS,
    },
    FieldDescriptor {
        key: "idNumber",
        label: "Driver's License Number",
        requirement: Requirement::Conditional,
        options: &[],
    },
    FieldDescriptor {
        key: "idPhoto",
        label: "Upload Photo of ID",
        requirement: Requirement::Conditional,
        options: &[],
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KansasFields {
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    /// Photo of the voter's ID as a data URL.
    pub id_photo: Option<String>,
}

/// Exactly one of `id_number` and `id_photo` is set, matching `id_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KansasExtension {
    pub id_type: KansasIdentityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_photo: Option<String>,
}

pub(super) fn enrich(fields: &KansasFields) -> Result<KansasExtension, EnrichError> {
    let id_type = select(fields.id_type.as_deref(), "idType", KansasIdentityType::parse)?;
    let (id_number, id_photo) = match id_type {
        KansasIdentityType::DriversLicense => {
            (Some(text(fields.id_number.as_deref(), "idNumber")?), None)
        }
        KansasIdentityType::PhotoIdCopy => {
            (None, Some(text(fields.id_photo.as_deref(), "idPhoto")?))
        }
    };
    Ok(KansasExtension {
        id_type,
        id_number,
        id_photo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn license_needs_number() {
        let fields = KansasFields {
            id_type: Some("Driver's License Number".into()),
            id_photo: Some("data:image/png;base64,AAAA".into()),
            ..Default::default()
        };
        assert_eq!(enrich(&fields), Err(EnrichError::Missing("idNumber")));

        let fields = KansasFields {
            id_number: Some("K00-00-0000".into()),
            ..fields
        };
        let ext = enrich(&fields).unwrap();
        assert_eq!(ext.id_number.as_deref(), Some("K00-00-0000"));
        assert_eq!(ext.id_photo, None);
    }

    #[test]
    fn photo_copy_needs_photo() {
        let fields = KansasFields {
            id_type: Some("Copy of Photo ID".into()),
            id_number: Some("K00-00-0000".into()),
            ..Default::default()
        };
        assert_eq!(enrich(&fields), Err(EnrichError::Missing("idPhoto")));

        let fields = KansasFields {
            id_photo: Some("data:image/png;base64,AAAA".into()),
            ..fields
        };
        let ext = enrich(&fields).unwrap();
        assert_eq!(ext.id_type, KansasIdentityType::PhotoIdCopy);
        assert_eq!(ext.id_number, None);
    }

    #[test]
    fn untouched_method_is_missing() {
        assert_eq!(
            enrich(&KansasFields::default()),
            Err(EnrichError::Missing("idType"))
        );
    }
}
