use serde::{Deserialize, Serialize};

use super::text;
use crate::error::EnrichError;
use crate::states::{FieldDescriptor, Requirement};

pub(super) const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "firstTime",
        label: "This is my first time voting by mail in Wisconsin.",
        requirement: Requirement::Optional,
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
pub struct WisconsinFields {
    pub first_time: bool,
    pub id_photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WisconsinExtension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_photo: Option<String>,
}

/// First-time mail voters must include a photo of their ID.
pub(super) fn enrich(fields: &WisconsinFields) -> Result<WisconsinExtension, EnrichError> {
    let id_photo = if fields.first_time {
        Some(text(fields.id_photo.as_deref(), "idPhoto")?)
    } else {
        None
    };
    Ok(WisconsinExtension { id_photo })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_timer_needs_photo() {
        let fields = WisconsinFields {
            first_time: true,
            id_photo: Some(String::new()),
        };
        assert_eq!(enrich(&fields), Err(EnrichError::Missing("idPhoto")));

        let fields = WisconsinFields {
            id_photo: Some("data:image/png;base64,AAAA".into()),
            ..fields
        };
        assert!(enrich(&fields).unwrap().id_photo.is_some());
    }

    #[test]
    fn returning_voter_needs_nothing() {
        let ext = enrich(&WisconsinFields::default()).unwrap();
        assert_eq!(ext.id_photo, None);
    }

    #[test]
    fn untoggling_drops_the_photo() {
        let fields = WisconsinFields {
            first_time: false,
            id_photo: Some("data:image/png;base64,AAAA".into()),
        };
        assert_eq!(enrich(&fields).unwrap().id_photo, None);
    }
}
