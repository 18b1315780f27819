use serde::{Deserialize, Serialize};

use crate::error::EnrichError;
use crate::states::{FieldDescriptor, Requirement};

pub(super) const FIELDS: &[FieldDescriptor] = &[FieldDescriptor {
    key: "permanentList",
    label: "Request Michigan mail an application for vote by mail to me prior to future elections.",
    requirement: Requirement::Always,
    options: &["Yes", "No"],
}];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MichiganFields {
    /// `None` until the voter picks yes or no.
    pub permanent_list: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MichiganExtension {
    pub permanent_list: bool,
}

pub(super) fn enrich(fields: &MichiganFields) -> Result<MichiganExtension, EnrichError> {
    let permanent_list = fields
        .permanent_list
        .ok_or(EnrichError::Missing("permanentList"))?;
    Ok(MichiganExtension { permanent_list })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanswered_opt_in_blocks() {
        assert_eq!(
            enrich(&MichiganFields::default()),
            Err(EnrichError::Missing("permanentList"))
        );
    }

    #[test]
    fn either_answer_is_accepted() {
        for answer in [true, false] {
            let fields = MichiganFields {
                permanent_list: Some(answer),
            };
            assert_eq!(enrich(&fields).unwrap().permanent_list, answer);
        }
    }
}
