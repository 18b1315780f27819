use serde::{Deserialize, Serialize};

use super::{EnrichContext, select};
use crate::error::EnrichError;
use crate::options::{WestVirginiaElectionLevel, WestVirginiaElectionType, WestVirginiaParty};
use crate::states::{FieldDescriptor, Jurisdiction, Requirement};

pub(super) const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "election",
        label: "Election for Mail in Ballot",
        requirement: Requirement::Always,
        options: WestVirginiaElectionLevel::LABELS,
    },
    FieldDescriptor {
        key: "electionType",
        label: "Election Type for Mail in Ballot",
        requirement: Requirement::Always,
        options: WestVirginiaElectionType::LABELS,
    },
    FieldDescriptor {
        key: "party",
        label: "Party for Primary Ballot",
        requirement: Requirement::DuringPrimary,
        options: WestVirginiaParty::LABELS,
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WestVirginiaFields {
    pub election: Option<String>,
    pub election_type: Option<String>,
    pub party: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WestVirginiaExtension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<WestVirginiaParty>,
    pub election: WestVirginiaElectionLevel,
    pub election_type: WestVirginiaElectionType,
}

pub(super) fn enrich(
    fields: &WestVirginiaFields,
    ctx: &EnrichContext,
) -> Result<WestVirginiaExtension, EnrichError> {
    let election = select(
        fields.election.as_deref(),
        "election",
        WestVirginiaElectionLevel::parse,
    )?;
    let election_type = select(
        fields.election_type.as_deref(),
        "electionType",
        WestVirginiaElectionType::parse,
    )?;
    let party = if ctx.primary_eligible(Jurisdiction::WestVirginia) {
        Some(select(fields.party.as_deref(), "party", WestVirginiaParty::parse)?)
    } else {
        None
    };
    Ok(WestVirginiaExtension {
        party,
        election,
        election_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::testing::{after_primary, during_primary};

    fn general() -> WestVirginiaFields {
        WestVirginiaFields {
            election: Some("City/Town".into()),
            election_type: Some("General".into()),
            party: None,
        }
    }

    #[test]
    fn election_level_and_type_required() {
        let fields = WestVirginiaFields {
            election: None,
            ..general()
        };
        assert_eq!(
            enrich(&fields, &after_primary()),
            Err(EnrichError::Missing("election"))
        );
        let ext = enrich(&general(), &after_primary()).unwrap();
        assert_eq!(ext.election, WestVirginiaElectionLevel::CityTown);
        assert_eq!(ext.election_type, WestVirginiaElectionType::General);
        assert_eq!(ext.party, None);
    }

    #[test]
    fn party_iff_primary_eligible() {
        assert_eq!(
            enrich(&general(), &during_primary()),
            Err(EnrichError::Missing("party"))
        );
        let fields = WestVirginiaFields {
            party: Some("Mountain".into()),
            ..general()
        };
        assert_eq!(
            enrich(&fields, &during_primary()).unwrap().party,
            Some(WestVirginiaParty::Mountain)
        );
        assert_eq!(enrich(&fields, &after_primary()).unwrap().party, None);
    }
}
