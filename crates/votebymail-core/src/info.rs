//! The assembled signup record sent to the registration service.

use serde::{Deserialize, Serialize};

use crate::address::{Address, AddressInputParts, ContactData};
use crate::extension::Extension;
use crate::name::NameParts;
use crate::signature::{SignatureKind, SignatureProof};
use crate::states::Jurisdiction;
use crate::status::LookupOutcome;

/// Registration lookup result carried with a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlloyStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// A registration status label, or `Error` when the lookup failed.
    pub status: String,
}

impl From<&LookupOutcome> for AlloyStatus {
    fn from(outcome: &LookupOutcome) -> Self {
        match outcome {
            LookupOutcome::Found(lookup) => AlloyStatus {
                id: Some(lookup.id.clone()),
                status: lookup.status.as_str().to_string(),
            },
            LookupOutcome::Error => AlloyStatus {
                id: None,
                status: outcome.label().to_string(),
            },
        }
    }
}

/// Fields every jurisdiction's submission carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseInfo {
    pub name: String,
    pub name_parts: NameParts,
    pub email: String,
    pub phone: String,
    /// `MM/DD/YYYY`.
    pub birthdate: String,
    pub usps_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailing_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailing_address_parts: Option<AddressInputParts>,
    pub address: Address,
    /// Organization the signup is attributed to.
    pub oid: String,
    pub contact: ContactData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alloy: Option<AlloyStatus>,
}

/// A complete, validated signup ready for `register`.
///
/// Serializes flat: base fields, the `state` tag and the jurisdiction's own
/// fields share one JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateInfo {
    #[serde(flatten)]
    pub base: BaseInfo,
    #[serde(flatten)]
    pub extension: Extension,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_type: Option<SignatureKind>,
}

impl StateInfo {
    pub fn new(base: BaseInfo, extension: Extension, signature: Option<SignatureProof>) -> Self {
        let (signature, signature_type) = match signature {
            Some(proof) => (Some(proof.data), Some(proof.kind)),
            None => (None, None),
        };
        Self {
            base,
            extension,
            signature,
            signature_type,
        }
    }

    pub fn jurisdiction(&self) -> Jurisdiction {
        self.extension.jurisdiction()
    }
}

/// Campaign tags captured from the landing URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_content: Option<String>,
}

impl Utm {
    /// Fill tags that are unset here from `other`; set tags are kept.
    pub fn merge_missing(&mut self, other: &Utm) {
        let fill = |mine: &mut Option<String>, theirs: &Option<String>| {
            if mine.is_none() {
                mine.clone_from(theirs);
            }
        };
        fill(&mut self.utm_source, &other.utm_source);
        fill(&mut self.utm_medium, &other.utm_medium);
        fill(&mut self.utm_campaign, &other.utm_campaign);
        fill(&mut self.utm_term, &other.utm_term);
        fill(&mut self.utm_content, &other.utm_content);
    }

    pub fn is_empty(&self) -> bool {
        *self == Utm::default()
    }
}

/// Submission metadata: the session's voter id and campaign tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub uid: String,
    #[serde(flatten)]
    pub utm: Utm,
}
