//! Signup answers read from a JSON file and replayed into a form.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use votebymail_core::{
    AddressInputParts, ContactAddress, FieldId, Jurisdiction, MailingAddress, SignatureKind,
    StateFields, Utm,
};
use votebymail_signup::SignupForm;

fn default_oid() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureAnswer {
    pub kind: SignatureKind,
    pub data: String,
}

/// Everything a voter would type into the signup form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answers {
    #[serde(default = "default_oid")]
    pub oid: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    pub last_name: String,
    #[serde(default)]
    pub suffix: String,
    /// `MM/DD/YYYY` or ISO `YYYY-MM-DD`.
    pub birthdate: String,
    pub email: String,
    #[serde(default)]
    pub confirm_email: Option<String>,
    #[serde(default)]
    pub telephone: String,
    /// Registration address, resolved through the service during `signup`.
    #[serde(default)]
    pub address: Option<AddressInputParts>,
    /// An already resolved address; lets `check` run offline.
    #[serde(default)]
    pub contact: Option<ContactAddress>,
    #[serde(default)]
    pub mailing: Option<MailingAddress>,
    pub state_fields: StateFields,
    #[serde(default)]
    pub signature: Option<SignatureAnswer>,
    #[serde(default)]
    pub utm: Utm,
}

impl Answers {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn jurisdiction(&self) -> Jurisdiction {
        self.state_fields.jurisdiction()
    }

    /// Fill the form the way a voter would, field by field.
    pub fn apply(&self, form: &mut SignupForm) -> anyhow::Result<()> {
        let base = [
            (FieldId::FirstName, self.first_name.as_str()),
            (FieldId::MiddleName, self.middle_name.as_str()),
            (FieldId::LastName, self.last_name.as_str()),
            (FieldId::Suffix, self.suffix.as_str()),
            (FieldId::Birthdate, self.birthdate.as_str()),
            (FieldId::Email, self.email.as_str()),
            (FieldId::Telephone, self.telephone.as_str()),
        ];
        for (field, value) in base {
            form.update_field(field, value);
        }
        if let Some(confirm) = &self.confirm_email {
            form.update_field(FieldId::ConfirmEmail, confirm);
        }

        form.set_state_fields(self.state_fields.clone())
            .context("state-specific answers")?;
        form.set_mailing(self.mailing.clone());

        if let Some(signature) = &self.signature {
            form.signature_mut()
                .capture(signature.kind, &signature.data)
                .context("signature")?;
        }
        Ok(())
    }
}
