//! Per-jurisdiction form extensions.
//!
//! Each jurisdiction module owns the raw answers to its own extra questions
//! (`*Fields`), the validated record it contributes to a submission
//! (`*Extension`), and one `enrich` function turning the first into the
//! second. Modules share nothing beyond the helpers below; [`StateFields`]
//! and [`Extension`] tie them together with a single exhaustive match.

mod arizona;
mod georgia;
mod kansas;
mod massachusetts;
mod michigan;
mod minnesota;
mod nevada;
mod new_hampshire;
mod north_carolina;
mod north_dakota;
mod virginia;
mod west_virginia;
mod wisconsin;

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::EnrichError;
use crate::states::{self, FieldDescriptor, Jurisdiction};

pub use arizona::{ArizonaExtension, ArizonaFields};
pub use georgia::{GeorgiaExtension, GeorgiaFields};
pub use kansas::{KansasExtension, KansasFields};
pub use massachusetts::{MassachusettsExtension, MassachusettsFields};
pub use michigan::{MichiganExtension, MichiganFields};
pub use minnesota::{MinnesotaExtension, MinnesotaFields};
pub use nevada::{NevadaExtension, NevadaFields};
pub use new_hampshire::{NewHampshireExtension, NewHampshireFields};
pub use north_carolina::{NorthCarolinaExtension, NorthCarolinaFields};
pub use north_dakota::{NorthDakotaExtension, NorthDakotaFields};
pub use virginia::{VirginiaExtension, VirginiaFields};
pub use west_virginia::{WestVirginiaExtension, WestVirginiaFields};
pub use wisconsin::{WisconsinExtension, WisconsinFields};

static LAST_FOUR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("last four digits pattern is valid"));

static FOUR_OR_MORE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4,}$").expect("digit run pattern is valid"));

/// Inputs to enrichment that do not come from the form itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichContext {
    pub today: NaiveDate,
}

impl EnrichContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn primary_eligible(&self, jurisdiction: Jurisdiction) -> bool {
        states::primary_eligible(jurisdiction, self.today)
    }
}

/// Raw answers to a jurisdiction's extra questions, as held by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum StateFields {
    Arizona(ArizonaFields),
    Florida,
    Georgia(GeorgiaFields),
    Kansas(KansasFields),
    Maine,
    Maryland,
    Massachusetts(MassachusettsFields),
    Michigan(MichiganFields),
    Minnesota(MinnesotaFields),
    Nebraska,
    Nevada(NevadaFields),
    #[serde(rename = "New Hampshire")]
    NewHampshire(NewHampshireFields),
    #[serde(rename = "New York")]
    NewYork,
    #[serde(rename = "North Carolina")]
    NorthCarolina(NorthCarolinaFields),
    #[serde(rename = "North Dakota")]
    NorthDakota(NorthDakotaFields),
    Oklahoma,
    Virginia(VirginiaFields),
    #[serde(rename = "West Virginia")]
    WestVirginia(WestVirginiaFields),
    Wisconsin(WisconsinFields),
    Wyoming,
}

/// The validated, state-specific part of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum Extension {
    Arizona(ArizonaExtension),
    Florida,
    Georgia(GeorgiaExtension),
    Kansas(KansasExtension),
    Maine,
    Maryland,
    Massachusetts(MassachusettsExtension),
    Michigan(MichiganExtension),
    Minnesota(MinnesotaExtension),
    Nebraska,
    Nevada(NevadaExtension),
    #[serde(rename = "New Hampshire")]
    NewHampshire(NewHampshireExtension),
    #[serde(rename = "New York")]
    NewYork,
    #[serde(rename = "North Carolina")]
    NorthCarolina(NorthCarolinaExtension),
    #[serde(rename = "North Dakota")]
    NorthDakota(NorthDakotaExtension),
    Oklahoma,
    Virginia(VirginiaExtension),
    #[serde(rename = "West Virginia")]
    WestVirginia(WestVirginiaExtension),
    Wisconsin(WisconsinExtension),
    Wyoming,
}

impl StateFields {
    /// Untouched answers for a jurisdiction: nothing selected, toggles off.
    pub fn blank(jurisdiction: Jurisdiction) -> Self {
        match jurisdiction {
            Jurisdiction::Arizona => StateFields::Arizona(Default::default()),
            Jurisdiction::Florida => StateFields::Florida,
            Jurisdiction::Georgia => StateFields::Georgia(Default::default()),
            Jurisdiction::Kansas => StateFields::Kansas(Default::default()),
            Jurisdiction::Maine => StateFields::Maine,
            Jurisdiction::Maryland => StateFields::Maryland,
            Jurisdiction::Massachusetts => StateFields::Massachusetts(Default::default()),
            Jurisdiction::Michigan => StateFields::Michigan(Default::default()),
            Jurisdiction::Minnesota => StateFields::Minnesota(Default::default()),
            Jurisdiction::Nebraska => StateFields::Nebraska,
            Jurisdiction::Nevada => StateFields::Nevada(Default::default()),
            Jurisdiction::NewHampshire => StateFields::NewHampshire(Default::default()),
            Jurisdiction::NewYork => StateFields::NewYork,
            Jurisdiction::NorthCarolina => StateFields::NorthCarolina(Default::default()),
            Jurisdiction::NorthDakota => StateFields::NorthDakota(Default::default()),
            Jurisdiction::Oklahoma => StateFields::Oklahoma,
            Jurisdiction::Virginia => StateFields::Virginia(Default::default()),
            Jurisdiction::WestVirginia => StateFields::WestVirginia(Default::default()),
            Jurisdiction::Wisconsin => StateFields::Wisconsin(Default::default()),
            Jurisdiction::Wyoming => StateFields::Wyoming,
        }
    }

    pub fn jurisdiction(&self) -> Jurisdiction {
        match self {
            StateFields::Arizona(_) => Jurisdiction::Arizona,
            StateFields::Florida => Jurisdiction::Florida,
            StateFields::Georgia(_) => Jurisdiction::Georgia,
            StateFields::Kansas(_) => Jurisdiction::Kansas,
            StateFields::Maine => Jurisdiction::Maine,
            StateFields::Maryland => Jurisdiction::Maryland,
            StateFields::Massachusetts(_) => Jurisdiction::Massachusetts,
            StateFields::Michigan(_) => Jurisdiction::Michigan,
            StateFields::Minnesota(_) => Jurisdiction::Minnesota,
            StateFields::Nebraska => Jurisdiction::Nebraska,
            StateFields::Nevada(_) => Jurisdiction::Nevada,
            StateFields::NewHampshire(_) => Jurisdiction::NewHampshire,
            StateFields::NewYork => Jurisdiction::NewYork,
            StateFields::NorthCarolina(_) => Jurisdiction::NorthCarolina,
            StateFields::NorthDakota(_) => Jurisdiction::NorthDakota,
            StateFields::Oklahoma => Jurisdiction::Oklahoma,
            StateFields::Virginia(_) => Jurisdiction::Virginia,
            StateFields::WestVirginia(_) => Jurisdiction::WestVirginia,
            StateFields::Wisconsin(_) => Jurisdiction::Wisconsin,
            StateFields::Wyoming => Jurisdiction::Wyoming,
        }
    }

    /// Validate the answers and produce the state-specific record.
    pub fn enrich(&self, ctx: &EnrichContext) -> Result<Extension, EnrichError> {
        Ok(match self {
            StateFields::Arizona(f) => Extension::Arizona(arizona::enrich(f, ctx)?),
            StateFields::Georgia(f) => Extension::Georgia(georgia::enrich(f, ctx)?),
            StateFields::Kansas(f) => Extension::Kansas(kansas::enrich(f)?),
            StateFields::Massachusetts(f) => {
                Extension::Massachusetts(massachusetts::enrich(f, ctx)?)
            }
            StateFields::Michigan(f) => Extension::Michigan(michigan::enrich(f)?),
            StateFields::Minnesota(f) => Extension::Minnesota(minnesota::enrich(f)?),
            StateFields::Nevada(f) => Extension::Nevada(nevada::enrich(f)),
            StateFields::NewHampshire(f) => {
                Extension::NewHampshire(new_hampshire::enrich(f, ctx)?)
            }
            StateFields::NorthCarolina(f) => Extension::NorthCarolina(north_carolina::enrich(f)?),
            StateFields::NorthDakota(f) => Extension::NorthDakota(north_dakota::enrich(f)?),
            StateFields::Virginia(f) => Extension::Virginia(virginia::enrich(f)?),
            StateFields::WestVirginia(f) => {
                Extension::WestVirginia(west_virginia::enrich(f, ctx)?)
            }
            StateFields::Wisconsin(f) => Extension::Wisconsin(wisconsin::enrich(f)?),
            StateFields::Florida => Extension::Florida,
            StateFields::Maine => Extension::Maine,
            StateFields::Maryland => Extension::Maryland,
            StateFields::Nebraska => Extension::Nebraska,
            StateFields::NewYork => Extension::NewYork,
            StateFields::Oklahoma => Extension::Oklahoma,
            StateFields::Wyoming => Extension::Wyoming,
        })
    }
}

impl Extension {
    pub fn jurisdiction(&self) -> Jurisdiction {
        match self {
            Extension::Arizona(_) => Jurisdiction::Arizona,
            Extension::Florida => Jurisdiction::Florida,
            Extension::Georgia(_) => Jurisdiction::Georgia,
            Extension::Kansas(_) => Jurisdiction::Kansas,
            Extension::Maine => Jurisdiction::Maine,
            Extension::Maryland => Jurisdiction::Maryland,
            Extension::Massachusetts(_) => Jurisdiction::Massachusetts,
            Extension::Michigan(_) => Jurisdiction::Michigan,
            Extension::Minnesota(_) => Jurisdiction::Minnesota,
            Extension::Nebraska => Jurisdiction::Nebraska,
            Extension::Nevada(_) => Jurisdiction::Nevada,
            Extension::NewHampshire(_) => Jurisdiction::NewHampshire,
            Extension::NewYork => Jurisdiction::NewYork,
            Extension::NorthCarolina(_) => Jurisdiction::NorthCarolina,
            Extension::NorthDakota(_) => Jurisdiction::NorthDakota,
            Extension::Oklahoma => Jurisdiction::Oklahoma,
            Extension::Virginia(_) => Jurisdiction::Virginia,
            Extension::WestVirginia(_) => Jurisdiction::WestVirginia,
            Extension::Wisconsin(_) => Jurisdiction::Wisconsin,
            Extension::Wyoming => Jurisdiction::Wyoming,
        }
    }
}

/// Extra form fields for a jurisdiction, in display order.
pub(crate) fn fields_for(jurisdiction: Jurisdiction) -> &'static [FieldDescriptor] {
    match jurisdiction {
        Jurisdiction::Arizona => arizona::FIELDS,
        Jurisdiction::Georgia => georgia::FIELDS,
        Jurisdiction::Kansas => kansas::FIELDS,
        Jurisdiction::Massachusetts => massachusetts::FIELDS,
        Jurisdiction::Michigan => michigan::FIELDS,
        Jurisdiction::Minnesota => minnesota::FIELDS,
        Jurisdiction::Nevada => nevada::FIELDS,
        Jurisdiction::NewHampshire => new_hampshire::FIELDS,
        Jurisdiction::NorthCarolina => north_carolina::FIELDS,
        Jurisdiction::NorthDakota => north_dakota::FIELDS,
        Jurisdiction::Virginia => virginia::FIELDS,
        Jurisdiction::WestVirginia => west_virginia::FIELDS,
        Jurisdiction::Wisconsin => wisconsin::FIELDS,
        Jurisdiction::Florida
        | Jurisdiction::Maine
        | Jurisdiction::Maryland
        | Jurisdiction::Nebraska
        | Jurisdiction::NewYork
        | Jurisdiction::Oklahoma
        | Jurisdiction::Wyoming => &[],
    }
}

// ── Shared answer checks ──

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A choice from a closed set.
fn select<T>(
    value: Option<&str>,
    field: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, EnrichError> {
    let value = present(value).ok_or(EnrichError::Missing(field))?;
    parse(value).ok_or_else(|| EnrichError::Invalid {
        field,
        reason: format!("{value:?} is not one of the offered options"),
    })
}

/// Any non-blank text.
fn text(value: Option<&str>, field: &'static str) -> Result<String, EnrichError> {
    present(value)
        .map(str::to_string)
        .ok_or(EnrichError::Missing(field))
}

/// Non-blank text matching a pattern.
fn matching(
    value: Option<&str>,
    field: &'static str,
    pattern: &Regex,
    expected: &str,
) -> Result<String, EnrichError> {
    let value = text(value, field)?;
    if pattern.is_match(&value) {
        Ok(value)
    } else {
        Err(EnrichError::Invalid {
            field,
            reason: format!("expected {expected}"),
        })
    }
}

fn last_four_digits(value: Option<&str>, field: &'static str) -> Result<String, EnrichError> {
    matching(value, field, &LAST_FOUR_DIGITS, "exactly four digits")
}

fn four_or_more_digits(value: Option<&str>, field: &'static str) -> Result<String, EnrichError> {
    matching(value, field, &FOUR_OR_MORE_DIGITS, "at least four digits")
}
