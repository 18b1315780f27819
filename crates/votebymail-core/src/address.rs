//! Postal addresses and the local election contact they resolve to.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// USPS secondary unit designators.
///
/// <https://pe.usps.com/text/pub28/28apc_003.htm>
const DESIGNATORS: &str =
    "APT|BLDG|DEPT|FL|FRNT|HNGR|KEY|LBBY|LOT|LOWR|OFC|PH|PIER|REAR|RM|SIDE|SLIP|SPC|STOP|STE|TRLR|UNIT|UPPR";

/// A unit identifier: anything holding a digit, or a single letter. Street
/// words such as "St" or "Ave" are neither.
const UNIT_ID: &str = r"(?:\S*[0-9]\S*|[A-Z])";

/// A whole unit that reads correctly without a `#`, e.g. `Apt 3C`.
static DESIGNATED_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^(?:{DESIGNATORS})\s+{UNIT_ID}$"))
        .expect("designated unit pattern is valid")
});

/// A designated unit closing a street line, e.g. `12 Key St Apt 3C`.
static TRAILING_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\s((?:{DESIGNATORS})\s+{UNIT_ID})$"))
        .expect("trailing unit pattern is valid")
});

/// Address as typed into the form, one box per part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInputParts {
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    pub city: String,
    pub state: String,
    pub postcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl AddressInputParts {
    /// Drop empty optional parts so they are not formatted.
    pub fn normalized(mut self) -> Self {
        self.unit = self.unit.filter(|u| !u.trim().is_empty());
        self.street_number = self.street_number.filter(|n| !n.trim().is_empty());
        self
    }

    /// Street, city, state and postcode are all filled in.
    pub fn is_complete(&self) -> bool {
        [&self.street, &self.city, &self.state, &self.postcode]
            .iter()
            .all(|part| !part.trim().is_empty())
    }
}

/// Formats only street number and street.
pub fn format_street(addr: &AddressInputParts) -> String {
    match &addr.street_number {
        Some(number) => format!("{number} {}", addr.street),
        None => addr.street.clone(),
    }
}

/// Formats a unit, prefixing `# ` unless it is a designator followed by an
/// identifier.
pub fn format_unit(unit: &str) -> String {
    // Users sometimes type their own pound sign; decide afresh.
    let normalized = unit.replace('#', "");
    let normalized = normalized.trim();
    if DESIGNATED_UNIT.is_match(normalized) {
        normalized.to_string()
    } else {
        format!("# {normalized}")
    }
}

/// One-line USPS style address: `street [unit], city, state postcode`.
pub fn format_address_input_parts(addr: &AddressInputParts) -> String {
    let street = format_street(addr);
    match addr.unit.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(unit) => format!(
            "{street} {}, {}, {} {}",
            format_unit(unit),
            addr.city,
            addr.state,
            addr.postcode
        ),
        None => format!("{street}, {}, {} {}", addr.city, addr.state, addr.postcode),
    }
}

/// Parse a line produced by [`format_address_input_parts`] back into parts.
///
/// The street number is left inside `street`. A unit is recognised either by
/// a `#` or by a trailing designator and identifier, so street names that
/// contain a designator word ("Key St", "Pier Ave") stay whole.
pub fn parse_formatted_address(line: &str) -> Option<AddressInputParts> {
    let (rest, state_postcode) = line.trim().rsplit_once(',')?;
    let (street_line, city) = rest.rsplit_once(',')?;
    let (state, postcode) = state_postcode.trim().rsplit_once(' ')?;

    let street_line = street_line.trim();
    let (street, unit) = if let Some((street, unit)) = street_line.split_once('#') {
        (street.trim(), Some(unit.trim()))
    } else if let Some(unit) = TRAILING_UNIT.captures(street_line).and_then(|c| c.get(1)) {
        (street_line[..unit.start()].trim(), Some(unit.as_str()))
    } else {
        (street_line, None)
    };

    let parts = AddressInputParts {
        street: street.to_string(),
        street_number: None,
        city: city.trim().to_string(),
        state: state.trim().to_string(),
        postcode: postcode.trim().to_string(),
        unit: unit.map(str::to_string),
    }
    .normalized();

    parts.is_complete().then_some(parts)
}

/// A geocoded home address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat_long: Option<(f64, f64)>,
    pub query_addr: String,
    pub full_addr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_cities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    pub postcode: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_abbr: Option<String>,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// The local election official responsible for an address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactData {
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub faxes: Vec<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Result of geocoding an address and finding its election contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactAddress {
    pub contact: ContactData,
    pub address: Address,
}
