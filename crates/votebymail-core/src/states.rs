//! State registry: every US state, and the fixed set of jurisdictions the
//! in-app signup supports, with their signature and primary-deadline policy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::extension;

/// Primary signup cutoffs below all fall in this election year.
pub const PRIMARY_YEAR: i32 = 2020;

/// A US state or the District of Columbia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Alabama,
    Alaska,
    Arizona,
    Arkansas,
    California,
    Colorado,
    Connecticut,
    Delaware,
    DistrictOfColumbia,
    Florida,
    Georgia,
    Hawaii,
    Idaho,
    Illinois,
    Indiana,
    Iowa,
    Kansas,
    Kentucky,
    Louisiana,
    Maine,
    Maryland,
    Massachusetts,
    Michigan,
    Minnesota,
    Mississippi,
    Missouri,
    Montana,
    Nebraska,
    Nevada,
    NewHampshire,
    NewJersey,
    NewMexico,
    NewYork,
    NorthCarolina,
    NorthDakota,
    Ohio,
    Oklahoma,
    Oregon,
    Pennsylvania,
    RhodeIsland,
    SouthCarolina,
    SouthDakota,
    Tennessee,
    Texas,
    Utah,
    Vermont,
    Virginia,
    Washington,
    WestVirginia,
    Wisconsin,
    Wyoming,
}

const STATE_TABLE: [(State, &str, &str); 51] = [
    (State::Alabama, "Alabama", "AL"),
    (State::Alaska, "Alaska", "AK"),
    (State::Arizona, "Arizona", "AZ"),
    (State::Arkansas, "Arkansas", "AR"),
    (State::California, "California", "CA"),
    (State::Colorado, "Colorado", "CO"),
    (State::Connecticut, "Connecticut", "CT"),
    (State::Delaware, "Delaware", "DE"),
    (State::DistrictOfColumbia, "District of Columbia", "DC"),
    (State::Florida, "Florida", "FL"),
    (State::Georgia, "Georgia", "GA"),
    (State::Hawaii, "Hawaii", "HI"),
    (State::Idaho, "Idaho", "ID"),
    (State::Illinois, "Illinois", "IL"),
    (State::Indiana, "Indiana", "IN"),
    (State::Iowa, "Iowa", "IA"),
    (State::Kansas, "Kansas", "KS"),
    (State::Kentucky, "Kentucky", "KY"),
    (State::Louisiana, "Louisiana", "LA"),
    (State::Maine, "Maine", "ME"),
    (State::Maryland, "Maryland", "MD"),
    (State::Massachusetts, "Massachusetts", "MA"),
    (State::Michigan, "Michigan", "MI"),
    (State::Minnesota, "Minnesota", "MN"),
    (State::Mississippi, "Mississippi", "MS"),
    (State::Missouri, "Missouri", "MO"),
    (State::Montana, "Montana", "MT"),
    (State::Nebraska, "Nebraska", "NE"),
    (State::Nevada, "Nevada", "NV"),
    (State::NewHampshire, "New Hampshire", "NH"),
    (State::NewJersey, "New Jersey", "NJ"),
    (State::NewMexico, "New Mexico", "NM"),
    (State::NewYork, "New York", "NY"),
    (State::NorthCarolina, "North Carolina", "NC"),
    (State::NorthDakota, "North Dakota", "ND"),
    (State::Ohio, "Ohio", "OH"),
    (State::Oklahoma, "Oklahoma", "OK"),
    (State::Oregon, "Oregon", "OR"),
    (State::Pennsylvania, "Pennsylvania", "PA"),
    (State::RhodeIsland, "Rhode Island", "RI"),
    (State::SouthCarolina, "South Carolina", "SC"),
    (State::SouthDakota, "South Dakota", "SD"),
    (State::Tennessee, "Tennessee", "TN"),
    (State::Texas, "Texas", "TX"),
    (State::Utah, "Utah", "UT"),
    (State::Vermont, "Vermont", "VT"),
    (State::Virginia, "Virginia", "VA"),
    (State::Washington, "Washington", "WA"),
    (State::WestVirginia, "West Virginia", "WV"),
    (State::Wisconsin, "Wisconsin", "WI"),
    (State::Wyoming, "Wyoming", "WY"),
];

impl State {
    /// All states in alphabetical order.
    pub fn all() -> impl Iterator<Item = State> {
        STATE_TABLE.iter().map(|(s, _, _)| *s)
    }

    pub fn name(&self) -> &'static str {
        self.row().1
    }

    pub fn abbr(&self) -> &'static str {
        self.row().2
    }

    /// Resolve a two-letter abbreviation or a full state name, ignoring case.
    pub fn lookup(key: &str) -> Option<State> {
        let key = key.trim();
        STATE_TABLE
            .iter()
            .find(|(_, name, abbr)| abbr.eq_ignore_ascii_case(key) || name.eq_ignore_ascii_case(key))
            .map(|(s, _, _)| *s)
    }

    fn row(&self) -> &'static (State, &'static str, &'static str) {
        // STATE_TABLE lists every variant exactly once.
        &STATE_TABLE[*self as usize]
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How a jurisdiction accepts the voter's signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureMode {
    DrawnOnly,
    UploadedOnly,
    Either,
    /// No signature required; any captured one is passed through.
    None,
}

impl SignatureMode {
    pub fn requires_signature(&self) -> bool {
        !matches!(self, SignatureMode::None)
    }
}

/// When a state-specific field must be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    /// Only while the jurisdiction is primary-eligible.
    DuringPrimary,
    /// Only when a companion toggle or selection asks for it.
    Conditional,
    Optional,
}

/// Describes one state-specific form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub requirement: Requirement,
    /// Closed option labels; empty for free-form input.
    pub options: &'static [&'static str],
}

/// A jurisdiction supported by the in-app signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    Arizona,
    Florida,
    Georgia,
    Kansas,
    Maine,
    Maryland,
    Massachusetts,
    Michigan,
    Minnesota,
    Nebraska,
    Nevada,
    #[serde(rename = "New Hampshire")]
    NewHampshire,
    #[serde(rename = "New York")]
    NewYork,
    #[serde(rename = "North Carolina")]
    NorthCarolina,
    #[serde(rename = "North Dakota")]
    NorthDakota,
    Oklahoma,
    Virginia,
    #[serde(rename = "West Virginia")]
    WestVirginia,
    Wisconsin,
    Wyoming,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 20] = [
        Jurisdiction::Arizona,
        Jurisdiction::Florida,
        Jurisdiction::Georgia,
        Jurisdiction::Kansas,
        Jurisdiction::Maine,
        Jurisdiction::Maryland,
        Jurisdiction::Massachusetts,
        Jurisdiction::Michigan,
        Jurisdiction::Minnesota,
        Jurisdiction::Nebraska,
        Jurisdiction::Nevada,
        Jurisdiction::NewHampshire,
        Jurisdiction::NewYork,
        Jurisdiction::NorthCarolina,
        Jurisdiction::NorthDakota,
        Jurisdiction::Oklahoma,
        Jurisdiction::Virginia,
        Jurisdiction::WestVirginia,
        Jurisdiction::Wisconsin,
        Jurisdiction::Wyoming,
    ];

    pub fn state(&self) -> State {
        match self {
            Jurisdiction::Arizona => State::Arizona,
            Jurisdiction::Florida => State::Florida,
            Jurisdiction::Georgia => State::Georgia,
            Jurisdiction::Kansas => State::Kansas,
            Jurisdiction::Maine => State::Maine,
            Jurisdiction::Maryland => State::Maryland,
            Jurisdiction::Massachusetts => State::Massachusetts,
            Jurisdiction::Michigan => State::Michigan,
            Jurisdiction::Minnesota => State::Minnesota,
            Jurisdiction::Nebraska => State::Nebraska,
            Jurisdiction::Nevada => State::Nevada,
            Jurisdiction::NewHampshire => State::NewHampshire,
            Jurisdiction::NewYork => State::NewYork,
            Jurisdiction::NorthCarolina => State::NorthCarolina,
            Jurisdiction::NorthDakota => State::NorthDakota,
            Jurisdiction::Oklahoma => State::Oklahoma,
            Jurisdiction::Virginia => State::Virginia,
            Jurisdiction::WestVirginia => State::WestVirginia,
            Jurisdiction::Wisconsin => State::Wisconsin,
            Jurisdiction::Wyoming => State::Wyoming,
        }
    }

    pub fn from_state(state: State) -> Option<Jurisdiction> {
        Self::ALL.into_iter().find(|j| j.state() == state)
    }

    pub fn name(&self) -> &'static str {
        self.state().name()
    }

    pub fn signature_mode(&self) -> SignatureMode {
        match self {
            Jurisdiction::Nebraska | Jurisdiction::NewHampshire => SignatureMode::UploadedOnly,
            Jurisdiction::Arizona
            | Jurisdiction::NewYork
            | Jurisdiction::Wisconsin
            | Jurisdiction::Wyoming => SignatureMode::None,
            _ => SignatureMode::Either,
        }
    }

    /// Last day a signup still counts for the primary, if the state has one.
    pub fn primary_cutoff(&self) -> Option<NaiveDate> {
        let (month, day) = match self {
            Jurisdiction::Arizona => (5, 3),
            Jurisdiction::Florida => (8, 8),
            Jurisdiction::Georgia => (4, 3),
            Jurisdiction::Kansas => (7, 28),
            Jurisdiction::Maine => (7, 9),
            Jurisdiction::Maryland => (5, 29),
            Jurisdiction::Massachusetts => (8, 25),
            Jurisdiction::Michigan => (7, 31),
            Jurisdiction::Minnesota => (8, 4),
            Jurisdiction::Nebraska => (5, 1),
            Jurisdiction::Nevada => (5, 5),
            Jurisdiction::NewHampshire => (9, 1),
            Jurisdiction::NewYork => (6, 16),
            Jurisdiction::Oklahoma => (6, 23),
            Jurisdiction::WestVirginia => (6, 3),
            Jurisdiction::Wisconsin => (8, 6),
            Jurisdiction::Wyoming => (8, 11),
            Jurisdiction::NorthCarolina | Jurisdiction::NorthDakota | Jurisdiction::Virginia => {
                return None;
            }
        };
        NaiveDate::from_ymd_opt(PRIMARY_YEAR, month, day)
    }

    /// State-specific fields, in form order.
    pub fn extra_fields(&self) -> &'static [FieldDescriptor] {
        extension::fields_for(*self)
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Find the supported jurisdiction for a state name or abbreviation.
///
/// `None` means the state exists but has no in-app signup, or the key is
/// not a state at all.
pub fn lookup(name: &str) -> Option<Jurisdiction> {
    State::lookup(name).and_then(Jurisdiction::from_state)
}

/// True iff the jurisdiction has a primary cutoff and `today` is on or before it.
pub fn primary_eligible(jurisdiction: Jurisdiction, today: NaiveDate) -> bool {
    jurisdiction
        .primary_cutoff()
        .is_some_and(|cutoff| today <= cutoff)
}

/// Where a voter in a given state gets sent to sign up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupMethod {
    InApp(Jurisdiction),
    VoteDotOrg,
}

pub fn signup_method(state: State) -> SignupMethod {
    // North Carolina signups go through vote.org despite the in-app form.
    if state == State::NorthCarolina {
        return SignupMethod::VoteDotOrg;
    }
    match Jurisdiction::from_state(state) {
        Some(j) => SignupMethod::InApp(j),
        None => SignupMethod::VoteDotOrg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn state_table_is_indexed_by_variant() {
        for (i, (state, _, _)) in STATE_TABLE.iter().enumerate() {
            assert_eq!(*state as usize, i, "{state:?} out of order");
        }
    }

    #[test]
    fn state_lookup_accepts_names_and_abbreviations() {
        assert_eq!(State::lookup("wv"), Some(State::WestVirginia));
        assert_eq!(State::lookup("West Virginia"), Some(State::WestVirginia));
        assert_eq!(State::lookup("NEW YORK"), Some(State::NewYork));
        assert_eq!(State::lookup("Gondor"), None);
        assert_eq!(State::NewHampshire.abbr(), "NH");
    }

    #[test]
    fn lookup_is_total_over_supported_set() {
        for j in Jurisdiction::ALL {
            assert_eq!(lookup(j.name()), Some(j));
            assert_eq!(lookup(j.state().abbr()), Some(j));
        }
        assert_eq!(lookup("California"), None);
        assert_eq!(lookup("nowhere"), None);
    }

    #[test]
    fn primary_eligible_inclusive_of_cutoff() {
        assert!(primary_eligible(Jurisdiction::Georgia, date(2020, 4, 3)));
        assert!(primary_eligible(Jurisdiction::Georgia, date(2020, 1, 1)));
        assert!(!primary_eligible(Jurisdiction::Georgia, date(2020, 4, 4)));
    }

    #[test]
    fn no_cutoff_is_never_primary_eligible() {
        assert!(!primary_eligible(Jurisdiction::Virginia, date(2000, 1, 1)));
        assert!(!primary_eligible(Jurisdiction::NorthDakota, date(2020, 1, 1)));
    }

    #[test]
    fn signature_modes() {
        assert_eq!(
            Jurisdiction::NewHampshire.signature_mode(),
            SignatureMode::UploadedOnly
        );
        assert_eq!(Jurisdiction::Wisconsin.signature_mode(), SignatureMode::None);
        assert_eq!(Jurisdiction::Georgia.signature_mode(), SignatureMode::Either);
        assert!(!SignatureMode::None.requires_signature());
    }

    #[test]
    fn signup_method_routes_unsupported_states() {
        assert_eq!(
            signup_method(State::Michigan),
            SignupMethod::InApp(Jurisdiction::Michigan)
        );
        assert_eq!(signup_method(State::Texas), SignupMethod::VoteDotOrg);
        assert_eq!(signup_method(State::NorthCarolina), SignupMethod::VoteDotOrg);
    }

    #[test]
    fn jurisdiction_serializes_as_state_name() {
        let json = serde_json::to_string(&Jurisdiction::NorthDakota).unwrap();
        assert_eq!(json, "\"North Dakota\"");
    }
}
