//! Closed option sets offered by the state forms.
//!
//! Every set serializes as the label shown to the voter, which is also the
//! value the signup server expects on the wire.

use serde::{Deserialize, Serialize};

macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Match a label exactly as offered (surrounding whitespace ignored).
            pub fn parse(label: &str) -> Option<Self> {
                let label = label.trim();
                Self::ALL.iter().copied().find(|v| v.as_str() == label)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use closed_set;

closed_set! {
    pub enum ArizonaParty {
        Democratic => "Democratic Party",
        Republican => "Republican Party",
        NonPartisan => "Non-Partisan",
        GreenPima => "Green Party (Pima County only)",
    }
}

closed_set! {
    pub enum ArizonaIdentityType {
        LicenseNumber => "Arizona License Number",
        SsnLast4 => "Last 4 numbers of SSN",
        PlaceOfBirth => "Place of Birth",
    }
}

closed_set! {
    pub enum GeorgiaParty {
        Democratic => "Democratic Party",
        Republican => "Republican Party",
        NonPartisan => "Non-Partisan",
    }
}

closed_set! {
    pub enum KansasIdentityType {
        DriversLicense => "Driver's License Number",
        PhotoIdCopy => "Copy of Photo ID",
    }
}

closed_set! {
    pub enum MinnesotaIdentityType {
        LicenseOrIdCard => "Minnesota Issued Driver's License or ID Card",
        SsnLast4 => "Last 4 numbers of SSN",
        NoId => "None",
    }
}

closed_set! {
    pub enum NewHampshirePrimaryParty {
        NoPrimary => "No Primary",
        Democratic => "Democratic Party",
        Republican => "Republican Party",
    }
}

closed_set! {
    pub enum NorthCarolinaIdentityType {
        SsnLast4 => "Last 4 numbers of SSN",
        LicenseNumber => "North Carolina License Number",
    }
}

closed_set! {
    pub enum NorthDakotaIdentityType {
        LicenseNumber => "North Dakota License Number",
        NonDriverId => "Non Driver ID",
        TribalId => "Tribal ID Number",
    }
}

closed_set! {
    pub enum NorthDakotaElectionType {
        Primary => "Primary",
        General => "General",
        Both => "Both",
        City => "City",
        School => "School",
        Special => "Special",
    }
}

closed_set! {
    pub enum WestVirginiaParty {
        Democratic => "Democratic Party",
        Republican => "Republican Party",
        Mountain => "Mountain",
    }
}

closed_set! {
    pub enum WestVirginiaElectionLevel {
        FederalStateCounty => "Federal/State/County",
        CityTown => "City/Town",
    }
}

closed_set! {
    pub enum WestVirginiaElectionType {
        Primary => "Primary",
        General => "General",
        Special => "Special",
    }
}
