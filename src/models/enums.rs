use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

// Values are the SQL table names.
str_enum!(Table {
    Country => "countries",
    Language => "languages",
    CoverageType => "coverage_types",
    ReferralType => "referral_types",
    PhoneType => "phone_types",
    PreferredContact => "preferred_contacts",
    Address => "addresses",
    Phone => "phones",
    Image => "images",
    Patient => "patients",
    Intake => "intakes",
});

str_enum!(LookupTable {
    Country => "countries",
    Language => "languages",
    CoverageType => "coverage_types",
    ReferralType => "referral_types",
    PhoneType => "phone_types",
    PreferredContact => "preferred_contacts",
});

impl LookupTable {
    pub const ALL: [LookupTable; 6] = [
        LookupTable::Country,
        LookupTable::Language,
        LookupTable::CoverageType,
        LookupTable::ReferralType,
        LookupTable::PhoneType,
        LookupTable::PreferredContact,
    ];

    /// The allocator table backing this lookup.
    pub fn table(&self) -> Table {
        match self {
            LookupTable::Country => Table::Country,
            LookupTable::Language => Table::Language,
            LookupTable::CoverageType => Table::CoverageType,
            LookupTable::ReferralType => Table::ReferralType,
            LookupTable::PhoneType => Table::PhoneType,
            LookupTable::PreferredContact => Table::PreferredContact,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn lookup_table_round_trips_through_str() {
        for lookup in LookupTable::ALL {
            assert_eq!(LookupTable::from_str(lookup.as_str()).unwrap(), lookup);
            assert_eq!(lookup.table().as_str(), lookup.as_str());
        }
    }

    #[test]
    fn unknown_table_is_invalid_enum() {
        let err = Table::from_str("Patients").unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidEnum { .. }));
    }
}
