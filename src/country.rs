//! The fixed EU country roster and its lookup tables.
//!
//! Three facts per country: the two-letter code used throughout the workbook
//! (ISO-like, with Greece as `EL`), a display name, and the numeric id the
//! choropleth uses to join against the world topology. `EU` is an aggregate
//! pseudo-entity present in the data, not a member state: it has a display
//! name but no map id. `MT` has a display name but no map id either — the
//! source data excludes Malta from the map join, and that exclusion is
//! carried as-is rather than guessed around.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// The aggregate pseudo-country present in every sheet.
pub const EU_AGGREGATE: &str = "EU";

/// The 27 member states, in the order the country dropdown lists them.
pub const MEMBER_CODES: [&str; 27] = [
    "BE", "BG", "CZ", "DK", "DE", "EE", "IE", "EL", "ES", "FR", "HR", "IT", "CY", "LV", "LT",
    "LU", "HU", "MT", "NL", "AT", "PL", "PT", "RO", "SI", "SK", "FI", "SE",
];

/// Dropdown default: Denmark's position in `MEMBER_CODES`.
pub const DEFAULT_MEMBER_INDEX: usize = 3;

static DISPLAY_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("EU", "European Union"),
        ("BE", "Belgium"),
        ("BG", "Bulgaria"),
        ("CZ", "Czech Republic"),
        ("DK", "Denmark"),
        ("DE", "Germany"),
        ("EE", "Estonia"),
        ("IE", "Ireland"),
        ("EL", "Greece"),
        ("ES", "Spain"),
        ("FR", "France"),
        ("HR", "Croatia"),
        ("IT", "Italy"),
        ("CY", "Cyprus"),
        ("LV", "Latvia"),
        ("LT", "Lithuania"),
        ("LU", "Luxembourg"),
        ("HU", "Hungary"),
        ("MT", "Malta"),
        ("NL", "Netherlands"),
        ("AT", "Austria"),
        ("PL", "Poland"),
        ("PT", "Portugal"),
        ("RO", "Romania"),
        ("SI", "Slovenia"),
        ("SK", "Slovakia"),
        ("FI", "Finland"),
        ("SE", "Sweden"),
    ])
});

// MT is deliberately absent: the source map join has no id for Malta.
static NUMERIC_IDS: Lazy<HashMap<&'static str, u16>> = Lazy::new(|| {
    HashMap::from([
        ("BE", 56),
        ("BG", 100),
        ("CZ", 203),
        ("DK", 208),
        ("DE", 276),
        ("EE", 233),
        ("IE", 372),
        ("EL", 300),
        ("ES", 724),
        ("FR", 250),
        ("HR", 191),
        ("IT", 380),
        ("CY", 196),
        ("LV", 428),
        ("LT", 440),
        ("LU", 442),
        ("HU", 348),
        ("NL", 528),
        ("AT", 40),
        ("PL", 616),
        ("PT", 620),
        ("RO", 642),
        ("SI", 705),
        ("SK", 703),
        ("FI", 246),
        ("SE", 752),
    ])
});

/// True for the 27 member codes and the `EU` aggregate. Anything else in the
/// data is a structural error, not a gap to paper over.
pub fn is_known(code: &str) -> bool {
    code == EU_AGGREGATE || MEMBER_CODES.contains(&code)
}

pub fn display_name(code: &str) -> Option<&'static str> {
    DISPLAY_NAMES.get(code).copied()
}

/// Numeric id used as the choropleth join key. `None` for `EU` (not a map
/// region) and `MT` (absent from the source join table).
pub fn numeric_id(code: &str) -> Option<u16> {
    NUMERIC_IDS.get(code).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_covers_all_members() {
        assert_eq!(MEMBER_CODES.len(), 27);
        for code in MEMBER_CODES {
            assert!(is_known(code));
            assert!(display_name(code).is_some(), "no name for {code}");
        }
        assert_eq!(MEMBER_CODES[DEFAULT_MEMBER_INDEX], "DK");
    }

    #[test]
    fn aggregate_and_malta_have_no_map_id() {
        assert!(is_known(EU_AGGREGATE));
        assert_eq!(display_name("EU"), Some("European Union"));
        assert_eq!(numeric_id("EU"), None);

        assert_eq!(display_name("MT"), Some("Malta"));
        assert_eq!(numeric_id("MT"), None);
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert!(!is_known("ZZ"));
        assert_eq!(display_name("ZZ"), None);
        assert_eq!(numeric_id("ZZ"), None);
    }

    #[test]
    fn members_have_map_ids_except_malta() {
        for code in MEMBER_CODES {
            if code == "MT" {
                continue;
            }
            assert!(numeric_id(code).is_some(), "no map id for {code}");
        }
        assert_eq!(numeric_id("SE"), Some(752));
        assert_eq!(numeric_id("EL"), Some(300));
    }
}
