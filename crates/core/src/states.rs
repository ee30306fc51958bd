//! Two-letter state code table and its inverse.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Code to full name, including DC, territories and the national aggregate.
pub const STATES: &[(&str, &str)] = &[
    ("AK", "Alaska"),
    ("AL", "Alabama"),
    ("AR", "Arkansas"),
    ("AS", "American Samoa"),
    ("AZ", "Arizona"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DC", "District of Columbia"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("GU", "Guam"),
    ("HI", "Hawaii"),
    ("IA", "Iowa"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("MA", "Massachusetts"),
    ("MD", "Maryland"),
    ("ME", "Maine"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MO", "Missouri"),
    ("MP", "Northern Mariana Islands"),
    ("MS", "Mississippi"),
    ("MT", "Montana"),
    ("NA", "National"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("NE", "Nebraska"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NV", "Nevada"),
    ("NY", "New York"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("PR", "Puerto Rico"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VA", "Virginia"),
    ("VI", "Virgin Islands"),
    ("VT", "Vermont"),
    ("WA", "Washington"),
    ("WI", "Wisconsin"),
    ("WV", "West Virginia"),
    ("WY", "Wyoming"),
];

static CODE_TO_NAME: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| STATES.iter().copied().collect());

static NAME_TO_CODE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| CODE_TO_NAME.iter().map(|(&code, &name)| (name, code)).collect());

/// Full state name for a two-letter code.
pub fn code_to_name(code: &str) -> Option<&'static str> {
    CODE_TO_NAME.get(code).copied()
}

/// Two-letter code for a full state name.
pub fn name_to_code(name: &str) -> Option<&'static str> {
    NAME_TO_CODE.get(name).copied()
}

/// Replace a recognized full state name with its code; anything else passes
/// through unchanged.
pub fn normalize_state(state: &str) -> String {
    let state = state.trim();
    name_to_code(state).unwrap_or(state).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_is_total() {
        assert_eq!(CODE_TO_NAME.len(), STATES.len());
        assert_eq!(NAME_TO_CODE.len(), STATES.len());
        for (code, name) in STATES {
            assert_eq!(name_to_code(name), Some(*code));
            assert_eq!(code_to_name(code), Some(*name));
        }
    }

    #[test]
    fn test_normalize_state() {
        assert_eq!(normalize_state("Michigan"), "MI");
        assert_eq!(normalize_state(" District of Columbia "), "DC");
        assert_eq!(normalize_state("MI"), "MI");
        assert_eq!(normalize_state("Atlantis"), "Atlantis");
    }
}
