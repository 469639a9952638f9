//! Specification code classification
//!
//! Every measurement record in a CXF document carries a `ColorSpecification`
//! code naming the instrument/aperture/illuminant configuration that produced
//! it. The supported families are recognized by a short fixed allow-list and
//! a substring check rather than by parsing the code's structure; records
//! under any other code are ignored.

use crate::model::AcquisitionMode;

/// Codes of the standard instrument family
///
/// Checked before the extended family: `CSM0D502` also contains the
/// extended-family marker substring and must land here.
const STANDARD_CODES: [&str; 2] = ["CSM0D502", "CS000"];

/// Substring marking the extended instrument family
const EXTENDED_MARKER: &str = "M0D50";

/// Exact extended-family code that does not carry the marker substring
const EXTENDED_CODE: &str = "CSeXact_Advanced009489M0-NPD50-2";

/// Classify a `ColorSpecification` code into an instrument family
///
/// Returns `None` for unrecognized codes. Matching is exact and
/// case-sensitive; no trimming is applied.
pub fn classify(code: &str) -> Option<AcquisitionMode> {
    if STANDARD_CODES.contains(&code) {
        Some(AcquisitionMode::Standard)
    } else if code.contains(EXTENDED_MARKER) || code == EXTENDED_CODE {
        Some(AcquisitionMode::Extended)
    } else {
        None
    }
}

/// Whether an explicit Lab record under this code is accepted
///
/// Only the standard family carries authoritative Lab values; Lab records
/// under any other code are dropped.
pub fn accepts_lab(code: &str) -> bool {
    classify(code) == Some(AcquisitionMode::Standard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_codes() {
        assert_eq!(classify("CSM0D502"), Some(AcquisitionMode::Standard));
        assert_eq!(classify("CS000"), Some(AcquisitionMode::Standard));
    }

    #[test]
    fn test_standard_wins_over_marker_substring() {
        // CSM0D502 contains "M0D50" but belongs to the standard family
        assert_eq!(classify("CSM0D502"), Some(AcquisitionMode::Standard));
    }

    #[test]
    fn test_extended_by_marker_substring() {
        assert_eq!(classify("CS002_M0D50_2"), Some(AcquisitionMode::Extended));
        assert_eq!(classify("M0D50"), Some(AcquisitionMode::Extended));
        assert_eq!(
            classify("prefixM0D50suffix"),
            Some(AcquisitionMode::Extended)
        );
    }

    #[test]
    fn test_extended_by_exact_code() {
        assert_eq!(
            classify("CSeXact_Advanced009489M0-NPD50-2"),
            Some(AcquisitionMode::Extended)
        );
    }

    #[test]
    fn test_unrecognized_codes() {
        assert_eq!(classify("CSM2D651"), None);
        assert_eq!(classify(""), None);
        assert_eq!(classify("CSeXact_Advanced009489M0-NPD50-3"), None);
    }

    #[test]
    fn test_classification_is_case_sensitive() {
        assert_eq!(classify("cs000"), None);
        assert_eq!(classify("m0d50"), None);
        assert_eq!(classify("csm0d502"), None);
    }

    #[test]
    fn test_no_trimming() {
        assert_eq!(classify(" CS000"), None);
        assert_eq!(classify("CS000 "), None);
    }

    #[test]
    fn test_lab_acceptance_is_standard_family_only() {
        assert!(accepts_lab("CSM0D502"));
        assert!(accepts_lab("CS000"));
        assert!(!accepts_lab("CS002_M0D50_2"));
        assert!(!accepts_lab("CSeXact_Advanced009489M0-NPD50-2"));
        assert!(!accepts_lab("CSM2D651"));
    }
}
