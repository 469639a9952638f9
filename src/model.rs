//! Data model for CXF color documents
//!
//! The types here mirror the two record streams a CXF3 document can carry
//! per named color object (reflectance spectra and explicit CIE Lab values)
//! plus the resolved output handed to a presentation layer.

use std::collections::BTreeMap;
use std::fmt;

/// Unique sample identifier within one document
///
/// Used as the join key across reflectance and Lab records. Case-sensitive
/// and whitespace-preserving.
pub type ColorName = String;

/// Instrument family classification for a document's reflectance curves
///
/// Determines how many zero-reflectance bands must be added to align a
/// native curve with the canonical 380-730nm grid. The mode is a
/// document-level setting: the first reflectance record matching an accepted
/// specification code fixes it for every curve in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionMode {
    /// Standard instrument family, native curves cover 440-600nm (17 bands)
    Standard,
    /// Extended instrument family, native curves cover 420-630nm (22 bands)
    Extended,
}

impl fmt::Display for AcquisitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquisitionMode::Standard => write!(f, "standard"),
            AcquisitionMode::Extended => write!(f, "extended"),
        }
    }
}

/// One reflectance curve as given in the document
///
/// The samples are kept as the document's decimal strings; parsing to f64
/// happens during normalization so a malformed value can be reported with
/// its sample name.
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectanceRecord {
    /// Name of the color object carrying this curve
    pub name: ColorName,
    /// The `ColorSpecification` code the curve was recorded under
    pub specification: String,
    /// Whitespace-separated reflectance values, in document order
    pub samples: Vec<String>,
}

/// CIE 1976 L*a*b* color
///
/// Not clamped: L is nominally in [0,100] and a/b near ±128, but
/// out-of-gamut values are legal outputs of spectral conversion and must be
/// preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabColor {
    /// Lightness
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl LabColor {
    /// Create a Lab color from its three coordinates
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

impl fmt::Display for LabColor {
    /// Two decimal places, the convention used by result tables and exports
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}, {:.2}, {:.2}", self.l, self.a, self.b)
    }
}

/// Display approximation of a [`LabColor`], always clamped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl RgbColor {
    /// Create an RGB color from its three channels
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Render as a `#RRGGBB` hex string for swatch display
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Final output unit: one resolved color sample
///
/// Produced for every sample with either a valid explicit Lab record or a
/// usable reflectance record. `rgb` is always derived from `lab`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSample {
    /// Sample name from the document
    pub name: ColorName,
    /// Canonical Lab value (explicit, or derived from reflectance)
    pub lab: LabColor,
    /// Clamped display approximation of `lab`
    pub rgb: RgbColor,
}

impl fmt::Display for ResolvedSample {
    /// Tab-separated export line: name, L, a, b (2 decimals), hex swatch
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{:.2}\t{:.2}\t{:.2}\t{}",
            self.name,
            self.lab.l,
            self.lab.a,
            self.lab.b,
            self.rgb.to_hex()
        )
    }
}

/// Per-record extraction outcome counters
///
/// CXF documents legitimately mix supported and unsupported measurement
/// families; these counters make the classification behavior observable
/// instead of silently dropping records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Reflectance records accepted under a recognized specification code
    pub reflectance_records: usize,
    /// Lab records accepted under a standard-family code
    pub lab_records: usize,
    /// Records ignored because their code matches neither family
    pub unrecognized_specifications: usize,
    /// Lab records dropped for a missing or non-numeric L/A/B field
    pub malformed_lab_records: usize,
}

/// Extracted contents of one CXF document
///
/// Holds the two per-name record mappings, the document-global acquisition
/// mode, and extraction statistics. At most one record of each kind survives
/// per name (later accepted entries overwrite earlier ones).
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Declared namespace of the `CxF` root element, when present
    pub namespace: Option<String>,
    /// Accepted reflectance records, keyed by sample name
    pub reflectance: BTreeMap<ColorName, ReflectanceRecord>,
    /// Accepted explicit Lab records, keyed by sample name
    pub lab: BTreeMap<ColorName, LabColor>,
    /// Document-global mode from the first accepted reflectance record
    pub mode: Option<AcquisitionMode>,
    /// Per-record classification counters
    pub stats: ExtractionStats,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            namespace: None,
            reflectance: BTreeMap::new(),
            lab: BTreeMap::new(),
            mode: None,
            stats: ExtractionStats::default(),
        }
    }

    /// Number of distinct sample names across both record mappings
    pub fn sample_count(&self) -> usize {
        let mut names: std::collections::BTreeSet<&ColorName> =
            self.reflectance.keys().collect();
        names.extend(self.lab.keys());
        names.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex_formatting() {
        assert_eq!(RgbColor::new(255, 0, 6).to_hex(), "#FF0006");
        assert_eq!(RgbColor::new(0, 0, 0).to_hex(), "#000000");
        assert_eq!(RgbColor::new(215, 29, 37).to_string(), "#D71D25");
    }

    #[test]
    fn test_lab_display_two_decimals() {
        let lab = LabColor::new(47.2849, 68.1, -0.005);
        assert_eq!(lab.to_string(), "47.28, 68.10, -0.01");
    }

    #[test]
    fn test_resolved_sample_export_line() {
        let sample = ResolvedSample {
            name: "Ruby Red".to_string(),
            lab: LabColor::new(47.28, 68.11, 47.49),
            rgb: RgbColor::new(215, 29, 37),
        };
        assert_eq!(sample.to_string(), "Ruby Red\t47.28\t68.11\t47.49\t#D71D25");
    }

    #[test]
    fn test_new_document_is_empty() {
        let doc = Document::new();
        assert!(doc.reflectance.is_empty());
        assert!(doc.lab.is_empty());
        assert_eq!(doc.mode, None);
        assert_eq!(doc.sample_count(), 0);
        assert_eq!(doc.stats, ExtractionStats::default());
    }

    #[test]
    fn test_sample_count_unions_names() {
        let mut doc = Document::new();
        doc.reflectance.insert(
            "A".to_string(),
            ReflectanceRecord {
                name: "A".to_string(),
                specification: "CSM0D502".to_string(),
                samples: vec!["0.5".to_string()],
            },
        );
        doc.lab
            .insert("A".to_string(), LabColor::new(50.0, 0.0, 0.0));
        doc.lab
            .insert("B".to_string(), LabColor::new(60.0, 1.0, -1.0));
        assert_eq!(doc.sample_count(), 2);
    }
}
