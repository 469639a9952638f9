//! # libcxf
//!
//! A pure Rust parser and colorimetry pipeline for CxF3 (Color Exchange
//! Format) documents.
//!
//! This library reads the XML interchange format produced by
//! spectrophotometers and color tools, extracts named color samples
//! (spectral reflectance curves and explicit CIELab values), and converts
//! them to device-independent Lab plus display-ready sRGB.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Streaming XML extraction, tolerant of namespace prefixes
//! - Classification of instrument specification codes into standard and
//!   extended acquisition families
//! - Zero-padding of native instrument ranges onto the canonical
//!   380-730nm/10nm grid
//! - Spectral integration under the CIE 1931 2° observer and D50 illuminant
//! - Lab to sRGB display conversion with Bradford chromatic adaptation
//! - Deterministic, name-sorted results
//!
//! ## Example
//!
//! ```no_run
//! use libcxf::resolve_file;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let samples = resolve_file("swatches.cxf")?;
//!
//! for sample in &samples {
//!     println!("{} -> Lab({}) {}", sample.name, sample.lab, sample.rgb.to_hex());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Documents parse into an intermediate [`Document`] when the record maps
//! or extraction statistics are of interest:
//!
//! ```no_run
//! use libcxf::Document;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = Document::from_file("swatches.cxf")?;
//! println!(
//!     "{} samples, {} unrecognized records",
//!     doc.sample_count(),
//!     doc.stats.unrecognized_specifications
//! );
//! let samples = doc.resolve()?;
//! # let _ = samples;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod colorimetry;
pub mod error;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod spectral;
pub mod specification;

pub use colorimetry::{lab_to_rgb, rgb_to_lab, spectrum_to_lab, spectrum_to_xyz, xyz_to_lab};
pub use error::{Error, Result};
pub use model::{
    AcquisitionMode, ColorName, Document, ExtractionStats, LabColor, ReflectanceRecord,
    ResolvedSample, RgbColor,
};
pub use parser::parse_document;
pub use resolver::resolve;
pub use specification::{accepts_lab, classify};

use std::fs;
use std::io::Read;
use std::path::Path;

impl Document {
    /// Parse a CxF document from a reader
    ///
    /// # Example
    ///
    /// ```no_run
    /// use libcxf::Document;
    /// use std::fs::File;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let file = File::open("swatches.cxf")?;
    /// let doc = Document::from_reader(file)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut xml = String::new();
        reader.read_to_string(&mut xml)?;
        parser::parse_document(&xml)
    }

    /// Parse a CxF document from a `.cxf` file on disk
    ///
    /// The extension check is case-insensitive; any other extension is
    /// rejected before the file is opened.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let is_cxf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("cxf"));
        if !is_cxf {
            return Err(Error::invalid_path(path));
        }
        let xml = fs::read_to_string(path)?;
        parser::parse_document(&xml)
    }

    /// Resolve all extracted samples to name, Lab and RGB triples
    ///
    /// See [`resolver::resolve`] for the precedence and failure rules.
    pub fn resolve(&self) -> Result<Vec<ResolvedSample>> {
        resolver::resolve(self)
    }
}

/// Parse a `.cxf` file and resolve its samples in one call
pub fn resolve_file(path: impl AsRef<Path>) -> Result<Vec<ResolvedSample>> {
    Document::from_file(path)?.resolve()
}
