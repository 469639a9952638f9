//! Error types for CXF color document processing
//!
//! This module provides error handling for every stage of the pipeline, from
//! reading a `.cxf` file through spectral conversion. All errors include
//! error codes for categorization and enough context to identify the failing
//! document or sample.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O and input errors
//! - **E2xxx**: XML parsing and structure errors
//! - **E3xxx**: Spectral and colorimetric data errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error reading file
//! - `E1002`: Path is not a `.cxf` document
//! - `E2001`: XML parsing error
//! - `E2002`: XML attribute error
//! - `E2003`: Invalid document structure
//! - `E3001`: Invalid spectrum length
//! - `E3002`: Numeric parse error

use std::io;
use thiserror::Error;

/// Result type for CXF operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when processing CXF documents
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading the document
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - File not found
    /// - Insufficient permissions
    /// - Disk read error
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// Path does not name a CXF document
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - Wrong file dropped onto the application
    /// - Missing or misspelled `.cxf` suffix
    ///
    /// **Suggestions**:
    /// - The suffix check is case-insensitive; `.CXF` is accepted
    #[error("[E1002] Invalid path: {0}")]
    InvalidPath(String),

    /// XML parsing error
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Malformed XML syntax
    /// - Invalid character encoding
    /// - Unclosed tags
    #[error("[E2001] XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error
    ///
    /// **Error Code**: E2002
    ///
    /// **Common Causes**:
    /// - Duplicate attribute
    /// - Invalid attribute syntax
    #[error("[E2002] XML attribute error: {0}")]
    XmlAttr(String),

    /// Invalid document structure
    ///
    /// **Error Code**: E2003
    ///
    /// **Common Causes**:
    /// - Root element is not `CxF`
    /// - DTD declaration present (rejected for security)
    /// - Non-UTF-8 element or attribute names
    ///
    /// **Suggestions**:
    /// - Verify the file is a CXF3 export, not some other XML dialect
    #[error("[E2003] Invalid CXF document: {0}")]
    InvalidDocument(String),

    /// Reflectance curve has the wrong number of bands
    ///
    /// **Error Code**: E3001
    ///
    /// **Common Causes**:
    /// - Truncated or padded spectrum text in the document
    /// - A curve recorded by an instrument this library does not model
    ///
    /// **Suggestions**:
    /// - Standard-mode curves carry 17 native bands, extended-mode 22;
    ///   anything else cannot be aligned with the 380-730nm grid
    #[error("[E3001] Invalid spectrum: {0}")]
    InvalidSpectrum(String),

    /// Parse error for numeric values
    ///
    /// **Error Code**: E3002
    ///
    /// **Common Causes**:
    /// - Invalid number format
    /// - Non-numeric characters in reflectance or Lab fields
    ///
    /// **Suggestions**:
    /// - Verify numeric values use proper format (e.g., "1.5" not "1,5")
    /// - Check for special characters or extra whitespace
    #[error("[E3002] Numeric parse error: {0}")]
    NumericFormat(String),
}

impl From<std::num::ParseFloatError> for Error {
    fn from(err: std::num::ParseFloatError) -> Self {
        Error::NumericFormat(format!("Failed to parse floating-point number: {}", err))
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttr(format!("Attribute parsing failed: {}", err))
    }
}

impl Error {
    /// Create an InvalidPath error for a path missing the `.cxf` suffix
    ///
    /// # Arguments
    /// * `path` - The offending path, as displayed to the user
    pub fn invalid_path(path: impl AsRef<std::path::Path>) -> Self {
        Error::InvalidPath(format!(
            "expected a '.cxf' file, got '{}'",
            path.as_ref().display()
        ))
    }

    /// Create a NumericFormat error with context about what was being parsed
    ///
    /// # Arguments
    /// * `field` - The name of the field being parsed (e.g., "reflectance value")
    /// * `value` - The value that failed to parse
    ///
    /// # Example
    /// ```ignore
    /// Error::numeric_format("reflectance value", "abc")
    /// ```
    pub fn numeric_format(field: &str, value: &str) -> Self {
        Error::NumericFormat(format!(
            "Failed to parse '{}': expected a real number, got '{}'. \
             Verify the value is properly formatted.",
            field, value
        ))
    }

    /// Attach the owning sample name to a spectral or numeric error
    ///
    /// Resolution aborts on the first such failure; the message must name the
    /// sample so a corrupt document can be traced. Other variants pass
    /// through unchanged.
    pub fn in_sample(self, name: &str) -> Self {
        match self {
            Error::NumericFormat(msg) => {
                Error::NumericFormat(format!("sample '{}': {}", name, msg))
            }
            Error::InvalidSpectrum(msg) => {
                Error::InvalidSpectrum(format!("sample '{}': {}", name, msg))
            }
            other => other,
        }
    }
}
