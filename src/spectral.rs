//! Spectral curve normalization
//!
//! Native reflectance curves from the two supported instrument families
//! cover only part of the canonical wavelength grid: standard-mode curves
//! span 440-600nm and extended-mode curves 420-630nm. Normalization
//! reconstructs the full-range curve by padding the missing band edges with
//! zero reflectance, after which every curve is one value per canonical
//! band.

use crate::error::{Error, Result};
use crate::model::AcquisitionMode;

/// Number of bands in the canonical wavelength grid
pub const BAND_COUNT: usize = 36;

/// First wavelength of the canonical grid, in nanometers
pub const START_WAVELENGTH_NM: u32 = 380;

/// Spacing between canonical bands, in nanometers
pub const WAVELENGTH_STEP_NM: u32 = 10;

/// Leading and trailing zero bands for standard-mode curves (17 native bands)
const STANDARD_PADDING: (usize, usize) = (6, 13);

/// Leading and trailing zero bands for extended-mode curves (22 native bands)
const EXTENDED_PADDING: (usize, usize) = (4, 10);

/// Pad a native reflectance curve out to the canonical grid
///
/// Parses each decimal string to f64 and surrounds the curve with the
/// zero-reflectance bands its acquisition mode dictates. The padding counts
/// are a property of the instrument family, not configurable per call.
///
/// A non-numeric sample is a fatal error for the curve: malformed numeric
/// text indicates a corrupt document and conversion cannot meaningfully
/// proceed. The total length is not checked here; the converter rejects
/// curves that do not land on exactly [`BAND_COUNT`] bands.
pub fn normalize(samples: &[String], mode: AcquisitionMode) -> Result<Vec<f64>> {
    let (lead, trail) = match mode {
        AcquisitionMode::Standard => STANDARD_PADDING,
        AcquisitionMode::Extended => EXTENDED_PADDING,
    };

    let mut bands = vec![0.0; lead];
    bands.reserve(samples.len() + trail);
    for sample in samples {
        let value: f64 = sample
            .parse()
            .map_err(|_| Error::numeric_format("reflectance value", sample))?;
        bands.push(value);
    }
    bands.resize(bands.len() + trail, 0.0);
    Ok(bands)
}
