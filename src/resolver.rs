//! Sample resolution
//!
//! Merges the extracted record maps into the final per-sample color list.
//! An explicit Lab record takes precedence over a reflectance record for the
//! same name; the parser already applied last-wins within each kind. Output
//! is sorted by sample name.

use crate::colorimetry::{lab_to_rgb, spectrum_to_lab};
use crate::error::{Error, Result};
use crate::model::{Document, ResolvedSample};
use crate::spectral::normalize;
use std::collections::BTreeSet;

/// Resolve every extracted sample to a name, Lab and RGB triple
///
/// Samples carrying only a reflectance record are normalized under the
/// document's acquisition mode and converted through XYZ; samples carrying
/// an explicit Lab record use it directly and their spectral data, if any,
/// is never evaluated. A numeric or band-count failure in any required
/// spectrum aborts the whole resolution, with the sample name attached to
/// the error. An empty document resolves to an empty list.
pub fn resolve(document: &Document) -> Result<Vec<ResolvedSample>> {
    let names: BTreeSet<&String> = document
        .reflectance
        .keys()
        .chain(document.lab.keys())
        .collect();

    let mut resolved = Vec::with_capacity(names.len());
    for name in names {
        let lab = match document.lab.get(name) {
            Some(&lab) => lab,
            None => {
                let record = &document.reflectance[name];
                let mode = document.mode.ok_or_else(|| {
                    Error::InvalidDocument(
                        "reflectance records present but no acquisition mode was established"
                            .to_string(),
                    )
                })?;
                let bands = normalize(&record.samples, mode).map_err(|e| e.in_sample(name))?;
                spectrum_to_lab(&bands).map_err(|e| e.in_sample(name))?
            }
        };
        resolved.push(ResolvedSample {
            name: name.clone(),
            lab,
            rgb: lab_to_rgb(lab),
        });
    }

    Ok(resolved)
}
