//! Colorimetric conversion
//!
//! Spectral reflectance to CIE Lab through the standard tristimulus path
//! (CIE 1931 2° observer, D50 illuminant), and the display path from Lab to
//! clamped 8-bit sRGB. All operations are deterministic pure functions over
//! `f64` with no shared state.
//!
//! The spectral tables cover the canonical 380-730nm grid at 10nm intervals
//! (36 values). Lab is D50-referred, matching the instrument codes the
//! extractor accepts; the display path bridges to the D65-referred sRGB
//! matrix with a Bradford chromatic adaptation.

use crate::error::{Error, Result};
use crate::model::{LabColor, RgbColor};
use crate::spectral::BAND_COUNT;

// ============================================================================
// CIE data tables (380-730nm at 10nm intervals, 36 values)
// ============================================================================

/// CIE 1931 2° x̄(λ) color matching function
const CMF_X: [f64; BAND_COUNT] = [
    0.001368, 0.004243, 0.014310, 0.043510, 0.134380, 0.283900, 0.348280, 0.336200, 0.290800,
    0.195360, 0.095640, 0.032010, 0.004900, 0.009300, 0.063270, 0.165500, 0.290400, 0.433450,
    0.594500, 0.762100, 0.916300, 1.026300, 1.062200, 1.002600, 0.854450, 0.642400, 0.447900,
    0.283500, 0.164900, 0.087400, 0.046770, 0.022700, 0.011359, 0.005790, 0.002899, 0.001440,
];

/// CIE 1931 2° ȳ(λ) color matching function
const CMF_Y: [f64; BAND_COUNT] = [
    0.000039, 0.000120, 0.000396, 0.001210, 0.004000, 0.011600, 0.023000, 0.038000, 0.060000,
    0.090980, 0.139020, 0.208020, 0.323000, 0.503000, 0.710000, 0.862000, 0.954000, 0.994950,
    0.995000, 0.952000, 0.870000, 0.757000, 0.631000, 0.503000, 0.381000, 0.265000, 0.175000,
    0.107000, 0.061000, 0.032000, 0.017000, 0.008210, 0.004102, 0.002091, 0.001047, 0.000520,
];

/// CIE 1931 2° z̄(λ) color matching function
const CMF_Z: [f64; BAND_COUNT] = [
    0.006450, 0.020050, 0.067850, 0.207400, 0.645600, 1.385600, 1.747060, 1.772110, 1.669200,
    1.287640, 0.812950, 0.465180, 0.272000, 0.158200, 0.078250, 0.042160, 0.020300, 0.008750,
    0.003900, 0.002100, 0.001650, 0.001100, 0.000800, 0.000340, 0.000190, 0.000050, 0.000020,
    0.000000, 0.000000, 0.000000, 0.000000, 0.000000, 0.000000, 0.000000, 0.000000, 0.000000,
];

/// CIE standard illuminant D50, relative spectral power distribution
const D50_SPD: [f64; BAND_COUNT] = [
    24.49, 29.87, 49.31, 56.51, 60.03, 57.82, 74.82, 87.25, 90.61, 91.37, 95.11, 91.96, 95.72,
    96.61, 97.13, 102.10, 100.75, 102.32, 100.00, 97.74, 98.92, 93.50, 97.69, 99.27, 99.04, 95.72,
    98.86, 95.67, 98.19, 103.00, 99.13, 87.38, 91.60, 92.89, 76.85, 86.51,
];

// ============================================================================
// White points and transform matrices
// ============================================================================

/// D50 reference white tristimulus values (Y = 1)
const D50_WHITE: [f64; 3] = [0.96422, 1.0, 0.82521];

/// XYZ (D65) to linear sRGB matrix (IEC 61966-2-1)
const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// Linear sRGB to XYZ (D65) matrix
const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// Bradford chromatic adaptation, D50 to D65
const D50_TO_D65: [[f64; 3]; 3] = [
    [0.9555766, -0.0230393, 0.0631636],
    [-0.0282895, 1.0099416, 0.0210077],
    [0.0122982, -0.0204830, 1.3299098],
];

/// Bradford chromatic adaptation, D65 to D50
const D65_TO_D50: [[f64; 3]; 3] = [
    [1.0478112, 0.0228866, -0.0501270],
    [0.0295424, 0.9904844, -0.0170491],
    [-0.0092345, 0.0150436, 0.7521316],
];

/// CIE Lab transfer threshold, δ = 6/29
const LAB_DELTA: f64 = 6.0 / 29.0;

fn mat_mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

// ============================================================================
// Spectral integration
// ============================================================================

/// Integrate a normalized reflectance curve to CIE XYZ
///
/// Sums reflectance × D50 power × color matching function per band,
/// normalized by Σ(ȳ·S) so a perfect reflector yields Y = 1. Rejects any
/// curve that is not exactly [`BAND_COUNT`] bands; the normalizer's padding
/// arithmetic must land on the canonical grid.
pub fn spectrum_to_xyz(bands: &[f64]) -> Result<[f64; 3]> {
    if bands.len() != BAND_COUNT {
        return Err(Error::InvalidSpectrum(format!(
            "expected {} bands, got {}",
            BAND_COUNT,
            bands.len()
        )));
    }

    let mut x = 0.0;
    let mut y = 0.0;
    let mut z = 0.0;
    let mut norm = 0.0;
    for (i, &band) in bands.iter().enumerate() {
        let power = D50_SPD[i];
        norm += power * CMF_Y[i];
        x += band * power * CMF_X[i];
        y += band * power * CMF_Y[i];
        z += band * power * CMF_Z[i];
    }

    let k = 1.0 / norm;
    Ok([x * k, y * k, z * k])
}

/// Convert a normalized reflectance curve to CIE Lab
///
/// The composition of [`spectrum_to_xyz`] and [`xyz_to_lab`]. No clamping:
/// L may leave [0,100] and a/b may fall outside ±128 on pathological
/// curves, and such values are preserved.
pub fn spectrum_to_lab(bands: &[f64]) -> Result<LabColor> {
    Ok(xyz_to_lab(spectrum_to_xyz(bands)?))
}

// ============================================================================
// CIE Lab
// ============================================================================

fn lab_f(t: f64) -> f64 {
    if t > LAB_DELTA * LAB_DELTA * LAB_DELTA {
        t.cbrt()
    } else {
        t / (3.0 * LAB_DELTA * LAB_DELTA) + 4.0 / 29.0
    }
}

fn lab_f_inv(f: f64) -> f64 {
    if f > LAB_DELTA {
        f * f * f
    } else {
        3.0 * LAB_DELTA * LAB_DELTA * (f - 4.0 / 29.0)
    }
}

/// Convert CIE XYZ to CIE Lab against the D50 reference white
pub fn xyz_to_lab(xyz: [f64; 3]) -> LabColor {
    let fx = lab_f(xyz[0] / D50_WHITE[0]);
    let fy = lab_f(xyz[1] / D50_WHITE[1]);
    let fz = lab_f(xyz[2] / D50_WHITE[2]);
    LabColor::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// Convert CIE Lab back to CIE XYZ against the D50 reference white
pub fn lab_to_xyz(lab: LabColor) -> [f64; 3] {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;
    [
        D50_WHITE[0] * lab_f_inv(fx),
        lab_f_inv(fy),
        D50_WHITE[2] * lab_f_inv(fz),
    ]
}

// ============================================================================
// sRGB display path
// ============================================================================

/// sRGB opto-electronic transfer function (linear to encoded)
///
/// The linear segment below the threshold also carries negative inputs,
/// which arise for out-of-gamut colors ahead of clamping.
#[inline]
pub fn srgb_oetf(l: f64) -> f64 {
    if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// sRGB electro-optical transfer function (encoded to linear)
#[inline]
pub fn srgb_eotf(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Gamma-encode one linear channel and quantize to 8 bits
///
/// Clamping runs per channel after the full transform; the cast truncates
/// rather than rounds.
fn encode_channel(linear: f64) -> u8 {
    let scaled = srgb_oetf(linear) * 255.0;
    scaled.clamp(0.0, 255.0) as u8
}

/// Convert CIE Lab to a clamped 8-bit sRGB triplet
///
/// Lab → XYZ (D50) → Bradford adaptation to D65 → linear sRGB → gamma
/// encoding → [0,255] with truncation. Out-of-gamut Lab values commonly
/// produce pre-clamp channels outside the displayable range; each channel
/// saturates independently at 0 or 255.
pub fn lab_to_rgb(lab: LabColor) -> RgbColor {
    let xyz_d65 = mat_mul(&D50_TO_D65, lab_to_xyz(lab));
    let linear = mat_mul(&XYZ_TO_SRGB, xyz_d65);
    RgbColor::new(
        encode_channel(linear[0]),
        encode_channel(linear[1]),
        encode_channel(linear[2]),
    )
}

/// Convert an 8-bit sRGB triplet to CIE Lab (D50-referred)
///
/// The inverse display transform: decode gamma, apply the sRGB matrix,
/// adapt D65 back to D50, then [`xyz_to_lab`]. Useful for validating the
/// display path; quantization to 8 bits means round trips recover Lab only
/// to within about one unit.
pub fn rgb_to_lab(rgb: RgbColor) -> LabColor {
    let linear = [
        srgb_eotf(rgb.r as f64 / 255.0),
        srgb_eotf(rgb.g as f64 / 255.0),
        srgb_eotf(rgb.b as f64 / 255.0),
    ];
    let xyz_d65 = mat_mul(&SRGB_TO_XYZ, linear);
    let xyz_d50 = mat_mul(&D65_TO_D50, xyz_d65);
    xyz_to_lab(xyz_d50)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AcquisitionMode;
    use crate::spectral::normalize;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_perfect_reflector_is_near_neutral() {
        let bands = [1.0; BAND_COUNT];
        let lab = spectrum_to_lab(&bands).unwrap();
        // Y normalizes to exactly 1; a/b carry the truncated-grid residual
        // against the published D50 white point
        assert_abs_diff_eq!(lab.l, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lab.a, -0.065253, epsilon = 1e-4);
        assert_abs_diff_eq!(lab.b, 0.055577, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_spectrum_is_black() {
        let bands = [0.0; BAND_COUNT];
        let lab = spectrum_to_lab(&bands).unwrap();
        assert_abs_diff_eq!(lab.l, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lab.a, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lab.b, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_wrong_band_count_rejected() {
        for len in [0, 17, 22, 35, 37] {
            let bands = vec![0.5; len];
            let err = spectrum_to_lab(&bands).unwrap_err();
            assert!(matches!(err, Error::InvalidSpectrum(_)));
            assert!(err.to_string().contains(&format!("got {}", len)));
        }
    }

    #[test]
    fn test_standard_mode_reference_curve() {
        let samples: Vec<String> = [
            "0.052", "0.051", "0.053", "0.058", "0.063", "0.071", "0.089", "0.132", "0.201",
            "0.312", "0.462", "0.608", "0.713", "0.771", "0.801", "0.818", "0.826",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let bands = normalize(&samples, AcquisitionMode::Standard).unwrap();
        let lab = spectrum_to_lab(&bands).unwrap();

        assert_abs_diff_eq!(lab.l, 73.37211601309961, epsilon = 1e-9);
        assert_abs_diff_eq!(lab.a, -21.529225031280074, epsilon = 1e-9);
        assert_abs_diff_eq!(lab.b, 78.4794204284185, epsilon = 1e-9);
        assert_eq!(lab_to_rgb(lab), RgbColor::new(169, 189, 0));
    }

    #[test]
    fn test_extended_mode_reference_curve() {
        let samples: Vec<String> = [
            "0.295", "0.342", "0.378", "0.402", "0.411", "0.394", "0.353", "0.296", "0.231",
            "0.169", "0.119", "0.086", "0.067", "0.057", "0.052", "0.050", "0.049", "0.049",
            "0.050", "0.052", "0.055", "0.059",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let bands = normalize(&samples, AcquisitionMode::Extended).unwrap();
        let lab = spectrum_to_lab(&bands).unwrap();

        assert_abs_diff_eq!(lab.l, 34.80494576549559, epsilon = 1e-9);
        assert_abs_diff_eq!(lab.a, 6.673055819391177, epsilon = 1e-9);
        assert_abs_diff_eq!(lab.b, -54.20766070775373, epsilon = 1e-9);
        assert_eq!(lab_to_rgb(lab), RgbColor::new(0, 81, 169));
    }

    #[test]
    fn test_lab_to_rgb_known_values() {
        assert_eq!(
            lab_to_rgb(LabColor::new(0.0, 0.0, 0.0)),
            RgbColor::new(0, 0, 0)
        );
        // Truncation leaves the red channel one short of full white
        assert_eq!(
            lab_to_rgb(LabColor::new(100.0, 0.0, 0.0)),
            RgbColor::new(254, 255, 255)
        );
        assert_eq!(
            lab_to_rgb(LabColor::new(50.0, 0.0, 0.0)),
            RgbColor::new(118, 118, 118)
        );
        assert_eq!(
            lab_to_rgb(LabColor::new(47.28, 68.11, 47.49)),
            RgbColor::new(215, 29, 37)
        );
    }

    #[test]
    fn test_clamping_saturates_at_bounds() {
        // Saturated synthetic Lab drives channels far outside [0,255]
        let high = lab_to_rgb(LabColor::new(100.0, 127.0, 127.0));
        assert_eq!(high, RgbColor::new(255, 67, 0));

        let low = lab_to_rgb(LabColor::new(100.0, -128.0, 127.0));
        assert_eq!(low, RgbColor::new(0, 255, 0));
    }

    #[test]
    fn test_lab_to_rgb_is_pure() {
        let lab = LabColor::new(61.7, 12.3, -45.6);
        assert_eq!(lab_to_rgb(lab), lab_to_rgb(lab));
    }

    #[test]
    fn test_display_round_trip_recovers_in_gamut_red() {
        let lab = LabColor::new(53.23, 80.11, 67.22);
        let rgb = lab_to_rgb(lab);
        assert_eq!(rgb, RgbColor::new(250, 0, 6));

        let back = rgb_to_lab(rgb);
        assert_abs_diff_eq!(back.l, lab.l, epsilon = 1.0);
        assert_abs_diff_eq!(back.a, lab.a, epsilon = 1.0);
        assert_abs_diff_eq!(back.b, lab.b, epsilon = 1.0);
    }

    #[test]
    fn test_display_round_trip_recovers_mid_gamut() {
        let lab = LabColor::new(50.0, 20.0, 10.0);
        let back = rgb_to_lab(lab_to_rgb(lab));
        assert_abs_diff_eq!(back.l, lab.l, epsilon = 1.0);
        assert_abs_diff_eq!(back.a, lab.a, epsilon = 1.0);
        assert_abs_diff_eq!(back.b, lab.b, epsilon = 1.0);
    }

    #[test]
    fn test_xyz_lab_inverse() {
        for xyz in [
            [0.2, 0.3, 0.1],
            [0.96422, 1.0, 0.82521],
            [0.001, 0.002, 0.0005],
            [0.0, 0.0, 0.0],
        ] {
            let back = lab_to_xyz(xyz_to_lab(xyz));
            assert_abs_diff_eq!(back[0], xyz[0], epsilon = 1e-12);
            assert_abs_diff_eq!(back[1], xyz[1], epsilon = 1e-12);
            assert_abs_diff_eq!(back[2], xyz[2], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_srgb_transfer_inverse() {
        for v in [0.0, 0.001, 0.0031308, 0.02, 0.18, 0.5, 0.99, 1.0] {
            assert_abs_diff_eq!(srgb_eotf(srgb_oetf(v)), v, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_srgb_oetf_linear_segment_handles_negatives() {
        assert_abs_diff_eq!(srgb_oetf(-0.001), -0.01292, epsilon = 1e-12);
        assert!(srgb_oetf(-0.5) < 0.0);
    }
}
