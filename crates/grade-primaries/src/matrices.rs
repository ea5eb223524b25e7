//! Named color space matrices.
//!
//! All matrices are row-major and act on column vectors. The first block
//! holds published coefficients; the second block composes them.

use grade_math::Mat3;

// ============================================================================
// Literal Matrices
// ============================================================================

/// Linear sRGB to XYZ (D65).
pub const SRGB_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
]);

/// XYZ (D65) to linear sRGB.
pub const XYZ_TO_SRGB: Mat3 = Mat3::from_rows([
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
]);

/// Linear Rec.2020 to XYZ (D65).
pub const REC2020_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.6369580, 0.1446169, 0.1688810],
    [0.2627002, 0.6779981, 0.0593017],
    [0.0000000, 0.0280727, 1.0609851],
]);

/// XYZ (D65) to linear Rec.2020.
pub const XYZ_TO_REC2020: Mat3 = Mat3::from_rows([
    [1.7166512, -0.3556708, -0.2533663],
    [-0.6666844, 1.6164812, 0.0157685],
    [0.0176399, -0.0427706, 0.9421031],
]);

/// ACES AP0 to XYZ.
pub const AP0_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.9525523959, 0.0000000000, 0.0000936786],
    [0.3439664498, 0.7281660966, -0.0721325464],
    [0.0000000000, 0.0000000000, 1.0088251844],
]);

/// XYZ to ACES AP0.
pub const XYZ_TO_AP0: Mat3 = Mat3::from_rows([
    [1.0498110175, 0.0000000000, -0.0000974845],
    [-0.4959030231, 1.3733130458, 0.0982400361],
    [0.0000000000, 0.0000000000, 0.9912520182],
]);

/// ACES AP1 to XYZ.
pub const AP1_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.6624541811, 0.1340042065, 0.1561876870],
    [0.2722287168, 0.6740817658, 0.0536895174],
    [-0.0055746495, 0.0040607335, 1.0103391003],
]);

/// XYZ to ACES AP1.
pub const XYZ_TO_AP1: Mat3 = Mat3::from_rows([
    [1.6410233797, -0.3248032942, -0.2364246952],
    [-0.6636628587, 1.6153315917, 0.0167563477],
    [0.0117218943, -0.0082844420, 0.9883948585],
]);

/// ACES AP0 to AP1.
pub const AP0_TO_AP1: Mat3 = Mat3::from_rows([
    [1.4514393161, -0.2365107469, -0.2149285693],
    [-0.0765537734, 1.1762296998, -0.0996759264],
    [0.0083161484, -0.0060324498, 0.9977163014],
]);

/// ACES AP1 to AP0.
pub const AP1_TO_AP0: Mat3 = Mat3::from_rows([
    [0.6954522414, 0.1406786965, 0.1638690622],
    [0.0447945634, 0.8596711185, 0.0955343182],
    [-0.0055258826, 0.0040252103, 1.0015006723],
]);

/// XYZ to CIECAT16 cone responses (LMS).
pub const XYZ_TO_CAT16: Mat3 = Mat3::from_rows([
    [0.401288, 0.650173, -0.051461],
    [-0.250268, 1.204414, 0.045854],
    [-0.002079, 0.048952, 0.953127],
]);

/// CIECAT16 cone responses (LMS) to XYZ.
pub const CAT16_TO_XYZ: Mat3 = Mat3::from_rows([
    [1.862068, -1.011255, 0.149187],
    [0.387527, 0.621447, -0.008974],
    [-0.015841, -0.034123, 1.049964],
]);

// ============================================================================
// Compound Matrices
// ============================================================================

/// Linear sRGB to linear Rec.2020.
pub const SRGB_TO_REC2020: Mat3 = XYZ_TO_REC2020.mul_mat(&SRGB_TO_XYZ);

/// Linear Rec.2020 to linear sRGB.
pub const REC2020_TO_SRGB: Mat3 = XYZ_TO_SRGB.mul_mat(&REC2020_TO_XYZ);

/// Linear Rec.2020 to ACES AP0.
pub const REC2020_TO_AP0: Mat3 = XYZ_TO_AP0.mul_mat(&REC2020_TO_XYZ);

/// ACES AP1 to linear Rec.2020.
pub const AP1_TO_REC2020: Mat3 = XYZ_TO_REC2020.mul_mat(&AP1_TO_XYZ);

/// Linear sRGB to ACES AP0.
pub const SRGB_TO_AP0: Mat3 = XYZ_TO_AP0.mul_mat(&SRGB_TO_XYZ);

/// ACES AP1 to linear sRGB.
pub const AP1_TO_SRGB: Mat3 = XYZ_TO_SRGB.mul_mat(&AP1_TO_XYZ);

/// Linear Rec.2020 to CIECAT16 LMS.
pub const REC2020_TO_CAT16: Mat3 = XYZ_TO_CAT16.mul_mat(&REC2020_TO_XYZ);

/// CIECAT16 LMS to linear Rec.2020.
pub const CAT16_TO_REC2020: Mat3 = XYZ_TO_REC2020.mul_mat(&CAT16_TO_XYZ);

/// Linear sRGB to CIECAT16 LMS, for white balancing in the legacy space.
pub const SRGB_TO_CAT16: Mat3 = XYZ_TO_CAT16.mul_mat(&SRGB_TO_XYZ);

/// CIECAT16 LMS to linear sRGB.
pub const CAT16_TO_SRGB: Mat3 = XYZ_TO_SRGB.mul_mat(&CAT16_TO_XYZ);
