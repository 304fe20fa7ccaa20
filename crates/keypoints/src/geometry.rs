//! Joint angle geometry

/// Added to the norm product so the cosine never divides by zero.
pub const NORM_EPSILON: f64 = 1e-6;

/// Vectors shorter than this are treated as zero-length.
const ZERO_LENGTH: f64 = 1e-9;

/// Angle returned when either arm of the angle has zero length.
pub const DEGENERATE_ANGLE: f64 = 0.0;

/// Angle at vertex `b` formed by `a` and `c`, in degrees within [0, 180].
///
/// Both arms must have a length: if `a` or `c` coincides with `b` (or any
/// coordinate is non-finite) the result is [`DEGENERATE_ANGLE`] rather than
/// a NaN. Downstream, 0 degrees satisfies every "less than" threshold, so a
/// collapsed limb reads as fully flexed.
///
/// ```
/// use keypoints::compute_angle;
///
/// let angle = compute_angle([1.0, 0.0], [0.0, 0.0], [0.0, 1.0]);
/// assert!((angle - 90.0).abs() < 1e-3);
/// ```
pub fn compute_angle<const N: usize>(a: [f64; N], b: [f64; N], c: [f64; N]) -> f64 {
    let mut dot = 0.0;
    let mut ba_sq = 0.0;
    let mut bc_sq = 0.0;

    for i in 0..N {
        let ba = a[i] - b[i];
        let bc = c[i] - b[i];
        dot += ba * bc;
        ba_sq += ba * ba;
        bc_sq += bc * bc;
    }

    let ba_norm = ba_sq.sqrt();
    let bc_norm = bc_sq.sqrt();

    if !(dot.is_finite() && ba_norm.is_finite() && bc_norm.is_finite()) {
        return DEGENERATE_ANGLE;
    }
    if ba_norm < ZERO_LENGTH || bc_norm < ZERO_LENGTH {
        return DEGENERATE_ANGLE;
    }

    let cosine = (dot / (ba_norm * bc_norm + NORM_EPSILON)).clamp(-1.0, 1.0);
    cosine.acos().to_degrees()
}
