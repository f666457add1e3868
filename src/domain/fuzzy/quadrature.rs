//! Numeric integration and root finding for defuzzification.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::NumericError;

/// Subdivisions always performed before the error estimate is trusted.
const MIN_DEPTH: u32 = 4;

/// Tolerances for quadrature and root finding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericSettings {
    pub quadrature_tolerance: f64,
    pub quadrature_max_depth: u32,
    pub root_tolerance: f64,
    pub root_max_iterations: u32,
}

impl Default for NumericSettings {
    fn default() -> Self {
        Self {
            quadrature_tolerance: 1e-10,
            quadrature_max_depth: 48,
            root_tolerance: 1e-12,
            root_max_iterations: 200,
        }
    }
}

/// Integrates `f` over `[a, b]` with adaptive Simpson's rule.
///
/// # Errors
/// - `NumericError::QuadratureDidNotConverge` if a subinterval still misses
///   its tolerance at the maximum depth
/// - `NumericError::NonFinite` if `f` returns NaN or infinity
pub fn integrate<F>(f: &F, a: f64, b: f64, settings: &NumericSettings) -> Result<f64, NumericError>
where
    F: Fn(f64) -> f64,
{
    if a == b {
        return Ok(0.0);
    }
    let (fa, fb) = (f(a), f(b));
    let m = (a + b) / 2.0;
    let fm = f(m);
    let whole = simpson(a, b, fa, fm, fb);
    let value = refine(
        f,
        Segment { a, b, fa, fm, fb, whole },
        settings.quadrature_tolerance,
        0,
        settings,
    )?;
    if !value.is_finite() {
        return Err(NumericError::non_finite("quadrature"));
    }
    Ok(value)
}

/// Integrates `f` piecewise between consecutive `breakpoints` inside `[a, b]`.
///
/// Splitting at kinks keeps each piece smooth and guarantees narrow supports
/// are sampled.
pub fn integrate_piecewise<F>(
    f: &F,
    a: f64,
    b: f64,
    breakpoints: &[f64],
    settings: &NumericSettings,
) -> Result<f64, NumericError>
where
    F: Fn(f64) -> f64,
{
    let mut points: Vec<f64> = breakpoints
        .iter()
        .copied()
        .filter(|x| *x > a && *x < b)
        .collect();
    points.push(a);
    points.push(b);
    points.sort_by(f64::total_cmp);
    points.dedup();

    let pieces = points.len().saturating_sub(1).max(1) as f64;
    let per_piece = NumericSettings {
        quadrature_tolerance: settings.quadrature_tolerance / pieces,
        ..*settings
    };
    points
        .windows(2)
        .map(|w| integrate(f, w[0], w[1], &per_piece))
        .sum()
}

/// Finds a root of `f` in `[lo, hi]` by bisection.
///
/// # Errors
/// - `NumericError::RootNotFound` if the bracket does not change sign or the
///   iteration ceiling is reached
pub fn bisect<F>(
    f: &F,
    mut lo: f64,
    mut hi: f64,
    operation: &str,
    settings: &NumericSettings,
) -> Result<f64, NumericError>
where
    F: Fn(f64) -> f64,
{
    let mut f_lo = f(lo);
    let f_hi = f(hi);
    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if f_lo.signum() == f_hi.signum() {
        return Err(NumericError::RootNotFound {
            operation: operation.to_string(),
            reason: format!("no sign change on [{}, {}]", lo, hi),
        });
    }

    for _ in 0..settings.root_max_iterations {
        let mid = (lo + hi) / 2.0;
        let f_mid = f(mid);
        if f_mid == 0.0 || (hi - lo) / 2.0 <= settings.root_tolerance * mid.abs().max(1.0) {
            return Ok(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Err(NumericError::RootNotFound {
        operation: operation.to_string(),
        reason: format!("not converged after {} iterations", settings.root_max_iterations),
    })
}

#[derive(Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
}

fn simpson(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}

fn refine<F>(
    f: &F,
    seg: Segment,
    tolerance: f64,
    depth: u32,
    settings: &NumericSettings,
) -> Result<f64, NumericError>
where
    F: Fn(f64) -> f64,
{
    let m = (seg.a + seg.b) / 2.0;
    let (lm, rm) = ((seg.a + m) / 2.0, (m + seg.b) / 2.0);
    let (flm, frm) = (f(lm), f(rm));
    let left = simpson(seg.a, m, seg.fa, flm, seg.fm);
    let right = simpson(m, seg.b, seg.fm, frm, seg.fb);
    let delta = left + right - seg.whole;

    if depth >= MIN_DEPTH && delta.abs() <= 15.0 * tolerance {
        return Ok(left + right + delta / 15.0);
    }
    if depth >= settings.quadrature_max_depth {
        return Err(NumericError::QuadratureDidNotConverge {
            tolerance: settings.quadrature_tolerance,
            max_depth: settings.quadrature_max_depth,
        });
    }

    let left_seg = Segment {
        a: seg.a,
        b: m,
        fa: seg.fa,
        fm: flm,
        fb: seg.fm,
        whole: left,
    };
    let right_seg = Segment {
        a: m,
        b: seg.b,
        fa: seg.fm,
        fm: frm,
        fb: seg.fb,
        whole: right,
    };
    Ok(refine(f, left_seg, tolerance / 2.0, depth + 1, settings)?
        + refine(f, right_seg, tolerance / 2.0, depth + 1, settings)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrates_polynomials_exactly() {
        let settings = NumericSettings::default();
        let value = integrate(&|x: f64| x * x, 0.0, 1.0, &settings).unwrap();
        assert!((value - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn piecewise_integration_finds_narrow_support() {
        let settings = NumericSettings::default();
        let spike = |x: f64| if (0.41..=0.43).contains(&x) { 1.0 - (x - 0.42).abs() / 0.01 } else { 0.0 };
        let value = integrate_piecewise(&spike, 0.0, 1.0, &[0.41, 0.42, 0.43], &settings).unwrap();
        assert!((value - 0.01).abs() < 1e-9);
    }

    #[test]
    fn kinked_integrand_converges() {
        let settings = NumericSettings::default();
        let tent = |x: f64| (0.3 - (x - 0.5).abs()).max(0.0);
        let value = integrate(&tent, 0.0, 1.0, &settings).unwrap();
        assert!((value - 0.09).abs() < 1e-8);
    }

    #[test]
    fn shallow_depth_limit_reports_non_convergence() {
        let settings = NumericSettings {
            quadrature_max_depth: 5,
            ..NumericSettings::default()
        };
        assert!(matches!(
            integrate(&f64::sqrt, 0.0, 1.0, &settings),
            Err(NumericError::QuadratureDidNotConverge { max_depth: 5, .. })
        ));
    }

    #[test]
    fn bisection_finds_square_root() {
        let settings = NumericSettings::default();
        let root = bisect(&|x: f64| x * x - 2.0, 0.0, 2.0, "sqrt", &settings).unwrap();
        assert!((root - 2f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn bisection_without_sign_change_fails() {
        let settings = NumericSettings::default();
        assert!(matches!(
            bisect(&|x: f64| x * x + 1.0, -1.0, 1.0, "none", &settings),
            Err(NumericError::RootNotFound { .. })
        ));
    }
}
