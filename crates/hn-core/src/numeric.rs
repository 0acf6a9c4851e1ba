use crate::HnError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, HnError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HnError::NonFinite { what, value: v })
    }
}

/// Stop when the iterate moves less than this between Newton steps.
pub const LAMBERT_STEP_TOL: Real = 1e-8;

/// Generous cap; the physical inputs here keep `x` small enough that the
/// iteration lands in a handful of steps.
pub const LAMBERT_MAX_ITERATIONS: usize = 100;

/// Principal branch of the Lambert W function for `x >= 0`.
///
/// Solves `w * e^w = x` by Newton iteration on `f(w) = w*e^w - x`:
/// `w <- w - (w*e^w - x) / (w*e^w + e^w)`, starting from `w0 = x`.
/// On the non-negative axis the function is monotone and the iteration
/// converges for every finite `x`.
pub fn lambert_w0(x: Real) -> Result<Real, HnError> {
    ensure_finite(x, "lambert_w0 argument")?;
    if x < 0.0 {
        return Err(HnError::InvalidArg {
            what: "lambert_w0 argument must be non-negative",
        });
    }
    if x == 0.0 {
        return Ok(0.0);
    }

    let mut w = x;
    for _ in 0..LAMBERT_MAX_ITERATIONS {
        let ew = w.exp();
        let wew = w * ew;
        let next = w - (wew - x) / (wew + ew);
        if (next - w).abs() <= LAMBERT_STEP_TOL {
            return Ok(next);
        }
        w = next;
    }

    Err(HnError::NonConvergence {
        what: "lambert_w0",
        iterations: LAMBERT_MAX_ITERATIONS,
    })
}
