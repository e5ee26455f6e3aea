//! Scalar numeric functions available in formulas.
//!
//! All functions take already-evaluated numeric arguments; range arguments
//! are not supported. Arity is validated at parse time via [`arity`].

/// Allowed argument counts (min, max) for a function name, or `None` for an
/// unknown name.
pub fn arity(name: &str) -> Option<(usize, usize)> {
    match name {
        "ABS" | "SQRT" => Some((1, 1)),
        "ROUND" => Some((1, 2)),
        "POWER" => Some((2, 2)),
        "MIN" | "MAX" => Some((1, usize::MAX)),
        _ => None,
    }
}

/// Human-readable form of an arity window for error messages.
pub fn arity_description(min: usize, max: usize) -> &'static str {
    match (min, max) {
        (1, 1) => "1",
        (2, 2) => "2",
        (1, 2) => "1 or 2",
        (1, usize::MAX) => "at least 1",
        _ => "a different number of",
    }
}

pub fn abs(x: f64) -> f64 {
    x.abs()
}

pub fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

/// ROUND(x) rounds to the nearest integer; ROUND(x, d) to d decimal places.
pub fn round(x: f64, digits: Option<f64>) -> f64 {
    match digits {
        None => x.round(),
        Some(d) => {
            let factor = 10f64.powi(d.trunc() as i32);
            (x * factor).round() / factor
        }
    }
}

pub fn power(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

pub fn min(args: &[f64]) -> f64 {
    args.iter().copied().fold(f64::INFINITY, f64::min)
}

pub fn max(args: &[f64]) -> f64 {
    args.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_digits() {
        assert_eq!(round(3.14159, None), 3.0);
        assert_eq!(round(3.14159, Some(2.0)), 3.14);
        assert_eq!(round(1234.5, Some(-2.0)), 1200.0);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min(&[3.0, 1.0, 2.0]), 1.0);
        assert_eq!(max(&[3.0, 1.0, 2.0]), 3.0);
        assert_eq!(min(&[5.0]), 5.0);
    }

    #[test]
    fn test_arity_table() {
        assert_eq!(arity("ABS"), Some((1, 1)));
        assert_eq!(arity("MIN"), Some((1, usize::MAX)));
        assert_eq!(arity("SUM"), None);
    }
}
