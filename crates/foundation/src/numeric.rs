//! Small numeric helpers shared by the readout and the map.

pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// Parses decimal text, accepting only finite results.
///
/// Surrounding whitespace is ignored; empty text does not parse.
pub fn parse_finite(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Largest place count whose power of ten is exact in an `f64`.
const EXACT_POW10_MAX: usize = 22;

/// Formats `value` with exactly `places` fractional digits, the way
/// JavaScript's `toFixed` does.
///
/// Exact ties round away from zero (`{:.N}` alone rounds them to even).
/// Negative zero prints as `0`.
pub fn fixed(value: f64, places: usize) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    if places <= EXACT_POW10_MAX && value.is_finite() {
        let scale = 10f64.powi(places as i32);
        let scaled = value * scale;
        // A zero residual means the product carries no rounding error.
        let exact = value.mul_add(scale, -scaled) == 0.0;
        if exact && scaled.fract().abs() == 0.5 {
            let away = scaled.trunc() + scaled.signum();
            return format!("{:.places$}", away / scale);
        }
    }
    format!("{value:.places$}")
}
