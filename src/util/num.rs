/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_I64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use scopewalk::util::num::{MAX_SAFE_I64_INT, i64_to_f64_checked};
///
/// // Works for safe values
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// // Fails for values outside safe range
/// assert!(i64_to_f64_checked(MAX_SAFE_I64_INT + 1, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_I64_INT.unsigned_abs() {
        return Err(error);
    }
    Ok(value as f64)
}

/// Formats a real as `digits.digits`, never in exponent notation, so the text
/// reads back as the same real constant.
///
/// ## Example
/// ```
/// use scopewalk::util::num::format_real;
///
/// assert_eq!(format_real(2.5), "2.5");
/// assert_eq!(format_real(3.0), "3.0");
/// assert_eq!(format_real(1e20), "100000000000000000000.0");
/// assert_eq!(format_real(1e-7), "0.0000001");
/// ```
#[must_use]
pub fn format_real(value: f64) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}
