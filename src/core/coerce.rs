//! Numeric coercion for free-form amount text.
//!
//! Amounts are stored exactly as the user typed them. Anything that has to do arithmetic
//! on them goes through [`coerce_value`], which reads the longest leading decimal number
//! and falls back to `0.0` for everything else. Coercion never fails.

/// Coerces a stored amount into a finite `f64`.
///
/// Leading whitespace is skipped, then the longest prefix of the form
/// `[+-]digits[.digits][e[+-]digits]` is parsed. Trailing garbage is ignored, so
/// `"10abc"` is `10.0` and `"12,50"` is `12.0`. Missing, empty, non-numeric or
/// non-finite input yields `0.0`.
#[must_use]
pub fn coerce_value(raw: Option<&str>) -> f64 {
    let Some(text) = raw else {
        return 0.0;
    };

    let prefix = numeric_prefix(text.trim_start());
    if prefix.is_empty() {
        return 0.0;
    }

    match prefix.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => parsed,
        _ => 0.0,
    }
}

/// Coerces an optional integer field (month, year) for comparisons; missing is `0`.
#[must_use]
pub fn coerce_int(raw: Option<i32>) -> i32 {
    raw.unwrap_or(0)
}

/// Returns the longest leading slice of `text` that is a decimal float literal.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return "";
    }

    // The exponent only counts when at least one digit follows it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &text[..end]
}
