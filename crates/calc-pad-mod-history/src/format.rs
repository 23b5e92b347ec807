/// Fixed-point number formatting for calculator output.
///
/// Rounds half-up starting from the shortest decimal form of the value,
/// so `0.125` prints as `0.13` and `1.005` as `1.01` at two places.
use std::iter;

/// Formats `value` with exactly `precision` decimal places.
///
/// Infinities print as `Infinity` / `-Infinity`, NaN as `NaN`.
pub fn format_number(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }

    // `Display` for f64 yields the shortest round-trip form, never an exponent
    let shortest = value.abs().to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(iter::repeat(b'0')).take(precision))
        .map(|b| b - b'0')
        .collect();

    let round_up = frac_part
        .as_bytes()
        .get(precision)
        .is_some_and(|&d| d >= b'5');
    if round_up {
        increment(&mut digits);
    }

    let int_len = digits.len() - precision;
    let mut out = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    for (i, d) in digits.iter().enumerate() {
        if i == int_len {
            out.push('.');
        }
        out.push(char::from(b'0' + d));
    }
    out
}

/// Adds one unit in the last place, growing the number on full carry.
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, 1);
}
