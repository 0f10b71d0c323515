// Numeric coercion for heterogeneous sheet values
use serde_json::Value;

/// Coerce an arbitrary sheet value into a finite number.
///
/// The sheet backend hands back a mix of plain numbers and display strings
/// ("₱1,000", "(1,234.50)", "12%"). Anything unparsable coerces to 0.
pub fn coerce(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => coerce_str(s),
        _ => 0.0,
    }
}

/// String flavor of [`coerce`]: drops grouping commas and currency/unit
/// noise, maps unicode minus and dash variants to `-`, and honors
/// accounting parentheses as a negative sign.
pub fn coerce_str(input: &str) -> f64 {
    let mut text: String = input
        .trim()
        .chars()
        .filter(|&c| c != '\u{00A0}')
        .map(|c| match c {
            '\u{2212}' | '\u{2013}' | '\u{2014}' => '-',
            other => other,
        })
        .filter(|&c| c != ',')
        .filter(|&c| !is_unit_noise(c))
        .collect();

    let mut negative = false;
    if text.len() >= 2 && text.starts_with('(') && text.ends_with(')') {
        negative = true;
        text = text[1..text.len() - 1].to_string();
    }

    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'))
        .collect();

    match cleaned.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => {
            if negative {
                -parsed
            } else {
                parsed
            }
        }
        _ => 0.0,
    }
}

fn is_unit_noise(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '₱' | '$' | '€' | '¥' | '£' | '%')
}

/// Format a value as a locale-grouped integer ("1,234").
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
