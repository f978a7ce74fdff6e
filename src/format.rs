// src/format.rs

use crate::listings::NA;

/// Inserts `,` between every group of three integer digits: `1500.5` -> `1,500.5`.
pub fn group_thousands(value: f64) -> String {
    let text = value.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Display-only currency, rounded to whole dollars.
pub fn currency(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("${}", group_thousands(v.round() + 0.0)),
        None => NA.to_string(),
    }
}

pub fn whole_number(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => group_thousands(v.round() + 0.0),
        None => NA.to_string(),
    }
}

pub fn percent(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{v:.1}%"),
        None => NA.to_string(),
    }
}
