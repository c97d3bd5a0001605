use chrono::{Local, LocalResult, TimeZone};

/// Round a number to a given precision, adapting to numbers < 1.
///
/// The precision counts digits after the decimal place for numbers of at least 0.1, and digits
/// after the first significant digit for smaller numbers, so tiny values keep their precision
/// instead of collapsing to zero:
///
///   round_adaptive(1.51631235, 3) -> 1.516
///   round_adaptive(0.151631235, 3) -> 0.152
///   round_adaptive(0.00000151631235, 3) -> 0.00000152
///
/// Zero and non-finite values are returned unchanged.
pub fn round_adaptive(n: f64, precision: u32) -> f64 {
    if n == 0.0 || !n.is_finite() {
        return n;
    }

    let negative = n < 0.0;
    let n = n.abs();

    // The loop ends because n is non-zero, so some power of ten lifts it past 0.1.
    let mut i = 0;
    loop {
        if n * 10f64.powi(i) >= 0.1 {
            let factor = 10f64.powi(i + precision as i32);
            let rounded = (n * factor).round() / factor;
            return if negative { -rounded } else { rounded };
        }
        i += 1;
    }
}

/// Format a number consistently for display, with thousands separators and adaptive rounding.
pub fn format_number(n: f64, precision: u32) -> String {
    group_thousands(&round_adaptive(n, precision).to_string())
}

/// Insert `,` separators into the integer part of a plain decimal rendering.
///
/// Anything that isn't a plain decimal number, such as `NaN` or `inf`, is passed through.
fn group_thousands(rendered: &str) -> String {
    let (sign, rest) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rest, None),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return rendered.to_string();
    }

    let mut out = String::with_capacity(rendered.len() + int_part.len() / 3);
    out.push_str(sign);
    for (index, digit) in int_part.chars().enumerate() {
        if index > 0 && (int_part.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// The change from `a` to `b` as a formatted percentage.
///
/// Equal operands render as a literal `0%`. A zero or non-finite operand renders as `n/a`
/// rather than producing an infinite or undefined percentage.
pub fn percent_change(a: f64, b: f64) -> String {
    if a == b {
        return "0%".to_string();
    }
    if a == 0.0 || b == 0.0 || !a.is_finite() || !b.is_finite() {
        return "n/a".to_string();
    }
    format!("{}%", format_number(((b - a) / a) * 100.0, 0))
}

/// Format a count with the singular suffix when it is exactly one, plural otherwise.
pub fn plural(n: f64, singular: &str, plural: &str) -> String {
    if n == 1.0 {
        format!("{}{}", format_number(n, 0), singular)
    } else {
        format!("{}{}", format_number(n, 0), plural)
    }
}

/// Render a Unix timestamp as local time with the timezone designator appended.
pub fn format_datetime(secs: i64) -> String {
    match Local.timestamp_opt(secs, 0) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
            dt.format("%Y-%m-%d %H:%M:%S (%Z)").to_string()
        }
        LocalResult::None => format!("invalid timestamp: {secs}"),
    }
}
