//! Numeric parsing for pagination values.
//!
//! Guidelines
//! - Query-string integers follow leading-integer semantics: surrounding whitespace is
//!   ignored, an optional sign and the leading run of digits are taken, trailing text is dropped.
//! - Pagination values are never negative; a negative count is an input error, not a clamp.

use crate::errors::QueryError;
use bson::Bson;

/// Parse the leading integer of `s`. Returns `None` when no digits are present or the
/// value does not fit in an `i64`.
#[must_use]
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let t = s.trim();
    let (neg, rest) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    let end = rest.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if neg { -magnitude } else { magnitude })
}

/// Parse a non-negative pagination count from a raw query-string value.
pub fn parse_count(name: &str, raw: &str) -> Result<i64, QueryError> {
    let n = parse_leading_int(raw)
        .ok_or_else(|| QueryError::InvalidNumber(format!("`{name}` is not an integer: {raw:?}")))?;
    non_negative(name, n)
}

/// Read a non-negative pagination count from a BSON value: numbers are taken as-is
/// (doubles truncated), strings are parsed like query-string values.
pub fn bson_to_count(name: &str, value: &Bson) -> Result<i64, QueryError> {
    match value {
        Bson::Int32(i) => non_negative(name, i64::from(*i)),
        Bson::Int64(i) => non_negative(name, *i),
        Bson::Double(f) if f.is_finite() && f.abs() < 9.0e15 => {
            #[allow(clippy::cast_possible_truncation)]
            let n = f.trunc() as i64;
            non_negative(name, n)
        }
        Bson::String(s) => parse_count(name, s),
        other => Err(QueryError::InvalidNumber(format!("`{name}` is not a number: {other}"))),
    }
}

fn non_negative(name: &str, n: i64) -> Result<i64, QueryError> {
    if n < 0 {
        return Err(QueryError::InvalidNumber(format!("`{name}` must not be negative: {n}")));
    }
    Ok(n)
}
