//! Exact binary value decoding.
//!
//! Trace values arrive as ASCII bit strings tagged with the two-state
//! vector marker (`b1010`). Widths are whatever the trace reports — 1 bit,
//! 64 bits, or far beyond native word width — so decoding goes through
//! arbitrary-precision arithmetic and is exact at any width.

use num_bigint::BigUint;

use crate::error::ReplayError;

/// Decodes a marker-tagged binary bit string into an exact unsigned value.
///
/// The first character must be `b` or `B`; the remainder is an arbitrary-
/// width base-2 numeral. The whole string is always consumed — there is no
/// partial-range variant.
///
/// # Errors
///
/// Returns [`ReplayError::MalformedValue`] with the offending string when
/// the marker is missing or any digit is not `0`/`1` (don't-care `x`/`z`
/// states, real values, and bare scalars all fail here). Callers must treat
/// this as fatal: substituting a default would silently corrupt the test
/// oracle.
pub fn decode(bits: &str) -> Result<BigUint, ReplayError> {
    let digits = match bits.as_bytes().first() {
        Some(b'b') | Some(b'B') => &bits[1..],
        _ => return Err(malformed(bits)),
    };
    BigUint::parse_bytes(digits.as_bytes(), 2).ok_or_else(|| malformed(bits))
}

fn malformed(bits: &str) -> ReplayError {
    ReplayError::MalformedValue {
        value: bits.to_string(),
    }
}
