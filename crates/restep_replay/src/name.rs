//! Hierarchical signal name canonicalization.
//!
//! Waveform traces name signals with `:`-separated hierarchy levels, where
//! a doubled separator (`::`) marks one logical level boundary. The harness
//! namespace is flat and dotted: canonicalization collapses every run of
//! separators to a single `.`.
//!
//! Canonicalization is pure and deterministic. The only failure mode is an
//! input exceeding the byte-length limit, which is reported as an error —
//! the fixed-buffer design this replaces truncated such names silently and
//! produced wrong harnesses.

use crate::error::ReplayError;

/// Default maximum accepted hierarchical name length, in bytes.
pub const DEFAULT_MAX_NAME_LEN: usize = 4096;

/// Canonicalizes a hierarchical name with the default length limit.
///
/// # Errors
///
/// Returns [`ReplayError::NameTooLong`] for names over
/// [`DEFAULT_MAX_NAME_LEN`] bytes.
pub fn canonicalize(name: &str) -> Result<String, ReplayError> {
    canonicalize_with_limit(name, DEFAULT_MAX_NAME_LEN)
}

/// Canonicalizes a hierarchical name: every run of one or more `:`
/// characters becomes exactly one `.`.
///
/// A separator run at the very end of the name still produces a single
/// trailing dot; the scan never reads past the end of the input.
///
/// # Errors
///
/// Returns [`ReplayError::NameTooLong`] for names over `limit` bytes.
pub fn canonicalize_with_limit(name: &str, limit: usize) -> Result<String, ReplayError> {
    if name.len() > limit {
        return Err(ReplayError::NameTooLong {
            length: name.len(),
            limit,
        });
    }

    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' {
            while chars.peek() == Some(&':') {
                chars.next();
            }
            out.push('.');
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// Strips the leading `<module>.` qualifier from a canonical name.
///
/// The trace format guarantees every canonical name begins with the module
/// prefix followed by a dot; a name that does not (or that is exactly the
/// module name) is returned unchanged.
pub fn strip_module_prefix<'a>(canonical: &'a str, module: &str) -> &'a str {
    match canonical
        .strip_prefix(module)
        .and_then(|rest| rest.strip_prefix('.'))
    {
        Some(rest) if !rest.is_empty() => rest,
        _ => canonical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_separator_collapses() {
        assert_eq!(canonicalize("top::sub::sig").unwrap(), "top.sub.sig");
    }

    #[test]
    fn single_separator_becomes_dot() {
        assert_eq!(canonicalize("top:sig").unwrap(), "top.sig");
    }

    #[test]
    fn longer_runs_collapse_to_one_dot() {
        assert_eq!(canonicalize("a:::b").unwrap(), "a.b");
        assert_eq!(canonicalize("a::::b").unwrap(), "a.b");
    }

    #[test]
    fn no_separator_is_identity() {
        assert_eq!(canonicalize("signal").unwrap(), "signal");
    }

    #[test]
    fn empty_name() {
        assert_eq!(canonicalize("").unwrap(), "");
    }

    #[test]
    fn trailing_separator_handled() {
        // A run ending at the last byte must not read past the string.
        assert_eq!(canonicalize("top:").unwrap(), "top.");
        assert_eq!(canonicalize("top::").unwrap(), "top.");
    }

    #[test]
    fn leading_separator_handled() {
        assert_eq!(canonicalize("::top").unwrap(), ".top");
    }

    #[test]
    fn deterministic() {
        let a = canonicalize("Top::io_in::bits").unwrap();
        let b = canonicalize("Top::io_in::bits").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn over_limit_is_error_not_truncation() {
        let name = "a".repeat(10);
        let err = canonicalize_with_limit(&name, 8).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::NameTooLong {
                length: 10,
                limit: 8
            }
        ));
    }

    #[test]
    fn at_limit_accepted() {
        let name = "a".repeat(8);
        assert_eq!(canonicalize_with_limit(&name, 8).unwrap(), name);
    }

    #[test]
    fn strip_prefix_basic() {
        assert_eq!(strip_module_prefix("Top.io_in", "Top"), "io_in");
        assert_eq!(strip_module_prefix("Top.sub.sig", "Top"), "sub.sig");
    }

    #[test]
    fn strip_prefix_mismatch_passes_through() {
        assert_eq!(strip_module_prefix("Other.io_in", "Top"), "Other.io_in");
        // A longer identifier sharing the prefix text is not the module.
        assert_eq!(strip_module_prefix("Topmost.sig", "Top"), "Topmost.sig");
    }

    #[test]
    fn strip_prefix_bare_module_passes_through() {
        assert_eq!(strip_module_prefix("Top", "Top"), "Top");
    }
}
