//! Error types for netlist parsing.

/// Errors that can occur while reading a netlist description.
#[derive(Debug, thiserror::Error)]
pub enum NetlistError {
    /// An I/O error occurred while reading.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parse error at a specific line number.
    #[error("parse error at line {line}: {message}")]
    ParseError {
        /// The 1-based line number where the error occurred.
        line: usize,
        /// Description of the error.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let e = NetlistError::ParseError {
            line: 3,
            message: "missing '='".to_string(),
        };
        assert_eq!(e.to_string(), "parse error at line 3: missing '='");
    }

    #[test]
    fn io_error_display() {
        let e = NetlistError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(e.to_string().contains("I/O error"));
    }
}
