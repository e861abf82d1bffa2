//! Error types for trace loading.

/// Errors that can occur while loading a waveform trace.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
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

    /// The trace file has a structural format error.
    #[error("format error: {0}")]
    FormatError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let e = TraceError::ParseError {
            line: 7,
            message: "invalid $var: wire".to_string(),
        };
        assert_eq!(e.to_string(), "parse error at line 7: invalid $var: wire");
    }

    #[test]
    fn format_error_display() {
        let e = TraceError::FormatError("missing $enddefinitions".to_string());
        assert_eq!(e.to_string(), "format error: missing $enddefinitions");
    }

    #[test]
    fn io_error_display() {
        let e = TraceError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        assert!(e.to_string().contains("I/O error"));
    }
}
