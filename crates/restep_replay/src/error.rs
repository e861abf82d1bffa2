//! Replay error types.
//!
//! Every failure in the replay pipeline is a deterministic precondition
//! violation; none is recoverable and there are no retries. A malformed
//! value in particular must abort the run, because the emitted harness
//! would otherwise silently assert a nonsensical value.

use std::io;

/// Errors that can occur while replaying a trace.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// A signal's value string does not begin with the two-state-binary
    /// marker, or contains non-binary digits.
    #[error("malformed value encoding '{value}' (expected two-state binary)")]
    MalformedValue {
        /// The offending value string, verbatim.
        value: String,
    },

    /// A hierarchical signal name exceeds the configured length limit.
    /// Reported instead of truncating.
    #[error("signal name of {length} bytes exceeds the {limit}-byte limit")]
    NameTooLong {
        /// Length of the offending name in bytes.
        length: usize,
        /// The configured limit in bytes.
        limit: usize,
    },

    /// The trace reported no value for a signal it previously discovered.
    #[error("trace has no value for signal '{name}'")]
    UnknownSignal {
        /// The hierarchical signal name.
        name: String,
    },

    /// An I/O error occurred while writing instructions.
    #[error("instruction output error: {0}")]
    Io(#[from] io::Error),
}
