//! Signal classification and cycle replay engine for the restep toolchain.
//!
//! This crate is the semantic core of restep. Given a recorded waveform
//! trace, it decides which signals were externally driven (circuit inputs)
//! and which were internally produced (circuit outputs), and replays the
//! recording as an ordered instruction stream: for every cycle, one
//! poke/expect instruction per signal followed by a single step instruction.
//!
//! # Pipeline
//!
//! Data flows strictly forward, with no stage reading back from a later one:
//!
//! ```text
//! trace ─► canonicalize / classify ─► decode ─► replay ─► emit
//! ```
//!
//! # Modules
//!
//! - `name` — hierarchical-to-dotted name canonicalization
//! - `decode` — exact arbitrary-width binary value decoding
//! - `classify` — driven/observed role assignment strategies
//! - `instruction` — the instruction type and its two encodings
//! - `replay` — the cycle replay engine and its trace boundary
//! - `emit` — instruction sinks (inline source, data-file lines)
//! - `error` — replay error types

#![warn(missing_docs)]

pub mod classify;
pub mod decode;
pub mod emit;
pub mod error;
pub mod instruction;
pub mod name;
pub mod replay;

pub use classify::{classify, ConventionOracle, NetlistOracle, Role, RoleOracle};
pub use decode::decode;
pub use emit::{DataFileWriter, InlineWriter, InstructionSink};
pub use error::ReplayError;
pub use instruction::{DataLineError, Instruction, ValueSyntax};
pub use name::{canonicalize, canonicalize_with_limit, strip_module_prefix, DEFAULT_MAX_NAME_LEN};
pub use replay::{replay, replay_with_limit, Trace};
