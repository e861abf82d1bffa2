//! Operation-graph netlist reading for the restep replay toolchain.
//!
//! A netlist describes the circuit a trace was recorded from as a flat list
//! of operations, one per line:
//!
//! ```text
//! # comment
//! Top::io_in = in'32
//! Top::sum   = add'32 Top::io_in Top::reg
//! Top::io_out = out'32 Top::sum
//! ```
//!
//! The replay pipeline only consults the netlist for one fact: which signals
//! are circuit inputs (`in` operations). Everything else is parsed and
//! retained so a netlist can be validated as a whole, but unknown opcodes
//! are tolerated and never affect classification.

#![warn(missing_docs)]

pub mod error;
pub mod graph;

pub use error::NetlistError;
pub use graph::{Netlist, Opcode, Operation};
