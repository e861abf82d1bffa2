//! The cycle replay engine.
//!
//! [`replay`] walks a trace one cycle at a time and turns the recording
//! into the instruction stream that is the test oracle. The engine owns
//! iteration order and instruction sequencing and nothing else: name
//! canonicalization, role lookup, and value decoding are delegated to the
//! sibling modules.

use std::collections::HashMap;

use restep_trace::TraceCursor;

use crate::classify::Role;
use crate::decode::decode;
use crate::emit::InstructionSink;
use crate::error::ReplayError;
use crate::instruction::Instruction;
use crate::name::{canonicalize_with_limit, strip_module_prefix};

/// The engine's consumption boundary over a recorded trace.
///
/// The engine never reads trace storage directly; any cycle-addressable
/// recording can be replayed by implementing this trait.
pub trait Trace {
    /// Whether another cycle remains.
    fn has_more_cycles(&self) -> bool;

    /// Advances the internal cursor by exactly one cycle.
    fn advance(&mut self);

    /// Hierarchical signal names in trace discovery order.
    ///
    /// Discovery order is part of this interface's contract: the engine
    /// emits instructions in exactly this order within each cycle.
    fn signal_names(&self) -> Vec<String>;

    /// The named signal's value bit string at the current cycle.
    fn current_value(&self, name: &str) -> Option<&str>;
}

impl Trace for TraceCursor {
    fn has_more_cycles(&self) -> bool {
        TraceCursor::has_more_cycles(self)
    }

    fn advance(&mut self) {
        TraceCursor::advance(self);
    }

    fn signal_names(&self) -> Vec<String> {
        TraceCursor::signal_names(self)
    }

    fn current_value(&self, name: &str) -> Option<&str> {
        TraceCursor::current_value(self, name)
    }
}

/// Replays a trace into an instruction sink, returning the cycle count.
///
/// For every cycle: each discovered signal, **in trace discovery order**,
/// produces one `Poke` (role [`Role::Driven`]) or `Expect` (role
/// [`Role::Observed`]) carrying its decoded current value; the cycle ends
/// with exactly one `Advance { cycles: 1 }`. Re-ordering would silently
/// change test semantics, so discovery order is a documented invariant of
/// this function, not an accident of iteration.
///
/// `roles` is keyed by canonical name; signals absent from it default to
/// `Observed`. `module` is the module-name prefix stripped from canonical
/// names before they appear in instructions. A zero-cycle trace yields an
/// empty stream and `Ok(0)`; no `Advance` is ever emitted past the last
/// real cycle.
///
/// # Errors
///
/// Returns [`ReplayError::MalformedValue`] (fatal, aborts mid-stream) when
/// a value is not two-state binary, [`ReplayError::NameTooLong`] for an
/// over-limit signal name, [`ReplayError::UnknownSignal`] if the trace
/// drops a discovered signal, and [`ReplayError::Io`] from the sink.
pub fn replay<T, S>(
    trace: &mut T,
    roles: &HashMap<String, Role>,
    module: &str,
    sink: &mut S,
) -> Result<u64, ReplayError>
where
    T: Trace + ?Sized,
    S: InstructionSink + ?Sized,
{
    replay_with_limit(trace, roles, module, crate::name::DEFAULT_MAX_NAME_LEN, sink)
}

/// [`replay`] with an explicit signal-name length limit (see
/// [`canonicalize_with_limit`]).
///
/// # Errors
///
/// As [`replay`].
pub fn replay_with_limit<T, S>(
    trace: &mut T,
    roles: &HashMap<String, Role>,
    module: &str,
    max_name_len: usize,
    sink: &mut S,
) -> Result<u64, ReplayError>
where
    T: Trace + ?Sized,
    S: InstructionSink + ?Sized,
{
    // Fix names and roles once; only values change per cycle.
    let mut plan = Vec::new();
    for name in trace.signal_names() {
        let canonical = canonicalize_with_limit(&name, max_name_len)?;
        let role = roles.get(&canonical).copied().unwrap_or(Role::Observed);
        let display = strip_module_prefix(&canonical, module).to_string();
        plan.push((name, display, role));
    }

    let mut cycles = 0u64;
    while trace.has_more_cycles() {
        trace.advance();
        for (name, display, role) in &plan {
            let bits = trace
                .current_value(name)
                .ok_or_else(|| ReplayError::UnknownSignal { name: name.clone() })?;
            let value = decode(bits)?;
            let instruction = match role {
                Role::Driven => Instruction::Poke {
                    signal: display.clone(),
                    value,
                },
                Role::Observed => Instruction::Expect {
                    signal: display.clone(),
                    value,
                },
            };
            sink.emit(&instruction)?;
        }
        sink.emit(&Instruction::Advance { cycles: 1 })?;
        cycles += 1;
    }
    Ok(cycles)
}
