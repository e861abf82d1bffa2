//! Cycle-oriented view over a loaded trace.
//!
//! [`TraceCursor`] turns the timestamp-grouped value changes of a
//! [`LoadedTrace`] into a sequence of replay cycles: one cycle per distinct
//! sample timestamp. Signals keep their last recorded value across cycles
//! with no change; a signal never dumped reads as `x` until its first
//! change, which the downstream decoder rejects as malformed.

use std::collections::HashMap;

use crate::vcd::{LoadedTrace, VcdSignalDef};

/// A monotonically advancing cursor over the cycles of a trace.
///
/// The cursor starts positioned *before* the first cycle; each
/// [`advance`](TraceCursor::advance) applies the next timestamp's changes to
/// the current-value table.
pub struct TraceCursor {
    trace: LoadedTrace,
    name_to_idx: HashMap<String, usize>,
    values: Vec<String>,
    next_step: usize,
}

impl TraceCursor {
    /// Creates a cursor positioned before the first cycle.
    pub fn new(trace: LoadedTrace) -> Self {
        let name_to_idx = trace
            .signals
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();
        let values = vec!["x".to_string(); trace.signals.len()];
        Self {
            trace,
            name_to_idx,
            values,
            next_step: 0,
        }
    }

    /// Whether another cycle remains to advance into.
    pub fn has_more_cycles(&self) -> bool {
        self.next_step < self.trace.steps.len()
    }

    /// Advances the cursor by exactly one cycle, applying that cycle's
    /// recorded value changes. Does nothing past the last cycle.
    pub fn advance(&mut self) {
        let Some(step) = self.trace.steps.get(self.next_step) else {
            return;
        };
        for (idx, value) in &step.changes {
            self.values[*idx] = value.clone();
        }
        self.next_step += 1;
    }

    /// Hierarchical signal names in trace discovery order.
    pub fn signal_names(&self) -> Vec<String> {
        self.trace.signals.iter().map(|s| s.name.clone()).collect()
    }

    /// The named signal's value bit string at the current cycle.
    ///
    /// Returns `None` for a name the trace never declared.
    pub fn current_value(&self, name: &str) -> Option<&str> {
        let idx = *self.name_to_idx.get(name)?;
        Some(self.values[idx].as_str())
    }

    /// Signal definitions in discovery order.
    pub fn signals(&self) -> &[VcdSignalDef] {
        &self.trace.signals
    }

    /// Total number of cycles in the trace.
    pub fn cycle_count(&self) -> usize {
        self.trace.steps.len()
    }

    /// The root scope name shared by the trace's signals, if any signals
    /// were declared.
    pub fn top_scope(&self) -> Option<&str> {
        let name = &self.trace.signals.first()?.name;
        Some(name.split("::").next().unwrap_or(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcd::load_trace_reader;
    use std::io::Cursor;

    fn two_signal_trace() -> TraceCursor {
        let vcd = "\
$timescale 1ns $end
$scope module top $end
$var wire 2 ! a $end
$var wire 2 \" b $end
$upscope $end
$enddefinitions $end
#0
b01 !
b10 \"
#10
b00 !
b11 \"
";
        TraceCursor::new(load_trace_reader(Cursor::new(vcd)).unwrap())
    }

    #[test]
    fn discovery_order_preserved() {
        let cursor = two_signal_trace();
        assert_eq!(cursor.signal_names(), vec!["top::a", "top::b"]);
    }

    #[test]
    fn advance_applies_changes() {
        let mut cursor = two_signal_trace();
        assert!(cursor.has_more_cycles());

        cursor.advance();
        assert_eq!(cursor.current_value("top::a"), Some("b01"));
        assert_eq!(cursor.current_value("top::b"), Some("b10"));

        cursor.advance();
        assert_eq!(cursor.current_value("top::a"), Some("b00"));
        assert_eq!(cursor.current_value("top::b"), Some("b11"));

        assert!(!cursor.has_more_cycles());
    }

    #[test]
    fn value_persists_without_change() {
        let vcd = "\
$scope module top $end
$var wire 2 ! a $end
$var wire 1 \" clk $end
$upscope $end
$enddefinitions $end
#0
b01 !
0\"
#10
1\"
";
        let mut cursor = TraceCursor::new(load_trace_reader(Cursor::new(vcd)).unwrap());
        cursor.advance();
        cursor.advance();
        // `a` did not change at #10 and keeps its cycle-1 value.
        assert_eq!(cursor.current_value("top::a"), Some("b01"));
        assert_eq!(cursor.current_value("top::clk"), Some("b1"));
    }

    #[test]
    fn undumped_signal_reads_x() {
        let vcd = "\
$scope module top $end
$var wire 1 ! a $end
$var wire 1 \" ghost $end
$upscope $end
$enddefinitions $end
#0
0!
";
        let mut cursor = TraceCursor::new(load_trace_reader(Cursor::new(vcd)).unwrap());
        cursor.advance();
        assert_eq!(cursor.current_value("top::ghost"), Some("x"));
    }

    #[test]
    fn unknown_name_is_none() {
        let cursor = two_signal_trace();
        assert_eq!(cursor.current_value("top::nope"), None);
    }

    #[test]
    fn zero_cycle_trace_has_no_cycles() {
        let vcd = "\
$scope module top $end
$var wire 1 ! a $end
$upscope $end
$enddefinitions $end
";
        let cursor = TraceCursor::new(load_trace_reader(Cursor::new(vcd)).unwrap());
        assert!(!cursor.has_more_cycles());
        assert_eq!(cursor.cycle_count(), 0);
    }

    #[test]
    fn advance_past_end_is_harmless() {
        let mut cursor = two_signal_trace();
        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.current_value("top::a"), Some("b00"));
    }

    #[test]
    fn top_scope_from_first_signal() {
        let cursor = two_signal_trace();
        assert_eq!(cursor.top_scope(), Some("top"));
    }

    #[test]
    fn cycle_count_matches_steps() {
        let cursor = two_signal_trace();
        assert_eq!(cursor.cycle_count(), 2);
    }
}
