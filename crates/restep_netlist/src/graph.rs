//! The parsed operation graph.

use std::path::Path;
use std::str::FromStr;

use crate::error::NetlistError;

/// The operation kind on the right-hand side of a netlist line.
///
/// Only the kinds the replay pipeline inspects are distinguished; every
/// other mnemonic parses as [`Opcode::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opcode {
    /// An externally driven circuit input.
    In,
    /// A circuit output.
    Out,
    /// A clocked register.
    Reg,
    /// Any other operation (arithmetic, logic, memory, ...).
    Other(String),
}

impl Opcode {
    /// Maps a mnemonic to its opcode; unrecognized mnemonics become
    /// [`Opcode::Other`].
    pub fn from_mnemonic(s: &str) -> Self {
        match s {
            "in" => Opcode::In,
            "out" => Opcode::Out,
            "reg" => Opcode::Reg,
            other => Opcode::Other(other.to_string()),
        }
    }
}

impl FromStr for Opcode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_mnemonic(s))
    }
}

/// One operation: a destination signal computed by an opcode over operands.
#[derive(Debug, Clone)]
pub struct Operation {
    /// The hierarchical name of the destination signal.
    pub dest: String,
    /// The operation kind.
    pub opcode: Opcode,
    /// Declared bit width, when the mnemonic carried a `'width` suffix.
    pub width: Option<u32>,
    /// Operand signal names in declaration order.
    pub operands: Vec<String>,
}

/// A parsed netlist: the circuit's operations in file order.
#[derive(Debug, Clone, Default)]
pub struct Netlist {
    /// All operations in file order.
    pub operations: Vec<Operation>,
}

impl Netlist {
    /// Parses a netlist from a filesystem path.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError`] on I/O or parse errors.
    pub fn parse(path: &Path) -> Result<Self, NetlistError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_str(&text)
    }

    /// Parses a netlist from text.
    ///
    /// One operation per line, `dest = opcode['width] [operands...]`.
    /// Blank lines and `#` comments are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::ParseError`] with the offending line number
    /// on malformed lines.
    pub fn parse_str(text: &str) -> Result<Self, NetlistError> {
        let mut operations = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line_num = i + 1;
            let line = match raw.find('#') {
                Some(pos) => raw[..pos].trim(),
                None => raw.trim(),
            };
            if line.is_empty() {
                continue;
            }
            operations.push(parse_operation(line, line_num)?);
        }
        Ok(Self { operations })
    }

    /// Hierarchical names of all `in`-operation destinations, in file order.
    ///
    /// These are the signals the netlist authoritatively labels as circuit
    /// inputs.
    pub fn input_signal_names(&self) -> Vec<String> {
        self.operations
            .iter()
            .filter(|op| op.opcode == Opcode::In)
            .map(|op| op.dest.clone())
            .collect()
    }
}

/// Parses one `dest = opcode['width] [operands...]` line.
fn parse_operation(line: &str, line_num: usize) -> Result<Operation, NetlistError> {
    let (dest, rhs) = line.split_once('=').ok_or_else(|| NetlistError::ParseError {
        line: line_num,
        message: format!("missing '=': {line}"),
    })?;
    let dest = dest.trim();
    if dest.is_empty() {
        return Err(NetlistError::ParseError {
            line: line_num,
            message: "empty destination name".to_string(),
        });
    }

    let mut tokens = rhs.split_whitespace();
    let mnemonic = tokens.next().ok_or_else(|| NetlistError::ParseError {
        line: line_num,
        message: format!("missing opcode: {line}"),
    })?;

    let (op_str, width) = match mnemonic.split_once('\'') {
        Some((op, w)) => {
            let width = w.parse::<u32>().map_err(|_| NetlistError::ParseError {
                line: line_num,
                message: format!("invalid width '{w}': {line}"),
            })?;
            (op, Some(width))
        }
        None => (mnemonic, None),
    };

    Ok(Operation {
        dest: dest.to_string(),
        opcode: Opcode::from_mnemonic(op_str),
        width,
        operands: tokens.map(|t| t.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# adder circuit
Top::io_in  = in'32
Top::io_en  = in'1
Top::acc    = reg'32 Top::next
Top::next   = add'32 Top::acc Top::io_in
Top::io_out = out'32 Top::acc
";

    #[test]
    fn parse_sample() {
        let netlist = Netlist::parse_str(SAMPLE).unwrap();
        assert_eq!(netlist.operations.len(), 5);
        assert_eq!(netlist.operations[0].dest, "Top::io_in");
        assert_eq!(netlist.operations[0].opcode, Opcode::In);
        assert_eq!(netlist.operations[0].width, Some(32));
        assert_eq!(netlist.operations[3].operands, vec!["Top::acc", "Top::io_in"]);
    }

    #[test]
    fn input_names_in_file_order() {
        let netlist = Netlist::parse_str(SAMPLE).unwrap();
        assert_eq!(
            netlist.input_signal_names(),
            vec!["Top::io_in", "Top::io_en"]
        );
    }

    #[test]
    fn unknown_opcode_tolerated() {
        let netlist = Netlist::parse_str("Top::x = frobnicate'8 Top::y\n").unwrap();
        assert_eq!(
            netlist.operations[0].opcode,
            Opcode::Other("frobnicate".to_string())
        );
        assert!(netlist.input_signal_names().is_empty());
    }

    #[test]
    fn width_suffix_optional() {
        let netlist = Netlist::parse_str("Top::clk = in\n").unwrap();
        assert_eq!(netlist.operations[0].width, None);
        assert_eq!(netlist.input_signal_names(), vec!["Top::clk"]);
    }

    #[test]
    fn comments_and_blank_lines_ignored() {
        let netlist = Netlist::parse_str("\n# nothing here\n   \nTop::a = in'1 # trailing\n").unwrap();
        assert_eq!(netlist.operations.len(), 1);
    }

    #[test]
    fn missing_equals_reported() {
        let err = Netlist::parse_str("Top::a in'1\n").unwrap_err();
        assert!(err.to_string().contains("missing '='"));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn empty_destination_reported() {
        let err = Netlist::parse_str(" = in'1\n").unwrap_err();
        assert!(err.to_string().contains("empty destination"));
    }

    #[test]
    fn missing_opcode_reported() {
        let err = Netlist::parse_str("Top::a =\n").unwrap_err();
        assert!(err.to_string().contains("missing opcode"));
    }

    #[test]
    fn invalid_width_reported() {
        let err = Netlist::parse_str("Top::a = in'wide\n").unwrap_err();
        assert!(err.to_string().contains("invalid width"));
    }

    #[test]
    fn reg_and_out_distinguished() {
        let netlist = Netlist::parse_str("a = reg'1 b\nc = out'1 a\n").unwrap();
        assert_eq!(netlist.operations[0].opcode, Opcode::Reg);
        assert_eq!(netlist.operations[1].opcode, Opcode::Out);
    }

    #[test]
    fn parse_file_not_found() {
        let result = Netlist::parse(Path::new("/nonexistent/top.net"));
        assert!(matches!(result.unwrap_err(), NetlistError::Io(_)));
    }
}
