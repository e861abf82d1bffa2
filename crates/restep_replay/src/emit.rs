//! Instruction sinks.
//!
//! The replay engine emits into an [`InstructionSink`]; the sink decides
//! the concrete encoding. [`InlineWriter`] produces indented source
//! statements for the generated harness body, [`DataFileWriter`] produces
//! side-car data-file lines, and `Vec<Instruction>` collects the abstract
//! stream (used by tests and the round-trip checker). Encoding selection is
//! purely presentational: the engine behaves identically regardless of
//! which sink is attached.

use std::io::Write;

use crate::error::ReplayError;
use crate::instruction::{Instruction, ValueSyntax};

/// Receives the replay instruction stream in emission order.
pub trait InstructionSink {
    /// Accepts the next instruction of the stream.
    fn emit(&mut self, instruction: &Instruction) -> Result<(), ReplayError>;
}

impl InstructionSink for Vec<Instruction> {
    fn emit(&mut self, instruction: &Instruction) -> Result<(), ReplayError> {
        self.push(instruction.clone());
        Ok(())
    }
}

/// Writes each instruction as one indented inline source statement.
pub struct InlineWriter<W: Write> {
    writer: W,
    indent: String,
    syntax: ValueSyntax,
}

impl<W: Write> InlineWriter<W> {
    /// Creates a writer emitting `indent`-prefixed statements with the
    /// given value syntax.
    pub fn new(writer: W, indent: &str, syntax: ValueSyntax) -> Self {
        Self {
            writer,
            indent: indent.to_string(),
            syntax,
        }
    }

    /// Flushes buffered output.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Io`] if the underlying writer fails.
    pub fn flush(&mut self) -> Result<(), ReplayError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Consumes the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> InstructionSink for InlineWriter<W> {
    fn emit(&mut self, instruction: &Instruction) -> Result<(), ReplayError> {
        writeln!(
            self.writer,
            "{}{}",
            self.indent,
            instruction.inline_statement(self.syntax)
        )?;
        Ok(())
    }
}

/// Writes each instruction as one data-file line.
pub struct DataFileWriter<W: Write> {
    writer: W,
}

impl<W: Write> DataFileWriter<W> {
    /// Creates a writer emitting data-file lines.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flushes buffered output.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Io`] if the underlying writer fails.
    pub fn flush(&mut self) -> Result<(), ReplayError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Consumes the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> InstructionSink for DataFileWriter<W> {
    fn emit(&mut self, instruction: &Instruction) -> Result<(), ReplayError> {
        writeln!(self.writer, "{}", instruction.data_line())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn sample_stream() -> Vec<Instruction> {
        vec![
            Instruction::Poke {
                signal: "io_in".to_string(),
                value: BigUint::from(1u32),
            },
            Instruction::Expect {
                signal: "io_out".to_string(),
                value: BigUint::from(2u32),
            },
            Instruction::Advance { cycles: 1 },
        ]
    }

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<Instruction> = Vec::new();
        for instr in sample_stream() {
            sink.emit(&instr).unwrap();
        }
        assert_eq!(sink, sample_stream());
    }

    #[test]
    fn inline_writer_indents_statements() {
        let mut writer = InlineWriter::new(Vec::new(), "  ", ValueSyntax::Bare);
        for instr in sample_stream() {
            writer.emit(&instr).unwrap();
        }
        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            output,
            "  poke(\"io_in\", 1)\n  expect(\"io_out\", 2)\n  step(1)\n"
        );
    }

    #[test]
    fn inline_writer_bigint_syntax() {
        let mut writer = InlineWriter::new(Vec::new(), "      ", ValueSyntax::BigIntLiteral);
        for instr in sample_stream() {
            writer.emit(&instr).unwrap();
        }
        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert!(output.contains("      poke(\"io_in\", BigInt(\"1\"))"));
        assert!(output.contains("      expect(\"io_out\", BigInt(\"2\"))"));
        assert!(output.contains("      step(1)"));
    }

    #[test]
    fn data_file_writer_lines() {
        let mut writer = DataFileWriter::new(Vec::new());
        for instr in sample_stream() {
            writer.emit(&instr).unwrap();
        }
        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, "p io_in 1\ne io_out 2\ns 1 1\n");
    }

    #[test]
    fn encodings_project_same_stream() {
        // Parse the data-file encoding back and compare against the
        // abstract stream the inline encoding was produced from.
        let stream = sample_stream();

        let mut data = DataFileWriter::new(Vec::new());
        for instr in &stream {
            data.emit(instr).unwrap();
        }
        let text = String::from_utf8(data.into_inner()).unwrap();
        let reparsed: Vec<Instruction> = text
            .lines()
            .map(|l| Instruction::parse_data_line(l).unwrap())
            .collect();
        assert_eq!(reparsed, stream);
    }
}
