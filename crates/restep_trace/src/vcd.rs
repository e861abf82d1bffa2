//! VCD file parsing.
//!
//! Reads IEEE 1364 Value Change Dump text into a [`LoadedTrace`]: the
//! ordered signal definitions from the header plus the recorded value
//! changes grouped by sample timestamp. The hierarchical signal names are
//! joined with `::` between scope levels, matching the namespace the replay
//! core's canonicalizer consumes.

use std::io::BufRead;
use std::path::Path;

use crate::error::TraceError;

/// Metadata for one signal declared in the VCD header.
#[derive(Clone, Debug)]
pub struct VcdSignalDef {
    /// The VCD identifier code (e.g., `!`, `"`, `!"`).
    pub id_code: String,
    /// The hierarchical signal name, scope levels joined with `::`.
    pub name: String,
    /// Bit width of the signal.
    pub width: u32,
    /// The VCD variable type (e.g., `wire`, `reg`).
    pub var_type: String,
}

/// All value changes recorded at one sample timestamp.
#[derive(Clone, Debug)]
pub struct TimeStep {
    /// The raw VCD timestamp (timescale units).
    pub time: u64,
    /// `(signal index, value bit string)` pairs in file order.
    pub changes: Vec<(usize, String)>,
}

/// A fully parsed waveform trace.
///
/// `signals` is in header declaration order, which is the discovery order
/// the replay engine iterates in. `steps` is one entry per distinct sample
/// timestamp, in file order.
#[derive(Clone, Debug, Default)]
pub struct LoadedTrace {
    /// The raw `$timescale` body, if the header carried one.
    pub timescale: Option<String>,
    /// Signal definitions in declaration order.
    pub signals: Vec<VcdSignalDef>,
    /// Value changes grouped by sample timestamp.
    pub steps: Vec<TimeStep>,
}

/// Loads a trace from a filesystem path.
///
/// Paths ending in `.gz` are gzip-decompressed while reading.
///
/// # Errors
///
/// Returns [`TraceError`] on I/O or parse errors.
pub fn load_trace(path: &Path) -> Result<LoadedTrace, TraceError> {
    let file = std::fs::File::open(path)?;
    if path.extension().is_some_and(|e| e == "gz") {
        let decoder = flate2::read::GzDecoder::new(file);
        load_trace_reader(std::io::BufReader::new(decoder))
    } else {
        load_trace_reader(std::io::BufReader::new(file))
    }
}

/// Loads a trace from a buffered reader.
///
/// Parses the header (timescale, scopes, variable declarations) and all
/// value changes. Header keywords may span multiple lines up to their
/// closing `$end`.
///
/// # Errors
///
/// Returns [`TraceError`] on I/O errors, parse errors, or a missing
/// `$enddefinitions` when variables were declared.
pub fn load_trace_reader<R: BufRead>(reader: R) -> Result<LoadedTrace, TraceError> {
    let mut parser = Parser::new();
    for line_result in reader.lines() {
        let line = line_result?;
        parser.line_num += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        parser.feed(trimmed)?;
    }
    parser.finish()
}

/// Incremental VCD parser state.
struct Parser {
    trace: LoadedTrace,
    scope_stack: Vec<String>,
    in_definitions: bool,
    saw_enddefinitions: bool,
    line_num: usize,
    // Keyword whose body is being collected until `$end`.
    pending_keyword: Option<String>,
    pending_body: String,
}

impl Parser {
    fn new() -> Self {
        Self {
            trace: LoadedTrace::default(),
            scope_stack: Vec::new(),
            in_definitions: true,
            saw_enddefinitions: false,
            line_num: 0,
            pending_keyword: None,
            pending_body: String::new(),
        }
    }

    fn feed(&mut self, line: &str) -> Result<(), TraceError> {
        if self.pending_keyword.is_some() {
            return self.continue_keyword(line);
        }

        if self.in_definitions {
            if line.starts_with("$enddefinitions") {
                self.saw_enddefinitions = true;
                self.in_definitions = false;
                return Ok(());
            }
            if let Some(kw) = keyword_of(line) {
                if line.contains("$end") {
                    let body = keyword_body(line);
                    return self.process_keyword(&kw, &body);
                }
                // Body continues on following lines.
                self.pending_body = keyword_body(line);
                self.pending_keyword = Some(kw);
            }
            return Ok(());
        }

        // Value change phase.
        if line.starts_with("$dumpvars") || line.starts_with("$end") {
            return Ok(());
        }
        if let Some(time_str) = line.strip_prefix('#') {
            let time = time_str.parse::<u64>().map_err(|_| TraceError::ParseError {
                line: self.line_num,
                message: format!("invalid timestamp: {line}"),
            })?;
            self.begin_step(time);
            return Ok(());
        }
        self.record_change(line)
    }

    fn continue_keyword(&mut self, line: &str) -> Result<(), TraceError> {
        if let Some(pos) = line.find("$end") {
            self.pending_body.push(' ');
            self.pending_body.push_str(line[..pos].trim());
            let kw = self.pending_keyword.take().unwrap_or_default();
            let body = std::mem::take(&mut self.pending_body);
            self.process_keyword(&kw, body.trim())
        } else {
            self.pending_body.push(' ');
            self.pending_body.push_str(line);
            Ok(())
        }
    }

    fn process_keyword(&mut self, keyword: &str, body: &str) -> Result<(), TraceError> {
        match keyword {
            "timescale" => {
                self.trace.timescale = Some(body.trim().to_string());
            }
            "scope" => {
                // Body is "<kind> <name>"; a bare name is tolerated.
                let mut parts = body.split_whitespace();
                let first = parts.next();
                if let Some(name) = parts.next().or(first) {
                    self.scope_stack.push(name.to_string());
                }
            }
            "upscope" => {
                self.scope_stack.pop();
            }
            "var" => self.declare_var(body)?,
            _ => {
                // $comment, $date, $version, etc.
            }
        }
        Ok(())
    }

    fn declare_var(&mut self, body: &str) -> Result<(), TraceError> {
        // Body is "<type> <width> <id_code> <name> [bit range]".
        let parts: Vec<&str> = body.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(TraceError::ParseError {
                line: self.line_num,
                message: format!("invalid $var: {body}"),
            });
        }
        let width: u32 = parts[1].parse().map_err(|_| TraceError::ParseError {
            line: self.line_num,
            message: format!("invalid width in $var: {}", parts[1]),
        })?;

        let name = if self.scope_stack.is_empty() {
            parts[3].to_string()
        } else {
            format!("{}::{}", self.scope_stack.join("::"), parts[3])
        };

        self.trace.signals.push(VcdSignalDef {
            id_code: parts[2].to_string(),
            name,
            width,
            var_type: parts[0].to_string(),
        });
        Ok(())
    }

    fn begin_step(&mut self, time: u64) {
        // A repeated timestamp extends the current step.
        if self.trace.steps.last().is_some_and(|s| s.time == time) {
            return;
        }
        self.trace.steps.push(TimeStep {
            time,
            changes: Vec::new(),
        });
    }

    fn record_change(&mut self, line: &str) -> Result<(), TraceError> {
        let (value, id_code) = split_value_change(line).ok_or_else(|| TraceError::ParseError {
            line: self.line_num,
            message: format!("invalid value change: {line}"),
        })?;

        let Some(idx) = self
            .trace
            .signals
            .iter()
            .position(|s| s.id_code == id_code)
        else {
            // Changes for undeclared identifiers are skipped, as dumps may
            // carry identifiers filtered out of the header.
            return Ok(());
        };

        // Changes preceding the first timestamp belong to an implicit
        // time-zero step ($dumpvars initial values).
        if self.trace.steps.is_empty() {
            self.trace.steps.push(TimeStep {
                time: 0,
                changes: Vec::new(),
            });
        }
        if let Some(step) = self.trace.steps.last_mut() {
            step.changes.push((idx, value));
        }
        Ok(())
    }

    fn finish(self) -> Result<LoadedTrace, TraceError> {
        if !self.saw_enddefinitions && !self.trace.signals.is_empty() {
            return Err(TraceError::FormatError(
                "missing $enddefinitions".to_string(),
            ));
        }
        Ok(self.trace)
    }
}

/// Extracts a header keyword name from a line starting with `$`.
fn keyword_of(line: &str) -> Option<String> {
    let rest = line.strip_prefix('$')?;
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '$')
        .unwrap_or(rest.len());
    let kw = &rest[..end];
    if kw.is_empty() {
        None
    } else {
        Some(kw.to_lowercase())
    }
}

/// Extracts the body text between a keyword and its closing `$end`.
fn keyword_body(line: &str) -> String {
    let after = match line.find(|c: char| c.is_whitespace()) {
        Some(pos) => &line[pos..],
        None => return String::new(),
    };
    let body = match after.find("$end") {
        Some(pos) => &after[..pos],
        None => after,
    };
    body.trim().to_string()
}

/// Splits a value-change line into a normalized value and an id code.
///
/// Scalar two-state changes (`0!`, `1!`) normalize to vector marker form
/// (`b0`, `b1`) so every two-state value reaches the decoder uniformly
/// tagged. Scalar `x`/`z`, vector, real, and string values keep their
/// original text; the decoder is responsible for rejecting non-two-state
/// forms with the offending string.
fn split_value_change(line: &str) -> Option<(String, &str)> {
    let first = *line.as_bytes().first()?;
    match first {
        b'b' | b'B' => {
            // Vector: "b<bits> <id_code>"
            let rest = &line[1..];
            let mut parts = rest.split_whitespace();
            let bits = parts.next()?;
            let id_code = parts.next()?;
            Some((format!("b{bits}"), id_code))
        }
        b'r' | b'R' | b's' | b'S' => {
            // Real or string: "<marker><value> <id_code>"
            let mut parts = line.split_whitespace();
            let value = parts.next()?;
            let id_code = parts.next()?;
            Some((value.to_string(), id_code))
        }
        b'0' | b'1' => Some((format!("b{}", &line[..1]), &line[1..])),
        b'x' | b'X' => Some(("x".to_string(), &line[1..])),
        b'z' | b'Z' => Some(("z".to_string(), &line[1..])),
        _ => None,
    }
}
