//! Configuration types deserialized from `restep.toml`.

use serde::Deserialize;

/// The top-level configuration parsed from `restep.toml`.
///
/// Every section is optional and defaults to the values the CLI would use
/// with no configuration file at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ReplayConfig {
    /// Harness generation settings.
    #[serde(default)]
    pub harness: HarnessConfig,
    /// Trace reading settings.
    #[serde(default)]
    pub trace: TraceConfig,
    /// Signal classification settings.
    #[serde(default)]
    pub classify: ClassifyConfig,
}

/// Harness generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HarnessConfig {
    /// Which harness flavor to generate.
    #[serde(default)]
    pub style: HarnessStyle,
    /// Which instruction encoding to produce.
    #[serde(default)]
    pub encoding: EncodingKind,
    /// Reset cycles applied before replay begins (stepped style only).
    #[serde(default = "default_reset_cycles")]
    pub reset_cycles: u32,
    /// Module name override; normally inferred from the netlist or trace.
    #[serde(default)]
    pub top: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            style: HarnessStyle::default(),
            encoding: EncodingKind::default(),
            reset_cycles: default_reset_cycles(),
            top: None,
        }
    }
}

fn default_reset_cycles() -> u32 {
    5
}

/// The harness flavor to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarnessStyle {
    /// A stepped HW-I/O tester subclass (bare decimal values).
    #[default]
    Stepped,
    /// A circuit-interpreter test spec (`BigInt` literal values).
    Interp,
}

/// The instruction-stream encoding to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingKind {
    /// Instructions inline in the harness body.
    #[default]
    Inline,
    /// Instructions in a side-car data file replayed at run time.
    DataFile,
}

/// Trace reading settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TraceConfig {
    /// Maximum accepted hierarchical signal name length, in bytes.
    /// Over-limit names are an error, never silently truncated.
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_name_length: default_max_name_length(),
        }
    }
}

fn default_max_name_length() -> usize {
    4096
}

/// Signal classification settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassifyConfig {
    /// Input naming convention for the heuristic classifier: a signal is
    /// driven iff its canonical name starts with `<module>.<input_prefix>`.
    /// Only consulted when no netlist is given.
    #[serde(default = "default_input_prefix")]
    pub input_prefix: String,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            input_prefix: default_input_prefix(),
        }
    }
}

fn default_input_prefix() -> String {
    "io_in".to_string()
}
