//! Harness source templates.
//!
//! Everything here is text templating around the instruction stream: the
//! prologue/epilogue of the two harness flavors, name derivation, and
//! side-car path derivation. None of it affects instruction semantics.

use std::path::{Path, PathBuf};

/// Statement indent for the stepped harness body.
pub const STEPPED_INDENT: &str = "  ";

/// Statement indent for the interp harness body.
pub const INTERP_INDENT: &str = "      ";

/// The stem of a path, used for class and module name derivation.
///
/// `out/MyTester.scala` → `MyTester`.
pub fn base_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// The side-car data-file path for a harness output path: the same path
/// with its extension replaced by `.step`.
pub fn sidecar_path(output: &Path) -> PathBuf {
    output.with_extension("step")
}

/// Prologue of the stepped harness flavor.
///
/// `reset_cycles` is the number of reset cycles to apply before replay;
/// the emitted `reset()` call doubles it, matching the driver's
/// half-cycle counting. Zero omits the reset statement.
pub fn stepped_prologue(class_name: &str, module_name: &str, reset_cycles: u32) -> String {
    let mut text = format!(
        "\
import Chisel._
import Chisel.hwiotesters.SteppedHWIOTester
import Chisel.testers.TesterDriver
import {module_name}._

class {class_name} extends SteppedHWIOTester {{
  val device_under_test = Module( new {module_name} )
  enable_printf_debug = true

"
    );
    if reset_cycles > 0 {
        text.push_str(&format!("{STEPPED_INDENT}reset({})\n", reset_cycles * 2));
    }
    text
}

/// Epilogue of the stepped harness flavor.
pub fn stepped_epilogue(class_name: &str) -> String {
    format!(
        "\
}}

object {class_name} {{
  def main(implicit args: Array[String]): Unit = {{
    TesterDriver.execute {{ () => new {class_name} }}
  }}
}}
"
    )
}

/// Prologue of the interp harness flavor.
///
/// When `dut_source` is given, it is embedded verbatim in place of the
/// module package import.
pub fn interp_prologue(class_name: &str, module_name: &str, dut_source: Option<&str>) -> String {
    let import = match dut_source {
        Some(source) => source.trim_end().to_string(),
        None => format!("import {module_name}._"),
    };
    format!(
        "\
{import}
import firrtl._
import firrtl.interpreter._
import org.scalatest.{{Matchers, FlatSpec}}

class {class_name}(circuit: String) extends FlatSpec with Matchers {{
  behavior of \"{module_name}\"

  val interpreter = FirrtlTerp(circuit)

  it should \"replay the recorded trace\" in {{
    val x = new InterpretiveTester(circuit) {{

"
    )
}

/// Epilogue of the interp harness flavor.
pub fn interp_epilogue(class_name: &str, module_name: &str) -> String {
    format!(
        "\
    }}
  }}
}}

object {class_name} {{
  def main(args: Array[String]): Unit = {{
    val circuit = Chisel.Driver.elaborate(() => new {module_name})
    val dummy = new {class_name}(circuit.emit)
  }}
}}
"
    )
}

/// The one-statement harness body used with the data-file encoding: the
/// generic harness replays the side-car line by line at run time.
pub fn data_file_body(indent: &str, sidecar_name: &str) -> String {
    format!("{indent}replayFile(\"{sidecar_name}\")\n")
}
