//! `restep gen` — generate a test harness from a recorded trace.
//!
//! Runs the full pipeline: load the trace (and the netlist, when given),
//! classify every signal as driven or observed, replay the recording cycle
//! by cycle into the selected instruction encoding, and wrap the result in
//! the selected harness template.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use restep_config::{EncodingKind, HarnessStyle, ReplayConfig};
use restep_netlist::Netlist;
use restep_replay::{
    canonicalize_with_limit, classify, replay_with_limit, ConventionOracle, DataFileWriter,
    InlineWriter, NetlistOracle, RoleOracle, ValueSyntax,
};
use restep_trace::TraceCursor;

use crate::template;
use crate::{GenArgs, GlobalArgs};

/// Runs the `restep gen` command.
///
/// Returns exit code 0 on success; all failures are reported through the
/// error return (the pipeline has no partially-successful outcome).
pub fn run(args: &GenArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(global)?;

    // Step 1: Load the trace and position a cycle cursor over it.
    let trace_path = Path::new(&args.trace);
    let trace = restep_trace::load_trace(trace_path).map_err(|e| format!("{}: {e}", args.trace))?;
    let mut cursor = TraceCursor::new(trace);

    // Step 2: Load the netlist, when given.
    let netlist = match &args.netlist {
        Some(path) => {
            Some(Netlist::parse(Path::new(path)).map_err(|e| format!("{path}: {e}"))?)
        }
        None => None,
    };

    // Step 3: Resolve names and options (flags win over configuration).
    let module_name = resolve_module_name(args, &config, &cursor)?;
    let output_path = Path::new(&args.output);
    let class_name = template::base_name(output_path)
        .ok_or_else(|| format!("output path has no file name: {}", args.output))?;
    let style = args.style.map(Into::into).unwrap_or(config.harness.style);
    let encoding = args
        .encoding
        .map(Into::into)
        .unwrap_or(config.harness.encoding);
    let reset_cycles = args.reset_cycles.unwrap_or(config.harness.reset_cycles);

    let dut_source = match &args.dut {
        Some(path) => {
            Some(std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?)
        }
        None => None,
    };
    if dut_source.is_some() && style == HarnessStyle::Stepped && !global.quiet {
        eprintln!("warning: --dut is ignored by the stepped style");
    }

    if !global.quiet {
        eprintln!("   Generating {class_name} from {}", args.trace);
    }

    // Step 4: Classify every signal, once, before replay.
    let limit = config.trace.max_name_length;
    let mut canonical_names = Vec::new();
    for name in cursor.signal_names() {
        canonical_names.push(canonicalize_with_limit(&name, limit)?);
    }
    let oracle: Box<dyn RoleOracle> = match &netlist {
        Some(netlist) => Box::new(NetlistOracle::new(netlist.input_signal_names())?),
        None => Box::new(ConventionOracle::with_convention(
            &module_name,
            &config.classify.input_prefix,
        )),
    };
    let roles = classify(&canonical_names, oracle.as_ref());

    if global.verbose {
        let driven = roles
            .values()
            .filter(|r| **r == restep_replay::Role::Driven)
            .count();
        let source = if netlist.is_some() {
            "netlist"
        } else {
            "naming convention"
        };
        eprintln!(
            "   Module {module_name}: {} signal(s), {driven} driven (classified by {source})",
            canonical_names.len()
        );
    }

    // Step 5: Replay into the selected encoding, wrapped in the template.
    let (prologue, epilogue, indent, syntax) = match style {
        HarnessStyle::Stepped => (
            template::stepped_prologue(&class_name, &module_name, reset_cycles),
            template::stepped_epilogue(&class_name),
            template::STEPPED_INDENT,
            ValueSyntax::Bare,
        ),
        HarnessStyle::Interp => (
            template::interp_prologue(&class_name, &module_name, dut_source.as_deref()),
            template::interp_epilogue(&class_name, &module_name),
            template::INTERP_INDENT,
            ValueSyntax::BigIntLiteral,
        ),
    };

    let file = File::create(output_path).map_err(|e| format!("{}: {e}", args.output))?;
    let mut writer = BufWriter::new(file);
    write!(writer, "{prologue}")?;

    let mut sidecar = None;
    let cycles = match encoding {
        EncodingKind::Inline => {
            let mut sink = InlineWriter::new(writer, indent, syntax);
            let cycles = replay_with_limit(&mut cursor, &roles, &module_name, limit, &mut sink)?;
            sink.flush()?;
            writer = sink.into_inner();
            cycles
        }
        EncodingKind::DataFile => {
            let sidecar_path = template::sidecar_path(output_path);
            let sidecar_file = File::create(&sidecar_path)
                .map_err(|e| format!("{}: {e}", sidecar_path.display()))?;
            let mut sink = DataFileWriter::new(BufWriter::new(sidecar_file));
            let cycles = replay_with_limit(&mut cursor, &roles, &module_name, limit, &mut sink)?;
            sink.flush()?;

            let sidecar_name = sidecar_path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("replay.step")
                .to_string();
            write!(writer, "{}", template::data_file_body(indent, &sidecar_name))?;
            sidecar = Some(sidecar_path);
            cycles
        }
    };

    write!(writer, "{epilogue}")?;
    writer.flush()?;

    if !global.quiet {
        eprintln!("   Replayed {cycles} cycle(s)");
        eprintln!("   Harness: {}", args.output);
        if let Some(path) = &sidecar {
            eprintln!("   Data file: {}", path.display());
        }
    }

    Ok(0)
}

/// Loads the configuration: `--config` path, `./restep.toml` if present,
/// or built-in defaults.
fn load_config(global: &GlobalArgs) -> Result<ReplayConfig, Box<dyn std::error::Error>> {
    if let Some(path) = &global.config {
        return Ok(restep_config::load_config_file(Path::new(path))
            .map_err(|e| format!("{path}: {e}"))?);
    }
    let default_path = Path::new("restep.toml");
    if default_path.is_file() {
        return Ok(restep_config::load_config_file(default_path)
            .map_err(|e| format!("restep.toml: {e}"))?);
    }
    Ok(ReplayConfig::default())
}

/// Resolves the module name: `--top`, configuration, netlist file stem,
/// then the trace's root scope.
fn resolve_module_name(
    args: &GenArgs,
    config: &ReplayConfig,
    cursor: &TraceCursor,
) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(top) = &args.top {
        return Ok(top.clone());
    }
    if let Some(top) = &config.harness.top {
        return Ok(top.clone());
    }
    if let Some(path) = &args.netlist {
        if let Some(stem) = template::base_name(Path::new(path)) {
            return Ok(stem);
        }
    }
    if let Some(scope) = cursor.top_scope() {
        return Ok(scope.to_string());
    }
    Err("cannot infer module name from an empty trace; pass --top".into())
}
