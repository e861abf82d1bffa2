//! `restep check` — validate an instruction data file.
//!
//! Re-parses every line of a side-car data file the way the generic replay
//! harness would. Unrecognized lines are reported with their line number
//! and the run continues: the data-file consumer is the one place in the
//! pipeline that tolerates partial failure. The exit code still reflects
//! whether every line parsed.

use restep_replay::{DataLineError, Instruction};

use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Per-file validation tallies.
#[derive(Debug, Default, PartialEq, Eq)]
struct CheckSummary {
    pokes: usize,
    expects: usize,
    steps: usize,
    errors: usize,
}

/// Runs the `restep check` command.
///
/// Returns exit code 0 if every line parsed, 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let content =
        std::fs::read_to_string(&args.file).map_err(|e| format!("{}: {e}", args.file))?;

    let summary = check_lines(&content, |line_num, error| {
        eprintln!("{}:{line_num}: {error}", args.file);
    });

    match args.format {
        ReportFormat::Text => {
            if !global.quiet {
                let total = summary.pokes + summary.expects + summary.steps;
                eprintln!(
                    "   {total} instruction(s): {} poke(s), {} expect(s), {} step(s)",
                    summary.pokes, summary.expects, summary.steps
                );
                if summary.errors > 0 {
                    eprintln!("   {} line(s) failed to parse", summary.errors);
                }
            }
        }
        ReportFormat::Json => {
            let json = serde_json::json!({
                "file": args.file,
                "pokes": summary.pokes,
                "expects": summary.expects,
                "steps": summary.steps,
                "errors": summary.errors,
            });
            println!("{json}");
        }
    }

    Ok(if summary.errors == 0 { 0 } else { 1 })
}

/// Parses every non-empty line, tallying instruction kinds and reporting
/// failures through `on_error` without stopping.
fn check_lines(content: &str, mut on_error: impl FnMut(usize, &DataLineError)) -> CheckSummary {
    let mut summary = CheckSummary::default();
    for (i, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match Instruction::parse_data_line(line) {
            Ok(Instruction::Poke { .. }) => summary.pokes += 1,
            Ok(Instruction::Expect { .. }) => summary.expects += 1,
            Ok(Instruction::Advance { .. }) => summary.steps += 1,
            Err(e) => {
                summary.errors += 1;
                on_error(i + 1, &e);
            }
        }
    }
    summary
}
