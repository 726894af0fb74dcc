//! Applies a field rule to a stream of JSON-lines records.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use anyhow::Context;
use datefence_core::evaluator::{FieldRule, FieldViolation};
use datefence_core::outside::rule_descriptor;
use serde::Serialize;
use serde_json::Value;

use crate::config::CheckConfig;

/// Counts gathered over one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub checked: usize,
    pub invalid: usize,
    pub malformed: usize,
}

impl Summary {
    pub fn all_valid(&self) -> bool {
        self.invalid == 0 && self.malformed == 0
    }
}

/// One output line per checked record.
#[derive(Debug, Serialize)]
struct RecordReport<'a> {
    line: usize,
    is_valid: bool,
    errors: &'a [FieldViolation],
}

/// Read and validate the rule definition at `path`.
pub fn load_rule(path: &Path) -> anyhow::Result<FieldRule> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule file {}", path.display()))?;
    let rule = FieldRule::from_json_str(&raw)
        .with_context(|| format!("Invalid rule in {}", path.display()))?;

    let descriptor = serde_json::to_string(&rule_descriptor(&rule.language))?;
    tracing::debug!(
        field = %rule.field,
        ranges = rule.params.ranges.len(),
        %descriptor,
        "Rule loaded",
    );

    Ok(rule)
}

/// Validate every record in `input`, writing one report line per record.
///
/// Blank lines are skipped. Lines that are not UTF-8 JSON objects are logged
/// and counted as malformed. Only I/O failures end the run early.
pub fn run<R, W>(
    rule: &FieldRule,
    input: R,
    mut output: W,
    fail_fast: bool,
) -> anyhow::Result<Summary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = Summary::default();

    for (idx, bytes) in input.split(b'\n').enumerate() {
        let line_no = idx + 1;
        let mut bytes = bytes.with_context(|| format!("Failed to read input line {line_no}"))?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }

        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "Record is not valid UTF-8, skipping");
                summary.malformed += 1;
                if fail_fast {
                    break;
                }
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let record = match serde_json::from_str::<Value>(&line) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!(line = line_no, "Record is not a JSON object, skipping");
                summary.malformed += 1;
                if fail_fast {
                    break;
                }
                continue;
            }
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "Malformed JSON record, skipping");
                summary.malformed += 1;
                if fail_fast {
                    break;
                }
                continue;
            }
        };

        let result = rule.evaluate(&record);
        summary.checked += 1;
        if !result.is_valid {
            summary.invalid += 1;
            tracing::debug!(
                line = line_no,
                code = %result.errors[0].rule_type,
                "Record failed validation",
            );
        }

        let report = RecordReport {
            line: line_no,
            is_valid: result.is_valid,
            errors: &result.errors,
        };
        serde_json::to_writer(&mut output, &report).context("Failed to write report")?;
        writeln!(output).context("Failed to write report")?;

        if fail_fast && !result.is_valid {
            tracing::info!(line = line_no, "Stopping at first invalid record");
            break;
        }
    }

    output.flush().context("Failed to flush output")?;
    Ok(summary)
}

/// Load the configured rule and check the configured input, reporting to stdout.
pub fn run_with_config(config: &CheckConfig) -> anyhow::Result<Summary> {
    let rule = load_rule(&config.rule_file)?;
    let stdout = io::stdout().lock();

    match &config.input_file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            run(&rule, BufReader::new(file), stdout, config.fail_fast)
        }
        None => run(&rule, io::stdin().lock(), stdout, config.fail_fast),
    }
}
