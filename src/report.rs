//! Rendering of a finished run for stdout

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::{OutputConfig, OutputFormat};
use crate::tally::Tally;
use crate::verify::Mismatch;
use crate::{Mode, TallyOutcome};

#[derive(Serialize)]
struct JsonReport<'a> {
    mode: Mode,
    threads: usize,
    elapsed_seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    counts: Option<&'a Tally>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verification: Option<JsonVerification<'a>>,
}

#[derive(Serialize)]
struct JsonVerification<'a> {
    passed: bool,
    mismatches: &'a [Mismatch],
}

/// Render the report in the configured format, without a trailing newline
pub fn format_report(outcome: &TallyOutcome, output: &OutputConfig) -> Result<String> {
    match output.format {
        OutputFormat::Default => Ok(format_default(outcome, output.silent)),
        OutputFormat::Json => format_json(outcome, output.silent),
    }
}

fn format_default(outcome: &TallyOutcome, silent: bool) -> String {
    let mut report = format!(
        "(parallel: {}) (# threads: {}) Time taken: {:.6}",
        outcome.mode == Mode::Parallel,
        outcome.workers,
        outcome.elapsed.as_secs_f64()
    );
    if !silent {
        report.push_str(&format!("\nCounts: {}", outcome.run.tally));
    }
    report
}

fn format_json(outcome: &TallyOutcome, silent: bool) -> Result<String> {
    let verification = outcome.verification.as_ref().map(|result| match result {
        Ok(()) => JsonVerification {
            passed: true,
            mismatches: &[],
        },
        Err(failure) => JsonVerification {
            passed: false,
            mismatches: &failure.mismatches,
        },
    });

    let report = JsonReport {
        mode: outcome.mode,
        threads: outcome.workers,
        elapsed_seconds: outcome.elapsed.as_secs_f64(),
        counts: (!silent).then_some(&outcome.run.tally),
        verification,
    };

    serde_json::to_string(&report).context("Failed to serialize JSON report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ProcessingStats;
    use crate::verify::VerificationFailure;
    use crate::TallyRun;
    use std::time::Duration;

    fn outcome(mode: Mode, workers: usize) -> TallyOutcome {
        TallyOutcome {
            run: TallyRun {
                tally: [("cat", 3), ("dog", 2)].into_iter().collect(),
                stats: ProcessingStats::default(),
            },
            mode,
            workers,
            elapsed: Duration::from_millis(1500),
            verification: None,
        }
    }

    #[test]
    fn test_default_report() {
        let report = format_report(&outcome(Mode::Parallel, 4), &OutputConfig::default()).unwrap();
        assert_eq!(
            report,
            "(parallel: true) (# threads: 4) Time taken: 1.500000\nCounts: {cat: 3, dog: 2}"
        );
    }

    #[test]
    fn test_default_report_silent() {
        let output = OutputConfig {
            silent: true,
            ..OutputConfig::default()
        };
        let report = format_report(&outcome(Mode::Sequential, 1), &output).unwrap();
        assert_eq!(report, "(parallel: false) (# threads: 1) Time taken: 1.500000");
    }

    #[test]
    fn test_json_report() {
        let output = OutputConfig {
            format: OutputFormat::Json,
            ..OutputConfig::default()
        };
        let report = format_report(&outcome(Mode::Parallel, 2), &output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["mode"], "parallel");
        assert_eq!(value["threads"], 2);
        assert_eq!(value["elapsed_seconds"], 1.5);
        assert_eq!(value["counts"]["cat"], 3);
        assert!(value.get("verification").is_none());
    }

    #[test]
    fn test_json_report_with_failed_verification() {
        let mut outcome = outcome(Mode::Sequential, 1);
        outcome.verification = Some(Err(VerificationFailure {
            mismatches: vec![Mismatch::Count {
                word: "cat".to_string(),
                actual: 3,
                expected: 4,
            }],
        }));
        let output = OutputConfig {
            format: OutputFormat::Json,
            silent: true,
            ..OutputConfig::default()
        };

        let report = format_report(&outcome, &output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert!(value.get("counts").is_none());
        assert_eq!(value["verification"]["passed"], false);
        assert_eq!(value["verification"]["mismatches"][0]["kind"], "count");
        assert_eq!(value["verification"]["mismatches"][0]["expected"], 4);
    }
}
