use anyhow::Result;
use clap::Parser;

use wordtally::cli::Cli;
use wordtally::config::{format_error_message_auto, TallyConfig};
use wordtally::config_file::ConfigFile;
use wordtally::logging::init_logging;
use wordtally::platform::{termination_exit_code, ExitCode, SafeStderr, SafeStdout, SignalHandler};
use wordtally::report::format_report;
use wordtally::tally::Tally;
use wordtally::{run_tally, FsReader, TallyError};

fn main() -> Result<()> {
    let mut stderr = SafeStderr::new();

    // Process command line arguments with config file support
    let (cli, config_expected) = process_args_with_config(&mut stderr);

    init_logging(cli.verbose);

    let _signal_handler = match SignalHandler::new() {
        Ok(handler) => handler,
        Err(e) => {
            stderr.writeln(&format_error_message_auto(&format!(
                "Failed to initialize signal handling: {}",
                e
            )));
            ExitCode::GeneralError.exit();
        }
    };

    let config = match TallyConfig::from_cli(&cli) {
        Ok(config) => config.with_expected_fallback(config_expected),
        Err(e) => {
            stderr.writeln(&format_error_message_auto(&format!("{:#}", e)));
            ExitCode::InvalidUsage.exit();
        }
    };

    if config.input.clean_words {
        stderr.writeln(&config.format_info_message(
            "--clean-words strips non-alphabetic characters from target words before counting",
        ));
    }

    let outcome = match run_tally(&config, &FsReader) {
        Ok(outcome) => outcome,
        Err(e) => {
            stderr.writeln(&config.format_error_message(&e.to_string()));
            exit_code_for(&e, termination_exit_code()).exit();
        }
    };

    let mut stdout = SafeStdout::new();
    stdout.writeln(&format_report(&outcome, &config.output)?)?;
    stdout.flush()?;

    if config.output.stats {
        stderr.writeln(&config.format_info_message(&outcome.run.stats.format_stats()));
    }

    match &outcome.verification {
        Some(Ok(())) => {
            if !config.output.silent {
                stderr.writeln(&config.format_info_message("Verification passed"));
            }
        }
        Some(Err(failure)) => {
            stderr.writeln(&config.format_error_message(&failure.to_string()));
            for mismatch in &failure.mismatches {
                stderr.writeln(&config.format_error_message(&format!("  {}", mismatch)));
            }
            ExitCode::GeneralError.exit();
        }
        None => {}
    }

    ExitCode::Success.exit();
}

/// `signal_exit` is the status of the signal that stopped the run, if any
fn exit_code_for(error: &TallyError, signal_exit: Option<ExitCode>) -> ExitCode {
    match (error, signal_exit) {
        (e, _) if e.is_configuration() => ExitCode::InvalidUsage,
        (TallyError::Terminated, Some(code)) => code,
        _ => ExitCode::GeneralError,
    }
}

fn extract_config_file_arg(args: &[String]) -> Option<String> {
    args.windows(2)
        .find(|pair| pair[0] == "--config-file")
        .map(|pair| pair[1].clone())
        .or_else(|| {
            args.iter()
                .find_map(|arg| arg.strip_prefix("--config-file=").map(str::to_string))
        })
}

/// Parse the command line with config-file defaults prepended.
///
/// Also returns the `[expected]` section of the config file, if any.
fn process_args_with_config(stderr: &mut SafeStderr) -> (Cli, Option<Tally>) {
    let raw_args: Vec<String> = std::env::args().collect();

    // Extract --config-file argument early, defaults may not be parsed yet
    let config_file_path = extract_config_file_arg(&raw_args);
    let has_ignore_config = raw_args.iter().any(|arg| arg == "--ignore-config");

    // Check for --show-config first, before any other processing
    if raw_args.iter().any(|arg| arg == "--show-config") {
        ConfigFile::show_config();
        ExitCode::Success.exit();
    }

    let (processed_args, expected) = if has_ignore_config {
        (raw_args, None)
    } else {
        let config_file = match ConfigFile::load_with_custom_path(config_file_path.as_deref()) {
            Ok(config_file) => config_file,
            Err(e) => {
                stderr.writeln(&format_error_message_auto(&format!(
                    "Config file error: {:#}",
                    e
                )));
                ExitCode::InvalidUsage.exit();
            }
        };
        let defaults = match config_file.default_args() {
            Ok(defaults) => defaults,
            Err(e) => {
                stderr.writeln(&format_error_message_auto(&format!("Config error: {:#}", e)));
                ExitCode::InvalidUsage.exit();
            }
        };

        // Program name, then config defaults, then the user's own arguments so
        // they override the defaults
        let mut args = Vec::with_capacity(raw_args.len() + defaults.len());
        let mut raw = raw_args.into_iter();
        args.extend(raw.next());
        args.extend(defaults);
        args.extend(raw);
        (args, config_file.expected)
    };

    // clap prints help, version and usage errors itself (exit 0 or 2)
    let cli = Cli::parse_from(processed_args);
    (cli, expected)
}
