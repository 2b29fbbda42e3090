use anyhow::{Context, Result};
use clap::ValueEnum;
use indexmap::IndexMap;
use std::path::Path;

use crate::parallel::{ParallelConfig, PartitionStrategy};
use crate::readers::Corpus;
use crate::tally::{Tally, Vocabulary};

/// Main configuration struct for wordtally
#[derive(Debug, Clone, Default)]
pub struct TallyConfig {
    pub input: InputConfig,
    pub performance: PerformanceConfig,
    pub output: OutputConfig,
    pub verification: VerificationConfig,
}

/// Input configuration
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    /// Empty means the built-in corpus
    pub files: Vec<String>,
    /// Empty means the built-in vocabulary
    pub words: Vec<String>,
    pub clean_words: bool,
}

/// Performance configuration
#[derive(Debug, Clone, Default)]
pub struct PerformanceConfig {
    pub sequential: bool,
    /// `None` means one worker per CPU
    pub threads: Option<usize>,
    pub partition: PartitionStrategy,
}

/// Output configuration
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub silent: bool,
    pub stats: bool,
    pub no_emoji: bool,
    pub verbose: u8,
}

/// Expected tally to check the result against, if any
#[derive(Debug, Clone, Default)]
pub struct VerificationConfig {
    pub expected: Option<Tally>,
}

/// Output format enumeration
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Default,
    Json,
}

impl TallyConfig {
    /// Create configuration from CLI arguments, loading `--expect` if given
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let expected = match &cli.expect {
            Some(path) => Some(load_expected_tally(path)?),
            None => None,
        };

        Ok(Self {
            input: InputConfig {
                files: cli.files.clone(),
                words: cli.words.clone(),
                clean_words: cli.clean_words,
            },
            performance: PerformanceConfig {
                sequential: cli.sequential,
                threads: cli.threads,
                partition: cli.partition,
            },
            output: OutputConfig {
                format: cli.output_format,
                silent: cli.silent,
                stats: cli.stats,
                no_emoji: cli.no_emoji || std::env::var("NO_EMOJI").is_ok(),
                verbose: cli.verbose,
            },
            verification: VerificationConfig { expected },
        })
    }

    /// Use `expected` only when no expected tally was given on the command line
    pub fn with_expected_fallback(mut self, expected: Option<Tally>) -> Self {
        if self.verification.expected.is_none() {
            self.verification.expected = expected;
        }
        self
    }

    pub fn vocabulary(&self) -> crate::error::Result<Vocabulary> {
        match (self.input.words.is_empty(), self.input.clean_words) {
            (true, false) => Ok(Vocabulary::default()),
            (true, true) => Vocabulary::new_cleaned(crate::tally::DEFAULT_WORDS.iter().copied()),
            (false, false) => Vocabulary::new(&self.input.words),
            (false, true) => Vocabulary::new_cleaned(&self.input.words),
        }
    }

    pub fn corpus(&self) -> Corpus {
        if self.input.files.is_empty() {
            Corpus::default()
        } else {
            Corpus::new(self.input.files.iter().cloned())
        }
    }

    pub fn should_use_parallel(&self) -> bool {
        !self.performance.sequential
    }

    /// Get effective thread count with defaults
    pub fn effective_threads(&self) -> usize {
        self.performance.threads.unwrap_or_else(num_cpus::get)
    }

    pub fn parallel_config(&self) -> ParallelConfig {
        ParallelConfig::new(self.effective_threads()).with_partition(self.performance.partition)
    }

    pub fn format_error_message(&self, message: &str) -> String {
        format_message(MessageKind::Error, message, self.output.no_emoji)
    }

    pub fn format_info_message(&self, message: &str) -> String {
        format_message(MessageKind::Info, message, self.output.no_emoji)
    }
}

/// Load an expected tally from a JSON object of word to count.
///
/// Words are lowercased like vocabulary words; keys that differ only in case
/// are summed.
pub fn load_expected_tally<P: AsRef<Path>>(path: P) -> Result<Tally> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read expected tally: {}", path.display()))?;
    let counts: IndexMap<String, u64> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid expected tally in {}", path.display()))?;

    let mut tally = Tally::new();
    for (word, count) in counts {
        tally.add(&word.to_lowercase(), count);
    }
    Ok(tally)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

/// Prefix a stderr message the way every wordtally diagnostic is prefixed
pub fn format_message(kind: MessageKind, message: &str, no_emoji: bool) -> String {
    let prefix = match (kind, no_emoji) {
        (_, true) => "wordtally:",
        (MessageKind::Info, false) => "🔹",
        (MessageKind::Error, false) => "⚠️",
    };
    format!("{} {}", prefix, message)
}

/// Error message formatting when no config is at hand (startup, signal handling)
pub fn format_error_message_auto(message: &str) -> String {
    format_message(MessageKind::Error, message, std::env::var("NO_EMOJI").is_ok())
}
