// Command-line interface definitions

use clap::{ArgAction, Parser};

use crate::config::OutputFormat;
use crate::parallel::PartitionStrategy;

#[derive(Parser, Debug, Clone)]
#[command(name = "wordtally")]
#[command(about = "Count a fixed vocabulary of words across a text corpus")]
#[command(
    long_about = "Count a fixed vocabulary of words across a text corpus\n\nMODES:\n  (default)     Parallel map-reduce across a pool of worker threads\n  --sequential  Single-threaded baseline\n\nWords are matched as raw, case-insensitive substrings: overlapping matches\nand matches inside longer words all count."
)]
#[command(version)]
#[command(author = "Dirk Loss <mail@dirk-loss.de>")]
#[command(args_override_self = true)]
pub struct Cli {
    /// Files to count (default: shakespeare1.txt .. shakespeare8.txt)
    pub files: Vec<String>,

    /// Comma-separated words to count (default: built-in vocabulary)
    #[arg(short = 'w', long = "words", value_delimiter = ',', help_heading = "Input Options")]
    pub words: Vec<String>,

    /// Strip non-alphabetic characters from each word before counting
    #[arg(long = "clean-words", help_heading = "Input Options")]
    pub clean_words: bool,

    /// Count on a single thread instead of the worker pool
    #[arg(long = "sequential", help_heading = "Performance Options")]
    pub sequential: bool,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short = 'j', long = "threads", help_heading = "Performance Options")]
    pub threads: Option<usize>,

    /// How files are divided between workers
    #[arg(
        long = "partition",
        value_enum,
        default_value = "strided",
        help_heading = "Performance Options"
    )]
    pub partition: PartitionStrategy,

    #[arg(
        short = 'F',
        long = "output-format",
        value_enum,
        default_value = "default",
        help_heading = "Output Options"
    )]
    pub output_format: OutputFormat,

    /// Only report timing, not the counts
    #[arg(long = "silent", help_heading = "Output Options")]
    pub silent: bool,

    /// Print processing statistics to stderr
    #[arg(short = 's', long = "stats", help_heading = "Output Options")]
    pub stats: bool,

    #[arg(long = "no-emoji", help_heading = "Output Options")]
    pub no_emoji: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output Options"
    )]
    pub verbose: u8,

    /// JSON file with the expected counts; exit status is 1 on mismatch
    #[arg(long = "expect", help_heading = "Verification Options")]
    pub expect: Option<String>,

    /// Read configuration from this file instead of searching for .wordtallyrc
    #[arg(long = "config-file", help_heading = "Configuration Options")]
    pub config_file: Option<String>,

    #[arg(long = "ignore-config", help_heading = "Configuration Options")]
    pub ignore_config: bool,

    /// Show configuration file locations and active settings
    #[arg(long = "show-config", help_heading = "Configuration Options")]
    pub show_config: bool,
}
