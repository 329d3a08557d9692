use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// A tool to slice and summarize ctime-stamped log files
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Control colored output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the lines of a log file that pass all given filters
    Filter {
        /// Log file to filter
        logfile: PathBuf,

        /// Start of the time range, e.g. "Sun 10:00", "Sep 29", "now -1h"
        #[arg(long, value_name = "EXPR", num_args = 1..)]
        from: Option<Vec<String>>,

        /// End of the time range; a bare offset like "+1h" is relative to --from
        /// (write leading-minus offsets as --to="-30min")
        #[arg(long, value_name = "EXPR", num_args = 1..)]
        to: Option<Vec<String>>,

        /// Only keep lines matching any of these regex patterns
        #[arg(long = "word", value_name = "PATTERN")]
        words: Vec<String>,

        /// Only keep lines reporting operations of 1000 ms or more
        #[arg(long)]
        slow: bool,

        /// Year to assume for log timestamps, which carry none
        #[arg(long, value_name = "YEAR", env = "LOG_SIFT_ASSUME_YEAR")]
        assume_year: Option<i32>,

        /// Print pass statistics to stderr when done
        #[arg(short, long)]
        verbose: bool,
    },
    /// Summarize one or more log files
    Info {
        /// Log files to summarize
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// List every restart banner with its line number
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Output format for the info report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// When to color console output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
