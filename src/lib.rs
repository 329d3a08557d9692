pub mod cli;
pub mod filters;
pub mod logline;
pub mod pipeline;
pub mod summary;
pub mod timespec;

use std::fs::File;
use std::io::{self, BufReader, Write as _};
use std::path::Path;

use chrono::{Datelike, Local};

use crate::filters::{SlowFilter, TimeRangeFilter, WordFilter};

pub use cli::{Cli, ColorMode, Commands, OutputFormat, cli_parse};
pub use filters::FilterError;
pub use pipeline::{FilterPipeline, PipelineStats};
pub use summary::{LogSummary, format_summary_json, format_summary_text, scan_log};
pub use timespec::{TimespecError, resolve};

/// Boundaries used when --from/--to are not given; they resolve through the
/// same expression path as user input.
const DEFAULT_FROM: &str = "start";
const DEFAULT_TO: &str = "end";

fn boundary_expression(values: &Option<Vec<String>>, default: &str) -> String {
    match values {
        Some(values) => values.join(" "),
        None => default.to_string(),
    }
}

fn open_log(path: &Path) -> Result<BufReader<File>, Box<dyn std::error::Error>> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open log file '{}': {}", path.display(), e))?;
    Ok(BufReader::new(file))
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli_parse();

    // Set up color handling based on user preference
    match cli.color {
        ColorMode::Always => unsafe {
            std::env::set_var("CLICOLOR_FORCE", "1");
        },
        ColorMode::Never => unsafe {
            std::env::set_var("NO_COLOR", "1");
        },
        ColorMode::Auto => {}
    }

    let now = Local::now().naive_local();

    match &cli.command {
        Commands::Filter {
            logfile,
            from,
            to,
            words,
            slow,
            assume_year,
            verbose,
        } => {
            let assumed_year = assume_year.unwrap_or_else(|| now.year());

            let from_expr = boundary_expression(from, DEFAULT_FROM);
            let to_expr = boundary_expression(to, DEFAULT_TO);
            let from_dt = timespec::resolve(&from_expr, now, None)?;
            let to_dt = timespec::resolve(&to_expr, now, Some(from_dt))?;

            let mut pipeline = FilterPipeline::new();
            pipeline.add(Box::new(TimeRangeFilter::new(from_dt, to_dt, assumed_year)));
            if let Some(word_filter) = WordFilter::from_patterns(words)? {
                pipeline.add(Box::new(word_filter));
            }
            if *slow {
                pipeline.add(Box::new(SlowFilter));
            }

            let input = open_log(logfile)?;
            let stdout = io::stdout();
            let mut output = stdout.lock();
            let stats = pipeline
                .run(input, &mut output)
                .map_err(|e| format!("Failed to filter '{}': {}", logfile.display(), e))?;
            output.flush()?;

            if *verbose {
                eprintln!("Time range: {from_dt} to {to_dt}");
                eprintln!(
                    "Lines read: {}, emitted: {}{}",
                    stats.lines_read,
                    stats.lines_emitted,
                    if stats.stopped_early {
                        " (stopped early past the end boundary)"
                    } else {
                        ""
                    }
                );
            }
        }
        Commands::Info {
            files,
            format,
            verbose,
        } => {
            let mut summaries = Vec::with_capacity(files.len());
            for file in files {
                let input = open_log(file)?;
                let summary = scan_log(&file.display().to_string(), input, now.year())
                    .map_err(|e| format!("Failed to read log file '{}': {}", file.display(), e))?;
                summaries.push(summary);
            }
            match format {
                OutputFormat::Text => {
                    print!("{}", format_summary_text(&summaries, *verbose));
                }
                OutputFormat::Json => {
                    println!("{}", format_summary_json(&summaries));
                }
            }
        }
    }

    Ok(())
}
