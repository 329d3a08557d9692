use std::io::{BufRead, Write};

use crate::filters::LineFilter;
use crate::logline;

/// Counters for one filter pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    pub lines_read: u64,
    pub lines_emitted: u64,
    /// True when a filter ended the pass before the input was exhausted.
    pub stopped_early: bool,
}

/// Applies a stack of line filters to a log stream.
///
/// Accepted lines are copied to the output verbatim, line terminators
/// included. Restart marker lines always pass regardless of the filters:
/// they mark server restarts and must stay visible in any slice of the log.
#[derive(Default)]
pub struct FilterPipeline {
    filters: Vec<Box<dyn LineFilter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter. Filters are consulted in insertion order and combine
    /// with AND; once one rejects a line the rest are not asked.
    pub fn add(&mut self, filter: Box<dyn LineFilter>) {
        self.filters.push(filter);
    }

    /// Reads `input` line by line and writes the accepted lines to
    /// `output`. Stops at end of input or as soon as a filter reports that
    /// the remaining lines cannot be accepted.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> std::io::Result<PipelineStats> {
        let mut stats = PipelineStats::default();
        let mut line = String::new();
        loop {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            stats.lines_read += 1;
            let content = line.trim_end_matches(['\r', '\n']);
            if logline::is_restart_marker(content) {
                output.write_all(line.as_bytes())?;
                stats.lines_emitted += 1;
                continue;
            }
            if self.filters.iter_mut().all(|filter| filter.accept(content)) {
                output.write_all(line.as_bytes())?;
                stats.lines_emitted += 1;
            }
            if self.filters.iter().any(|filter| filter.skip_remaining()) {
                stats.stopped_early = true;
                break;
            }
        }
        Ok(stats)
    }
}
