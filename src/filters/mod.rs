//! Line filters applied by the filter pipeline
//!
//! Each filter is a per-line predicate; the pipeline writes a line to the
//! output only when every active filter accepts it. A filter may also
//! signal that no later line can possibly be accepted, which ends the run
//! early instead of scanning the rest of the file.
//!
//! # Filters
//!
//! - time range: keep lines between two resolved boundaries
//! - word: keep lines matching any of the given regex patterns
//! - slow: keep lines reporting operations of 1000 ms or more

pub mod error;
pub mod range;
pub mod slow;
pub mod word;

pub use error::FilterError;
pub use range::TimeRangeFilter;
pub use slow::SlowFilter;
pub use word::WordFilter;

/// A per-line predicate in the filter pipeline.
pub trait LineFilter {
    /// Whether the line should be written to the output.
    fn accept(&mut self, line: &str) -> bool;

    /// Whether no later line can be accepted anymore. Checked after every
    /// line; the pipeline stops reading as soon as any filter reports true.
    fn skip_remaining(&self) -> bool {
        false
    }
}
