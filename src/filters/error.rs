use thiserror::Error;

/// Errors that can occur when building line filters
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid --word pattern '{pattern}': {source}")]
    BadPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
