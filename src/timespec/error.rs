use thiserror::Error;

/// Errors that can occur when resolving time expressions
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimespecError {
    #[error("Unparsed input in time expression '{expression}': '{fragment}' matches no component")]
    UnparsedInput { expression: String, fragment: String },

    #[error("Invalid calendar value in time expression '{expression}': {reason}")]
    InvalidCalendar { expression: String, reason: String },
}
