use std::fmt::{self, Display};
use std::io;

/// Error type for the fallible parts of the crate: parsing input JSON,
/// converting overly deep documents, invalid option combinations, and
/// file output.
///
/// The formatting engine itself is total over well-formed [`crate::Value`]
/// input and never produces one of these.
#[derive(Debug)]
pub struct CompactJsonError {
    pub message: String,
    source: Option<io::Error>,
}

impl CompactJsonError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), source: None }
    }

    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        let message = format!("{}: {}", message.into(), source);
        Self { message, source: Some(source) }
    }

    /// True when the error originated from an I/O operation rather than
    /// from parsing or configuration.
    pub fn is_io(&self) -> bool {
        self.source.is_some()
    }
}

impl Display for CompactJsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CompactJsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}
