//! Conversion reports.

use std::error::Error as StdError;
use std::sync::Arc;

use jsonie_pointer::JsonPointer;
use thiserror::Error;

pub type Cause = Arc<dyn StdError + Send + Sync>;

/// A mismatch between an input value and the descriptor it was converted
/// against, located by a pointer into the input.
#[derive(Debug, Clone, Error)]
#[error("{message} at {pointer}")]
pub struct ConversionError {
    pointer: JsonPointer,
    message: String,
    #[source]
    cause: Option<Cause>,
}

impl ConversionError {
    pub fn new(pointer: JsonPointer, message: impl Into<String>) -> Self {
        Self {
            pointer,
            message: message.into(),
            cause: None,
        }
    }

    /// Chain the lower-level failure that triggered this report.
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.cause = Some(Arc::new(cause));
        self
    }

    pub fn pointer(&self) -> &JsonPointer {
        &self.pointer
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }
}

/// Failure to look up a named alias in a [`ModuleType`](crate::ModuleType).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("alias not found: {0}")]
    NotFound(String),
    #[error("alias {0} refers back to itself")]
    Cycle(String),
}
