//! Conversion policies.
//!
//! The converter hands every violation to a [`ConverterContext`]. The policy
//! either aborts the conversion by returning the report as an `Err`, or
//! records it and lets the converter carry on.

use crate::error::ConversionError;

pub trait ConverterContext {
    /// Whether the converter should abandon the composite it is filling.
    fn stopped(&self) -> bool;

    /// Handle one violation. Returning `Err` aborts the whole conversion.
    fn report_occurred(&mut self, error: ConversionError) -> Result<(), ConversionError>;

    /// Whether reports are discarded unread. Converters skip rendering
    /// detailed messages for such a context.
    fn is_speculative(&self) -> bool {
        false
    }
}

/// Aborts on the first violation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailFastContext;

impl ConverterContext for FailFastContext {
    fn stopped(&self) -> bool {
        false
    }

    fn report_occurred(&mut self, error: ConversionError) -> Result<(), ConversionError> {
        Err(error)
    }
}

/// Aborts on the first violation, whose message nobody reads. Used to try
/// union branches.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeculativeContext;

impl ConverterContext for SpeculativeContext {
    fn stopped(&self) -> bool {
        false
    }

    fn report_occurred(&mut self, error: ConversionError) -> Result<(), ConversionError> {
        Err(error)
    }

    fn is_speculative(&self) -> bool {
        true
    }
}

/// Records every violation and never stops.
#[derive(Debug, Clone, Default)]
pub struct ErrorCollectingContext {
    errors: Vec<ConversionError>,
}

impl ErrorCollectingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[ConversionError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ConversionError> {
        self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl ConverterContext for ErrorCollectingContext {
    fn stopped(&self) -> bool {
        false
    }

    fn report_occurred(&mut self, error: ConversionError) -> Result<(), ConversionError> {
        self.errors.push(error);
        Ok(())
    }
}

/// Records violations until `limit` of them have been seen, then signals stop.
#[derive(Debug, Clone)]
pub struct BoundedErrorContext {
    limit: usize,
    errors: Vec<ConversionError>,
}

impl BoundedErrorContext {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            errors: Vec::new(),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn errors(&self) -> &[ConversionError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ConversionError> {
        self.errors
    }
}

impl ConverterContext for BoundedErrorContext {
    fn stopped(&self) -> bool {
        self.errors.len() >= self.limit
    }

    fn report_occurred(&mut self, error: ConversionError) -> Result<(), ConversionError> {
        if !self.stopped() {
            self.errors.push(error);
        }
        Ok(())
    }
}
