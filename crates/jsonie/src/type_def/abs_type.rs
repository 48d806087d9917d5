//! Shared per-node metadata.

use std::sync::Arc;

use crate::value::JsonicValue;

/// Post-conversion check: receives the converted value, returns `None` if ok or
/// `Some(message)` if the value must be rejected.
pub type ValidatorFn = Arc<dyn Fn(&JsonicValue) -> Option<String> + Send + Sync>;

/// Fields common to all type nodes (metadata + validators).
#[derive(Clone, Default)]
pub struct BaseInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub validators: Vec<(ValidatorFn, Option<String>)>,
}

impl std::fmt::Debug for BaseInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseInfo")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("validators_count", &self.validators.len())
            .finish()
    }
}

impl BaseInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_validator<F>(mut self, validator: F, name: Option<&str>) -> Self
    where
        F: Fn(&JsonicValue) -> Option<String> + Send + Sync + 'static,
    {
        self.validators
            .push((Arc::new(validator), name.map(str::to_string)));
        self
    }
}
