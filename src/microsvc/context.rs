//! Context passed to command handlers.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;

/// Everything a handler gets: the JSON input and the shared state the service
/// was built with.
pub struct Context<'a, R> {
    input: Value,
    repo: &'a R,
}

impl<'a, R> Context<'a, R> {
    pub(crate) fn new(input: Value, repo: &'a R) -> Self {
        Self { input, repo }
    }

    /// Deserialize the input payload into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone())
            .map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    pub fn repo(&self) -> &R {
        self.repo
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some()
    }

    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}
