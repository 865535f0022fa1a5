use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

/// The wrapper every API response arrives in.
///
/// `result` is not guaranteed on declared-success responses, so it is
/// surfaced as an `Option` and callers choose between [`Envelope::result`]
/// and [`Envelope::require_result`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(alias = "data")]
    pub result: Option<T>,
    #[serde(default)]
    pub message: String,
    pub is_success: Option<bool>,
    #[serde(rename = "exeption", alias = "exception")]
    pub exception: Option<Value>,
}

impl<T> Envelope<T> {
    pub(crate) fn empty() -> Self {
        Self {
            result: None,
            message: String::new(),
            is_success: None,
            exception: None,
        }
    }

    /// The payload, if the server sent one.
    pub fn result(self) -> Option<T> {
        self.result
    }

    /// The payload, or a `MISSING_RESULT` error when the server sent none.
    pub fn require_result(self) -> Result<T, Error> {
        match self.result {
            Some(result) => Ok(result),
            None => Err(Error::missing_result(&self.message)),
        }
    }
}

/// Page of items returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub page_size: i64,
}
