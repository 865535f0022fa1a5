//! Key/value variables injected into hosted pages: `/api/html-hosting-variables`.
//!
//! Keys must carry the `pst5_` prefix; the check runs before any request.

pub mod client;
pub mod types;

pub use client::HtmlHostingVariablesClient;
pub use types::{Variable, VariableListParams, VariableRequest};
