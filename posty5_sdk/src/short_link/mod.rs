//! Short links: `/api/short-link`.

pub mod client;
pub mod types;

pub use client::ShortLinkClient;
pub use types::{CreateShortLinkRequest, ShortLink, ShortLinkListParams, UpdateShortLinkRequest};
