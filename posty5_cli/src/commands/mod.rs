//! CLI subcommand implementations.

pub mod html_pages;
pub mod qr_codes;
pub mod short_links;
pub mod submissions;
pub mod tasks;
pub mod variables;
pub mod workspaces;

use clap::Args;
use posty5_sdk::{Paginated, Pagination};

/// Paging flags shared by every `list` subcommand.
#[derive(Args, Clone, Debug)]
pub struct PageArgs {
    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Results per page
    #[arg(long, default_value = "20")]
    pub page_size: u32,
}

impl PageArgs {
    pub fn pagination(&self) -> Pagination {
        Pagination::default()
            .with_page(self.page)
            .with_page_size(self.page_size)
    }
}

pub fn print_page_summary<T>(page: &Paginated<T>, noun: &str) {
    eprintln!("Page {} ({} {})", page.page, page.items.len(), noun);
}
