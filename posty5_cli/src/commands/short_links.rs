use anyhow::Result;
use clap::{Args, Subcommand};
use posty5_sdk::short_link::{CreateShortLinkRequest, ShortLinkListParams};
use posty5_sdk::Posty5;

use super::{print_page_summary, PageArgs};
use crate::output::{print_json, print_short_links_table, OutputFormat};

#[derive(Args)]
pub struct ShortLinksArgs {
    #[command(subcommand)]
    pub command: ShortLinksCommand,
}

#[derive(Subcommand)]
pub enum ShortLinksCommand {
    /// List short links
    List {
        /// Filter by name
        #[arg(long)]
        name: Option<String>,

        /// Filter by tag
        #[arg(long)]
        tag: Option<String>,

        /// Filter by your own reference id
        #[arg(long)]
        ref_id: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one short link
    Get { id: String },
    /// Create a short link pointing at a URL
    Create {
        /// Destination URL
        #[arg(long)]
        url: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        tag: Option<String>,

        #[arg(long)]
        ref_id: Option<String>,

        /// QR code template used for the link's QR image
        #[arg(long)]
        template_id: Option<String>,
    },
    /// Delete a short link
    Delete { id: String },
}

pub async fn run(args: &ShortLinksArgs, client: &Posty5, format: &OutputFormat) -> Result<()> {
    let links = client.short_links();
    match &args.command {
        ShortLinksCommand::List {
            name,
            tag,
            ref_id,
            page,
        } => {
            let params = ShortLinkListParams {
                name: name.clone(),
                tag: tag.clone(),
                ref_id: ref_id.clone(),
                ..Default::default()
            };
            let resp = links.list(&params, &page.pagination()).await?;
            print_page_summary(&resp, "short links");
            match format {
                OutputFormat::Table => print_short_links_table(&resp.items),
                OutputFormat::Json => print_json(&resp.items),
            }
        }
        ShortLinksCommand::Get { id } => {
            let link = links.get(id).await?;
            match format {
                OutputFormat::Table => print_short_links_table(&[link]),
                OutputFormat::Json => print_json(&link),
            }
        }
        ShortLinksCommand::Create {
            url,
            name,
            tag,
            ref_id,
            template_id,
        } => {
            let mut request = CreateShortLinkRequest::new(url);
            if let Some(name) = name {
                request = request.with_name(name);
            }
            if let Some(tag) = tag {
                request = request.with_tag(tag);
            }
            if let Some(ref_id) = ref_id {
                request = request.with_ref_id(ref_id);
            }
            if let Some(template_id) = template_id {
                request = request.with_template_id(template_id);
            }
            let link = links.create(&request).await?;
            match format {
                OutputFormat::Table => print_short_links_table(&[link]),
                OutputFormat::Json => print_json(&link),
            }
        }
        ShortLinksCommand::Delete { id } => {
            links.delete(id).await?;
            eprintln!("Deleted short link {}", id);
        }
    }
    Ok(())
}
