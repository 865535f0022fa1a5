use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use posty5_sdk::html_hosting::{GithubInfo, HtmlPageListParams, HtmlPageRequest};
use posty5_sdk::{FilePayload, Posty5};

use super::{print_page_summary, PageArgs};
use crate::output::{print_html_pages_table, print_json, OutputFormat};

#[derive(Args)]
pub struct HtmlPagesArgs {
    #[command(subcommand)]
    pub command: HtmlPagesCommand,
}

#[derive(Subcommand)]
pub enum HtmlPagesCommand {
    /// List hosted pages
    List {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        tag: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one hosted page
    Get { id: String },
    /// Host a page from a local HTML file or a GitHub URL
    Create {
        #[arg(long)]
        name: String,

        #[command(flatten)]
        source: SourceArgs,

        #[arg(long)]
        tag: Option<String>,
    },
    /// Replace a hosted page's content
    Update {
        id: String,

        #[arg(long)]
        name: String,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// List the forms found on a page
    Forms { id: String },
    /// Drop the CDN cache for a page
    CleanCache { id: String },
    /// Delete a hosted page
    Delete { id: String },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Local HTML file to upload
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// GitHub file URL to serve
    #[arg(long)]
    pub github: Option<String>,
}

pub async fn run(args: &HtmlPagesArgs, client: &Posty5, format: &OutputFormat) -> Result<()> {
    let pages = client.html_hosting();
    match &args.command {
        HtmlPagesCommand::List { name, tag, page } => {
            let params = HtmlPageListParams {
                name: name.clone(),
                tag: tag.clone(),
                ..Default::default()
            };
            let resp = pages.list(&params, &page.pagination()).await?;
            print_page_summary(&resp, "pages");
            match format {
                OutputFormat::Table => print_html_pages_table(&resp.items),
                OutputFormat::Json => print_json(&resp.items),
            }
        }
        HtmlPagesCommand::Get { id } => {
            let page = pages.get(id).await?;
            match format {
                OutputFormat::Table => print_html_pages_table(&[page]),
                OutputFormat::Json => print_json(&page),
            }
        }
        HtmlPagesCommand::Create { name, source, tag } => {
            let mut request = HtmlPageRequest::new(name);
            if let Some(tag) = tag {
                request = request.with_tag(tag);
            }
            match (&source.file, &source.github) {
                (Some(path), _) => {
                    let file = FilePayload::from_path(path, None).await?;
                    print_json(&pages.create_with_file(&request, &file).await?);
                }
                (None, Some(url)) => {
                    let page = pages.create_with_github(&request, &GithubInfo::new(url)).await?;
                    print_json(&page);
                }
                (None, None) => bail!("pass --file or --github"),
            }
        }
        HtmlPagesCommand::Update { id, name, source } => {
            let request = HtmlPageRequest::new(name);
            match (&source.file, &source.github) {
                (Some(path), _) => {
                    let file = FilePayload::from_path(path, None).await?;
                    print_json(&pages.update_with_file(id, &request, &file).await?);
                }
                (None, Some(url)) => {
                    let page = pages
                        .update_with_github(id, &request, &GithubInfo::new(url))
                        .await?;
                    print_json(&page);
                }
                (None, None) => bail!("pass --file or --github"),
            }
        }
        HtmlPagesCommand::Forms { id } => {
            let forms = pages.lookup_forms(id).await?;
            print_json(&forms);
        }
        HtmlPagesCommand::CleanCache { id } => {
            pages.clean_cache(id).await?;
            eprintln!("Cleaned cache for page {}", id);
        }
        HtmlPagesCommand::Delete { id } => {
            pages.delete(id).await?;
            eprintln!("Deleted page {}", id);
        }
    }
    Ok(())
}
