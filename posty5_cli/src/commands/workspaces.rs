use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use posty5_sdk::workspace::{WorkspaceListParams, WorkspaceRequest};
use posty5_sdk::{FilePayload, Posty5};

use super::{print_page_summary, PageArgs};
use crate::output::{print_json, print_workspaces_table, OutputFormat};

#[derive(Args)]
pub struct WorkspacesArgs {
    #[command(subcommand)]
    pub command: WorkspacesCommand,
}

#[derive(Subcommand)]
pub enum WorkspacesCommand {
    /// List workspaces
    List {
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one workspace and its connected accounts
    Get { id: String },
    /// Create a workspace
    Create {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Logo image to upload
        #[arg(long)]
        logo: Option<PathBuf>,
    },
    /// Update a workspace
    Update {
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Replacement logo image
        #[arg(long)]
        logo: Option<PathBuf>,
    },
    /// Delete a workspace
    Delete { id: String },
}

async fn load_logo(path: &Option<PathBuf>) -> Result<Option<FilePayload>> {
    match path {
        Some(path) => Ok(Some(FilePayload::from_path(path, None).await?)),
        None => Ok(None),
    }
}

pub async fn run(args: &WorkspacesArgs, client: &Posty5, format: &OutputFormat) -> Result<()> {
    let workspaces = client.workspaces();
    match &args.command {
        WorkspacesCommand::List { name, page } => {
            let params = WorkspaceListParams {
                name: name.clone(),
                ..Default::default()
            };
            let resp = workspaces.list(&params, &page.pagination()).await?;
            print_page_summary(&resp, "workspaces");
            match format {
                OutputFormat::Table => print_workspaces_table(&resp.items),
                OutputFormat::Json => print_json(&resp.items),
            }
        }
        WorkspacesCommand::Get { id } => {
            print_json(&workspaces.get(id).await?);
        }
        WorkspacesCommand::Create {
            name,
            description,
            logo,
        } => {
            let logo = load_logo(logo).await?;
            let saved = workspaces
                .create(&WorkspaceRequest::new(name, description), logo.as_ref())
                .await?;
            print_json(&saved);
        }
        WorkspacesCommand::Update {
            id,
            name,
            description,
            logo,
        } => {
            let logo = load_logo(logo).await?;
            let saved = workspaces
                .update(id, &WorkspaceRequest::new(name, description), logo.as_ref())
                .await?;
            print_json(&saved);
        }
        WorkspacesCommand::Delete { id } => {
            workspaces.delete(id).await?;
            eprintln!("Deleted workspace {}", id);
        }
    }
    Ok(())
}
