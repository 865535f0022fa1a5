use anyhow::Result;
use clap::{Args, Subcommand};
use posty5_sdk::html_hosting_variables::{VariableListParams, VariableRequest};
use posty5_sdk::Posty5;

use super::{print_page_summary, PageArgs};
use crate::output::{print_json, print_variables_table, OutputFormat};

#[derive(Args)]
pub struct VariablesArgs {
    #[command(subcommand)]
    pub command: VariablesCommand,
}

#[derive(Subcommand)]
pub enum VariablesCommand {
    /// List variables
    List {
        /// Filter by key
        #[arg(long)]
        key: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one variable
    Get { id: String },
    /// Create a variable. Keys must start with "pst5_".
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        key: String,

        #[arg(long)]
        value: String,
    },
    /// Update a variable
    Update {
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        key: String,

        #[arg(long)]
        value: String,
    },
    /// Delete a variable
    Delete { id: String },
}

pub async fn run(args: &VariablesArgs, client: &Posty5, format: &OutputFormat) -> Result<()> {
    let variables = client.html_hosting_variables();
    match &args.command {
        VariablesCommand::List { key, page } => {
            let params = VariableListParams {
                key: key.clone(),
                ..Default::default()
            };
            let resp = variables.list(&params, &page.pagination()).await?;
            print_page_summary(&resp, "variables");
            match format {
                OutputFormat::Table => print_variables_table(&resp.items),
                OutputFormat::Json => print_json(&resp.items),
            }
        }
        VariablesCommand::Get { id } => {
            let variable = variables.get(id).await?;
            match format {
                OutputFormat::Table => print_variables_table(&[variable]),
                OutputFormat::Json => print_json(&variable),
            }
        }
        VariablesCommand::Create { name, key, value } => {
            variables
                .create(&VariableRequest::new(name, key, value))
                .await?;
            eprintln!("Created variable {}", key);
        }
        VariablesCommand::Update {
            id,
            name,
            key,
            value,
        } => {
            variables
                .update(id, &VariableRequest::new(name, key, value))
                .await?;
            eprintln!("Updated variable {}", id);
        }
        VariablesCommand::Delete { id } => {
            variables.delete(id).await?;
            eprintln!("Deleted variable {}", id);
        }
    }
    Ok(())
}
