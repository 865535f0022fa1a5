use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use posty5_sdk::form_submission::{ChangeStatusRequest, FormSubmissionListParams};
use posty5_sdk::{FormStatus, Posty5};

use super::{print_page_summary, PageArgs};
use crate::output::{print_json, print_submissions_table, OutputFormat};

#[derive(Args)]
pub struct SubmissionsArgs {
    #[command(subcommand)]
    pub command: SubmissionsCommand,
}

#[derive(Subcommand)]
pub enum SubmissionsCommand {
    /// List submissions collected by one hosted page
    List {
        /// Hosted page id
        #[arg(long)]
        page_id: String,

        /// Filter by form id
        #[arg(long)]
        form_id: Option<String>,

        /// Filter by status (e.g. "new", "pending-review", "on-hold")
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one submission
    Get { id: String },
    /// Show the ids of the neighbouring submissions
    Neighbours { id: String },
    /// Move a submission to a new status
    SetStatus {
        id: String,

        #[arg(long)]
        status: String,

        /// Reason, for rejections
        #[arg(long)]
        reason: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a submission
    Delete { id: String },
}

fn parse_status(input: &str) -> Result<FormStatus> {
    input.parse::<FormStatus>().map_err(|e| anyhow!(e))
}

pub async fn run(args: &SubmissionsArgs, client: &Posty5, format: &OutputFormat) -> Result<()> {
    let submissions = client.form_submissions();
    match &args.command {
        SubmissionsCommand::List {
            page_id,
            form_id,
            status,
            page,
        } => {
            let mut params = FormSubmissionListParams::new(page_id);
            if let Some(form_id) = form_id {
                params = params.with_form_id(form_id);
            }
            if let Some(status) = status {
                params = params.with_status(parse_status(status)?);
            }
            let resp = submissions.list(&params, &page.pagination()).await?;
            print_page_summary(&resp, "submissions");
            match format {
                OutputFormat::Table => print_submissions_table(&resp.items),
                OutputFormat::Json => print_json(&resp.items),
            }
        }
        SubmissionsCommand::Get { id } => {
            let submission = submissions.get(id).await?;
            match format {
                OutputFormat::Table => print_submissions_table(&[submission]),
                OutputFormat::Json => print_json(&submission),
            }
        }
        SubmissionsCommand::Neighbours { id } => {
            print_json(&submissions.next_previous(id).await?);
        }
        SubmissionsCommand::SetStatus {
            id,
            status,
            reason,
            notes,
        } => {
            let mut request = ChangeStatusRequest::new(parse_status(status)?);
            if let Some(reason) = reason {
                request = request.with_rejected_reason(reason);
            }
            if let Some(notes) = notes {
                request = request.with_notes(notes);
            }
            let result = submissions.change_status(id, &request).await?;
            print_json(&result);
        }
        SubmissionsCommand::Delete { id } => {
            submissions.delete(id).await?;
            eprintln!("Deleted submission {}", id);
        }
    }
    Ok(())
}
