use posty5_sdk::form_submission::FormSubmission;
use posty5_sdk::html_hosting::HtmlPage;
use posty5_sdk::html_hosting_variables::Variable;
use posty5_sdk::qr_code::QrCode;
use posty5_sdk::short_link::ShortLink;
use posty5_sdk::social_task::Task;
use posty5_sdk::workspace::WorkspaceSummary;
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled, Serialize)]
struct ShortLinkRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Short URL")]
    short_url: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Visitors")]
    visitors: u64,
}

#[derive(Tabled, Serialize)]
struct QrCodeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Encodes")]
    encodes: String,
    #[tabled(rename = "Visitors")]
    visitors: u64,
}

#[derive(Tabled, Serialize)]
struct HtmlPageRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Short URL")]
    short_url: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Submissions")]
    submissions: u64,
}

#[derive(Tabled, Serialize)]
struct VariableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct SubmissionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "#")]
    numbering: String,
    #[tabled(rename = "Form")]
    form_id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Received")]
    received: String,
}

#[derive(Tabled, Serialize)]
struct WorkspaceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Tabled, Serialize)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "#")]
    numbering: String,
    #[tabled(rename = "Workspace")]
    workspace: String,
    #[tabled(rename = "Platforms")]
    platforms: String,
    #[tabled(rename = "Status")]
    status: String,
}

// -- Row builders --

fn build_short_link_rows(links: &[ShortLink]) -> Vec<ShortLinkRow> {
    links
        .iter()
        .map(|l| ShortLinkRow {
            id: l.id.clone(),
            name: l.name.clone().unwrap_or_default(),
            short_url: l.shorter_link.clone(),
            target: l.base_url.clone().unwrap_or_default(),
            status: optional(l.status),
            visitors: l.number_of_visitors,
        })
        .collect()
}

fn build_qr_code_rows(codes: &[QrCode]) -> Vec<QrCodeRow> {
    codes
        .iter()
        .map(|q| QrCodeRow {
            id: q.id.clone(),
            name: q.name.clone().unwrap_or_default(),
            kind: q
                .qr_code_target
                .as_ref()
                .map(|t| t.kind().to_string())
                .unwrap_or_default(),
            encodes: q
                .qr_code_target
                .as_ref()
                .map(|t| t.encode())
                .unwrap_or_default(),
            visitors: q.number_of_visitors.unwrap_or(0),
        })
        .collect()
}

fn build_html_page_rows(pages: &[HtmlPage]) -> Vec<HtmlPageRow> {
    pages
        .iter()
        .map(|p| HtmlPageRow {
            id: p.id.clone(),
            name: p.name.clone().unwrap_or_default(),
            short_url: p.shorter_link.clone(),
            status: optional(p.status),
            submissions: p
                .form_submission
                .as_ref()
                .map(|f| f.number_of_form_submission)
                .unwrap_or(0),
        })
        .collect()
}

fn build_variable_rows(variables: &[Variable]) -> Vec<VariableRow> {
    variables
        .iter()
        .map(|v| VariableRow {
            id: v.id.clone(),
            name: v.name.clone(),
            key: v.key.clone(),
            value: v.value.clone(),
        })
        .collect()
}

fn build_submission_rows(submissions: &[FormSubmission]) -> Vec<SubmissionRow> {
    submissions
        .iter()
        .map(|s| SubmissionRow {
            id: s.id.clone(),
            numbering: s.numbering.clone(),
            form_id: s.form_id.clone(),
            status: s.status.to_string(),
            received: s
                .created_at
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        })
        .collect()
}

fn build_workspace_rows(workspaces: &[WorkspaceSummary]) -> Vec<WorkspaceRow> {
    workspaces
        .iter()
        .map(|w| WorkspaceRow {
            id: w.id.clone(),
            name: w.name.clone(),
            description: w.description.clone(),
        })
        .collect()
}

fn build_task_rows(tasks: &[Task]) -> Vec<TaskRow> {
    tasks
        .iter()
        .map(|t| {
            let platforms: Vec<&str> = [
                (t.is_allow_youtube_channel, "youtube"),
                (t.is_allow_tiktok_account, "tiktok"),
                (t.is_allow_facebook_page, "facebook"),
                (t.is_allow_instagram_account, "instagram"),
            ]
            .iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, name)| *name)
            .collect();
            TaskRow {
                id: t.id.clone(),
                numbering: t.numbering.clone(),
                workspace: t.workspace_name.clone().unwrap_or_default(),
                platforms: platforms.join(", "),
                status: optional(t.current_status),
            }
        })
        .collect()
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// -- Table output --

pub fn print_short_links_table(links: &[ShortLink]) {
    println!("{}", Table::new(build_short_link_rows(links)));
}

pub fn print_qr_codes_table(codes: &[QrCode]) {
    println!("{}", Table::new(build_qr_code_rows(codes)));
}

pub fn print_html_pages_table(pages: &[HtmlPage]) {
    println!("{}", Table::new(build_html_page_rows(pages)));
}

pub fn print_variables_table(variables: &[Variable]) {
    println!("{}", Table::new(build_variable_rows(variables)));
}

pub fn print_submissions_table(submissions: &[FormSubmission]) {
    println!("{}", Table::new(build_submission_rows(submissions)));
}

pub fn print_workspaces_table(workspaces: &[WorkspaceSummary]) {
    println!("{}", Table::new(build_workspace_rows(workspaces)));
}

pub fn print_tasks_table(tasks: &[Task]) {
    println!("{}", Table::new(build_task_rows(tasks)));
}

// -- JSON output --

pub fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_short_link_rows_mapping() {
        let links: Vec<ShortLink> = serde_json::from_value(json!([{
            "_id": "sl-1",
            "shorterLink": "https://posty5.com/s/abc",
            "shortLinkId": "abc",
            "name": "Spring",
            "baseUrl": "https://example.com/spring",
            "status": "approved",
            "numberOfVisitors": 42
        }]))
        .unwrap();
        let rows = build_short_link_rows(&links);
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.id, "sl-1");
        assert_eq!(row.short_url, "https://posty5.com/s/abc");
        assert_eq!(row.target, "https://example.com/spring");
        assert_eq!(row.status, "approved");
        assert_eq!(row.visitors, 42);
    }

    #[test]
    fn test_build_short_link_rows_missing_optionals() {
        let links: Vec<ShortLink> = serde_json::from_value(json!([{"_id": "sl-2"}])).unwrap();
        let row = &build_short_link_rows(&links)[0];
        assert_eq!(row.name, "");
        assert_eq!(row.status, "");
        assert_eq!(row.visitors, 0);
    }

    #[test]
    fn test_build_qr_code_rows_encodes_target() {
        let codes: Vec<QrCode> = serde_json::from_value(json!([{
            "_id": "qr-1",
            "name": "Support line",
            "qrCodeTarget": {"type": "call", "call": {"phoneNumber": "+15550100"}},
            "numberOfVisitors": 3
        }]))
        .unwrap();
        let row = &build_qr_code_rows(&codes)[0];
        assert_eq!(row.kind, "call");
        assert_eq!(row.encodes, "tel:+15550100");
        assert_eq!(row.visitors, 3);
    }

    #[test]
    fn test_build_submission_rows_formats_status_and_date() {
        let submissions: Vec<FormSubmission> = serde_json::from_value(json!([{
            "_id": "sub-1",
            "formId": "contact",
            "numbering": "0007",
            "status": "On Hold",
            "createdAt": "2025-04-02T08:14:59Z"
        }]))
        .unwrap();
        let row = &build_submission_rows(&submissions)[0];
        assert_eq!(row.status, "On Hold");
        assert_eq!(row.received, "2025-04-02 08:14");
    }

    #[test]
    fn test_build_task_rows_lists_enabled_platforms() {
        let tasks: Vec<Task> = serde_json::from_value(json!([{
            "_id": "task-1",
            "numbering": "12",
            "workspaceName": "Brand",
            "isAllowYoutubeChannel": true,
            "isAllowInstagramAccount": true,
            "currentStatus": "processingInPlatform"
        }]))
        .unwrap();
        let row = &build_task_rows(&tasks)[0];
        assert_eq!(row.platforms, "youtube, instagram");
        assert_eq!(row.status, "processingInPlatform");
    }

    #[test]
    fn test_build_rows_empty() {
        assert!(build_html_page_rows(&[]).is_empty());
        assert!(build_variable_rows(&[]).is_empty());
        assert!(build_workspace_rows(&[]).is_empty());
    }

    #[test]
    fn test_json_rows_serializable() {
        let rows = build_workspace_rows(&[WorkspaceSummary {
            id: "ws-1".to_string(),
            name: "Brand".to_string(),
            description: "Main".to_string(),
            image_url: None,
            created_at: None,
        }]);
        let value = serde_json::to_value(&rows).unwrap();
        assert_eq!(value[0]["name"], "Brand");
    }
}
