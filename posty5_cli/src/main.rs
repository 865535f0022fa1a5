mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use posty5_sdk::{ClientOptions, Config, Posty5};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "posty5")]
#[command(about = "Manage Posty5 short links, QR codes, hosted pages and social publishing")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Log every request and response
    #[arg(long, global = true)]
    debug: bool,

    /// API base URL (defaults to POSTY5_BASE_URL or the production API)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// API key (defaults to POSTY5_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    ShortLinks(commands::short_links::ShortLinksArgs),
    /// Manage QR codes
    QrCodes(commands::qr_codes::QrCodesArgs),
    /// Manage hosted HTML pages
    HtmlPages(commands::html_pages::HtmlPagesArgs),
    /// Manage HTML hosting variables
    Variables(commands::variables::VariablesArgs),
    /// Review form submissions
    Submissions(commands::submissions::SubmissionsArgs),
    /// Manage social publisher workspaces
    Workspaces(commands::workspaces::WorkspacesArgs),
    /// Publish and track social publisher tasks
    Tasks(Box<commands::tasks::TasksArgs>),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let directive = if cli.debug { "posty5=debug" } else { "posty5=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .with_target(false)
        .init();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let mut config = Config::from_env().with_debug(cli.debug);
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(api_key) = &cli.api_key {
        config.api_key = Some(api_key.clone());
    }
    let client = Posty5::with_options(config, ClientOptions::from_env())?;

    match &cli.command {
        Commands::ShortLinks(args) => commands::short_links::run(args, &client, &format).await?,
        Commands::QrCodes(args) => commands::qr_codes::run(args, &client, &format).await?,
        Commands::HtmlPages(args) => commands::html_pages::run(args, &client, &format).await?,
        Commands::Variables(args) => commands::variables::run(args, &client, &format).await?,
        Commands::Submissions(args) => commands::submissions::run(args, &client, &format).await?,
        Commands::Workspaces(args) => commands::workspaces::run(args, &client, &format).await?,
        Commands::Tasks(args) => commands::tasks::run(args.as_ref(), &client, &format).await?,
    }

    Ok(())
}
