use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use posty5_sdk::qr_code::{QrCodeListParams, QrCodeRequest, QrCodeTarget};
use posty5_sdk::Posty5;

use super::{print_page_summary, PageArgs};
use crate::output::{print_json, print_qr_codes_table, OutputFormat};

#[derive(Args)]
pub struct QrCodesArgs {
    #[command(subcommand)]
    pub command: QrCodesCommand,
}

#[derive(Subcommand)]
pub enum QrCodesCommand {
    /// List QR codes
    List {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        tag: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one QR code
    Get { id: String },
    /// Create a QR code
    Create {
        /// Template that controls the QR image style
        #[arg(long)]
        template_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        tag: Option<String>,

        #[command(flatten)]
        target: TargetArgs,
    },
    /// Replace a QR code's target
    Update {
        id: String,

        #[arg(long)]
        template_id: String,

        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        target: TargetArgs,
    },
    /// Delete a QR code
    Delete { id: String },
}

/// Exactly one of these picks what the code encodes.
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Open a URL
    #[arg(long)]
    pub url: Option<String>,

    /// Show free text
    #[arg(long)]
    pub text: Option<String>,

    /// Call a phone number
    #[arg(long)]
    pub call: Option<String>,

    /// Send an SMS to a phone number (body from --message)
    #[arg(long)]
    pub sms: Option<String>,

    #[arg(long, default_value = "")]
    pub message: String,

    /// Compose an email (subject and body from --subject / --body)
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long, default_value = "")]
    pub subject: String,

    #[arg(long, default_value = "")]
    pub body: String,

    /// Join a WiFi network (auth from --wifi-auth, password from --wifi-password)
    #[arg(long)]
    pub wifi: Option<String>,

    #[arg(long, default_value = "WPA")]
    pub wifi_auth: String,

    #[arg(long, default_value = "")]
    pub wifi_password: String,

    /// Open a map location, as "lat,lng"
    #[arg(long)]
    pub geo: Option<String>,
}

impl TargetArgs {
    pub fn to_target(&self) -> Result<QrCodeTarget> {
        let mut targets = Vec::new();
        if let Some(url) = &self.url {
            targets.push(QrCodeTarget::url(url));
        }
        if let Some(text) = &self.text {
            targets.push(QrCodeTarget::free_text(text));
        }
        if let Some(phone) = &self.call {
            targets.push(QrCodeTarget::call(phone));
        }
        if let Some(phone) = &self.sms {
            targets.push(QrCodeTarget::sms(phone, &self.message));
        }
        if let Some(email) = &self.email {
            targets.push(QrCodeTarget::email(email, &self.subject, &self.body));
        }
        if let Some(name) = &self.wifi {
            targets.push(QrCodeTarget::wifi(name, &self.wifi_auth, &self.wifi_password));
        }
        if let Some(geo) = &self.geo {
            let (lat, lng) = geo
                .split_once(',')
                .context("--geo must be \"lat,lng\"")?;
            let lat: f64 = lat.trim().parse().context("invalid latitude")?;
            let lng: f64 = lng.trim().parse().context("invalid longitude")?;
            targets.push(QrCodeTarget::geolocation(lat, lng));
        }

        match targets.len() {
            1 => Ok(targets.remove(0)),
            0 => bail!("pick a target: --url, --text, --call, --sms, --email, --wifi or --geo"),
            _ => bail!("only one target may be given"),
        }
    }
}

pub async fn run(args: &QrCodesArgs, client: &Posty5, format: &OutputFormat) -> Result<()> {
    let codes = client.qr_codes();
    match &args.command {
        QrCodesCommand::List { name, tag, page } => {
            let params = QrCodeListParams {
                name: name.clone(),
                tag: tag.clone(),
                ..Default::default()
            };
            let resp = codes.list(&params, &page.pagination()).await?;
            print_page_summary(&resp, "QR codes");
            match format {
                OutputFormat::Table => print_qr_codes_table(&resp.items),
                OutputFormat::Json => print_json(&resp.items),
            }
        }
        QrCodesCommand::Get { id } => {
            let code = codes.get(id).await?;
            match format {
                OutputFormat::Table => print_qr_codes_table(&[code]),
                OutputFormat::Json => print_json(&code),
            }
        }
        QrCodesCommand::Create {
            template_id,
            name,
            tag,
            target,
        } => {
            let mut request = QrCodeRequest::new(template_id, target.to_target()?);
            if let Some(name) = name {
                request = request.with_name(name);
            }
            if let Some(tag) = tag {
                request = request.with_tag(tag);
            }
            let code = codes.create(&request).await?;
            match format {
                OutputFormat::Table => print_qr_codes_table(&[code]),
                OutputFormat::Json => print_json(&code),
            }
        }
        QrCodesCommand::Update {
            id,
            template_id,
            name,
            target,
        } => {
            let mut request = QrCodeRequest::new(template_id, target.to_target()?);
            if let Some(name) = name {
                request = request.with_name(name);
            }
            let code = codes.update(id, &request).await?;
            match format {
                OutputFormat::Table => print_qr_codes_table(&[code]),
                OutputFormat::Json => print_json(&code),
            }
        }
        QrCodesCommand::Delete { id } => {
            codes.delete(id).await?;
            eprintln!("Deleted QR code {}", id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_target_is_built() {
        let args = TargetArgs {
            call: Some("+15550100".to_string()),
            ..Default::default()
        };
        assert_eq!(args.to_target().unwrap().encode(), "tel:+15550100");
    }

    #[test]
    fn test_geo_is_parsed() {
        let args = TargetArgs {
            geo: Some("30.0444, 31.2357".to_string()),
            ..Default::default()
        };
        assert_eq!(args.to_target().unwrap().encode(), "geo:30.0444,31.2357");
    }

    #[test]
    fn test_target_count_is_checked() {
        assert!(TargetArgs::default().to_target().is_err());
        let args = TargetArgs {
            url: Some("https://example.com".to_string()),
            text: Some("hi".to_string()),
            ..Default::default()
        };
        assert!(args.to_target().is_err());
    }
}
