use chrono::{DateTime, Utc};
use posty5_core::{Query, QueryPairs};
use serde::{Deserialize, Deserializer, Serialize};

use crate::common::{PageInfo, PreviewStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTextTarget {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTarget {
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiTarget {
    pub name: String,
    /// `WPA`, `WEP`, `nopass`, ...
    pub authentication_type: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallTarget {
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsTarget {
    pub phone_number: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlTarget {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeolocationTarget {
    #[serde(deserialize_with = "coordinate")]
    pub latitude: f64,
    #[serde(deserialize_with = "coordinate")]
    pub longitude: f64,
}

/// The API stores coordinates as either numbers or numeric strings.
fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// What a QR code encodes. Exactly one variant per code, so the payload can
/// never disagree with its declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum QrCodeTarget {
    FreeText {
        #[serde(rename = "freeText")]
        free_text: FreeTextTarget,
    },
    Email {
        email: EmailTarget,
    },
    Wifi {
        wifi: WifiTarget,
    },
    Call {
        call: CallTarget,
    },
    Sms {
        sms: SmsTarget,
    },
    Url {
        url: UrlTarget,
    },
    Geolocation {
        geolocation: GeolocationTarget,
    },
}

impl QrCodeTarget {
    pub fn free_text(text: &str) -> Self {
        QrCodeTarget::FreeText {
            free_text: FreeTextTarget {
                text: text.to_string(),
            },
        }
    }

    pub fn email(email: &str, subject: &str, body: &str) -> Self {
        QrCodeTarget::Email {
            email: EmailTarget {
                email: email.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            },
        }
    }

    pub fn wifi(name: &str, authentication_type: &str, password: &str) -> Self {
        QrCodeTarget::Wifi {
            wifi: WifiTarget {
                name: name.to_string(),
                authentication_type: authentication_type.to_string(),
                password: password.to_string(),
            },
        }
    }

    pub fn call(phone_number: &str) -> Self {
        QrCodeTarget::Call {
            call: CallTarget {
                phone_number: phone_number.to_string(),
            },
        }
    }

    pub fn sms(phone_number: &str, message: &str) -> Self {
        QrCodeTarget::Sms {
            sms: SmsTarget {
                phone_number: phone_number.to_string(),
                message: message.to_string(),
            },
        }
    }

    pub fn url(url: &str) -> Self {
        QrCodeTarget::Url {
            url: UrlTarget {
                url: url.to_string(),
            },
        }
    }

    pub fn geolocation(latitude: f64, longitude: f64) -> Self {
        QrCodeTarget::Geolocation {
            geolocation: GeolocationTarget {
                latitude,
                longitude,
            },
        }
    }

    /// Wire name of the variant, as sent in `qrCodeTarget.type`.
    pub fn kind(&self) -> &'static str {
        match self {
            QrCodeTarget::FreeText { .. } => "freeText",
            QrCodeTarget::Email { .. } => "email",
            QrCodeTarget::Wifi { .. } => "wifi",
            QrCodeTarget::Call { .. } => "call",
            QrCodeTarget::Sms { .. } => "sms",
            QrCodeTarget::Url { .. } => "url",
            QrCodeTarget::Geolocation { .. } => "geolocation",
        }
    }

    /// The text the code itself encodes (`options.text` on the wire).
    ///
    /// Components are inserted verbatim; the scanning app does its own parsing.
    pub fn encode(&self) -> String {
        match self {
            QrCodeTarget::FreeText { free_text } => free_text.text.clone(),
            QrCodeTarget::Url { url } => url.url.clone(),
            QrCodeTarget::Email { email } => format!(
                "mailto:{}?subject={}&body={}",
                email.email, email.subject, email.body
            ),
            QrCodeTarget::Call { call } => format!("tel:{}", call.phone_number),
            QrCodeTarget::Sms { sms } => format!("sms:{}?body={}", sms.phone_number, sms.message),
            QrCodeTarget::Geolocation { geolocation } => {
                format!("geo:{},{}", geolocation.latitude, geolocation.longitude)
            }
            QrCodeTarget::Wifi { wifi } => format!(
                "WIFI:T:{};S:{};P:{};",
                wifi.authentication_type, wifi.name, wifi.password
            ),
        }
    }
}

/// Body for create and update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeRequest {
    pub template_id: String,
    #[serde(rename = "qrCodeTarget")]
    pub target: QrCodeTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_landing_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enable_monetization: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
}

impl QrCodeRequest {
    pub fn new(template_id: &str, target: QrCodeTarget) -> Self {
        Self {
            template_id: template_id.to_string(),
            target,
            name: None,
            ref_id: None,
            tag: None,
            custom_landing_id: None,
            is_enable_monetization: None,
            page_info: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn with_ref_id(mut self, ref_id: &str) -> Self {
        self.ref_id = Some(ref_id.to_string());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub qr_code_id: String,
    pub name: Option<String>,
    pub template_id: Option<String>,
    pub number_of_visitors: Option<u64>,
    pub last_visitor_date: Option<DateTime<Utc>>,
    pub ref_id: Option<String>,
    pub tag: Option<String>,
    pub is_enable_monetization: Option<bool>,
    pub page_info: Option<PageInfo>,
    pub qr_code_target: Option<QrCodeTarget>,
    pub status: Option<PreviewStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "qrCodeLandingPageURL")]
    pub qr_code_landing_page_url: Option<String>,
    #[serde(rename = "qrCodeDownloadURL")]
    pub qr_code_download_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct QrCodeListParams {
    pub name: Option<String>,
    pub qr_code_id: Option<String>,
    pub template_id: Option<String>,
    pub tag: Option<String>,
    pub ref_id: Option<String>,
    pub is_enable_monetization: Option<bool>,
    pub status: Option<PreviewStatus>,
    pub created_from: Option<String>,
}

impl QrCodeListParams {
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn with_status(mut self, status: PreviewStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl Query for QrCodeListParams {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = QueryPairs::default();
        pairs.push_opt("name", self.name.as_deref());
        pairs.push_opt("qrCodeId", self.qr_code_id.as_deref());
        pairs.push_opt("templateId", self.template_id.as_deref());
        pairs.push_opt("tag", self.tag.as_deref());
        pairs.push_opt("refId", self.ref_id.as_deref());
        pairs.push_opt("isEnableMonetization", self.is_enable_monetization);
        pairs.push_opt("status", self.status);
        pairs.push_opt("createdFrom", self.created_from.as_deref());
        pairs.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encodes_each_target_kind() {
        assert_eq!(QrCodeTarget::free_text("hello world").encode(), "hello world");
        assert_eq!(QrCodeTarget::url("https://posty5.com").encode(), "https://posty5.com");
        assert_eq!(
            QrCodeTarget::email("a@b.co", "Hi", "Body text").encode(),
            "mailto:a@b.co?subject=Hi&body=Body text"
        );
        assert_eq!(QrCodeTarget::call("+15550100").encode(), "tel:+15550100");
        assert_eq!(
            QrCodeTarget::sms("+15550100", "Thanks").encode(),
            "sms:+15550100?body=Thanks"
        );
        assert_eq!(
            QrCodeTarget::geolocation(40.7128, -74.006).encode(),
            "geo:40.7128,-74.006"
        );
        assert_eq!(
            QrCodeTarget::wifi("Office", "WPA", "s3cret").encode(),
            "WIFI:T:WPA;S:Office;P:s3cret;"
        );
    }

    #[test]
    fn target_is_tagged_by_type() {
        let value = serde_json::to_value(QrCodeTarget::wifi("Office", "WPA", "pw")).unwrap();
        assert_eq!(
            value,
            json!({"type": "wifi", "wifi": {"name": "Office", "authenticationType": "WPA", "password": "pw"}})
        );

        let value = serde_json::to_value(QrCodeTarget::free_text("x")).unwrap();
        assert_eq!(value, json!({"type": "freeText", "freeText": {"text": "x"}}));
    }

    #[test]
    fn decodes_string_coordinates() {
        let target: QrCodeTarget = serde_json::from_value(json!({
            "type": "geolocation",
            "geolocation": {"latitude": "51.5074", "longitude": -0.1278}
        }))
        .unwrap();
        assert_eq!(target, QrCodeTarget::geolocation(51.5074, -0.1278));
        assert_eq!(target.kind(), "geolocation");
    }
}
