// Conversion tracking as a side-effect port: fired best-effort before an
// outbound navigation, never allowed to block or fail it.

use std::time::Duration;

use async_trait::async_trait;

use crate::util::env;

/// Outbound destinations the storefront tracks conversions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundKind {
    Whatsapp,
    Directions,
    Phone,
}

impl OutboundKind {
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.trim().to_lowercase().as_str() {
            "whatsapp" => Some(Self::Whatsapp),
            "directions" | "map" => Some(Self::Directions),
            "phone" | "call" => Some(Self::Phone),
            _ => None,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Whatsapp => "whatsapp",
            Self::Directions => "directions",
            Self::Phone => "phone",
        }
    }

    /// The external link this kind navigates to.
    pub fn target_url(self) -> String {
        match self {
            Self::Whatsapp => env::whatsapp_url(),
            Self::Directions => env::directions_url(),
            Self::Phone => env::phone_url(),
        }
    }
}

#[async_trait]
pub trait ConversionTracker: Send + Sync {
    /// Record a conversion for the outbound click. Implementations log
    /// failures and return normally; navigation proceeds regardless.
    async fn track(&self, kind: OutboundKind);
}

/// Google Ads conversion endpoint, fire-and-log.
pub struct GoogleAdsTracker {
    client: reqwest::Client,
    endpoint: String,
    send_to: String,
}

impl GoogleAdsTracker {
    pub fn from_env() -> Option<Self> {
        let endpoint = env::env_opt("ADS_CONVERSION_ENDPOINT")?;
        let send_to = env::env_opt("ADS_CONVERSION_LABEL")
            .unwrap_or_else(|| "AW-17695821706/DGiTCLz3x8UbEIqfg_ZB".into());
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .ok()?;
        Some(Self { client, endpoint, send_to })
    }
}

#[async_trait]
impl ConversionTracker for GoogleAdsTracker {
    async fn track(&self, kind: OutboundKind) {
        let payload = serde_json::json!({
            "event": "conversion",
            "send_to": self.send_to,
            "source": kind.slug(),
        });

        match self.client.post(&self.endpoint).json(&payload).send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::debug!(kind = kind.slug(), "conversion recorded");
            }
            Ok(resp) => {
                tracing::warn!(kind = kind.slug(), status = %resp.status(), "conversion endpoint rejected event");
            }
            Err(err) => {
                tracing::warn!(kind = kind.slug(), error = %err, "conversion tracking failed");
            }
        }
    }
}

/// Tracker used when no conversion endpoint is configured.
pub struct NoopTracker;

#[async_trait]
impl ConversionTracker for NoopTracker {
    async fn track(&self, kind: OutboundKind) {
        tracing::debug!(kind = kind.slug(), "conversion tracking disabled");
    }
}
